use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::view::errors::{render_not_found, render_server_error};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("seed error: {0}")]
    Seed(String),
    #[error("{0}")]
    Other(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Other(format!("storage task failed: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Seed(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let markup = match self {
            AppError::NotFound(what) => {
                tracing::warn!(%what, "not found");
                render_not_found()
            }
            other => {
                // details stay in the log, the page is generic
                tracing::error!(error = %other, "request failed");
                render_server_error()
            }
        };
        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(markup.into_string())
    }
}
