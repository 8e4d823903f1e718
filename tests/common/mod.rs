#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test;
use scraper::{Html, Selector};

use productos::error::AppError;
use productos::storage::SqlStorage;

pub struct TestContext {
    pub storage: SqlStorage,
}

/// Fresh in-memory database with the schema and `fixture_sql` loaded.
pub async fn setup_test_context(fixture_sql: &str) -> Result<TestContext, AppError> {
    let storage = SqlStorage::open_in_memory()?;

    storage
        .execute_batch(include_str!("../../src/sql/schema/sqlite/00_table_drop.sql").to_string())
        .await?;

    let schema = [
        include_str!("../../src/sql/schema/sqlite/00_producto.sql"),
        include_str!("../../src/sql/schema/sqlite/01_embarque.sql"),
        include_str!("../../src/sql/schema/sqlite/02_embarque_productos.sql"),
    ]
    .join("\n");
    storage.execute_batch(schema).await?;

    if !fixture_sql.is_empty() {
        storage.execute_batch(fixture_sql.to_string()).await?;
    }

    Ok(TestContext { storage })
}

pub async fn read_html<B: MessageBody>(resp: ServiceResponse<B>) -> Html {
    let body = test::read_body(resp).await;
    let body_str = String::from_utf8(body.to_vec()).expect("response should be UTF-8");
    Html::parse_document(&body_str)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .expect("Location should be ascii")
        .to_string()
}

pub fn texts(doc: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    doc.select(&selector)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .collect()
}

pub fn attrs(doc: &Html, selector: &str, attr: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    doc.select(&selector)
        .filter_map(|e| e.value().attr(attr).map(ToString::to_string))
        .collect()
}
