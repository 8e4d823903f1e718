//! Generic CRUD handlers, instantiated once per entity by the routing table.

use actix_web::http::header;
use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use maud::Markup;
use std::marker::PhantomData;

use super::routes::Urls;
use crate::error::AppError;
use crate::forms::{BoundForm, FormData, ModelForm};
use crate::model::{Entity, WithRelated};
use crate::storage::{Repository, SqlStorage};
use crate::view::Templates;
use crate::view::form::{FormMode, render_form_page};

/// Per-entity handler settings, injected as app data.
pub struct ViewConfig<E> {
    /// Where successful create/update/delete submissions redirect to.
    pub success_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> ViewConfig<E> {
    #[must_use]
    pub fn new(success_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            _entity: PhantomData,
        }
    }

    /// Success redirects go back to the entity's list.
    #[must_use]
    pub fn from_urls(urls: &Urls) -> Self {
        Self::new(urls.list::<E>())
    }
}

fn html(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}

fn redirect(to: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, to))
        .finish()
}

fn not_found<E: Entity>(pk: i64) -> AppError {
    AppError::NotFound(format!("{} {pk}", E::VERBOSE_NAME))
}

async fn get_or_404<E>(storage: &SqlStorage, pk: i64) -> Result<WithRelated<E>, AppError>
where
    E: Entity,
    SqlStorage: Repository<E>,
{
    <SqlStorage as Repository<E>>::get_with_related(storage, pk)
        .await?
        .ok_or_else(|| not_found::<E>(pk))
}

/// All records, each with its related collection prefetched.
pub async fn list<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
) -> Result<HttpResponse, AppError>
where
    E: Templates,
    SqlStorage: Repository<E>,
{
    let items = <SqlStorage as Repository<E>>::list_with_related(storage.get_ref()).await?;
    tracing::debug!(entity = E::VERBOSE_NAME_PLURAL, rows = items.len(), "list");
    Ok(html(E::list_page(&items, &urls)))
}

pub async fn detail<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
    pk: web::Path<i64>,
) -> Result<HttpResponse, AppError>
where
    E: Templates,
    SqlStorage: Repository<E>,
{
    let item = get_or_404::<E>(storage.get_ref(), pk.into_inner()).await?;
    Ok(html(E::detail_page(&item, &urls)))
}

pub async fn create_form<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
) -> Result<HttpResponse, AppError>
where
    E: ModelForm + Templates,
    SqlStorage: Repository<E>,
{
    let choices = <SqlStorage as Repository<E>>::form_choices(storage.get_ref()).await?;
    let form = BoundForm::unbound(E::FIELDS, &choices);
    Ok(html(render_form_page::<E>(FormMode::Create, &form, &urls)))
}

pub async fn create<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
    config: Data<ViewConfig<E>>,
    body: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError>
where
    E: ModelForm + Templates,
    SqlStorage: Repository<E>,
{
    let data = FormData::from(body.into_inner());
    let choices = <SqlStorage as Repository<E>>::form_choices(storage.get_ref()).await?;
    match E::clean(&data, &choices) {
        Ok(input) => {
            <SqlStorage as Repository<E>>::insert(storage.get_ref(), input).await?;
            Ok(redirect(&config.success_url))
        }
        Err(errors) => {
            tracing::debug!(entity = E::VERBOSE_NAME, fields = errors.len(), "create rejected");
            let form = BoundForm::new(E::FIELDS, &data, &choices, &errors);
            Ok(html(render_form_page::<E>(FormMode::Create, &form, &urls)))
        }
    }
}

pub async fn update_form<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
    pk: web::Path<i64>,
) -> Result<HttpResponse, AppError>
where
    E: ModelForm + Templates,
    SqlStorage: Repository<E>,
{
    let item = get_or_404::<E>(storage.get_ref(), pk.into_inner()).await?;
    let choices = <SqlStorage as Repository<E>>::form_choices(storage.get_ref()).await?;
    let form = BoundForm::new(E::FIELDS, &E::initial(&item), &choices, &Default::default());
    Ok(html(render_form_page::<E>(
        FormMode::Update(item.record.id()),
        &form,
        &urls,
    )))
}

pub async fn update<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
    config: Data<ViewConfig<E>>,
    pk: web::Path<i64>,
    body: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError>
where
    E: ModelForm + Templates,
    SqlStorage: Repository<E>,
{
    let pk = pk.into_inner();
    // the record must exist before the submission is even looked at
    get_or_404::<E>(storage.get_ref(), pk).await?;

    let data = FormData::from(body.into_inner());
    let choices = <SqlStorage as Repository<E>>::form_choices(storage.get_ref()).await?;
    match E::clean(&data, &choices) {
        Ok(input) => {
            if !<SqlStorage as Repository<E>>::update(storage.get_ref(), pk, input).await? {
                return Err(not_found::<E>(pk));
            }
            Ok(redirect(&config.success_url))
        }
        Err(errors) => {
            tracing::debug!(entity = E::VERBOSE_NAME, pk, fields = errors.len(), "update rejected");
            let form = BoundForm::new(E::FIELDS, &data, &choices, &errors);
            Ok(html(render_form_page::<E>(FormMode::Update(pk), &form, &urls)))
        }
    }
}

pub async fn delete_confirm<E>(
    storage: Data<SqlStorage>,
    urls: Data<Urls>,
    pk: web::Path<i64>,
) -> Result<HttpResponse, AppError>
where
    E: Templates,
    SqlStorage: Repository<E>,
{
    let item = get_or_404::<E>(storage.get_ref(), pk.into_inner()).await?;
    Ok(html(E::confirm_delete_page(&item, &urls)))
}

pub async fn delete<E>(
    storage: Data<SqlStorage>,
    config: Data<ViewConfig<E>>,
    pk: web::Path<i64>,
) -> Result<HttpResponse, AppError>
where
    E: Entity,
    SqlStorage: Repository<E>,
{
    let pk = pk.into_inner();
    if !<SqlStorage as Repository<E>>::delete(storage.get_ref(), pk).await? {
        return Err(not_found::<E>(pk));
    }
    Ok(redirect(&config.success_url))
}

/// Fallback for paths no route matches.
pub async fn unmatched(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(req.path().to_string()))
}
