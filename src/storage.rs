use async_trait::async_trait;

use crate::error::AppError;
use crate::forms::Choice;
use crate::model::{Entity, WithRelated};

mod products;
mod shipments;
mod sql_storage;

pub use sql_storage::SqlStorage;

/// Persistence operations the generic CRUD handlers need for one entity.
///
/// `list_with_related` must issue a constant number of queries no matter how
/// many rows it returns.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list_with_related(&self) -> Result<Vec<WithRelated<E>>, AppError>;

    async fn get_with_related(&self, id: i64) -> Result<Option<WithRelated<E>>, AppError>;

    /// Choices offered by the entity's form for its multi-valued fields.
    async fn form_choices(&self) -> Result<Vec<Choice>, AppError>;

    async fn insert(&self, input: E::Input) -> Result<i64, AppError>;

    /// Returns `false` when no row with `id` exists.
    async fn update(&self, id: i64, input: E::Input) -> Result<bool, AppError>;

    /// Returns `false` when no row with `id` exists.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
