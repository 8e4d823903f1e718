use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;

use super::Repository;
use super::shipments::shipment_from_row;
use super::sql_storage::{SqlStorage, tick};
use crate::error::AppError;
use crate::forms::Choice;
use crate::model::{Money, Product, ProductInput, Shipment, WithRelated};

const SELECT_ALL: &str =
    "SELECT id, nombre, descripcion, precio_centavos FROM producto ORDER BY id";
const SELECT_ONE: &str =
    "SELECT id, nombre, descripcion, precio_centavos FROM producto WHERE id = ?1";
const PREFETCH_SHIPMENTS: &str =
    include_str!("../sql/queries/sqlite/00_productos_shipments_prefetch.sql");

/// Maps columns `offset..offset + 4` onto a product.
pub(super) fn product_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(offset)?,
        nombre: row.get(offset + 1)?,
        descripcion: row.get(offset + 2)?,
        precio: Money::from_cents(row.get(offset + 3)?),
    })
}

pub(super) fn select_all_products(
    conn: &Connection,
    counter: &AtomicU64,
) -> Result<Vec<Product>, AppError> {
    tick(counter);
    let mut stmt = conn.prepare(SELECT_ALL)?;
    let rows = stmt
        .query_map([], |row| product_from_row(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub(super) fn insert_product(
    conn: &Connection,
    counter: &AtomicU64,
    input: &ProductInput,
) -> Result<i64, AppError> {
    tick(counter);
    conn.execute(
        "INSERT INTO producto (nombre, descripcion, precio_centavos) VALUES (?1, ?2, ?3)",
        params![input.nombre, input.descripcion, input.precio.cents()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// One query for the shipments of every product in `ids`, keyed by product id.
fn prefetch_shipments(
    conn: &Connection,
    counter: &AtomicU64,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<Shipment>>, AppError> {
    let mut by_product: HashMap<i64, Vec<Shipment>> = HashMap::new();
    if ids.is_empty() {
        return Ok(by_product);
    }
    let id_set = serde_json::to_string(ids)?;
    tick(counter);
    let mut stmt = conn.prepare(PREFETCH_SHIPMENTS)?;
    let rows = stmt.query_map([id_set], |row| {
        Ok((row.get::<_, i64>(0)?, shipment_from_row(row, 1)?))
    })?;
    for row in rows {
        let (product_id, shipment) = row?;
        by_product.entry(product_id).or_default().push(shipment);
    }
    Ok(by_product)
}

#[async_trait]
impl Repository<Product> for SqlStorage {
    async fn list_with_related(&self) -> Result<Vec<WithRelated<Product>>, AppError> {
        self.interact(|conn, counter| {
            let products = select_all_products(conn, counter)?;
            let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
            let mut shipments = prefetch_shipments(conn, counter, &ids)?;
            Ok(products
                .into_iter()
                .map(|p| {
                    let related = shipments.remove(&p.id).unwrap_or_default();
                    WithRelated::new(p, related)
                })
                .collect())
        })
        .await
    }

    async fn get_with_related(&self, id: i64) -> Result<Option<WithRelated<Product>>, AppError> {
        self.interact(move |conn, counter| {
            tick(counter);
            let product = conn
                .query_row(SELECT_ONE, [id], |row| product_from_row(row, 0))
                .optional()?;
            let Some(product) = product else {
                return Ok(None);
            };
            let related = prefetch_shipments(conn, counter, &[id])?
                .remove(&id)
                .unwrap_or_default();
            Ok(Some(WithRelated::new(product, related)))
        })
        .await
    }

    async fn form_choices(&self) -> Result<Vec<Choice>, AppError> {
        // the shipment side owns the association, so the product form has none
        Ok(Vec::new())
    }

    async fn insert(&self, input: ProductInput) -> Result<i64, AppError> {
        let id = self
            .interact(move |conn, counter| insert_product(conn, counter, &input))
            .await?;
        tracing::info!(id, "producto created");
        Ok(id)
    }

    async fn update(&self, id: i64, input: ProductInput) -> Result<bool, AppError> {
        let changed = self
            .interact(move |conn, counter| {
                tick(counter);
                let n = conn.execute(
                    "UPDATE producto SET nombre = ?1, descripcion = ?2, precio_centavos = ?3 WHERE id = ?4",
                    params![input.nombre, input.descripcion, input.precio.cents(), id],
                )?;
                Ok(n > 0)
            })
            .await?;
        if changed {
            tracing::info!(id, "producto updated");
        }
        Ok(changed)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self
            .interact(move |conn, counter| {
                let tx = conn.transaction()?;
                tick(counter);
                tx.execute("DELETE FROM embarque_productos WHERE producto_id = ?1", [id])?;
                tick(counter);
                let n = tx.execute("DELETE FROM producto WHERE id = ?1", [id])?;
                tx.commit()?;
                Ok(n > 0)
            })
            .await?;
        if deleted {
            tracing::info!(id, "producto deleted");
        }
        Ok(deleted)
    }
}
