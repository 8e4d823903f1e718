use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;

use super::Repository;
use super::products::{product_from_row, select_all_products};
use super::sql_storage::{SqlStorage, tick};
use crate::error::AppError;
use crate::forms::Choice;
use crate::model::{Entity, Product, Shipment, ShipmentInput, WithRelated};

const SELECT_ALL: &str = "SELECT id, codigo, destino, fecha_envio FROM embarque ORDER BY id";
const SELECT_ONE: &str = "SELECT id, codigo, destino, fecha_envio FROM embarque WHERE id = ?1";
const PREFETCH_PRODUCTS: &str =
    include_str!("../sql/queries/sqlite/01_embarques_products_prefetch.sql");

/// Maps columns `offset..offset + 4` onto a shipment.
pub(super) fn shipment_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Shipment> {
    Ok(Shipment {
        id: row.get(offset)?,
        codigo: row.get(offset + 1)?,
        destino: row.get(offset + 2)?,
        fecha_envio: row.get(offset + 3)?,
    })
}

fn select_all_shipments(
    conn: &Connection,
    counter: &AtomicU64,
) -> Result<Vec<Shipment>, AppError> {
    tick(counter);
    let mut stmt = conn.prepare(SELECT_ALL)?;
    let rows = stmt
        .query_map([], |row| shipment_from_row(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Inserts the shipment and its product links. Runs inside the caller's transaction.
pub(super) fn insert_shipment(
    tx: &Transaction<'_>,
    counter: &AtomicU64,
    input: &ShipmentInput,
) -> Result<i64, AppError> {
    tick(counter);
    tx.execute(
        "INSERT INTO embarque (codigo, destino, fecha_envio) VALUES (?1, ?2, ?3)",
        params![input.codigo, input.destino, input.fecha_envio],
    )?;
    let id = tx.last_insert_rowid();
    set_products(tx, counter, id, &input.productos)?;
    Ok(id)
}

/// One query for the products of every shipment in `ids`, keyed by shipment id.
fn prefetch_products(
    conn: &Connection,
    counter: &AtomicU64,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<Product>>, AppError> {
    let mut by_shipment: HashMap<i64, Vec<Product>> = HashMap::new();
    if ids.is_empty() {
        return Ok(by_shipment);
    }
    let id_set = serde_json::to_string(ids)?;
    tick(counter);
    let mut stmt = conn.prepare(PREFETCH_PRODUCTS)?;
    let rows = stmt.query_map([id_set], |row| {
        Ok((row.get::<_, i64>(0)?, product_from_row(row, 1)?))
    })?;
    for row in rows {
        let (shipment_id, product) = row?;
        by_shipment.entry(shipment_id).or_default().push(product);
    }
    Ok(by_shipment)
}

/// Replaces the product set of `shipment_id` with `product_ids`.
fn set_products(
    tx: &Transaction<'_>,
    counter: &AtomicU64,
    shipment_id: i64,
    product_ids: &[i64],
) -> Result<(), AppError> {
    tick(counter);
    tx.execute(
        "DELETE FROM embarque_productos WHERE embarque_id = ?1",
        [shipment_id],
    )?;
    let mut stmt = tx.prepare(
        "INSERT OR IGNORE INTO embarque_productos (embarque_id, producto_id) VALUES (?1, ?2)",
    )?;
    for product_id in product_ids {
        tick(counter);
        stmt.execute(params![shipment_id, product_id])?;
    }
    Ok(())
}

#[async_trait]
impl Repository<Shipment> for SqlStorage {
    async fn list_with_related(&self) -> Result<Vec<WithRelated<Shipment>>, AppError> {
        self.interact(|conn, counter| {
            let shipments = select_all_shipments(conn, counter)?;
            let ids: Vec<i64> = shipments.iter().map(|s| s.id).collect();
            let mut products = prefetch_products(conn, counter, &ids)?;
            Ok(shipments
                .into_iter()
                .map(|s| {
                    let related = products.remove(&s.id).unwrap_or_default();
                    WithRelated::new(s, related)
                })
                .collect())
        })
        .await
    }

    async fn get_with_related(&self, id: i64) -> Result<Option<WithRelated<Shipment>>, AppError> {
        self.interact(move |conn, counter| {
            tick(counter);
            let shipment = conn
                .query_row(SELECT_ONE, [id], |row| shipment_from_row(row, 0))
                .optional()?;
            let Some(shipment) = shipment else {
                return Ok(None);
            };
            let related = prefetch_products(conn, counter, &[id])?
                .remove(&id)
                .unwrap_or_default();
            Ok(Some(WithRelated::new(shipment, related)))
        })
        .await
    }

    async fn form_choices(&self) -> Result<Vec<Choice>, AppError> {
        self.interact(|conn, counter| {
            let products = select_all_products(conn, counter)?;
            Ok(products
                .iter()
                .map(|p| Choice::new(p.id, p.label()))
                .collect())
        })
        .await
    }

    async fn insert(&self, input: ShipmentInput) -> Result<i64, AppError> {
        let id = self
            .interact(move |conn, counter| {
                let tx = conn.transaction()?;
                let id = insert_shipment(&tx, counter, &input)?;
                tx.commit()?;
                Ok(id)
            })
            .await?;
        tracing::info!(id, "embarque created");
        Ok(id)
    }

    async fn update(&self, id: i64, input: ShipmentInput) -> Result<bool, AppError> {
        let changed = self
            .interact(move |conn, counter| {
                let tx = conn.transaction()?;
                tick(counter);
                let n = tx.execute(
                    "UPDATE embarque SET codigo = ?1, destino = ?2, fecha_envio = ?3 WHERE id = ?4",
                    params![input.codigo, input.destino, input.fecha_envio, id],
                )?;
                if n == 0 {
                    return Ok(false);
                }
                set_products(&tx, counter, id, &input.productos)?;
                tx.commit()?;
                Ok(true)
            })
            .await?;
        if changed {
            tracing::info!(id, "embarque updated");
        }
        Ok(changed)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self
            .interact(move |conn, counter| {
                let tx = conn.transaction()?;
                tick(counter);
                tx.execute("DELETE FROM embarque_productos WHERE embarque_id = ?1", [id])?;
                tick(counter);
                let n = tx.execute("DELETE FROM embarque WHERE id = ?1", [id])?;
                tx.commit()?;
                Ok(n > 0)
            })
            .await?;
        if deleted {
            tracing::info!(id, "embarque deleted");
        }
        Ok(deleted)
    }
}
