use rusqlite::Connection;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::products::insert_product;
use super::shipments::insert_shipment;
use crate::error::AppError;
use crate::model::{ProductInput, ShipmentInput, TABLES_AND_DDL};

/// Shared handle on the SQLite database.
///
/// All statements run on tokio's blocking pool. Every statement executed
/// through [`SqlStorage::interact`] is counted, which lets callers check how
/// many round-trips an operation costs.
#[derive(Clone)]
pub struct SqlStorage {
    conn: Arc<Mutex<Connection>>,
    round_trips: Arc<AtomicU64>,
}

impl SqlStorage {
    /// Opens (or creates) the database file. `:memory:` gives a private
    /// in-memory database.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened
    pub fn open(db_name: &str) -> Result<Self, AppError> {
        let conn = Connection::open(db_name)?;
        Self::from_connection(conn)
    }

    /// # Errors
    ///
    /// Will return `Err` if sqlite cannot allocate the database
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            round_trips: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Number of statements executed so far.
    #[must_use]
    pub fn round_trips(&self) -> u64 {
        self.round_trips.load(Ordering::SeqCst)
    }

    /// Runs a batch of statements inside one transaction.
    ///
    /// # Errors
    ///
    /// Will return `Err` if any statement fails; nothing is committed then
    pub async fn execute_batch(&self, sql: String) -> Result<(), AppError> {
        self.interact(move |conn, counter| {
            let tx = conn.transaction()?;
            tick(counter);
            tx.execute_batch(&sql)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Creates any missing tables.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the DDL fails
    pub async fn create_tables(&self) -> Result<(), AppError> {
        let ddl = TABLES_AND_DDL
            .iter()
            .map(|(_, ddl)| *ddl)
            .collect::<Vec<_>>()
            .join("\n");
        self.execute_batch(ddl).await?;
        tracing::debug!(tables = TABLES_AND_DDL.len(), "schema ready");
        Ok(())
    }

    /// Number of rows in `table`, used by the seeder to detect an empty db.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the query fails or the table is not ours
    pub async fn count_rows(&self, table: &'static str) -> Result<i64, AppError> {
        if !TABLES_AND_DDL.iter().any(|(name, _)| *name == table) {
            return Err(AppError::Other(format!("unknown table {table}")));
        }
        self.interact(move |conn, counter| {
            tick(counter);
            let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get::<_, i64>(0)
            })?;
            Ok(n)
        })
        .await
    }

    /// Inserts all products, then all shipments, in one transaction.
    ///
    /// Each shipment's `productos` holds 1-based positions into `products`,
    /// resolved to the new ids as rows go in. Returns the inserted counts.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a position is out of range or any insert fails;
    /// nothing is committed then
    pub async fn seed(
        &self,
        products: Vec<ProductInput>,
        shipments: Vec<ShipmentInput>,
    ) -> Result<(usize, usize), AppError> {
        self.interact(move |conn, counter| {
            let shipment_count = shipments.len();
            let tx = conn.transaction()?;
            let mut ids = Vec::with_capacity(products.len());
            for input in &products {
                ids.push(insert_product(&tx, counter, input)?);
            }
            for (i, mut input) in shipments.into_iter().enumerate() {
                input.productos = input
                    .productos
                    .iter()
                    .map(|pos| {
                        pos.checked_sub(1)
                            .and_then(|idx| usize::try_from(idx).ok())
                            .and_then(|idx| ids.get(idx).copied())
                            .ok_or_else(|| {
                                AppError::Seed(format!("embarques[{i}]: no producto at position {pos}"))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                insert_shipment(&tx, counter, &input)?;
            }
            tx.commit()?;
            Ok((ids.len(), shipment_count))
        })
        .await
    }

    /// Runs `f` against the connection on the blocking pool.
    pub(crate) async fn interact<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection, &AtomicU64) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let counter = Arc::clone(&self.round_trips);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| AppError::Db("connection mutex poisoned".to_string()))?;
            f(&mut guard, &counter)
        })
        .await?
    }
}

/// Records one statement round-trip.
pub(crate) fn tick(counter: &AtomicU64) {
    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
    tracing::trace!(round_trips = n, "sql statement");
}
