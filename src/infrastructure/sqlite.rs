use crate::domain::amount::Amount;
use crate::domain::payment::{DEFAULT_PURPOSE, Payment};
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Timestamp format used in the `created_at` column, second precision.
const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A persistent payment store backed by SQLite.
///
/// The `id` primary key carries the uniqueness guarantee the identifier
/// allocator relies on: a racing insert surfaces as `DuplicateId` instead
/// of corrupting anything. The amount is stored in its canonical text form
/// so it round-trips exactly.
///
/// `Connection` is `Send` but not `Sync`, so access is serialized through
/// an async mutex. `Clone` shares the underlying connection.
#[derive(Clone)]
pub struct SqlitePaymentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePaymentStore {
    /// Opens or creates the payments database at the specified path.
    ///
    /// Schema creation and the legacy purpose-column migration run here,
    /// before the store handles any request.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| PaymentError::Storage(format!("database open failed: {e}")))?;
        let store = Self::from_connection(conn)?;
        info!("opened payments database at {:?}", path.as_ref());
        Ok(store)
    }

    /// Creates a store on an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PaymentError::Storage(format!("in-memory database failed: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        migrate_missing_purpose_column(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    let default_purpose_sql = DEFAULT_PURPOSE.replace('\'', "''");
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id TEXT PRIMARY KEY,
            payer_name TEXT NOT NULL,
            amount_rub TEXT NOT NULL,
            amount_kopecks INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            qr_string TEXT NOT NULL,
            purpose TEXT NOT NULL DEFAULT '{default_purpose_sql}'
        );
        "#
    ))
    .map_err(|e| PaymentError::Storage(format!("schema init failed: {e}")))
}

/// Adds the purpose column to tables created before it existed. SQLite
/// backfills existing rows with the declared default, so legacy records
/// read back with the canonical phrase.
fn migrate_missing_purpose_column(conn: &Connection) -> Result<()> {
    let mut stmt = conn
        .prepare("PRAGMA table_info(payments)")
        .map_err(|e| PaymentError::Storage(format!("schema inspection failed: {e}")))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<String>>>())
        .map_err(|e| PaymentError::Storage(format!("schema inspection failed: {e}")))?;

    if columns.iter().any(|name| name == "purpose") {
        return Ok(());
    }

    info!("adding purpose column to legacy payments table");
    let default_purpose_sql = DEFAULT_PURPOSE.replace('\'', "''");
    conn.execute(
        &format!("ALTER TABLE payments ADD COLUMN purpose TEXT NOT NULL DEFAULT '{default_purpose_sql}'"),
        [],
    )
    .map_err(|e| PaymentError::Storage(format!("purpose migration failed: {e}")))?;
    Ok(())
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|e| PaymentError::Storage(format!("bad created_at {raw:?}: {e}")))
}

#[async_trait]
impl PaymentStore for SqlitePaymentStore {
    async fn insert(&self, payment: Payment) -> Result<()> {
        let conn = self.conn.lock().await;
        let result = conn.execute(
            "INSERT INTO payments (id, payer_name, amount_rub, amount_kopecks, created_at, qr_string, purpose)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                payment.id,
                payment.payer_name,
                payment.amount.rubles().to_string(),
                payment.amount.kopecks(),
                payment.created_at.format(CREATED_AT_FORMAT).to_string(),
                payment.payload,
                payment.purpose,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(PaymentError::DuplicateId(payment.id))
            }
            Err(e) => Err(PaymentError::Storage(format!("insert failed: {e}"))),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Payment>> {
        let conn = self.conn.lock().await;
        let row = conn
            .query_row(
                "SELECT payer_name, amount_rub, created_at, qr_string, COALESCE(purpose, '')
                 FROM payments WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| PaymentError::Storage(format!("lookup failed: {e}")))?;

        let Some((payer_name, amount_rub, created_at, payload, purpose)) = row else {
            return Ok(None);
        };

        let rubles = Decimal::from_str(&amount_rub)
            .map_err(|e| PaymentError::Storage(format!("bad amount_rub {amount_rub:?}: {e}")))?;

        Ok(Some(Payment {
            id: id.to_string(),
            payer_name,
            amount: Amount::from_stored(rubles)?,
            purpose,
            created_at: parse_created_at(&created_at)?,
            payload,
        }))
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        let found = conn
            .query_row("SELECT 1 FROM payments WHERE id = ?1", params![id], |_| Ok(()))
            .optional()
            .map_err(|e| PaymentError::Storage(format!("existence check failed: {e}")))?;
        Ok(found.is_some())
    }
}
