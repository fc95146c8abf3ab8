//! Schema Bootstrap
//!
//! Creates the three tables on startup if they do not exist. Constraints
//! live in the store: username, phone number and email uniqueness, the
//! role and gender code sets, and the address ownership cascade.

use sqlx::SqlitePool;

use crate::error::CrmResult;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL CHECK(role IN ('admin', 'user'))
)
"#;

const CREATE_CUSTOMERS: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    phone_number TEXT NOT NULL UNIQUE,
    email        TEXT UNIQUE,
    gender       TEXT CHECK(gender IN ('male', 'female', 'other'))
)
"#;

const CREATE_ADDRESSES: &str = r#"
CREATE TABLE IF NOT EXISTS addresses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id     INTEGER NOT NULL,
    address_details TEXT NOT NULL,
    city            TEXT NOT NULL,
    state           TEXT NOT NULL,
    pin_code        TEXT NOT NULL,
    FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE CASCADE
)
"#;

/// Create all tables. Idempotent; run on every boot.
///
/// Foreign key enforcement is per-connection in SQLite and must be set
/// on the pool's connect options, not here.
pub async fn init(pool: &SqlitePool) -> CrmResult<()> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_CUSTOMERS).execute(pool).await?;
    sqlx::query(CREATE_ADDRESSES).execute(pool).await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
