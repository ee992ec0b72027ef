use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

/// Schema statements, applied idempotently on startup.
///
/// Money columns are TEXT: SQLite has no decimal type and the crate converts
/// to `rust_decimal::Decimal` at the row boundary. Bill item line totals are
/// intentionally absent; they are always derived from quantity and unit price.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS patients (
        patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name       TEXT NOT NULL,
        age        INTEGER NOT NULL,
        gender     TEXT NOT NULL,
        phone      TEXT NOT NULL,
        address    TEXT NOT NULL DEFAULT '',
        email      TEXT
    )",
    "CREATE TABLE IF NOT EXISTS doctors (
        doctor_id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name           TEXT NOT NULL,
        specialization TEXT NOT NULL,
        phone          TEXT NOT NULL,
        fee            TEXT NOT NULL DEFAULT '0'
    )",
    "CREATE TABLE IF NOT EXISTS appointments (
        appointment_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id       INTEGER NOT NULL REFERENCES patients(patient_id),
        doctor_id        INTEGER NOT NULL REFERENCES doctors(doctor_id),
        appointment_date TEXT NOT NULL,
        appointment_time TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS bills (
        bill_id             INTEGER PRIMARY KEY AUTOINCREMENT,
        bill_number         TEXT NOT NULL,
        bill_date           TEXT NOT NULL,
        patient_id          INTEGER NOT NULL REFERENCES patients(patient_id),
        doctor_id           INTEGER NOT NULL REFERENCES doctors(doctor_id),
        appointment_id      INTEGER REFERENCES appointments(appointment_id),
        consultation_fee    TEXT NOT NULL,
        medicine_fee        TEXT NOT NULL,
        test_fee            TEXT NOT NULL,
        other_fee           TEXT NOT NULL,
        discount            TEXT NOT NULL,
        discount_is_percent INTEGER NOT NULL DEFAULT 0,
        total_amount        TEXT NOT NULL,
        payment_status      TEXT NOT NULL,
        payment_method      TEXT,
        payment_date        TEXT,
        notes               TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS bill_items (
        item_id    INTEGER PRIMARY KEY AUTOINCREMENT,
        bill_id    INTEGER NOT NULL REFERENCES bills(bill_id),
        item_name  TEXT NOT NULL CHECK (length(item_name) > 0),
        item_type  TEXT NOT NULL,
        quantity   INTEGER NOT NULL,
        unit_price TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_bill_items_bill_id ON bill_items(bill_id)",
    "CREATE INDEX IF NOT EXISTS idx_bills_bill_number ON bills(bill_number)",
];

/// Create the SQLite connection pool for the application database.
///
/// WAL mode, enforced foreign keys and a busy timeout match the needs of a
/// single-user desktop deployment; the database file is created on first run.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    info!(path = %config.path, "database pool initialized");
    Ok(pool)
}

/// Apply the schema. Safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
