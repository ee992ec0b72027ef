use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::decimal_column;

/// Doctor record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// Surrogate key; 0 means "new, unsaved".
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub phone: String,

    /// Standard consultation fee, used to prefill bills.
    pub fee: Decimal,
}

impl FromRow<'_, SqliteRow> for Doctor {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Doctor {
            id: row.try_get("doctor_id")?,
            name: row.try_get("name")?,
            specialization: row.try_get("specialization")?,
            phone: row.try_get("phone")?,
            fee: decimal_column(row, "fee")?,
        })
    }
}
