pub mod appointment;
pub mod bill;
pub mod doctor;
pub mod patient;

pub use appointment::Appointment;
pub use bill::{Bill, BillItem, BillSummary, ItemType, PaymentStatus};
pub use doctor::Doctor;
pub use patient::Patient;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Decode a monetary TEXT column into a `Decimal`.
///
/// SQLite has no decimal type, so money columns are stored as TEXT and
/// converted here on the way out.
pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str_exact(raw.trim()).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
