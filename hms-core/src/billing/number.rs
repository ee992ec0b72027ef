//! Bill number generation.

use chrono::Local;
use sqlx::SqlitePool;
use tracing::warn;

/// Produce the next bill number for `year`, `BILL-<YYYY>-<NNNN>`.
///
/// `NNNN` is one greater than the highest existing sequence for that year,
/// left-padded to 4 digits and starting at `0001`. If the store cannot be
/// queried the function degrades to a timestamp-based identifier
/// (`BILL-<YYYYMMDD-HHMMSS>`); that fallback is best-effort only and callers
/// must tolerate a potential collision.
pub async fn next_bill_number(pool: &SqlitePool, year: i32) -> String {
    match max_sequence(pool, year).await {
        Ok(max) => format!("BILL-{year}-{:04}", max.unwrap_or(0) + 1),
        Err(e) => {
            warn!("bill number lookup failed, falling back to timestamp: {e}");
            format!("BILL-{}", Local::now().format("%Y%m%d-%H%M%S"))
        }
    }
}

/// Convenience wrapper using the current local year.
pub async fn next_bill_number_for_today(pool: &SqlitePool) -> String {
    use chrono::Datelike;
    next_bill_number(pool, Local::now().year()).await
}

/// Highest `NNNN` stored for the given year, if any.
///
/// The sequence sits at a fixed offset because the prefix `BILL-<YYYY>-` is
/// always 10 characters.
async fn max_sequence(pool: &SqlitePool, year: i32) -> Result<Option<i64>, sqlx::Error> {
    let pattern = format!("BILL-{year}-%");
    let max: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(CAST(SUBSTR(bill_number, 11, 4) AS INTEGER)) FROM bills WHERE bill_number LIKE ?",
    )
    .bind(pattern)
    .fetch_one(pool)
    .await?;
    Ok(max)
}
