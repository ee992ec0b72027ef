//! Bill persistence.
//!
//! A bill and its item list are saved as one aggregate: the header row is
//! inserted or updated and the item rows are replaced wholesale, all inside a
//! single transaction. On any failure the transaction rolls back and the
//! store error is surfaced to the caller without retry.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::error::{HmsError, HmsResult};
use crate::models::{Bill, BillItem, BillSummary};

/// Standard payment methods offered before any stored extras.
const STANDARD_PAYMENT_METHODS: &[&str] = &[
    "Cash",
    "Credit Card",
    "Debit Card",
    "Insurance",
    "Bank Transfer",
    "Mobile Payment",
    "Check",
    "Online Payment",
    "Gift Card",
    "Other",
];

/// Check the required fields before any store interaction.
///
/// Rejections carry a display-ready reason and have no side effects. The
/// payment status itself cannot be "unselected" here; the type guarantees it.
pub fn validate(bill: &Bill) -> HmsResult<()> {
    if bill.bill_number.trim().is_empty() {
        return Err(HmsError::Validation("Bill number is required.".into()));
    }

    if bill.patient_id <= 0 {
        return Err(HmsError::Validation("Please select a patient.".into()));
    }

    if bill.doctor_id <= 0 {
        return Err(HmsError::Validation("Please select a doctor.".into()));
    }

    if bill.payment_status.requires_payment_details()
        && bill.payment_method.as_deref().map(str::trim).unwrap_or("").is_empty()
    {
        return Err(HmsError::Validation(
            "Payment method is required when the bill is Paid or Partial.".into(),
        ));
    }

    Ok(())
}

/// Save a bill and its items atomically, returning the bill id.
///
/// Before touching the store this validates required fields, re-derives the
/// total from the fee breakdown and discount, and normalizes the payment
/// date against the payment status. Then, in one transaction:
///
/// 1. Insert the header (id 0) or update it; the generated id becomes
///    authoritative on insert.
/// 2. Delete every existing item row for the bill.
/// 3. Insert the current item list.
///
/// # Errors
///
/// `Validation` before any store work; `NotFound` when updating a vanished
/// bill; `Database` for store failures, after which nothing is persisted.
pub async fn save(pool: &SqlitePool, bill: &mut Bill, items: &[BillItem]) -> HmsResult<i64> {
    validate(bill)?;
    bill.recalculate();
    bill.normalize_payment();

    let mut tx = pool.begin().await?;

    if bill.id == 0 {
        let result = sqlx::query(
            "INSERT INTO bills (
                bill_number, bill_date, patient_id, doctor_id, appointment_id,
                consultation_fee, medicine_fee, test_fee, other_fee,
                discount, discount_is_percent, total_amount,
                payment_status, payment_method, payment_date, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&bill.bill_number)
        .bind(bill.bill_date)
        .bind(bill.patient_id)
        .bind(bill.doctor_id)
        .bind(bill.appointment_id)
        .bind(bill.consultation_fee.to_string())
        .bind(bill.medicine_fee.to_string())
        .bind(bill.test_fee.to_string())
        .bind(bill.other_fee.to_string())
        .bind(bill.discount.to_string())
        .bind(bill.discount_is_percent)
        .bind(bill.total_amount.to_string())
        .bind(bill.payment_status.as_str())
        .bind(&bill.payment_method)
        .bind(bill.payment_date)
        .bind(&bill.notes)
        .execute(&mut *tx)
        .await?;

        bill.id = result.last_insert_rowid();
    } else {
        let result = sqlx::query(
            "UPDATE bills SET
                bill_date = ?, patient_id = ?, doctor_id = ?, appointment_id = ?,
                consultation_fee = ?, medicine_fee = ?, test_fee = ?, other_fee = ?,
                discount = ?, discount_is_percent = ?, total_amount = ?,
                payment_status = ?, payment_method = ?, payment_date = ?, notes = ?
            WHERE bill_id = ?",
        )
        .bind(bill.bill_date)
        .bind(bill.patient_id)
        .bind(bill.doctor_id)
        .bind(bill.appointment_id)
        .bind(bill.consultation_fee.to_string())
        .bind(bill.medicine_fee.to_string())
        .bind(bill.test_fee.to_string())
        .bind(bill.other_fee.to_string())
        .bind(bill.discount.to_string())
        .bind(bill.discount_is_percent)
        .bind(bill.total_amount.to_string())
        .bind(bill.payment_status.as_str())
        .bind(&bill.payment_method)
        .bind(bill.payment_date)
        .bind(&bill.notes)
        .bind(bill.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HmsError::NotFound(format!("bill {}", bill.id)));
        }
    }

    replace_items(&mut tx, bill.id, items).await?;

    tx.commit().await?;

    info!(bill_id = bill.id, bill_number = %bill.bill_number, "bill saved");
    Ok(bill.id)
}

/// Delete all existing items for the bill, then insert the current list.
///
/// Items are wholly owned by their bill; they are never written outside a
/// full bill save.
async fn replace_items(tx: &mut Transaction<'_, Sqlite>, bill_id: i64, items: &[BillItem]) -> HmsResult<()> {
    sqlx::query("DELETE FROM bill_items WHERE bill_id = ?")
        .bind(bill_id)
        .execute(&mut **tx)
        .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO bill_items (bill_id, item_name, item_type, quantity, unit_price)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(bill_id)
        .bind(&item.item_name)
        .bind(item.item_type.as_str())
        .bind(item.quantity)
        .bind(item.unit_price.to_string())
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Delete a bill and its items in one transaction.
pub async fn delete(pool: &SqlitePool, bill_id: i64) -> HmsResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM bill_items WHERE bill_id = ?")
        .bind(bill_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM bills WHERE bill_id = ?")
        .bind(bill_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HmsError::NotFound(format!("bill {bill_id}")));
    }

    tx.commit().await?;

    info!(bill_id, "bill deleted");
    Ok(())
}

/// Load a bill together with its item list.
pub async fn load(pool: &SqlitePool, bill_id: i64) -> HmsResult<(Bill, Vec<BillItem>)> {
    let bill = sqlx::query_as::<_, Bill>("SELECT * FROM bills WHERE bill_id = ?")
        .bind(bill_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| HmsError::NotFound(format!("bill {bill_id}")))?;

    let items = sqlx::query_as::<_, BillItem>(
        "SELECT * FROM bill_items WHERE bill_id = ? ORDER BY item_id",
    )
    .bind(bill_id)
    .fetch_all(pool)
    .await?;

    Ok((bill, items))
}

/// List all bills newest-first, joined with patient and doctor names.
pub async fn list(pool: &SqlitePool) -> HmsResult<Vec<BillSummary>> {
    let summaries = sqlx::query_as::<_, BillSummary>(
        "SELECT b.bill_id, b.bill_number, b.bill_date,
                p.name AS patient_name, d.name AS doctor_name,
                b.total_amount, b.payment_status
         FROM bills b
         JOIN patients p ON b.patient_id = p.patient_id
         JOIN doctors d ON b.doctor_id = d.doctor_id
         ORDER BY b.bill_date DESC, b.bill_id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(summaries)
}

/// Payment methods for selection: the standard list followed by any extra
/// values already stored on bills.
pub async fn payment_methods(pool: &SqlitePool) -> HmsResult<Vec<String>> {
    let stored: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT payment_method FROM bills
         WHERE payment_method IS NOT NULL AND payment_method <> ''
         ORDER BY payment_method",
    )
    .fetch_all(pool)
    .await?;

    let mut methods: Vec<String> = STANDARD_PAYMENT_METHODS.iter().map(|m| m.to_string()).collect();
    for method in stored {
        if !methods.iter().any(|m| m == &method) {
            methods.push(method);
        }
    }

    Ok(methods)
}
