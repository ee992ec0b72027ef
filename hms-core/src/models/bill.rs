use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;

use crate::billing::calculator::{self, DiscountMode, FeeBreakdown};
use crate::models::decimal_column;

/// Payment status of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Cancelled => "Cancelled",
            PaymentStatus::Refunded => "Refunded",
        }
    }

    /// Paid and Partial bills carry a payment method and a payment date.
    pub fn requires_payment_details(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Partial)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Partial" => Ok(PaymentStatus::Partial),
            "Paid" => Ok(PaymentStatus::Paid),
            "Cancelled" => Ok(PaymentStatus::Cancelled),
            "Refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status '{other}'")),
        }
    }
}

/// Category of an itemized charge line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Consultation,
    Medicine,
    Test,
    Procedure,
    Equipment,
    Room,
    Service,
    Other,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Consultation => "Consultation",
            ItemType::Medicine => "Medicine",
            ItemType::Test => "Test",
            ItemType::Procedure => "Procedure",
            ItemType::Equipment => "Equipment",
            ItemType::Room => "Room",
            ItemType::Service => "Service",
            ItemType::Other => "Other",
        }
    }

    /// Parse an item type name case-insensitively.
    ///
    /// Anything unrecognized lands in the `Other` bucket rather than failing,
    /// so historical rows with free-typed categories still load.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "consultation" => ItemType::Consultation,
            "medicine" => ItemType::Medicine,
            "test" => ItemType::Test,
            "procedure" => ItemType::Procedure,
            "equipment" => ItemType::Equipment,
            "room" => ItemType::Room,
            "service" => ItemType::Service,
            _ => ItemType::Other,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invoice record summarizing charges for a patient encounter.
///
/// Together with its `BillItem` list this forms one aggregate: every
/// mutation goes through the calculator or the bill repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Surrogate key assigned by the store; 0 means "new, unsaved".
    pub id: i64,

    /// Display identifier, `BILL-<year>-<seq>` or a timestamp fallback.
    pub bill_number: String,

    /// Calendar date of issue.
    pub bill_date: NaiveDate,

    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_id: Option<i64>,

    /// Fee breakdown, either hand-edited or derived from the item list.
    pub consultation_fee: Decimal,
    pub medicine_fee: Decimal,
    pub test_fee: Decimal,
    pub other_fee: Decimal,

    /// Raw discount input. Interpreted per `discount_is_percent`.
    pub discount: Decimal,

    /// Whether `discount` is a percentage of the subtotal (clamped at 100)
    /// rather than a fixed amount.
    pub discount_is_percent: bool,

    /// Derived total, maintained by `recalculate` and re-enforced on save.
    pub total_amount: Decimal,

    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,

    /// Set automatically when the status moves to Paid/Partial.
    pub payment_date: Option<DateTime<Utc>>,

    pub notes: String,
}

impl Bill {
    /// New in-memory bill with a zeroed fee breakdown and Pending status.
    pub fn new(bill_number: impl Into<String>, bill_date: NaiveDate, patient_id: i64, doctor_id: i64) -> Self {
        Bill {
            id: 0,
            bill_number: bill_number.into(),
            bill_date,
            patient_id,
            doctor_id,
            appointment_id: None,
            consultation_fee: Decimal::ZERO,
            medicine_fee: Decimal::ZERO,
            test_fee: Decimal::ZERO,
            other_fee: Decimal::ZERO,
            discount: Decimal::ZERO,
            discount_is_percent: false,
            total_amount: Decimal::ZERO,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            payment_date: None,
            notes: String::new(),
        }
    }

    pub fn fees(&self) -> FeeBreakdown {
        FeeBreakdown {
            consultation: self.consultation_fee,
            medicine: self.medicine_fee,
            test: self.test_fee,
            other: self.other_fee,
        }
    }

    pub fn discount_mode(&self) -> DiscountMode {
        if self.discount_is_percent {
            DiscountMode::Percent
        } else {
            DiscountMode::Fixed
        }
    }

    /// Discount expressed as an amount, regardless of mode.
    pub fn discount_amount(&self) -> Decimal {
        calculator::discount_amount(self.fees().subtotal(), self.discount, self.discount_mode())
    }

    /// Re-derive `total_amount` from the fee breakdown and discount.
    pub fn recalculate(&mut self) {
        self.total_amount = calculator::bill_total(&self.fees(), self.discount, self.discount_mode());
    }

    /// Overwrite the category fees with sums derived from the item list.
    ///
    /// Hand-edited fees and item-derived fees are reconciled last-writer-wins:
    /// calling this after manual edits discards them, and vice versa.
    pub fn apply_item_fees(&mut self, items: &[BillItem]) {
        let derived = calculator::breakdown_from_items(items);
        self.consultation_fee = derived.consultation;
        self.medicine_fee = derived.medicine;
        self.test_fee = derived.test;
        self.other_fee = derived.other;
        self.recalculate();
    }

    /// Stamp or clear the payment date to match the payment status.
    pub(crate) fn normalize_payment(&mut self) {
        if self.payment_status.requires_payment_details() {
            if self.payment_date.is_none() {
                self.payment_date = Some(Utc::now());
            }
        } else {
            self.payment_date = None;
        }
    }
}

impl FromRow<'_, SqliteRow> for Bill {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("payment_status")?;
        let payment_status = status.parse::<PaymentStatus>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "payment_status".to_string(),
            source: e.into(),
        })?;

        Ok(Bill {
            id: row.try_get("bill_id")?,
            bill_number: row.try_get("bill_number")?,
            bill_date: row.try_get("bill_date")?,
            patient_id: row.try_get("patient_id")?,
            doctor_id: row.try_get("doctor_id")?,
            appointment_id: row.try_get("appointment_id")?,
            consultation_fee: decimal_column(row, "consultation_fee")?,
            medicine_fee: decimal_column(row, "medicine_fee")?,
            test_fee: decimal_column(row, "test_fee")?,
            other_fee: decimal_column(row, "other_fee")?,
            discount: decimal_column(row, "discount")?,
            discount_is_percent: row.try_get("discount_is_percent")?,
            total_amount: decimal_column(row, "total_amount")?,
            payment_status,
            payment_method: row.try_get("payment_method")?,
            payment_date: row.try_get("payment_date")?,
            notes: row.try_get("notes")?,
        })
    }
}

/// One itemized charge line attached to a bill.
///
/// The line total is always derived from quantity and unit price; it is never
/// entered independently and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    /// Surrogate key; 0 for not-yet-persisted items.
    pub id: i64,
    pub bill_id: i64,
    pub item_name: String,
    pub item_type: ItemType,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl BillItem {
    pub fn new(item_name: impl Into<String>, item_type: ItemType, quantity: i64, unit_price: Decimal) -> Self {
        BillItem {
            id: 0,
            bill_id: 0,
            item_name: item_name.into(),
            item_type,
            quantity,
            unit_price,
        }
    }

    /// `quantity * unit_price`. Negative quantities propagate unchanged.
    pub fn total_price(&self) -> Decimal {
        calculator::line_total(self.quantity, self.unit_price)
    }
}

impl FromRow<'_, SqliteRow> for BillItem {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let type_name: String = row.try_get("item_type")?;
        Ok(BillItem {
            id: row.try_get("item_id")?,
            bill_id: row.try_get("bill_id")?,
            item_name: row.try_get("item_name")?,
            item_type: ItemType::from_name(&type_name),
            quantity: row.try_get("quantity")?,
            unit_price: decimal_column(row, "unit_price")?,
        })
    }
}

/// One row of the bill list view, joined with patient and doctor names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillSummary {
    pub id: i64,
    pub bill_number: String,
    pub bill_date: NaiveDate,
    pub patient_name: String,
    pub doctor_name: String,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
}

impl FromRow<'_, SqliteRow> for BillSummary {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("payment_status")?;
        let payment_status = status.parse::<PaymentStatus>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "payment_status".to_string(),
            source: e.into(),
        })?;

        Ok(BillSummary {
            id: row.try_get("bill_id")?,
            bill_number: row.try_get("bill_number")?,
            bill_date: row.try_get("bill_date")?,
            patient_name: row.try_get("patient_name")?,
            doctor_name: row.try_get("doctor_name")?,
            total_amount: decimal_column(row, "total_amount")?,
            payment_status,
        })
    }
}
