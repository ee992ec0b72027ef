//! Bill and receipt documents.
//!
//! The repository owns only the data side of document generation: a
//! [`DocumentRenderer`] turns plain field values into a rendered byte stream
//! suitable for emailing or printing. The shipped implementation renders
//! HTML from handlebars templates; converting that stream to PDF is the
//! printing collaborator's concern behind the same trait.

mod html;

pub use html::HtmlRenderer;

use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::HospitalInfo;
use crate::error::HmsResult;
use crate::models::{Appointment, Bill, Doctor, Patient};

/// Renders documents from plain bill/receipt field values.
pub trait DocumentRenderer {
    fn render_bill(&self, document: &BillDocument) -> HmsResult<Vec<u8>>;
    fn render_appointment_receipt(&self, document: &ReceiptDocument) -> HmsResult<Vec<u8>>;
}

/// One label/amount row on a rendered bill.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeLine {
    pub label: String,
    pub amount: String,
}

/// Field values for a rendered bill.
#[derive(Debug, Clone, Serialize)]
pub struct BillDocument {
    pub hospital_name: String,
    pub bill_number: String,
    pub bill_date: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub lines: Vec<ChargeLine>,
    pub total_amount: String,
}

impl BillDocument {
    /// Flatten a bill into display values.
    ///
    /// Category fees appear only when greater than zero; the discount, when
    /// present, is shown as a negative amount computed from the bill's
    /// discount mode.
    pub fn from_bill(bill: &Bill, patient_name: &str, doctor_name: &str, hospital: &HospitalInfo) -> Self {
        let mut lines = Vec::new();

        let fee_rows = [
            ("Consultation Fee", bill.consultation_fee),
            ("Medicine Fee", bill.medicine_fee),
            ("Test Fee", bill.test_fee),
            ("Other Fee", bill.other_fee),
        ];

        for (label, amount) in fee_rows {
            if amount > Decimal::ZERO {
                lines.push(ChargeLine {
                    label: label.to_string(),
                    amount: money(amount),
                });
            }
        }

        let discount = bill.discount_amount();
        if discount > Decimal::ZERO {
            lines.push(ChargeLine {
                label: "Discount".to_string(),
                amount: format!("-{}", money(discount)),
            });
        }

        BillDocument {
            hospital_name: hospital.name.clone(),
            bill_number: bill.bill_number.clone(),
            bill_date: bill.bill_date.format("%b %d, %Y").to_string(),
            patient_name: patient_name.to_string(),
            doctor_name: doctor_name.to_string(),
            lines,
            total_amount: money(bill.total_amount),
        }
    }
}

/// Field values for a rendered appointment receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptDocument {
    pub hospital_name: String,
    pub hospital_address: String,
    pub hospital_phone: String,
    pub hospital_email: String,
    pub receipt_no: String,
    pub date_time: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: String,
    pub patient_address: String,
    pub doctor_name: String,
    pub doctor_specialization: String,
    pub consultation_fee: String,
    pub booking_fee: String,
    pub total_fee: String,
    pub generated_at: String,
}

impl ReceiptDocument {
    /// Assemble a receipt from the appointment and its participants.
    ///
    /// The total is the doctor's consultation fee plus the hospital's flat
    /// booking fee.
    pub fn from_appointment(
        appointment: &Appointment,
        patient: &Patient,
        doctor: &Doctor,
        hospital: &HospitalInfo,
    ) -> Self {
        let total = doctor.fee + hospital.booking_fee;

        ReceiptDocument {
            hospital_name: hospital.name.clone(),
            hospital_address: hospital.address.clone(),
            hospital_phone: hospital.phone.clone(),
            hospital_email: hospital.email.clone(),
            receipt_no: appointment.id.to_string(),
            date_time: format!(
                "{} at {}",
                appointment.date.format("%Y-%m-%d"),
                appointment.time.format("%I:%M %p")
            ),
            patient_name: patient.name.clone(),
            patient_phone: patient.phone.clone(),
            patient_email: patient.email.clone().unwrap_or_default(),
            patient_address: patient.address.clone(),
            doctor_name: doctor.name.clone(),
            doctor_specialization: doctor.specialization.clone(),
            consultation_fee: money(doctor.fee),
            booking_fee: money(hospital.booking_fee),
            total_fee: money(total),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

fn money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    use crate::models::{Bill, PaymentStatus};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn hospital() -> HospitalInfo {
        HospitalInfo {
            name: "Test Hospital".into(),
            address: "1 Test Way".into(),
            phone: "000".into(),
            email: "info@test".into(),
            booking_fee: dec("50.00"),
        }
    }

    fn sample_bill() -> Bill {
        let mut bill = Bill::new("BILL-2025-0001", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 1, 1);
        bill.consultation_fee = dec("500");
        bill.test_fee = dec("150");
        bill.discount = dec("50");
        bill.recalculate();
        bill
    }

    #[test]
    fn zero_fee_lines_are_omitted() {
        let doc = BillDocument::from_bill(&sample_bill(), "Jane Doe", "Dr. Smith", &hospital());

        let labels: Vec<&str> = doc.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Consultation Fee", "Test Fee", "Discount"]);
        assert_eq!(doc.total_amount, "600.00");
    }

    #[test]
    fn discount_line_is_negative_and_mode_aware() {
        let mut bill = sample_bill();
        bill.discount = dec("10");
        bill.discount_is_percent = true;
        bill.recalculate();

        let doc = BillDocument::from_bill(&bill, "Jane Doe", "Dr. Smith", &hospital());
        let discount = doc.lines.iter().find(|l| l.label == "Discount").unwrap();
        // 10% of the 650 subtotal.
        assert_eq!(discount.amount, "-65.00");
        assert_eq!(doc.total_amount, "585.00");
    }

    #[test]
    fn receipt_totals_consultation_plus_booking_fee() {
        let appointment = Appointment {
            id: 7,
            patient_id: 1,
            doctor_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        };
        let patient = crate::models::Patient {
            id: 1,
            name: "Jane Doe".into(),
            age: 30,
            gender: "Female".into(),
            phone: "0771234567".into(),
            address: "2 Elm St".into(),
            email: Some("jane@example.com".into()),
        };
        let doctor = crate::models::Doctor {
            id: 1,
            name: "Dr. Smith".into(),
            specialization: "Cardiology".into(),
            phone: "0777654321".into(),
            fee: dec("500"),
        };

        let doc = ReceiptDocument::from_appointment(&appointment, &patient, &doctor, &hospital());
        assert_eq!(doc.consultation_fee, "500.00");
        assert_eq!(doc.booking_fee, "50.00");
        assert_eq!(doc.total_fee, "550.00");
        assert_eq!(doc.receipt_no, "7");
        assert!(doc.date_time.contains("02:30 PM"));
    }

    #[test]
    fn paid_status_is_reflected_unchanged() {
        let mut bill = sample_bill();
        bill.payment_status = PaymentStatus::Paid;
        bill.payment_method = Some("Cash".into());
        let doc = BillDocument::from_bill(&bill, "Jane", "Dr.", &hospital());
        assert_eq!(doc.bill_number, "BILL-2025-0001");
        assert_eq!(doc.bill_date, "Mar 01, 2025");
    }
}
