//! HTML rendering over handlebars templates.

use handlebars::Handlebars;

use crate::error::{HmsError, HmsResult};

use super::{BillDocument, DocumentRenderer, ReceiptDocument};

const BILL_TEMPLATE: &str = r#"<html>
<body style='font-family: Arial, sans-serif;'>
<div style='max-width: 600px; margin: 0 auto; padding: 20px;'>
<h2 style='color: #2c3e50; text-align: center;'>{{hospital_name}}</h2>
<h3 style='text-align: center;'>Medical Bill</h3>
<hr/>
<table style='width: 100%; margin-bottom: 20px;'>
<tr><td><b>Bill Number:</b></td><td>{{bill_number}}</td></tr>
<tr><td><b>Date:</b></td><td>{{bill_date}}</td></tr>
<tr><td><b>Patient:</b></td><td>{{patient_name}}</td></tr>
<tr><td><b>Doctor:</b></td><td>{{doctor_name}}</td></tr>
</table>
<table style='width: 100%; border-collapse: collapse;'>
<tr style='background-color: #2c3e50; color: white;'>
<th style='padding: 8px; text-align: left;'>Description</th>
<th style='padding: 8px; text-align: right;'>Amount</th>
</tr>
{{#each lines}}
<tr>
<td style='padding: 8px; border-bottom: 1px solid #ddd;'>{{label}}</td>
<td style='padding: 8px; border-bottom: 1px solid #ddd; text-align: right;'>{{amount}}</td>
</tr>
{{/each}}
<tr style='font-weight: bold;'>
<td style='padding: 8px;'>Total</td>
<td style='padding: 8px; text-align: right;'>{{total_amount}}</td>
</tr>
</table>
<p style='text-align: center; color: #7f8c8d; margin-top: 30px;'>Thank you for choosing {{hospital_name}}. Get well soon!</p>
</div>
</body>
</html>"#;

const RECEIPT_TEMPLATE: &str = r#"<html>
<body style='font-family: Arial, sans-serif;'>
<div style='max-width: 600px; margin: 0 auto; padding: 20px;'>
<h2 style='color: #2c3e50; text-align: center;'>{{hospital_name}}</h2>
<p style='text-align: center;'>{{hospital_address}}<br/>Tel: {{hospital_phone}} | Email: {{hospital_email}}</p>
<h3 style='text-align: center;'>Appointment Receipt</h3>
<hr/>
<table style='width: 100%; margin-bottom: 20px;'>
<tr><td><b>Receipt No:</b></td><td>{{receipt_no}}</td></tr>
<tr><td><b>Appointment:</b></td><td>{{date_time}}</td></tr>
</table>
<h4>Patient</h4>
<table style='width: 100%; margin-bottom: 20px;'>
<tr><td><b>Name:</b></td><td>{{patient_name}}</td></tr>
<tr><td><b>Phone:</b></td><td>{{patient_phone}}</td></tr>
<tr><td><b>Email:</b></td><td>{{patient_email}}</td></tr>
<tr><td><b>Address:</b></td><td>{{patient_address}}</td></tr>
</table>
<h4>Doctor</h4>
<table style='width: 100%; margin-bottom: 20px;'>
<tr><td><b>Name:</b></td><td>{{doctor_name}}</td></tr>
<tr><td><b>Specialization:</b></td><td>{{doctor_specialization}}</td></tr>
</table>
<table style='width: 100%; border-collapse: collapse;'>
<tr><td style='padding: 8px; border-bottom: 1px solid #ddd;'>Consultation Fee</td>
<td style='padding: 8px; border-bottom: 1px solid #ddd; text-align: right;'>{{consultation_fee}}</td></tr>
<tr><td style='padding: 8px; border-bottom: 1px solid #ddd;'>Booking Fee</td>
<td style='padding: 8px; border-bottom: 1px solid #ddd; text-align: right;'>{{booking_fee}}</td></tr>
<tr style='font-weight: bold;'><td style='padding: 8px;'>Total</td>
<td style='padding: 8px; text-align: right;'>{{total_fee}}</td></tr>
</table>
<p style='text-align: center; color: #7f8c8d; margin-top: 30px;'>Generated {{generated_at}}</p>
</div>
</body>
</html>"#;

/// Renders bills and receipts to HTML bytes.
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    pub fn new() -> HmsResult<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string("bill", BILL_TEMPLATE)
            .map_err(|e| HmsError::Render(e.to_string()))?;
        registry
            .register_template_string("receipt", RECEIPT_TEMPLATE)
            .map_err(|e| HmsError::Render(e.to_string()))?;
        Ok(HtmlRenderer { registry })
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render_bill(&self, document: &BillDocument) -> HmsResult<Vec<u8>> {
        let html = self
            .registry
            .render("bill", document)
            .map_err(|e| HmsError::Render(e.to_string()))?;
        Ok(html.into_bytes())
    }

    fn render_appointment_receipt(&self, document: &ReceiptDocument) -> HmsResult<Vec<u8>> {
        let html = self
            .registry
            .render("receipt", document)
            .map_err(|e| HmsError::Render(e.to_string()))?;
        Ok(html.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::super::ChargeLine;
    use super::*;

    #[test]
    fn bill_template_renders_all_lines() {
        let renderer = HtmlRenderer::new().unwrap();
        let document = BillDocument {
            hospital_name: "Test Hospital".into(),
            bill_number: "BILL-2025-0042".into(),
            bill_date: "Mar 01, 2025".into(),
            patient_name: "Jane Doe".into(),
            doctor_name: "Dr. Smith".into(),
            lines: vec![
                ChargeLine { label: "Consultation Fee".into(), amount: "500.00".into() },
                ChargeLine { label: "Discount".into(), amount: "-50.00".into() },
            ],
            total_amount: "450.00".into(),
        };

        let bytes = renderer.render_bill(&document).unwrap();
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("BILL-2025-0042"));
        assert!(html.contains("Consultation Fee"));
        assert!(html.contains("-50.00"));
        assert!(html.contains("450.00"));
        assert!(!html.contains("{{"));
    }
}
