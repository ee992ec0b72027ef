//! Outbound email.
//!
//! Bills are mailed to patients as HTML with the rendered document attached.
//! Sending happens off the caller's path via [`send_detached`], so a slow or
//! unreachable SMTP server never blocks a save.

use std::sync::Arc;

use async_trait::async_trait;
use mail_builder::MessageBuilder;
use mail_send::SmtpClientBuilder;
use tracing::{error, info};

use crate::config::SmtpConfig;
use crate::error::{HmsError, HmsResult};

/// A file attached to an outgoing message.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<EmailAttachment>,
}

impl OutgoingEmail {
    /// Standard subject line for a bill email.
    pub fn bill_subject(bill_number: &str) -> String {
        format!("Bill {bill_number} - Hospital Management System")
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> HmsResult<()>;
}

/// Mailer backed by a real SMTP server (STARTTLS).
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        SmtpMailer { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> HmsResult<()> {
        let mut message = MessageBuilder::new()
            .from((self.config.sender_name.as_str(), self.config.sender_email.as_str()))
            .to(email.to.as_str())
            .subject(email.subject.as_str())
            .html_body(email.html_body.as_str());

        if let Some(attachment) = &email.attachment {
            message = message.attachment(
                attachment.content_type.as_str(),
                attachment.file_name.as_str(),
                attachment.content.as_slice(),
            );
        }

        let mut client = SmtpClientBuilder::new(self.config.host.clone(), self.config.port)
            .implicit_tls(false)
            .credentials((self.config.username.clone(), self.config.password.clone()))
            .connect()
            .await
            .map_err(|e| HmsError::Mail(e.to_string()))?;

        client
            .send(message)
            .await
            .map_err(|e| HmsError::Mail(e.to_string()))?;

        info!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}

/// Send without waiting for delivery. Failures are logged, never returned.
pub fn send_detached(mailer: Arc<dyn Mailer>, email: OutgoingEmail) {
    tokio::spawn(async move {
        let to = email.to.clone();
        if let Err(e) = mailer.send(email).await {
            error!(%to, error = %e, "email delivery failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutgoingEmail) -> HmsResult<()> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    #[test]
    fn bill_subject_carries_bill_number() {
        assert_eq!(
            OutgoingEmail::bill_subject("BILL-2025-0042"),
            "Bill BILL-2025-0042 - Hospital Management System"
        );
    }

    #[tokio::test]
    async fn detached_send_reaches_the_mailer() {
        let mailer = Arc::new(RecordingMailer { sent: Mutex::new(Vec::new()) });
        let email = OutgoingEmail {
            to: "jane@example.com".into(),
            subject: "hello".into(),
            html_body: "<p>hi</p>".into(),
            attachment: None,
        };

        send_detached(mailer.clone(), email);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
    }
}
