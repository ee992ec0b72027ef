//! Environment-based configuration.
//!
//! Values are read from environment variables (with `.env` support via
//! dotenv) and fall back to defaults suitable for a local installation.

use dotenv::dotenv;
use rust_decimal::Decimal;
use std::env;

/// SQLite database settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: String,
    pub max_connections: u32,
}

/// Outbound SMTP settings for the bill mailer.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender_email: String,
    pub sender_name: String,
}

/// Hospital identity printed on receipts and bill emails.
#[derive(Debug, Clone)]
pub struct HospitalInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,

    /// Flat booking fee added to appointment receipts.
    pub booking_fee: Decimal,
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
    pub hospital: HospitalInfo,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first.
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            database: DatabaseConfig {
                path: env_or("HMS_DATABASE_PATH", "hms.db"),
                max_connections: env_or("HMS_DATABASE_MAX_CONNECTIONS", "5")
                    .parse()
                    .unwrap_or(5),
            },
            smtp: SmtpConfig {
                host: env_or("HMS_SMTP_HOST", "smtp.gmail.com"),
                port: env_or("HMS_SMTP_PORT", "587").parse().unwrap_or(587),
                username: env_or("HMS_SMTP_USERNAME", ""),
                password: env_or("HMS_SMTP_PASSWORD", ""),
                sender_email: env_or("HMS_SMTP_SENDER_EMAIL", "noreply@esofthms.com"),
                sender_name: env_or("HMS_SMTP_SENDER_NAME", "Hospital Management System"),
            },
            hospital: HospitalInfo {
                name: env_or("HMS_HOSPITAL_NAME", "Esoft Hospital Management System"),
                address: env_or("HMS_HOSPITAL_ADDRESS", "123 Healthcare Avenue, Medical District"),
                phone: env_or("HMS_HOSPITAL_PHONE", "+94 123-456071"),
                email: env_or("HMS_HOSPITAL_EMAIL", "info@esofthms.com"),
                booking_fee: Decimal::from_str_exact(&env_or("HMS_BOOKING_FEE", "50.00"))
                    .unwrap_or_else(|_| Decimal::new(5000, 2)),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_prefers_the_environment_over_the_default() {
        env::set_var("HMS_CONFIG_TEST_KEY", "configured");
        assert_eq!(env_or("HMS_CONFIG_TEST_KEY", "default"), "configured");

        env::remove_var("HMS_CONFIG_TEST_KEY");
        assert_eq!(env_or("HMS_CONFIG_TEST_KEY", "default"), "default");
    }

    #[test]
    fn default_booking_fee_parses_to_fifty() {
        assert_eq!(Decimal::from_str_exact("50.00").unwrap(), Decimal::new(5000, 2));
    }
}
