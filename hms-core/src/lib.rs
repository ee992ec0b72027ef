//! Hospital management billing core.
//!
//! The crate owns the billing domain of a small hospital management system:
//! fee calculation and discount handling, bill numbering, atomic persistence
//! of bills with their itemized charges, patient/doctor/appointment records,
//! and bill/receipt document generation with email delivery.
//!
//! Typical startup:
//!
//! ```no_run
//! use hms_core::{config::Config, db, telemetry};
//!
//! # async fn start() -> anyhow::Result<()> {
//! telemetry::init();
//! let config = Config::from_env();
//! let pool = db::create_pool(&config.database).await?;
//! db::run_migrations(&pool).await?;
//! # Ok(())
//! # }
//! ```

pub mod billing;
pub mod config;
pub mod db;
pub mod documents;
pub mod error;
pub mod mailer;
pub mod models;
pub mod repository;
pub mod telemetry;
pub mod validation;

pub use error::{HmsError, HmsResult};
