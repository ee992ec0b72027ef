use thiserror::Error;

/// Crate-wide error type.
///
/// Validation and conflict errors carry a human-readable reason intended for
/// direct display by the calling UI. Store errors wrap the underlying
/// `sqlx::Error` and are never retried by this crate.
#[derive(Error, Debug)]
pub enum HmsError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Render(String),

    #[error("Email error: {0}")]
    Mail(String),
}

pub type HmsResult<T> = Result<T, HmsError>;
