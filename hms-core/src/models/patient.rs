use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Patient record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Patient {
    /// Surrogate key; 0 means "new, unsaved".
    #[sqlx(rename = "patient_id")]
    pub id: i64,

    pub name: String,

    /// Age in years, 1-100.
    pub age: i64,

    pub gender: String,
    pub phone: String,
    pub address: String,

    /// Needed for emailing bills; optional on file.
    pub email: Option<String>,
}
