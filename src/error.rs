//! Error types for the loaders and outer surfaces
//!
//! The calculation engine itself never fails; these cover file and record I/O.

use thiserror::Error;

/// Result alias used by the loaders
pub type Result<T> = std::result::Result<T, RoiError>;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for assumption '{key}'")]
    InvalidAssumption { key: String, value: String },

    #[error("Unknown assumption key: {0}")]
    UnknownAssumption(String),

    #[error("Invalid property record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}
