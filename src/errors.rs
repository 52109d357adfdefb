//! Unified application error type.
//! All modules (db, store, core, cli, services) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Workbook / storage
    // ---------------------------
    #[error("Workbook error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Sheet '{0}' does not exist in the workbook")]
    SheetMissing(String),

    #[error("Column '{column}' not found in sheet {sheet}")]
    Schema { sheet: String, column: String },

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("{0}")]
    OperationFailed(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown configuration key: {0}")]
    UnknownConfigKey(String),

    // ---------------------------
    // Serialization / export
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // External collaborators
    // ---------------------------
    #[error("Service error: {0}")]
    Service(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
