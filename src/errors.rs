//! Unified application error type.
//! All modules (db, core, platform, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

use crate::models::watch::WatchErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// Schema creation or write failure in the location log.
    #[error("Persistence error: {0}")]
    Persistence(String),

    // ---------------------------
    // Location boundaries
    // ---------------------------
    /// Plumbing failure while talking to the permission backend.
    #[error("Permission error: {0}")]
    Permission(String),

    /// Fix acquisition failure reported by a position source.
    #[error("Watch error {code}: {message}")]
    Watch {
        code: WatchErrorCode,
        message: String,
    },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Feed error: {0}")]
    Feed(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Wrap any database failure of the location log as a persistence error.
    pub fn persistence<E: std::fmt::Display>(err: E) -> Self {
        AppError::Persistence(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
