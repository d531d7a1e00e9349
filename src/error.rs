//! Error types for statement building, execution and row mapping.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A builder or session was set up incorrectly (missing table, no values, bad version)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The engine rejected the statement
    #[error("Execution error: {0}")]
    Execution(#[from] rusqlite::Error),

    /// A result value could not be coerced to the requested type
    #[error("Mapping error on column '{column}': {message}")]
    Mapping { column: String, message: String },

    /// Cursor accessed before the first row, past the last row or out of column range
    #[error("Cursor error: {0}")]
    Cursor(String),

    /// The database file could not be opened
    #[error("Unable to open database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn mapping(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor(message.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. })
    }
}
