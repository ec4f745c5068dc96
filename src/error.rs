//! Error taxonomy for loading and executing an import.
//!
//! Structural errors ([`ImportError::InvalidFileType`], [`ImportError::Schema`],
//! [`ImportError::Shape`], [`ImportError::TableName`]) abort construction, so no
//! partially built import is ever observable. Execution errors
//! ([`ImportError::AlreadyExecuted`], [`ImportError::DuplicateImport`],
//! [`ImportError::Sink`]) leave the import in the state it had before the call.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ImportError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{path:?} is not a CSV file (expected a .csv extension)")]
    InvalidFileType { path: PathBuf },

    #[error("Delimiter '{delimiter}' not found in header row")]
    Schema { delimiter: String },

    #[error(
        "Forbidden delimiter in data field on data row {row}: expected {expected} value(s), found {actual}"
    )]
    Shape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Could not derive a table name from {path:?}")]
    TableName { path: PathBuf },

    #[error("Data already copied to table '{table}'")]
    AlreadyExecuted { table: String },

    #[error("Data with fingerprint {fingerprint} already present in table '{table}'")]
    DuplicateImport { table: String, fingerprint: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Writing to table '{table}' failed")]
    Sink {
        table: String,
        #[source]
        source: anyhow::Error,
    },
}
