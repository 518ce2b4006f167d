//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file missing or inaccessible
    FileNotFound(String),
    /// Mapping table could not be loaded
    InvalidTable(String),
    /// Input rejected by strict segmentation
    ValidationFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidTable(msg) => write!(f, "Invalid mapping table: {msg}"),
            CliError::ValidationFailed(msg) => write!(f, "Validation failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
