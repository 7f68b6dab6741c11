//! Error types for catalog parsing

use thiserror::Error;

/// Errors that can occur while reading a catalog source
///
/// Malformed cells never produce an error; they are coerced instead.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The header row lacks a required column
    #[error("Missing column '{0}' in header row")]
    MissingColumn(String),

    /// The configuration cannot be used
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading the source file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
