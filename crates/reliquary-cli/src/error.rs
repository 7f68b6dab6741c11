//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog could not be read or parsed
    #[error("Catalog error: {0}")]
    Catalog(#[from] reliquary_catalog::ParseError),

    /// Saved builds could not be read or written
    #[error("Storage error: {0}")]
    Store(#[from] reliquary_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No catalog item with that name (and tier)
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// No saved build with that name
    #[error("No saved build named '{0}'")]
    UnknownBuild(String),
}
