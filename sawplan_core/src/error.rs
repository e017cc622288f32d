//! Error types for the sawplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sawplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A plan input violates its precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No board profiles were selected
    #[error("At least one board profile must be selected")]
    EmptySelection,

    /// Selection names a profile the catalog doesn't have
    #[error("Unknown board profile: {0}")]
    UnknownProfile(String),
}
