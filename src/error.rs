//! Error types for the boundary of the SPC engine
//!
//! The statistics functions themselves are total and never fail: empty or
//! degenerate samples produce documented floor values. Errors only arise
//! where data enters the crate (metric documents, configuration files).

use thiserror::Error;

/// Errors raised while loading or validating metric data and configuration
#[derive(Error, Debug)]
pub enum SpcError {
    #[error("Invalid input in metric '{metric}': {reason}")]
    InvalidInput { metric: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported metric document version: {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("Duplicate metric name: {0}")]
    DuplicateMetric(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fallible SPC operations
pub type Result<T> = std::result::Result<T, SpcError>;
