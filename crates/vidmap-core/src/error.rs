//! Error types for vidmap-rs.

use thiserror::Error;

/// The main error type for vidmap-rs configuration and setup.
///
/// The per-tick mapping path never returns these; it degrades visually instead.
#[derive(Error, Debug)]
pub enum VidmapError {
    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for vidmap-rs operations.
pub type Result<T> = std::result::Result<T, VidmapError>;
