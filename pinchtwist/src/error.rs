//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable configuration. Fatal at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("pinch start strength {start} is below release strength {release}")]
    StartBelowRelease { start: f32, release: f32 },

    #[error("max twist angle must be positive, got {0}")]
    NonPositiveMaxTwist(f32),

    #[error("malformed config s-expression: {0}")]
    Parse(#[from] lexpr::parse::Error),

    #[error("config value for :{key} is not a number: {raw}")]
    NotANumber { key: &'static str, raw: String },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by a voice-pipeline collaborator.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent} is unavailable: {reason}")]
    Unavailable { agent: &'static str, reason: String },

    #[error("{agent} request failed: {reason}")]
    Request { agent: &'static str, reason: String },
}
