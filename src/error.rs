//! Error types for catalog ingestion and configuration loading.
//!
//! Searching itself never fails: a bad query yields an empty result and a
//! malformed record is skipped. Only the edges that read external input
//! return errors.

use thiserror::Error;

/// Errors raised while turning a catalog payload into records.
#[derive(Debug, Error)]
pub enum IngestError {
  /// The payload is not valid JSON.
  #[error("invalid catalog JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// The payload is valid JSON but carries no list of records.
  #[error("unexpected catalog payload shape: {0}")]
  UnexpectedShape(String),
}

/// Errors raised while loading or validating a [`SearchConfig`](crate::config::SearchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The configuration file could not be read.
  #[error("failed to read config: {0}")]
  Io(#[from] std::io::Error),

  /// The configuration is not valid JSON or has fields of the wrong type.
  #[error("invalid config JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// A field holds a value outside its accepted range.
  #[error("invalid config value for `{field}`: {reason}")]
  Invalid {
    /// Name of the offending field.
    field: &'static str,
    /// Why the value was rejected.
    reason: String,
  },
}

/// Top-level error for the crate.
#[derive(Debug, Error)]
pub enum HerbarioError {
  #[error(transparent)]
  Ingest(#[from] IngestError),

  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Convenience alias used across the crate.
pub type Result<T, E = HerbarioError> = std::result::Result<T, E>;
