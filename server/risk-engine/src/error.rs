//! Structured error types for the risk engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("invariant: {what}: {detail}")]
  Invariant { what: String, detail: String },
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn invariant(what: &str, detail: impl Into<String>) -> Self {
    Self::Invariant {
      what: what.to_string(),
      detail: detail.into(),
    }
  }

  /// Field name for the error object, when one can be pinned down.
  pub fn field(&self) -> Option<String> {
    match self {
      Self::Validation { field, .. } => Some(field.clone()),
      Self::Invariant { what, .. } => Some(what.clone()),
      Self::Json(_) | Self::Io(_) => None,
    }
  }
}
