//! Structured error types for the leaderboard engine.

use thiserror::Error;

/// An event was rejected at ingest. No state was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event: {field}: {reason}")]
pub struct InvalidEventError {
  pub field: String,
  pub reason: String,
}

impl InvalidEventError {
  pub fn new(field: &str, reason: &str) -> Self {
    Self {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

/// Errors surfaced to hosts that feed raw input into the engine.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error(transparent)]
  Invalid(#[from] InvalidEventError),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  /// Field name for validation failures, if any.
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::Invalid(e) => Some(&e.field),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_event_message_names_field() {
    let err = InvalidEventError::new("job", "must not be empty");
    assert_eq!(err.to_string(), "invalid event: job: must not be empty");
  }

  #[test]
  fn engine_error_exposes_field_only_for_validation() {
    let err: EngineError = InvalidEventError::new("result", "unknown").into();
    assert_eq!(err.field(), Some("result"));
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert_eq!(EngineError::from(json_err).field(), None);
  }
}
