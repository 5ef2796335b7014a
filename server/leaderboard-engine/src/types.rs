//! Core types for the leaderboard engine (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound types (JSON contract: what the host sends)
// ---------------------------------------------------------------------------

/// One completed build as reported by the host. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
  pub job: String,
  pub build_number: u64,
  pub timestamp: String,
  pub result: String,
  #[serde(default)]
  pub causes: Vec<InboundCause>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundCause {
  pub id: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// Outcome enum (closed set)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
  Success,
  Failure,
  Unstable,
  Aborted,
}

impl Outcome {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "success" | "passed" => Some(Self::Success),
      "failure" | "failed" => Some(Self::Failure),
      "unstable" => Some(Self::Unstable),
      "aborted" | "abort" => Some(Self::Aborted),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Success => "SUCCESS",
      Self::Failure => "FAILURE",
      Self::Unstable => "UNSTABLE",
      Self::Aborted => "ABORTED",
    }
  }
}

impl std::fmt::Display for Outcome {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Canonical event
// ---------------------------------------------------------------------------

/// Display metadata for a failure cause.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CauseDetails {
  pub display_name: Option<String>,
  #[serde(default)]
  pub categories: Vec<String>,
}

/// A failure cause referenced by an event. Metadata is optional; a bare id can be
/// resolved through a [`crate::cause::CauseCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseRef {
  pub cause_id: String,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub categories: Vec<String>,
}

impl CauseRef {
  pub fn bare(cause_id: impl Into<String>) -> Self {
    Self {
      cause_id: cause_id.into(),
      display_name: None,
      categories: Vec::new(),
    }
  }

  pub fn named(cause_id: impl Into<String>, display_name: impl Into<String>) -> Self {
    Self {
      cause_id: cause_id.into(),
      display_name: Some(display_name.into()),
      categories: Vec::new(),
    }
  }

  /// Metadata carried by the reference itself, if any.
  pub fn details(&self) -> Option<CauseDetails> {
    if self.display_name.is_none() && self.categories.is_empty() {
      return None;
    }
    Some(CauseDetails {
      display_name: self.display_name.clone(),
      categories: self.categories.clone(),
    })
  }
}

/// Canonical completed-build event after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub job: String,
  pub build_number: u64,
  pub timestamp: DateTime<Utc>,
  pub outcome: Outcome,
  #[serde(default)]
  pub causes: Vec<CauseRef>,
}

impl Event {
  pub fn new(
    job: impl Into<String>,
    build_number: u64,
    timestamp: DateTime<Utc>,
    outcome: Outcome,
  ) -> Self {
    Self {
      job: job.into(),
      build_number,
      timestamp,
      outcome,
      causes: Vec::new(),
    }
  }

  pub fn with_causes(mut self, causes: Vec<CauseRef>) -> Self {
    self.causes = causes;
    self
  }

  /// Dedup key used by hosts: "job#build".
  pub fn key(&self) -> String {
    format!("{}#{}", self.job, self.build_number)
  }
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Control line on the engine's stdin, e.g. `{"command":"snapshot"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ControlLine {
  pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
  Snapshot,
  Clear,
}

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
