//! Per-cause occurrence tallies and cause-name resolution.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CauseDetails, CauseRef};

/// Running occurrence count for one failure cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseTally {
  pub cause_id: String,
  pub display_name: Option<String>,
  pub categories: Vec<String>,
  pub occurrences: u64,
  /// Most recent event date that referenced this cause.
  pub last_seen: DateTime<Utc>,
}

impl CauseTally {
  pub fn new(cause_id: impl Into<String>, ts: DateTime<Utc>) -> Self {
    Self {
      cause_id: cause_id.into(),
      display_name: None,
      categories: Vec::new(),
      occurrences: 0,
      last_seen: ts,
    }
  }

  /// Count one occurrence at `ts`. Metadata is replaced when `details` is present,
  /// otherwise whatever was last known is kept.
  pub fn record(&mut self, ts: DateTime<Utc>, details: Option<CauseDetails>) {
    self.occurrences += 1;
    if let Some(d) = details {
      self.display_name = d.display_name;
      self.categories = d.categories;
    }
    if ts > self.last_seen {
      self.last_seen = ts;
    }
  }

  /// Categories joined with "/", or None when there are none.
  pub fn categories_label(&self) -> Option<String> {
    if self.categories.is_empty() {
      None
    } else {
      Some(self.categories.join("/"))
    }
  }
}

/// Lookup of current cause metadata by id.
pub trait CauseCatalog {
  fn resolve(&self, cause_id: &str) -> Option<CauseDetails>;
}

/// Catalog that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalog;

impl CauseCatalog for NoCatalog {
  fn resolve(&self, _cause_id: &str) -> Option<CauseDetails> {
    None
  }
}

impl CauseCatalog for HashMap<String, CauseDetails> {
  fn resolve(&self, cause_id: &str) -> Option<CauseDetails> {
    self.get(cause_id).cloned()
  }
}

/// Metadata for a reference: its own if it carries any, else the catalog's.
pub fn resolve_details(cause: &CauseRef, catalog: &dyn CauseCatalog) -> Option<CauseDetails> {
  cause.details().or_else(|| catalog.resolve(&cause.cause_id))
}
