//! Upstream duplicate suppression. The store itself never dedups; hosts run events
//! through an [`EventFilter`] before ingesting.

use std::collections::HashSet;

use crate::types::Event;

/// Decides whether an event should reach the store.
pub trait EventFilter {
  /// True if `admit` would reject this event. Records nothing.
  fn contains(&self, event: &Event) -> bool;

  /// Returns true if the event is admitted. May record it as seen.
  fn admit(&mut self, event: &Event) -> bool;

  /// Forget everything seen so far.
  fn reset(&mut self);
}

/// Admits each `job#build` key once.
#[derive(Debug, Clone, Default)]
pub struct SeenBuilds {
  seen: HashSet<String>,
}

impl SeenBuilds {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.seen.len()
  }

  pub fn is_empty(&self) -> bool {
    self.seen.is_empty()
  }
}

impl EventFilter for SeenBuilds {
  fn contains(&self, event: &Event) -> bool {
    self.seen.contains(&event.key())
  }

  fn admit(&mut self, event: &Event) -> bool {
    self.seen.insert(event.key())
  }

  fn reset(&mut self) {
    self.seen.clear();
  }
}
