//! Per-job rolling outcome counters.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Event, Outcome};

/// Running tally of outcomes for one job, plus a pointer to its highest-numbered build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounter {
  pub job: String,
  pub last_seen: DateTime<Utc>,
  pub last_build_number: u64,
  pub last_outcome: Outcome,
  pub successes: u64,
  pub failures: u64,
  pub unstables: u64,
  pub aborts: u64,
}

impl JobCounter {
  /// Fresh counter pointing at `event`, with all tallies at zero.
  pub fn new(event: &Event) -> Self {
    Self {
      job: event.job.clone(),
      last_seen: event.timestamp,
      last_build_number: event.build_number,
      last_outcome: event.outcome,
      successes: 0,
      failures: 0,
      unstables: 0,
      aborts: 0,
    }
  }

  /// Count `event` and advance the build pointer if its build number is higher.
  ///
  /// Returns true when the pointer moved. An equal build number does not move it.
  pub fn record(&mut self, event: &Event) -> bool {
    self.increment(event.outcome);
    if event.build_number > self.last_build_number {
      self.last_seen = event.timestamp;
      self.last_build_number = event.build_number;
      self.last_outcome = event.outcome;
      true
    } else {
      false
    }
  }

  fn increment(&mut self, outcome: Outcome) {
    match outcome {
      Outcome::Success => self.successes += 1,
      Outcome::Failure => self.failures += 1,
      Outcome::Unstable => self.unstables += 1,
      Outcome::Aborted => self.aborts += 1,
    }
  }

  pub fn total(&self) -> u64 {
    self.successes + self.failures + self.unstables + self.aborts
  }

  /// Failure percentage rounded half-up, 0 when nothing was recorded.
  pub fn failure_rate(&self) -> u64 {
    let total = self.total().max(1);
    (200 * self.failures + total) / (2 * total)
  }
}

impl fmt::Display for JobCounter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} #{} {} --- total({}) successes({}) failures({}) unstables({}) aborts({}) failure rate({}%)",
      self.job,
      self.last_build_number,
      self.last_outcome,
      self.total(),
      self.successes,
      self.failures,
      self.unstables,
      self.aborts,
      self.failure_rate()
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn ev(build: u64, outcome: Outcome, min: u32) -> Event {
    let ts = Utc.with_ymd_and_hms(2025, 1, 15, 10, min, 0).unwrap();
    Event::new("api-tests", build, ts, outcome)
  }

  #[test]
  fn new_counter_starts_empty() {
    let c = JobCounter::new(&ev(1, Outcome::Failure, 0));
    assert_eq!(c.total(), 0);
    assert_eq!(c.failure_rate(), 0);
    assert_eq!(c.last_outcome, Outcome::Failure);
  }

  #[test]
  fn higher_build_moves_pointer() {
    let first = ev(1, Outcome::Success, 0);
    let mut c = JobCounter::new(&first);
    c.record(&first);
    assert!(c.record(&ev(2, Outcome::Failure, 5)));
    assert_eq!(c.last_build_number, 2);
    assert_eq!(c.last_outcome, Outcome::Failure);
    assert_eq!(c.total(), 2);
  }

  #[test]
  fn lower_or_equal_build_only_counts() {
    let first = ev(5, Outcome::Success, 10);
    let mut c = JobCounter::new(&first);
    c.record(&first);
    assert!(!c.record(&ev(3, Outcome::Failure, 20)));
    assert!(!c.record(&ev(5, Outcome::Aborted, 30)));
    assert_eq!(c.last_build_number, 5);
    assert_eq!(c.last_outcome, Outcome::Success);
    assert_eq!(c.last_seen, first.timestamp);
    assert_eq!(c.failures, 1);
    assert_eq!(c.aborts, 1);
    assert_eq!(c.total(), 3);
  }

  #[test]
  fn failure_rate_rounds_half_up() {
    let mut c = JobCounter::new(&ev(1, Outcome::Success, 0));
    c.failures = 1;
    c.successes = 7;
    // 12.5% rounds to 13
    assert_eq!(c.failure_rate(), 13);
    c.successes = 3;
    assert_eq!(c.failure_rate(), 25);
    c.successes = 0;
    assert_eq!(c.failure_rate(), 100);
  }

  #[test]
  fn display_lists_all_tallies() {
    let first = ev(7, Outcome::Unstable, 0);
    let mut c = JobCounter::new(&first);
    c.record(&first);
    let line = c.to_string();
    assert!(line.starts_with("api-tests #7 UNSTABLE"));
    assert!(line.contains("unstables(1)"));
    assert!(line.contains("failure rate(0%)"));
  }
}
