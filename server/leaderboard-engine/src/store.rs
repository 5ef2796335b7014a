//! Aggregation store: owns all per-job and per-cause state and builds summaries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cause::{self, CauseCatalog, CauseTally, NoCatalog};
use crate::config::{Config, MAX_PER_LIST};
use crate::counter::JobCounter;
use crate::error::InvalidEventError;
use crate::ranking;
use crate::summary::{self, Summary};
use crate::types::{Event, Outcome};

/// Timestamp range covered by the store.
///
/// Both bounds start at the creation (or last clear) time and only ever widen.
#[derive(Debug, Clone, Copy)]
struct Window {
  start: DateTime<Utc>,
  end: DateTime<Utc>,
}

impl Window {
  fn at(ts: DateTime<Utc>) -> Self {
    Self { start: ts, end: ts }
  }

  fn observe(&mut self, ts: DateTime<Utc>) {
    self.start = self.start.min(ts);
    self.end = self.end.max(ts);
  }
}

/// Single owner of the leaderboard state. Mutated only through [`ingest`](Self::ingest)
/// and [`clear`](Self::clear).
#[derive(Debug)]
pub struct AggregationStore {
  config: Config,
  jobs: HashMap<String, JobCounter>,
  causes: HashMap<String, CauseTally>,
  window: Window,
}

impl AggregationStore {
  pub fn new(config: Config) -> Self {
    Self::starting_at(config, Utc::now())
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  /// Store whose empty window sits at `created`.
  pub fn starting_at(config: Config, created: DateTime<Utc>) -> Self {
    Self {
      config,
      jobs: HashMap::new(),
      causes: HashMap::new(),
      window: Window::at(created),
    }
  }

  /// Ingest one event with no cause catalog.
  pub fn ingest(&mut self, event: &Event) -> Result<(), InvalidEventError> {
    self.ingest_with(event, &NoCatalog)
  }

  /// Ingest one event, resolving bare cause references through `catalog`.
  ///
  /// All-or-nothing: a rejected event leaves the store untouched.
  pub fn ingest_with(
    &mut self,
    event: &Event,
    catalog: &dyn CauseCatalog,
  ) -> Result<(), InvalidEventError> {
    if let Err(e) = validate(event) {
      warn!(job = %event.job, build = event.build_number, error = %e, "rejected event");
      return Err(e);
    }

    self.record_job(event);
    if event.outcome == Outcome::Failure {
      self.record_causes(event, catalog);
    } else if !event.causes.is_empty() {
      debug!(job = %event.job, outcome = %event.outcome, "ignoring causes on non-failure build");
    }
    self.window.observe(event.timestamp);
    Ok(())
  }

  fn record_job(&mut self, event: &Event) {
    let counter = self
      .jobs
      .entry(event.job.clone())
      .or_insert_with(|| JobCounter::new(event));
    if counter.record(event) {
      debug!("updated build info: {}", counter);
    } else {
      debug!(
        build = event.build_number,
        "counted older build, keeping latest: {}", counter
      );
    }
  }

  fn record_causes(&mut self, event: &Event, catalog: &dyn CauseCatalog) {
    for cause_ref in &event.causes {
      let details = cause::resolve_details(cause_ref, catalog);
      let tally = self
        .causes
        .entry(cause_ref.cause_id.clone())
        .or_insert_with(|| CauseTally::new(cause_ref.cause_id.clone(), event.timestamp));
      tally.record(event.timestamp, details);
      debug!(
        cause = %tally.cause_id,
        name = ?tally.display_name,
        categories = ?tally.categories_label(),
        occurrences = tally.occurrences,
        "updated failure cause"
      );
    }
  }

  /// Build a fresh summary of the current state. Never mutates the store.
  pub fn snapshot(&self) -> Summary {
    let limit = MAX_PER_LIST;
    Summary {
      window_start: self.window.start,
      window_end: self.window.end,
      total_jobs_tracked: self.jobs.len(),
      welcome_text: summary::welcome_text(
        &self.config.product_label,
        &self.window.start,
        &self.window.end,
        &self.config.timestamp_format,
      ),
      top_failure_causes: ranking::top_failure_causes(self.causes.values(), limit),
      most_recent_failed_builds: ranking::most_recent_failed_builds(self.jobs.values(), limit),
      most_recent_builds: ranking::most_recent_builds(self.jobs.values(), limit),
      most_failed_jobs: ranking::most_failed_jobs(self.jobs.values(), limit),
    }
  }

  /// Drop all counters and tallies; the window restarts at the current time.
  pub fn clear(&mut self) {
    self.clear_at(Utc::now());
  }

  pub fn clear_at(&mut self, now: DateTime<Utc>) {
    let jobs = self.jobs.len();
    let causes = self.causes.len();
    self.jobs.clear();
    self.causes.clear();
    self.window = Window::at(now);
    info!(jobs, causes, "cleared aggregation store");
  }

  /// Number of distinct jobs tracked.
  pub fn size(&self) -> usize {
    self.jobs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.jobs.is_empty()
  }

  /// Number of distinct failure causes tracked.
  pub fn cause_count(&self) -> usize {
    self.causes.len()
  }

  /// Read-only view of one job's counter.
  pub fn job(&self, job: &str) -> Option<&JobCounter> {
    self.jobs.get(job)
  }

  /// Read-only view of one cause's tally.
  pub fn cause(&self, cause_id: &str) -> Option<&CauseTally> {
    self.causes.get(cause_id)
  }
}

impl Default for AggregationStore {
  fn default() -> Self {
    Self::with_defaults()
  }
}

fn validate(event: &Event) -> Result<(), InvalidEventError> {
  if event.job.trim().is_empty() {
    return Err(InvalidEventError::new("job", "must not be empty"));
  }
  if event.build_number == 0 {
    return Err(InvalidEventError::new("build_number", "must be positive"));
  }
  if event.outcome == Outcome::Failure && event.causes.iter().any(|c| c.cause_id.is_empty()) {
    return Err(InvalidEventError::new("causes[].cause_id", "must not be empty"));
  }
  Ok(())
}

/// Thread-safe handle: one lock guards the whole store, so a snapshot never sees a
/// half-applied event.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
  inner: Arc<Mutex<AggregationStore>>,
}

impl SharedStore {
  pub fn new(store: AggregationStore) -> Self {
    Self {
      inner: Arc::new(Mutex::new(store)),
    }
  }

  pub fn ingest(&self, event: &Event) -> Result<(), InvalidEventError> {
    self.inner.lock().ingest(event)
  }

  pub fn ingest_with(
    &self,
    event: &Event,
    catalog: &dyn CauseCatalog,
  ) -> Result<(), InvalidEventError> {
    self.inner.lock().ingest_with(event, catalog)
  }

  pub fn snapshot(&self) -> Summary {
    self.inner.lock().snapshot()
  }

  pub fn clear(&self) {
    self.inner.lock().clear()
  }

  pub fn size(&self) -> usize {
    self.inner.lock().size()
  }
}
