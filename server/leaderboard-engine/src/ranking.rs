//! Bounded leaderboard selection.
//!
//! Every view sorts on a primary metric and breaks ties on a stable key (job name or
//! cause id), so output never depends on map iteration order.

use std::cmp::Ordering;

use crate::cause::CauseTally;
use crate::counter::JobCounter;
use crate::types::Outcome;

/// Sort `items` by `cmp` and keep the first `limit`.
fn top_n<'a, T, I, F>(items: I, limit: usize, cmp: F) -> Vec<T>
where
  T: Clone + 'a,
  I: Iterator<Item = &'a T>,
  F: Fn(&T, &T) -> Ordering,
{
  let mut ranked: Vec<&T> = items.collect();
  ranked.sort_by(|a, b| cmp(*a, *b));
  ranked.into_iter().take(limit).cloned().collect()
}

/// Causes by occurrences desc, then cause_id asc.
pub fn top_failure_causes<'a>(
  causes: impl Iterator<Item = &'a CauseTally>,
  limit: usize,
) -> Vec<CauseTally> {
  top_n(causes, limit, |a, b| {
    b.occurrences
      .cmp(&a.occurrences)
      .then_with(|| a.cause_id.cmp(&b.cause_id))
  })
}

/// Jobs whose latest build failed, newest first, then job asc.
pub fn most_recent_failed_builds<'a>(
  jobs: impl Iterator<Item = &'a JobCounter>,
  limit: usize,
) -> Vec<JobCounter> {
  top_n(
    jobs.filter(|j| j.last_outcome == Outcome::Failure),
    limit,
    by_recency,
  )
}

/// All jobs, newest latest build first, then job asc.
pub fn most_recent_builds<'a>(
  jobs: impl Iterator<Item = &'a JobCounter>,
  limit: usize,
) -> Vec<JobCounter> {
  top_n(jobs, limit, by_recency)
}

/// Jobs by cumulative failures desc, then job asc.
pub fn most_failed_jobs<'a>(
  jobs: impl Iterator<Item = &'a JobCounter>,
  limit: usize,
) -> Vec<JobCounter> {
  top_n(jobs, limit, |a, b| {
    b.failures.cmp(&a.failures).then_with(|| a.job.cmp(&b.job))
  })
}

fn by_recency(a: &JobCounter, b: &JobCounter) -> Ordering {
  b.last_seen
    .cmp(&a.last_seen)
    .then_with(|| a.job.cmp(&b.job))
}
