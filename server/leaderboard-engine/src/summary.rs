//! Immutable leaderboard snapshot handed to hosts.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cause::CauseTally;
use crate::counter::JobCounter;

/// Point-in-time copy of every ranked view. Owns its data; later ingests never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
  pub window_start: DateTime<Utc>,
  pub window_end: DateTime<Utc>,
  pub total_jobs_tracked: usize,
  pub welcome_text: String,
  pub top_failure_causes: Vec<CauseTally>,
  pub most_recent_failed_builds: Vec<JobCounter>,
  pub most_recent_builds: Vec<JobCounter>,
  pub most_failed_jobs: Vec<JobCounter>,
}

/// "<label> (<start> to <end>)"
pub fn welcome_text(
  label: &str,
  start: &DateTime<Utc>,
  end: &DateTime<Utc>,
  format: &str,
) -> String {
  format!(
    "{} ({} to {})",
    label,
    format_timestamp(start, format),
    format_timestamp(end, format)
  )
}

/// Render `ts` with a chrono format string, or as RFC 3339 if the format is invalid.
fn format_timestamp(ts: &DateTime<Utc>, format: &str) -> String {
  let mut out = String::new();
  match write!(out, "{}", ts.format(format)) {
    Ok(()) => out,
    Err(_) => ts.to_rfc3339(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn welcome_text_includes_label_and_bounds() {
    let start = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 1, 16, 9, 30, 5).unwrap();
    let text = welcome_text("DashBeats", &start, &end, "%Y-%m-%d %H:%M:%S UTC");
    assert_eq!(
      text,
      "DashBeats (2025-01-15 08:00:00 UTC to 2025-01-16 09:30:05 UTC)"
    );
  }

  #[test]
  fn unknown_format_specifier_does_not_panic() {
    let ts = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
    let text = welcome_text("DashBeats", &ts, &ts, "%Q");
    assert_eq!(
      text,
      "DashBeats (2025-01-15T08:00:00+00:00 to 2025-01-15T08:00:00+00:00)"
    );
  }
}
