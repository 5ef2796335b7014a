//! Normalize inbound events into canonical internal Event models.

use chrono::{DateTime, Utc};

use crate::error::InvalidEventError;
use crate::types::*;

/// Parse and validate an InboundEvent into a canonical Event.
pub fn normalize(raw: &InboundEvent) -> Result<Event, InvalidEventError> {
  let job = raw.job.trim();
  if job.is_empty() {
    return Err(InvalidEventError::new("job", "must not be empty"));
  }

  if raw.build_number == 0 {
    return Err(InvalidEventError::new("build_number", "must be positive"));
  }

  let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&raw.timestamp)
    .map_err(|e| InvalidEventError::new("timestamp", &format!("invalid RFC3339: {}", e)))?
    .with_timezone(&Utc);

  let outcome = Outcome::from_str_loose(&raw.result).ok_or_else(|| {
    InvalidEventError::new("result", "expected success|failure|unstable|aborted")
  })?;

  let causes = raw
    .causes
    .iter()
    .map(|c| {
      let id = c.id.trim();
      if id.is_empty() {
        return Err(InvalidEventError::new("causes[].id", "must not be empty"));
      }
      Ok(CauseRef {
        cause_id: id.to_string(),
        display_name: c
          .name
          .as_deref()
          .map(str::trim)
          .filter(|n| !n.is_empty())
          .map(str::to_string),
        categories: c
          .categories
          .iter()
          .map(|cat| cat.trim())
          .filter(|cat| !cat.is_empty())
          .map(str::to_string)
          .collect(),
      })
    })
    .collect::<Result<Vec<_>, InvalidEventError>>()?;

  Ok(Event {
    job: job.to_string(),
    build_number: raw.build_number,
    timestamp,
    outcome,
    causes,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(job: &str, result: &str) -> InboundEvent {
    InboundEvent {
      job: job.into(),
      build_number: 12,
      timestamp: "2025-01-15T10:30:00Z".into(),
      result: result.into(),
      causes: vec![InboundCause {
        id: " c1 ".into(),
        name: Some("Compilation error".into()),
        categories: vec!["code".into(), " ".into()],
      }],
    }
  }

  #[test]
  fn normalize_valid_event() {
    let event = normalize(&raw(" backend-build ", "FAILURE")).unwrap();
    assert_eq!(event.job, "backend-build");
    assert_eq!(event.build_number, 12);
    assert_eq!(event.outcome, Outcome::Failure);
    assert_eq!(event.causes[0].cause_id, "c1");
    assert_eq!(event.causes[0].categories, vec!["code".to_string()]);
  }

  #[test]
  fn normalize_rejects_empty_job() {
    let err = normalize(&raw("  ", "SUCCESS")).unwrap_err();
    assert_eq!(err.field, "job");
  }

  #[test]
  fn normalize_rejects_unknown_result() {
    let err = normalize(&raw("backend-build", "NOT_BUILT")).unwrap_err();
    assert_eq!(err.field, "result");
  }

  #[test]
  fn normalize_rejects_bad_timestamp() {
    let mut r = raw("backend-build", "SUCCESS");
    r.timestamp = "yesterday".into();
    let err = normalize(&r).unwrap_err();
    assert!(err.to_string().contains("timestamp"));
  }

  #[test]
  fn normalize_rejects_empty_cause_id() {
    let mut r = raw("backend-build", "FAILURE");
    r.causes[0].id = "".into();
    let err = normalize(&r).unwrap_err();
    assert_eq!(err.field, "causes[].id");
  }

  #[test]
  fn blank_cause_name_becomes_bare_reference() {
    let mut r = raw("backend-build", "FAILURE");
    r.causes[0].name = Some("   ".into());
    r.causes[0].categories.clear();
    let event = normalize(&r).unwrap();
    assert!(event.causes[0].details().is_none());
  }
}
