//! HTTP handlers for the leaderboard host.

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use leaderboard_engine::dedup::EventFilter;
use leaderboard_engine::normalize::normalize;
use leaderboard_engine::types::ErrorOutput;
use leaderboard_engine::{InboundEvent, InvalidEventError, Summary};

use crate::state::AppState;

pub async fn health() -> &'static str {
  "ok"
}

fn bad_request(e: InvalidEventError) -> Response {
  warn!(field = %e.field, reason = %e.reason, "ingest: invalid event");
  let body = ErrorOutput::new(e.reason).with_field(e.field);
  (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// 200 when ingested, 208 when the build was already seen, 400 when invalid.
pub async fn ingest(
  State(state): State<Arc<AppState>>,
  Json(payload): Json<InboundEvent>,
) -> Response {
  let event = match normalize(&payload) {
    Ok(e) => e,
    Err(e) => return bad_request(e),
  };

  let mut seen = state.seen.lock();
  if seen.contains(&event) {
    warn!(key = %event.key(), "ingest: duplicate build");
    return StatusCode::ALREADY_REPORTED.into_response();
  }
  if let Err(e) = state.store.ingest(&event) {
    return bad_request(e);
  }
  seen.admit(&event);
  StatusCode::OK.into_response()
}

pub async fn summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
  Json(state.store.snapshot())
}

pub async fn clear(State(state): State<Arc<AppState>>) -> StatusCode {
  let mut seen = state.seen.lock();
  state.store.clear();
  seen.reset();
  info!("cleared leaderboard state");
  StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
  use super::*;
  use leaderboard_engine::Config;

  fn state() -> Arc<AppState> {
    Arc::new(AppState::new(Config::default()))
  }

  fn payload(job: &str, build: u64, result: &str) -> InboundEvent {
    serde_json::from_value(serde_json::json!({
      "job": job,
      "build_number": build,
      "timestamp": "2025-01-15T10:30:00Z",
      "result": result,
      "causes": [{"id": "c1", "name": "Timeout"}]
    }))
    .unwrap()
  }

  #[tokio::test]
  async fn ingest_then_summary() {
    let st = state();
    let resp = ingest(State(st.clone()), Json(payload("api", 1, "FAILURE"))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let Json(s) = summary(State(st)).await;
    assert_eq!(s.total_jobs_tracked, 1);
    assert_eq!(s.most_recent_failed_builds[0].job, "api");
    assert_eq!(s.top_failure_causes[0].occurrences, 1);
  }

  #[tokio::test]
  async fn duplicate_is_reported_not_counted() {
    let st = state();
    ingest(State(st.clone()), Json(payload("api", 1, "FAILURE"))).await;
    let resp = ingest(State(st.clone()), Json(payload("api", 1, "FAILURE"))).await;
    assert_eq!(resp.status(), StatusCode::ALREADY_REPORTED);
    let Json(s) = summary(State(st)).await;
    assert_eq!(s.most_failed_jobs[0].failures, 1);
  }

  #[tokio::test]
  async fn invalid_event_is_bad_request() {
    let st = state();
    let resp = ingest(State(st.clone()), Json(payload("", 1, "SUCCESS"))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = ingest(State(st.clone()), Json(payload("api", 1, "SKIPPED"))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(st.store.size(), 0);
    assert!(st.seen.lock().is_empty());
  }

  #[tokio::test]
  async fn clear_forgets_builds() {
    let st = state();
    ingest(State(st.clone()), Json(payload("api", 1, "SUCCESS"))).await;
    assert_eq!(clear(State(st.clone())).await, StatusCode::NO_CONTENT);
    assert_eq!(st.store.size(), 0);
    let resp = ingest(State(st.clone()), Json(payload("api", 1, "SUCCESS"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn health_is_ok() {
    assert_eq!(health().await, "ok");
  }
}
