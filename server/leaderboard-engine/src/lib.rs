//! Build Leaderboard Engine: deterministic aggregation of CI build results.
//!
//! Ingests completed-build events, keeps per-job outcome counters and per-cause
//! failure tallies, and produces bounded, stably ordered summaries on demand.
//!
//! No DB, no network; pure computation + in-memory state.

pub mod cause;
pub mod config;
pub mod counter;
pub mod dedup;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod store;
pub mod summary;
pub mod types;

pub use cause::{CauseCatalog, CauseTally, NoCatalog};
pub use config::{Config, MAX_PER_LIST};
pub use counter::JobCounter;
pub use dedup::{EventFilter, SeenBuilds};
pub use error::{EngineError, InvalidEventError};
pub use pipeline::{Admission, Pipeline};
pub use store::{AggregationStore, SharedStore};
pub use summary::Summary;
pub use types::{CauseDetails, CauseRef, Event, InboundEvent, Outcome};

/// Install a stderr `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
  use tracing_subscriber::EnvFilter;

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}
