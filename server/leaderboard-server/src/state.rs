//! Shared application state for the HTTP host.

use leaderboard_engine::{AggregationStore, Config, SeenBuilds, SharedStore};
use parking_lot::Mutex;

pub struct AppState {
  pub store: SharedStore,
  /// Builds already ingested. Locked for the whole check-then-ingest sequence.
  pub seen: Mutex<SeenBuilds>,
}

impl AppState {
  pub fn new(config: Config) -> Self {
    Self {
      store: SharedStore::new(AggregationStore::new(config)),
      seen: Mutex::new(SeenBuilds::new()),
    }
  }
}
