//! Host-side ingest path: normalize, dedup, then aggregate.

use tracing::warn;

use crate::cause::{CauseCatalog, NoCatalog};
use crate::config::Config;
use crate::dedup::{EventFilter, SeenBuilds};
use crate::error::EngineError;
use crate::normalize;
use crate::store::AggregationStore;
use crate::summary::Summary;
use crate::types::{Event, InboundEvent};

/// What happened to one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
  Ingested,
  Duplicate,
}

/// Store plus the dedup filter that guards it.
pub struct Pipeline<F: EventFilter = SeenBuilds> {
  store: AggregationStore,
  filter: F,
  catalog: Box<dyn CauseCatalog + Send>,
}

impl Pipeline<SeenBuilds> {
  pub fn new(config: Config) -> Self {
    Self::with_filter(AggregationStore::new(config), SeenBuilds::new())
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }
}

impl<F: EventFilter> Pipeline<F> {
  pub fn with_filter(store: AggregationStore, filter: F) -> Self {
    Self {
      store,
      filter,
      catalog: Box::new(NoCatalog),
    }
  }

  /// Resolve bare cause ids through `catalog` from now on.
  pub fn with_catalog(mut self, catalog: impl CauseCatalog + Send + 'static) -> Self {
    self.catalog = Box::new(catalog);
    self
  }

  /// Normalize and ingest one raw event unless the filter has already seen it.
  pub fn process(&mut self, raw: &InboundEvent) -> Result<Admission, EngineError> {
    let event = normalize::normalize(raw)?;
    self.process_event(&event)
  }

  /// Ingest an already-built event. The key is only recorded once the store accepts it.
  pub fn process_event(&mut self, event: &Event) -> Result<Admission, EngineError> {
    if self.filter.contains(event) {
      warn!(key = %event.key(), "skipping duplicate build");
      return Ok(Admission::Duplicate);
    }
    self.store.ingest_with(event, self.catalog.as_ref())?;
    self.filter.admit(event);
    Ok(Admission::Ingested)
  }

  pub fn snapshot(&self) -> Summary {
    self.store.snapshot()
  }

  /// Clear the store and forget every seen build.
  pub fn clear(&mut self) {
    self.store.clear();
    self.filter.reset();
  }

  pub fn store(&self) -> &AggregationStore {
    &self.store
  }
}
