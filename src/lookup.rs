use std::sync::Arc;

use crate::cache::RecordStore;
use crate::config::{CacheConfig, ConfigError};
use crate::provider::DataProvider;
use crate::refresh::{RefreshOutcome, RefreshScheduler, RefreshStatus};
use crate::resolve::{Levenshtein, NameDistance, NameResolver};
use crate::types::{Record, RecordId};

/// The lookup surface handed to command handlers.
///
/// Construct one per process and pass it by reference. Reads never fetch:
/// freshness belongs entirely to the background scheduler. `get_by_name`
/// returns `None` both before the first load and when nothing matches; check
/// [`LookupCache::is_ready`] to tell the two apart.
pub struct LookupCache<D = Levenshtein> {
    store: Arc<RecordStore>,
    resolver: Arc<NameResolver<D>>,
    scheduler: RefreshScheduler<D>,
}

impl LookupCache<Levenshtein> {
    /// Start a cache backed by `provider`. Must be called inside a tokio runtime.
    pub fn start(provider: Arc<dyn DataProvider>, config: CacheConfig) -> Result<Self, ConfigError> {
        Self::start_with_distance(provider, config, Levenshtein)
    }
}

impl<D> LookupCache<D>
where
    D: NameDistance + Send + Sync + 'static,
{
    pub fn start_with_distance(
        provider: Arc<dyn DataProvider>,
        config: CacheConfig,
        distance: D,
    ) -> Result<Self, ConfigError> {
        let store = Arc::new(RecordStore::new());
        let resolver = Arc::new(NameResolver::new(distance));
        let scheduler = RefreshScheduler::start(provider, Arc::clone(&store), Arc::clone(&resolver), config)?;

        Ok(Self {
            store,
            resolver,
            scheduler,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.scheduler.is_ready()
    }

    pub fn get_by_name(&self, text: &str) -> Option<Record> {
        if text.is_empty() {
            return None;
        }
        // Resolve and fetch against the same snapshot.
        let snapshot = self.store.current();
        let id = self.resolver.resolve(text, &snapshot)?;
        snapshot.get(id).cloned()
    }

    pub fn resolve(&self, text: &str) -> Option<RecordId> {
        self.resolver.resolve(text, &self.store.current())
    }

    pub fn status(&self) -> RefreshStatus {
        self.scheduler.status()
    }

    pub fn is_fresh(&self) -> bool {
        self.scheduler.is_fresh()
    }

    pub fn memo_len(&self) -> usize {
        self.resolver.memo_len()
    }

    pub fn fetch_count(&self) -> u64 {
        self.scheduler.fetch_count()
    }

    pub async fn refresh_now(&self) -> RefreshOutcome {
        self.scheduler.refresh_now().await
    }

    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }
}
