//! Cached, lazily loaded index shared by all tools.
//!
//! The first request loads the index through the repository and builds the
//! search index and API catalogue. The result is cached for the configured
//! TTL; an expired entry triggers a reload on the next request.

use crate::cache::TimedCache;
use crate::catalogue::ApiCatalogue;
use crate::error::SearchResult;
use crate::models::IndexSnapshot;
use crate::repositories::DocsRepository;
use crate::search::DocSearchIndex;
use std::sync::Arc;
use tokio::sync::RwLock;

const CACHE_KEY: &str = "search_index";

/// A loaded snapshot with the structures derived from it.
#[derive(Debug)]
pub struct LoadedIndex {
    pub snapshot: IndexSnapshot,
    pub search: DocSearchIndex,
    pub catalogue: ApiCatalogue,
}

impl LoadedIndex {
    /// Build the search index and catalogue for a snapshot.
    pub fn build(snapshot: IndexSnapshot) -> Self {
        let search = DocSearchIndex::build(snapshot.records());
        let catalogue = ApiCatalogue::from_records(snapshot.records());
        Self {
            snapshot,
            search,
            catalogue,
        }
    }
}

/// Loads the index on demand and caches it.
#[derive(Clone)]
pub struct IndexLoader {
    repo: Arc<dyn DocsRepository>,
    cache: Arc<RwLock<TimedCache<String, LoadedIndex>>>,
}

impl IndexLoader {
    /// Create a loader.
    ///
    /// # Arguments
    /// * `repo` - DocsRepository the index is read from
    /// * `cache_ttl_secs` - Cache time-to-live in seconds
    pub fn new(repo: Arc<dyn DocsRepository>, cache_ttl_secs: u64) -> Self {
        Self {
            repo,
            cache: Arc::new(RwLock::new(TimedCache::new(cache_ttl_secs))),
        }
    }

    /// Get the cached index or load a fresh one.
    ///
    /// Returns the index and whether it came from cache.
    pub async fn get_or_load(&self) -> SearchResult<(Arc<LoadedIndex>, bool)> {
        let key = CACHE_KEY.to_string();

        {
            let cache = self.cache.read().await;
            if let Some(loaded) = cache.get(&key) {
                tracing::debug!("Using cached search index");
                return Ok((loaded, true));
            }
        }

        // Writers queue here; only the first one loads
        let cache = self.cache.write().await;
        if let Some(loaded) = cache.get(&key) {
            return Ok((loaded, true));
        }

        tracing::info!("Loading search index from {}", self.repo.source());
        let start = std::time::Instant::now();

        let snapshot = self.repo.load().await?;
        let loaded = LoadedIndex::build(snapshot);

        tracing::info!(
            "Search index ready in {}ms ({} records, {} API items)",
            start.elapsed().as_millis(),
            loaded.snapshot.record_count(),
            loaded.catalogue.len()
        );

        cache.cleanup_expired();
        Ok((cache.insert(key, loaded), false))
    }

    /// Drop the cached index so the next request reloads it.
    pub async fn invalidate(&self) {
        tracing::info!("Invalidating cached search index");
        self.cache.write().await.clear();
    }

    /// Description of the configured source.
    pub fn source(&self) -> String {
        self.repo.source()
    }
}
