//! Search tools for full-text search and symbol resolution.
//!
//! Both run against the cached index provided by [`IndexLoader`].

use crate::domain::Category;
use crate::error::SearchResult;
use crate::matching::{SymbolMatch, SymbolMatcher};
use crate::metrics::Metrics;
use crate::search::SearchHit;
use crate::tools::IndexLoader;

/// Search tools for performing full-text searches.
#[derive(Clone)]
pub struct SearchTools {
    loader: IndexLoader,
    default_max_results: usize,
    default_min_confidence: u8,
    metrics: Metrics,
}

/// Parameters for full-text search.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Search query string
    pub query: String,

    /// Maximum number of results to return
    pub max_results: Option<usize>,

    /// Minimum confidence threshold (0-100)
    pub min_confidence: Option<u8>,

    /// Only return records of this category
    pub category: Option<Category>,
}

/// Response from search with cache metadata.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Search results
    pub results: Vec<SearchHit>,

    /// Whether the index came from cache
    pub from_cache: bool,

    /// Number of records in the index
    pub index_size: usize,
}

/// Parameters for symbol resolution.
#[derive(Debug, Clone, Default)]
pub struct FindSymbolParams {
    /// Symbol as typed, qualified or not
    pub symbol: String,

    /// Maximum number of results to return
    pub max_results: Option<usize>,

    /// Minimum confidence threshold (0-100)
    pub min_confidence: Option<u8>,
}

/// Response from find_symbol.
#[derive(Debug, Clone)]
pub struct FindSymbolResponse {
    pub matches: Vec<SymbolMatch>,
    pub from_cache: bool,
}

impl SearchTools {
    /// Create new search tools.
    ///
    /// # Arguments
    /// * `loader` - Shared index loader
    /// * `default_max_results` - Result limit when a request gives none
    /// * `default_min_confidence` - Threshold when a request gives none
    /// * `metrics` - Query counters
    pub fn new(
        loader: IndexLoader,
        default_max_results: usize,
        default_min_confidence: u8,
        metrics: Metrics,
    ) -> Self {
        Self {
            loader,
            default_max_results,
            default_min_confidence,
            metrics,
        }
    }

    /// Perform a full-text search over titles, symbol names and text.
    pub async fn search_docs(&self, params: SearchParams) -> SearchResult<SearchResponse> {
        let max_results = params.max_results.unwrap_or(self.default_max_results);
        let min_confidence = params.min_confidence.unwrap_or(self.default_min_confidence);

        let (loaded, from_cache) = self.loader.get_or_load().await?;

        let results =
            loaded
                .search
                .search(&params.query, max_results, min_confidence, params.category);

        tracing::debug!(
            "search_docs '{}' returned {} results",
            params.query,
            results.len()
        );
        self.metrics.record_query(results.len());

        Ok(SearchResponse {
            results,
            from_cache,
            index_size: loaded.snapshot.record_count(),
        })
    }

    /// Resolve a symbol to API records.
    pub async fn find_symbol(&self, params: FindSymbolParams) -> SearchResult<FindSymbolResponse> {
        let max_results = params.max_results.unwrap_or(self.default_max_results);
        let min_confidence = params.min_confidence.unwrap_or(self.default_min_confidence);

        let (loaded, from_cache) = self.loader.get_or_load().await?;

        let mut matcher = SymbolMatcher::new();
        let matches = matcher.find_matches(
            &params.symbol,
            loaded.snapshot.records(),
            max_results,
            min_confidence,
        );
        self.metrics.record_query(matches.len());

        Ok(FindSymbolResponse {
            matches,
            from_cache,
        })
    }
}
