//! Documentation service layer.
//!
//! Business logic for searching, looking up and describing documentation
//! records. Validates raw tool input before it reaches the tools.

use crate::domain::{Category, Location, SymbolName};
use crate::error::{IndexError, SearchError, SearchResult};
use crate::tools::{
    ApiDescription, CatalogueTools, FindSymbolParams, FindSymbolResponse, HierarchyView,
    IndexLoader, IndexStatus, IndexedRecord, ListEntriesParams, ListEntriesResponse, LookupTools,
    SearchParams, SearchResponse, SearchTools,
};
use async_trait::async_trait;

/// Longest accepted query or symbol.
const MAX_QUERY_LENGTH: usize = 500;

/// Upper bound on results per request.
const MAX_RESULTS_LIMIT: usize = 100;

/// Upper bound on records per listing page.
const MAX_LIST_LIMIT: usize = 200;

/// Documentation service trait for business operations.
#[async_trait]
pub trait DocsService: Send + Sync {
    /// Full-text search with ranking.
    async fn search_docs(
        &self,
        query: String,
        max_results: Option<usize>,
        min_confidence: Option<u8>,
        category: Option<String>,
    ) -> SearchResult<SearchResponse>;

    /// Resolve a symbol name to API records.
    async fn find_symbol(
        &self,
        symbol: String,
        max_results: Option<usize>,
        min_confidence: Option<u8>,
    ) -> SearchResult<FindSymbolResponse>;

    /// All records at a location.
    async fn get_doc_entry(&self, location: &str) -> SearchResult<Vec<IndexedRecord>>;

    /// Records filtered by page and category.
    async fn list_entries(
        &self,
        page: Option<String>,
        category: Option<String>,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> SearchResult<ListEntriesResponse>;

    /// Load status and structural report of the current index.
    async fn validate_index(&self) -> SearchResult<IndexStatus>;

    /// Parsed API item for a symbol.
    async fn describe_api_item(&self, symbol: &str) -> SearchResult<ApiDescription>;

    /// Type hierarchy under `root`, or all of it.
    async fn type_hierarchy(&self, root: Option<String>) -> SearchResult<HierarchyView>;

    /// Drop the cached index and load it again.
    async fn refresh_index(&self) -> SearchResult<IndexStatus>;
}

/// Default implementation of DocsService.
pub struct DocsServiceImpl {
    loader: IndexLoader,
    search_tools: SearchTools,
    lookup_tools: LookupTools,
    catalogue_tools: CatalogueTools,
}

/// Validation helper functions.
impl DocsServiceImpl {
    /// Validate a search query or symbol.
    fn validate_query(query: &str, what: &str) -> Result<(), String> {
        if query.trim().is_empty() {
            return Err(format!("{} cannot be empty", what));
        }
        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(format!(
                "{} too long (max {} characters)",
                what, MAX_QUERY_LENGTH
            ));
        }
        Ok(())
    }

    fn validate_max_results(max_results: Option<usize>) -> Result<(), String> {
        match max_results {
            Some(0) => Err("max_results must be at least 1".to_string()),
            Some(n) if n > MAX_RESULTS_LIMIT => Err(format!(
                "max_results too large (max {})",
                MAX_RESULTS_LIMIT
            )),
            _ => Ok(()),
        }
    }

    fn validate_confidence(min_confidence: Option<u8>) -> Result<(), String> {
        match min_confidence {
            Some(c) if c > 100 => Err("min_confidence must be between 0 and 100".to_string()),
            _ => Ok(()),
        }
    }

    fn parse_category(category: Option<String>) -> Result<Option<Category>, String> {
        category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| c.to_lowercase().parse::<Category>().map_err(|e| e.to_string()))
            .transpose()
    }
}

impl DocsServiceImpl {
    /// Create a new docs service.
    pub fn new(
        loader: IndexLoader,
        search_tools: SearchTools,
        lookup_tools: LookupTools,
        catalogue_tools: CatalogueTools,
    ) -> Self {
        Self {
            loader,
            search_tools,
            lookup_tools,
            catalogue_tools,
        }
    }
}

#[async_trait]
impl DocsService for DocsServiceImpl {
    async fn search_docs(
        &self,
        query: String,
        max_results: Option<usize>,
        min_confidence: Option<u8>,
        category: Option<String>,
    ) -> SearchResult<SearchResponse> {
        Self::validate_query(&query, "Search query").map_err(SearchError::InvalidParameters)?;
        Self::validate_max_results(max_results).map_err(SearchError::InvalidParameters)?;
        Self::validate_confidence(min_confidence).map_err(SearchError::InvalidParameters)?;
        let category = Self::parse_category(category).map_err(SearchError::InvalidParameters)?;

        self.search_tools
            .search_docs(SearchParams {
                query,
                max_results,
                min_confidence,
                category,
            })
            .await
    }

    async fn find_symbol(
        &self,
        symbol: String,
        max_results: Option<usize>,
        min_confidence: Option<u8>,
    ) -> SearchResult<FindSymbolResponse> {
        Self::validate_query(&symbol, "Symbol").map_err(SearchError::InvalidParameters)?;
        Self::validate_max_results(max_results).map_err(SearchError::InvalidParameters)?;
        Self::validate_confidence(min_confidence).map_err(SearchError::InvalidParameters)?;

        self.search_tools
            .find_symbol(FindSymbolParams {
                symbol,
                max_results,
                min_confidence,
            })
            .await
    }

    async fn get_doc_entry(&self, location: &str) -> SearchResult<Vec<IndexedRecord>> {
        let location = Location::new(location.trim())
            .map_err(|e| SearchError::InvalidParameters(e.to_string()))?;

        let entries = self.lookup_tools.get_entries(&location).await?;
        if entries.is_empty() {
            let message = format!("no record at location '{}'", location);
            return Err(IndexError::NotFound(message).into());
        }
        Ok(entries)
    }

    async fn list_entries(
        &self,
        page: Option<String>,
        category: Option<String>,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> SearchResult<ListEntriesResponse> {
        let category = Self::parse_category(category).map_err(SearchError::InvalidParameters)?;
        let limit = limit.unwrap_or(ListEntriesParams::default().limit);
        if limit == 0 || limit > MAX_LIST_LIMIT {
            return Err(SearchError::InvalidParameters(format!(
                "limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }

        self.lookup_tools
            .list_entries(ListEntriesParams {
                page: page.filter(|p| !p.trim().is_empty()),
                category,
                offset: offset.unwrap_or(0),
                limit,
            })
            .await
    }

    async fn validate_index(&self) -> SearchResult<IndexStatus> {
        self.lookup_tools.status().await
    }

    async fn describe_api_item(&self, symbol: &str) -> SearchResult<ApiDescription> {
        Self::validate_query(symbol, "Symbol").map_err(SearchError::InvalidParameters)?;
        let symbol =
            SymbolName::new(symbol).map_err(|e| SearchError::InvalidParameters(e.to_string()))?;

        self.catalogue_tools
            .describe(&symbol)
            .await?
            .ok_or_else(|| IndexError::NotFound(format!("API item '{}'", symbol)).into())
    }

    async fn type_hierarchy(&self, root: Option<String>) -> SearchResult<HierarchyView> {
        let root = root
            .filter(|r| !r.trim().is_empty())
            .map(SymbolName::new)
            .transpose()
            .map_err(|e| SearchError::InvalidParameters(e.to_string()))?;

        self.catalogue_tools
            .hierarchy(root.as_ref())
            .await?
            .ok_or_else(|| {
                let name = root.as_ref().map(|r| r.to_string()).unwrap_or_default();
                IndexError::NotFound(format!("type '{}' in the hierarchy", name)).into()
            })
    }

    async fn refresh_index(&self) -> SearchResult<IndexStatus> {
        self.loader.invalidate().await;
        self.lookup_tools.status().await
    }
}
