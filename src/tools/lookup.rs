//! Record lookup tools: by location, by page/category, and index status.

use crate::domain::{Category, Location};
use crate::error::SearchResult;
use crate::metrics::Metrics;
use crate::models::DocRecord;
use crate::tools::IndexLoader;
use crate::validation::ValidationReport;
use chrono::{DateTime, Utc};

/// A record together with its position in the index.
#[derive(Debug, Clone)]
pub struct IndexedRecord {
    pub index: usize,
    pub record: DocRecord,
}

/// Parameters for listing records.
#[derive(Debug, Clone)]
pub struct ListEntriesParams {
    /// Page title, case-insensitive
    pub page: Option<String>,

    pub category: Option<Category>,

    /// Number of matching records to skip
    pub offset: usize,

    /// Maximum number of records to return
    pub limit: usize,
}

impl Default for ListEntriesParams {
    fn default() -> Self {
        Self {
            page: None,
            category: None,
            offset: 0,
            limit: 50,
        }
    }
}

/// One page of matching records.
#[derive(Debug, Clone)]
pub struct ListEntriesResponse {
    /// Number of records matching the filter
    pub total: usize,
    pub offset: usize,
    pub entries: Vec<IndexedRecord>,
}

/// Load status and structural report of the current index.
#[derive(Debug, Clone)]
pub struct IndexStatus {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub from_cache: bool,
    pub pages: Vec<String>,
    pub report: ValidationReport,
}

/// Lookup tools for direct record access.
#[derive(Clone)]
pub struct LookupTools {
    loader: IndexLoader,
    metrics: Metrics,
}

impl LookupTools {
    pub fn new(loader: IndexLoader, metrics: Metrics) -> Self {
        Self { loader, metrics }
    }

    /// All records whose location equals `location`.
    pub async fn get_entries(&self, location: &Location) -> SearchResult<Vec<IndexedRecord>> {
        let (loaded, _) = self.loader.get_or_load().await?;

        let entries: Vec<IndexedRecord> = loaded
            .snapshot
            .at_location(location)
            .into_iter()
            .map(|(index, record)| IndexedRecord {
                index,
                record: record.clone(),
            })
            .collect();

        self.metrics.record_query(entries.len());
        Ok(entries)
    }

    /// Records filtered by page and category, paginated.
    pub async fn list_entries(
        &self,
        params: ListEntriesParams,
    ) -> SearchResult<ListEntriesResponse> {
        let (loaded, _) = self.loader.get_or_load().await?;

        let matching: Vec<(usize, &DocRecord)> = loaded
            .snapshot
            .filter(params.page.as_deref(), params.category)
            .collect();
        let total = matching.len();

        let entries: Vec<IndexedRecord> = matching
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .map(|(index, record)| IndexedRecord {
                index,
                record: record.clone(),
            })
            .collect();

        self.metrics.record_query(entries.len());
        Ok(ListEntriesResponse {
            total,
            offset: params.offset,
            entries,
        })
    }

    /// Structural report of the loaded index.
    pub async fn status(&self) -> SearchResult<IndexStatus> {
        let (loaded, from_cache) = self.loader.get_or_load().await?;
        let snapshot = &loaded.snapshot;

        Ok(IndexStatus {
            source: snapshot.source().to_string(),
            loaded_at: snapshot.loaded_at(),
            from_cache,
            pages: snapshot.pages().into_iter().map(String::from).collect(),
            report: snapshot.report().clone(),
        })
    }
}
