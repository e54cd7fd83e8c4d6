//! A loaded search index, as served to tools.

use crate::domain::{Category, Location};
use crate::models::{DocRecord, ParsedIndex, SearchIndexDocument};
use crate::validation::ValidationReport;
use chrono::{DateTime, Utc};

/// An immutable, loaded search index.
///
/// Snapshots are shared behind `Arc` and replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    document: SearchIndexDocument,
    report: ValidationReport,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl IndexSnapshot {
    /// Wrap a parsed index loaded from `source`.
    pub fn new(parsed: ParsedIndex, source: impl Into<String>) -> Self {
        Self {
            document: parsed.document,
            report: parsed.report,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Build a snapshot directly from records (no raw payload to report on).
    pub fn from_records(docs: Vec<DocRecord>, source: impl Into<String>) -> Self {
        let mut report = ValidationReport {
            record_count: docs.len(),
            ..Default::default()
        };
        for doc in &docs {
            *report.category_counts.entry(doc.category).or_default() += 1;
        }
        Self {
            document: SearchIndexDocument { docs },
            report,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    /// All records, in index order.
    pub fn records(&self) -> &[DocRecord] {
        &self.document.docs
    }

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.document.len()
    }

    /// Structural report captured at load time.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Where the index was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// When the index was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Records whose location equals `location` exactly.
    ///
    /// Several prose records share a page location such as `API/`.
    pub fn at_location(&self, location: &Location) -> Vec<(usize, &DocRecord)> {
        self.records()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.location == location.as_str())
            .collect()
    }

    /// Records filtered by page title and/or category, with their positions.
    pub fn filter(
        &self,
        page: Option<&str>,
        category: Option<Category>,
    ) -> impl Iterator<Item = (usize, &DocRecord)> {
        let page = page.map(str::to_lowercase);
        self.records()
            .iter()
            .enumerate()
            .filter(move |(_, r)| {
                page.as_deref()
                    .map_or(true, |p| r.page.to_lowercase() == p)
                    && category.map_or(true, |c| r.category == c)
            })
    }

    /// Distinct page titles in order of first appearance.
    pub fn pages(&self) -> Vec<&str> {
        let mut pages: Vec<&str> = Vec::new();
        for record in self.records() {
            if !pages.contains(&record.page.as_str()) {
                pages.push(&record.page);
            }
        }
        pages
    }
}
