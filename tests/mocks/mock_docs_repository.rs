use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stomata_docs_mcp::error::{IndexError, IndexResult};
use stomata_docs_mcp::models::{parse_search_index, IndexSnapshot, ParsedIndex};
use stomata_docs_mcp::repositories::DocsRepository;

/// The StomataModels search index shipped with the tests.
pub const FIXTURE: &str = include_str!("../fixtures/search_index.js");

/// Mock docs repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockDocsRepository {
    index: Arc<Mutex<Option<ParsedIndex>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockDocsRepository {
    /// A repository with no index; every load fails.
    pub fn new() -> Self {
        Self {
            index: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A repository serving the fixture index.
    pub fn with_fixture() -> Self {
        let repo = Self::new();
        repo.set_raw(FIXTURE);
        repo
    }

    /// Serve the index parsed leniently from `raw`.
    pub fn set_raw(&self, raw: &str) {
        let parsed = parse_search_index(raw, false).unwrap();
        *self.index.lock().unwrap() = Some(parsed);
    }

    pub fn clear(&self) {
        *self.index.lock().unwrap() = None;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockDocsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocsRepository for MockDocsRepository {
    async fn load(&self) -> IndexResult<IndexSnapshot> {
        self.track_call("load");
        let parsed = self.index.lock().unwrap().clone();
        parsed
            .map(|parsed| IndexSnapshot::new(parsed, self.source()))
            .ok_or_else(|| IndexError::NotFound(self.source()))
    }

    fn source(&self) -> String {
        "mock://search_index.js".to_string()
    }
}
