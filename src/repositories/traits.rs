use crate::error::IndexResult;
use crate::models::IndexSnapshot;
use async_trait::async_trait;

/// Repository for documentation search indexes.
///
/// Provides abstraction over where an index comes from, enabling different
/// implementations (file or HTTP source, in-memory fixtures, mocks).
#[async_trait]
pub trait DocsRepository: Send + Sync {
    /// Load a fresh snapshot of the index.
    async fn load(&self) -> IndexResult<IndexSnapshot>;

    /// Human-readable description of the source.
    fn source(&self) -> String;
}
