use crate::client::{AsyncIndexClient, IndexSource};
use crate::error::IndexResult;
use crate::models::IndexSnapshot;
use crate::repositories::traits::DocsRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// DocsRepository backed by a configured file or URL.
pub struct SourceDocsRepository {
    client: Arc<dyn AsyncIndexClient>,
    source: IndexSource,
}

impl SourceDocsRepository {
    pub fn new(client: Arc<dyn AsyncIndexClient>, source: IndexSource) -> Self {
        Self { client, source }
    }
}

#[async_trait]
impl DocsRepository for SourceDocsRepository {
    async fn load(&self) -> IndexResult<IndexSnapshot> {
        let parsed = self.client.load(&self.source).await?;
        Ok(IndexSnapshot::new(parsed, self.source.to_string()))
    }

    fn source(&self) -> String {
        self.source.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AsyncIndexClientImpl, IndexClient};
    use std::io::Write;

    #[tokio::test]
    async fn test_load_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"docs":[{"location":"API/","page":"API","title":"API","text":"CurrentModule = StomataModels","category":"page"}]}"#,
        )
        .unwrap();

        let client = Arc::new(AsyncIndexClientImpl::new(IndexClient::with_options(5, false)))
            as Arc<dyn AsyncIndexClient>;
        let source = IndexSource::File(file.path().to_path_buf());
        let repo = SourceDocsRepository::new(client, source.clone());

        let snapshot = repo.load().await.unwrap();
        assert_eq!(snapshot.record_count(), 1);
        assert_eq!(snapshot.source(), source.to_string());
        assert_eq!(repo.source(), source.to_string());
    }
}
