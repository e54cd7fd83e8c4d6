//! Async wrapper around the synchronous IndexClient.
//!
//! File reads and HTTP downloads run on tokio's blocking thread pool so they
//! never stall the MCP transport.

use crate::client::{IndexClient, IndexSource};
use crate::error::{IndexError, IndexResult};
use crate::models::ParsedIndex;
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface for loading search indexes.
#[async_trait]
pub trait AsyncIndexClient: Send + Sync {
    /// Fetch and parse the index at `source`.
    async fn load(&self, source: &IndexSource) -> IndexResult<ParsedIndex>;
}

/// Async wrapper around synchronous IndexClient.
///
/// Uses `tokio::task::spawn_blocking` to run the synchronous client on a
/// dedicated thread pool.
#[derive(Clone)]
pub struct AsyncIndexClientImpl {
    client: Arc<IndexClient>,
}

impl AsyncIndexClientImpl {
    pub fn new(client: IndexClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped synchronous client.
    pub fn inner(&self) -> &IndexClient {
        &self.client
    }
}

#[async_trait]
impl AsyncIndexClient for AsyncIndexClientImpl {
    async fn load(&self, source: &IndexSource) -> IndexResult<ParsedIndex> {
        let client = self.client.clone();
        let source = source.clone();

        tokio::task::spawn_blocking(move || client.load(&source))
            .await
            .map_err(|e| IndexError::Http(format!("Task join error: {}", e)))?
    }
}
