//! Client for fetching documentation search indexes.
//!
//! This module provides a synchronous client that reads an index from the local
//! filesystem or downloads it over HTTP. It can be used from async contexts via
//! the [`AsyncIndexClient`] wrapper, which runs it on the blocking thread pool.

mod async_wrapper;
pub use async_wrapper::{AsyncIndexClient, AsyncIndexClientImpl};

use crate::config::Config;
use crate::error::{IndexError, IndexResult};
use crate::metrics::{LoadTimer, Metrics};
use crate::models::{parse_search_index, ParsedIndex};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Where a search index is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// Remote `search_index.js` served over http(s)
    Url(String),
    /// Local file
    File(PathBuf),
}

impl IndexSource {
    /// Interpret a configured source string.
    ///
    /// Anything starting with `http://` or `https://` is a URL; everything
    /// else is a filesystem path.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Client that fetches and parses search indexes.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct IndexClient {
    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Reject indexes with structural violations
    strict: bool,

    /// Metrics collector
    metrics: Metrics,
}

impl IndexClient {
    /// Create a new IndexClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_options(config.request_timeout, config.strict_validation)
    }

    /// Create an IndexClient with explicit timeout and strictness.
    pub fn with_options(timeout_secs: u64, strict: bool) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            agent: Arc::new(agent),
            strict,
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Whether violations fail the load.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Fetch the raw text of an index.
    pub fn fetch_raw(&self, source: &IndexSource) -> IndexResult<String> {
        match source {
            IndexSource::Url(url) => self.get(url),
            IndexSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => {
                        IndexError::NotFound(path.display().to_string())
                    }
                    _ => IndexError::Io {
                        path: path.display().to_string(),
                        source: e,
                    },
                })
            }
        }
    }

    /// Fetch and parse an index.
    pub fn load(&self, source: &IndexSource) -> IndexResult<ParsedIndex> {
        let timer = LoadTimer::new(self.metrics.clone());

        let result = self
            .fetch_raw(source)
            .and_then(|raw| parse_search_index(&raw, self.strict));

        match &result {
            Ok(parsed) => {
                tracing::info!(
                    "Loaded search index from {} ({} records, {} violations)",
                    source,
                    parsed.document.len(),
                    parsed.report.violations.len()
                );
                timer.complete();
            }
            Err(e) => {
                tracing::error!("Failed to load search index from {}: {}", source, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Execute a GET request and return the body.
    fn get(&self, url: &str) -> IndexResult<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .set("Accept", "application/javascript, application/json, text/plain")
            .call()
            .map_err(|e| self.map_error(e))?;

        response
            .into_string()
            .map_err(|e| IndexError::Http(e.to_string()))
    }

    /// Map a ureq error to an IndexError.
    fn map_error(&self, error: ureq::Error) -> IndexError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => IndexError::NotFound(message),
                    _ => IndexError::Status {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    IndexError::Http("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    IndexError::Timeout
                } else {
                    IndexError::Http(transport.to_string())
                }
            }
        }
    }
}
