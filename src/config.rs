//! Configuration management for the documentation server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured through `dotenvy`, which never writes to stdout
//! (stdout is the MCP transport).

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the documentation server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Search index source: a file path or an http(s) URL
    pub index_source: String,

    /// Base URL of the rendered documentation, used to build record links
    pub docs_base_url: Option<String>,

    /// How long a loaded index is served before it is reloaded (default: 30)
    pub cache_ttl_minutes: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Maximum number of search results to return (default: 10)
    pub max_search_results: usize,

    /// Match confidence threshold (0-100, default: 30)
    pub match_confidence_threshold: u8,

    /// Reject indexes with structural violations instead of serving them (default: false)
    pub strict_validation: bool,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DOCS_INDEX_SOURCE`: Path or http(s) URL of `search_index.js`
    ///
    /// Optional environment variables:
    /// - `DOCS_BASE_URL`: Base URL of the rendered docs (must be http(s))
    /// - `INDEX_CACHE_TTL_MINUTES`: Index reload interval in minutes (default: 30)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAX_SEARCH_RESULTS`: Max search results (default: 10)
    /// - `MATCH_CONFIDENCE_THRESHOLD`: Min confidence score (default: 30)
    /// - `STRICT_VALIDATION`: `true`/`false` (default: false)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let index_source = env::var("DOCS_INDEX_SOURCE")
            .map_err(|_| ConfigError::MissingVar("DOCS_INDEX_SOURCE".to_string()))?;

        if index_source.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DOCS_INDEX_SOURCE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let docs_base_url = match env::var("DOCS_BASE_URL") {
            Ok(url) if url.trim().is_empty() => None,
            Ok(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: "DOCS_BASE_URL".to_string(),
                        reason: "Must start with http:// or https://".to_string(),
                    });
                }
                Some(url)
            }
            Err(_) => None,
        };

        let cache_ttl_minutes = Self::parse_env_u64("INDEX_CACHE_TTL_MINUTES", 30)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let max_search_results = Self::parse_env_usize("MAX_SEARCH_RESULTS", 10)?;
        let match_confidence_threshold = Self::parse_env_u8("MATCH_CONFIDENCE_THRESHOLD", 30)?;
        let strict_validation = Self::parse_env_bool("STRICT_VALIDATION", false)?;

        if match_confidence_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                var: "MATCH_CONFIDENCE_THRESHOLD".to_string(),
                reason: "Must be between 0 and 100".to_string(),
            });
        }

        if max_search_results == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_SEARCH_RESULTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            index_source: index_source.trim().to_string(),
            docs_base_url,
            cache_ttl_minutes,
            request_timeout,
            max_search_results,
            match_confidence_threshold,
            strict_validation,
            log_level,
        })
    }

    /// Cache TTL converted to seconds.
    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_minutes.saturating_mul(60)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u8 with a default value.
    fn parse_env_u8(var_name: &str, default: u8) -> ConfigResult<u8> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u8>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-255, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_source: String::new(),
            docs_base_url: None,
            cache_ttl_minutes: 30,
            request_timeout: 10,
            max_search_results: 10,
            match_confidence_threshold: 30,
            strict_validation: false,
            log_level: "error".to_string(),
        }
    }
}
