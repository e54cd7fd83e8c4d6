//! StomataModels Docs MCP Server - a Model Context Protocol server for the
//! StomataModels.jl documentation search index.
//!
//! The server loads a Documenter-generated `search_index.js` from a file or URL
//! and lets AI assistants search it, look up records, and explore the API.
//!
//! # Architecture
//!
//! - **models**: Search-index records, parsing, and loaded snapshots
//! - **validation**: Structural checks over a raw index
//! - **client**: File/HTTP index client and its async wrapper
//! - **repositories**: Index sources behind the `DocsRepository` trait
//! - **search**: Full-text index with confidence scoring and snippets
//! - **matching**: Fuzzy symbol resolution
//! - **catalogue**: API items parsed from docstrings, and the type hierarchy
//! - **physiology**: The documented conductance, β, and marginal risk equations
//! - **tools** / **services**: Operations behind the MCP tools
//! - **server**: MCP protocol server

pub mod cache;
pub mod catalogue;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod physiology;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod tools;
pub mod validation;

pub use cache::TimedCache;
pub use catalogue::{ApiCatalogue, ApiItem, ApiKind, FieldDoc, TypeHierarchy};
pub use client::{IndexClient, IndexSource};
pub use config::Config;
pub use error::{ConfigError, IndexError, ModelError, SearchError};
pub use matching::{MatchType, SymbolMatch, SymbolMatcher};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{DocRecord, IndexSnapshot, ParsedIndex};
pub use search::{DocSearchIndex, MatchContext, SearchHit};
pub use server::DocsMcpServer;
pub use validation::{ValidationReport, Violation};
