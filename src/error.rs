//! Error types for the StomataModels documentation server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::validation::Violation;
use thiserror::Error;

/// Errors that can occur when loading or parsing a documentation search index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Remote source returned an error status code
    #[error("Index source returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Reading a local index file failed
    #[error("Failed to read index file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but not shaped like a search index
    #[error("Malformed search index: {0}")]
    Malformed(String),

    /// Strict loading rejected the index
    #[error("Search index failed validation with {} violation(s)", .violations.len())]
    Invalid { violations: Vec<Violation> },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Source or entry not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur during search and lookup operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// The index could not be loaded
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors raised when evaluating the documented stomatal equations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// An input is NaN or infinite
    #[error("Input {name} must be a finite number")]
    NonFinite { name: &'static str },

    /// Finite inputs produced an infinite or NaN result
    #[error("Result {name} is not a finite number")]
    NonFiniteResult { name: &'static str },

    /// A denominator evaluated to zero
    #[error("Division by zero: {what} must not be zero")]
    ZeroDenominator { what: &'static str },

    /// A required input was not supplied
    #[error("Missing input: {name}")]
    MissingInput { name: &'static str },

    /// An input is outside the domain of the equation
    #[error("Input {name} is out of range: {reason}")]
    OutOfDomain { name: &'static str, reason: String },

    /// Lower bound is not below the upper bound
    #[error("Invalid bounds: lower ({lower}) must be below upper ({upper})")]
    InvalidBounds { lower: f64, upper: f64 },
}

/// Convenience type alias for Results with IndexError
pub type IndexResult<T> = Result<T, IndexError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with ModelError
pub type ModelResult<T> = Result<T, ModelError>;
