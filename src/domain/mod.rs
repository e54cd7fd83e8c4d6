//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the concepts a documentation
//! search index is made of: record categories, anchor locations and API
//! symbol names. These value objects validate at construction time so invalid
//! lookups are rejected before they reach the index.

pub mod category;
pub mod errors;
pub mod location;
pub mod symbol;

pub use category::Category;
pub use errors::ValidationError;
pub use location::Location;
pub use symbol::SymbolName;
