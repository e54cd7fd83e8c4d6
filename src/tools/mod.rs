//! Tools over the documentation search index.
//!
//! This module provides three categories of tools, all sharing one cached
//! index loader:
//! - **Search**: Full-text search and symbol resolution
//! - **Lookup**: Records by location or page, and index status
//! - **Catalogue**: Parsed API items and the type hierarchy

pub mod catalogue;
pub mod index_loader;
pub mod lookup;
pub mod search;

pub use catalogue::{ApiDescription, CatalogueTools, HierarchyView};
pub use index_loader::{IndexLoader, LoadedIndex};
pub use lookup::{
    IndexStatus, IndexedRecord, ListEntriesParams, ListEntriesResponse, LookupTools,
};
pub use search::{
    FindSymbolParams, FindSymbolResponse, SearchParams, SearchResponse, SearchTools,
};
