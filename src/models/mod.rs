//! Data models for documentation search indexes.
//!
//! This module contains the record type the generator emits, the top-level
//! index document with its parser, and the loaded snapshot tools read from.

pub mod index;
pub mod record;
pub mod snapshot;

pub use index::{parse_search_index, strip_js_wrapper, ParsedIndex, SearchIndexDocument};
pub use record::DocRecord;
pub use snapshot::IndexSnapshot;
