//! Symbol matching for API lookups.
//!
//! This module resolves symbol names typed by users to `type` and `function`
//! records, combining exact and fuzzy matching.

pub mod symbol_matcher;

pub use symbol_matcher::{MatchType, SymbolMatch, SymbolMatcher};
