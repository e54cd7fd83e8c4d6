//! Full-text search over documentation records.
//!
//! This module provides fuzzy full-text search across record titles, symbol
//! names and docstring text, with snippet generation and result aggregation.

pub mod full_text_index;

pub use full_text_index::{
    fold_case, DocSearchIndex, MatchContext, SearchHit, SearchableDocument, SearchableField,
    MAX_SNIPPET_LENGTH,
};
