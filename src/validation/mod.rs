//! Structural validation of documentation search indexes.
//!
//! A search index is a top-level object with a single `docs` key holding an
//! ordered list of records. This module checks that shape and reports every
//! deviation as a typed [`Violation`].

pub mod structural;

pub use structural::{validate_value, ValidationReport, Violation, REQUIRED_FIELDS};
