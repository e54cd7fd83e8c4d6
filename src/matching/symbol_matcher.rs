//! Symbol resolution for API records.
//!
//! This module resolves a user-typed symbol to `type`/`function` records with:
//! - Exact matching on the title or unqualified name
//! - Case-insensitive matching of differently qualified names
//! - Fuzzy matching using the nucleo matcher
//! - Confidence scoring (0-100 scale)

use crate::domain::symbol::unqualified;
use crate::models::DocRecord;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Highest confidence a fuzzy match can reach.
const MAX_FUZZY_CONFIDENCE: f64 = 85.0;

/// A match result containing a record and its confidence score.
#[derive(Debug, Clone)]
pub struct SymbolMatch {
    /// Position of the record in the index
    pub record_index: usize,

    /// The matched record
    pub record: DocRecord,

    /// Confidence score (0-100, where 100 is an exact match)
    pub confidence: u8,

    /// Type of match that produced this result
    pub match_type: MatchType,
}

/// The type of match that was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Query equals the title or the unqualified name
    Exact,

    /// Same unqualified name, ignoring case and module prefix
    Qualified,

    /// Fuzzy subsequence match on the unqualified name
    Fuzzy,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Qualified => "qualified",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Matcher for API symbols with exact and fuzzy capabilities.
pub struct SymbolMatcher {
    matcher: Matcher,
    buf: Vec<char>,
}

impl Default for SymbolMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolMatcher {
    /// Create a new SymbolMatcher.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    /// Find API records matching `query`.
    ///
    /// Only `type` and `function` records are candidates. Results are sorted
    /// by confidence (highest first); ties keep index order.
    pub fn find_matches(
        &mut self,
        query: &str,
        records: &[DocRecord],
        max_results: usize,
        min_confidence: u8,
    ) -> Vec<SymbolMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let query_name = unqualified(query);
        let pattern = Pattern::parse(query_name, CaseMatching::Ignore, Normalization::Smart);
        let reference_score = self.score(&pattern, query_name);

        let mut results: Vec<SymbolMatch> = Vec::new();

        for (record_index, record) in records.iter().enumerate() {
            if !record.is_api_item() {
                continue;
            }

            let name = record.symbol_name();
            let (confidence, match_type) = if query == record.title || query == name {
                (100, MatchType::Exact)
            } else if query_name.to_lowercase() == name.to_lowercase() {
                (95, MatchType::Qualified)
            } else {
                match self.fuzzy_confidence(&pattern, name, reference_score) {
                    Some(confidence) => (confidence, MatchType::Fuzzy),
                    None => continue,
                }
            };

            if confidence >= min_confidence {
                results.push(SymbolMatch {
                    record_index,
                    record: record.clone(),
                    confidence,
                    match_type,
                });
            }
        }

        results.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        results.truncate(max_results);
        results
    }

    /// Best match for `query`, if any reaches `min_confidence`.
    pub fn resolve(
        &mut self,
        query: &str,
        records: &[DocRecord],
        min_confidence: u8,
    ) -> Option<SymbolMatch> {
        self.find_matches(query, records, 1, min_confidence)
            .into_iter()
            .next()
    }

    fn score(&mut self, pattern: &Pattern, haystack: &str) -> Option<u32> {
        pattern.score(Utf32Str::new(haystack, &mut self.buf), &mut self.matcher)
    }

    /// Fuzzy score normalised against the query matched with itself.
    fn fuzzy_confidence(
        &mut self,
        pattern: &Pattern,
        name: &str,
        reference_score: Option<u32>,
    ) -> Option<u8> {
        let score = self.score(pattern, name)?;
        let reference = reference_score.unwrap_or(score).max(score).max(1);
        let confidence = MAX_FUZZY_CONFIDENCE * score as f64 / reference as f64;
        Some(confidence.round() as u8)
    }
}
