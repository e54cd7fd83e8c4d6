//! Full-text search index implementation.
//!
//! This module provides fuzzy full-text search across search-index records,
//! with snippet generation and match context extraction.

use crate::domain::Category;
use crate::models::DocRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Maximum snippet length in characters
pub const MAX_SNIPPET_LENGTH: usize = 150;

/// Context characters to show before and after match
const CONTEXT_CHARS: usize = 50;

/// Confidence boost per additional matching field
const MULTI_MATCH_BOOST: usize = 5;

/// Cap on the multi-match boost
const MAX_MULTI_MATCH_BOOST: usize = 15;

/// A searchable document extracted from a record.
#[derive(Debug, Clone)]
pub struct SearchableDocument {
    /// Position of the record in the index
    pub record_index: usize,

    /// Which part of the record this document holds
    pub field: SearchableField,

    /// Searchable text content
    pub content: String,

    /// Case-folded content, char-aligned with `content`
    folded: String,
}

/// Part of a record that was indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchableField {
    /// Record title as written (`StomataModels.ESMMedlyn`)
    Title,
    /// Unqualified symbol name of an API record (`ESMMedlyn`)
    Symbol,
    /// Rendered docstring or prose
    Text,
}

/// A match found in a document with context.
#[derive(Debug, Clone, Serialize)]
pub struct MatchContext {
    /// Field where the match was found
    pub field: SearchableField,

    /// Snippet showing the match with context
    pub snippet: String,

    /// Confidence score (0-100)
    pub confidence: u8,
}

/// A search result for one record with all its matches.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Position of the record in the index
    pub record_index: usize,

    /// The record
    pub record: DocRecord,

    /// All matches found in this record
    pub matches: Vec<MatchContext>,

    /// Overall confidence score (0-100), boosted for multiple matches
    pub confidence: u8,
}

/// Full-text search index over documentation records.
#[derive(Debug, Clone, Default)]
pub struct DocSearchIndex {
    /// Indexed records, in index order
    records: Vec<DocRecord>,

    /// All searchable documents
    documents: Vec<SearchableDocument>,
}

impl DocSearchIndex {
    /// Create a new empty search index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over records, keeping their order.
    pub fn build(records: &[DocRecord]) -> Self {
        let mut index = Self::new();
        for record in records {
            index.index_record(record);
        }
        index
    }

    /// Index a record's title, symbol name and text.
    pub fn index_record(&mut self, record: &DocRecord) {
        let record_index = self.records.len();
        self.records.push(record.clone());

        self.push_document(record_index, SearchableField::Title, record.title.clone());

        if record.is_api_item() && record.symbol_name() != record.title {
            self.push_document(
                record_index,
                SearchableField::Symbol,
                record.symbol_name().to_string(),
            );
        }

        let text = record.plain_text();
        if !text.is_empty() {
            self.push_document(record_index, SearchableField::Text, text);
        }
    }

    fn push_document(&mut self, record_index: usize, field: SearchableField, content: String) {
        if content.trim().is_empty() {
            return;
        }
        let folded = fold_case(&content);
        self.documents.push(SearchableDocument {
            record_index,
            field,
            content,
            folded,
        });
    }

    /// Search the index for a query string.
    ///
    /// Returns hits grouped by record, sorted by confidence (ties keep index order).
    ///
    /// # Arguments
    /// * `query` - The search query
    /// * `max_results` - Maximum number of records to return
    /// * `min_confidence` - Minimum confidence threshold (0-100)
    /// * `category` - Only consider records of this category
    pub fn search(
        &self,
        query: &str,
        max_results: usize,
        min_confidence: u8,
        category: Option<Category>,
    ) -> Vec<SearchHit> {
        let query_folded = fold_case(query.trim());
        let mut matches_by_record: BTreeMap<usize, Vec<MatchContext>> = BTreeMap::new();

        for doc in &self.documents {
            if let Some(wanted) = category {
                if self.records[doc.record_index].category != wanted {
                    continue;
                }
            }
            if let Some(ctx) = self.find_match(doc, &query_folded) {
                if ctx.confidence >= min_confidence {
                    matches_by_record
                        .entry(doc.record_index)
                        .or_default()
                        .push(ctx);
                }
            }
        }

        let mut hits: Vec<SearchHit> = matches_by_record
            .into_iter()
            .map(|(record_index, matches)| {
                let max_confidence = matches.iter().map(|m| m.confidence).max().unwrap_or(0);
                let boost = (matches.len().saturating_sub(1) * MULTI_MATCH_BOOST)
                    .min(MAX_MULTI_MATCH_BOOST) as u8;
                SearchHit {
                    record_index,
                    record: self.records[record_index].clone(),
                    matches,
                    confidence: max_confidence.saturating_add(boost).min(100),
                }
            })
            .collect();

        // Stable sort: equal confidence keeps index order
        hits.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        hits.truncate(max_results);
        hits
    }

    /// Find a match in a document and generate context.
    fn find_match(&self, doc: &SearchableDocument, query_folded: &str) -> Option<MatchContext> {
        let confidence = calculate_match_confidence(query_folded, &doc.folded)?;
        let snippet = generate_snippet(&doc.content, &doc.folded, query_folded);

        Some(MatchContext {
            field: doc.field,
            snippet,
            confidence,
        })
    }

    /// Records in the index.
    pub fn records(&self) -> &[DocRecord] {
        &self.records
    }

    /// Get the number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

/// Lowercase char by char, keeping a 1:1 char correspondence with the input.
pub fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn words(s: &str) -> Vec<&str> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '!'))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Calculate match confidence for a folded query against folded content.
///
/// Returns None if no match, Some(confidence) if matched.
fn calculate_match_confidence(query: &str, content: &str) -> Option<u8> {
    if query.is_empty() || content.is_empty() {
        return None;
    }

    // Exact substring match (highest confidence)
    if content.contains(query) {
        let ratio = query.chars().count() as f64 / content.chars().count() as f64;
        return Some((85.0 * ratio + 10.0).min(95.0) as u8);
    }

    let query_words = words(query);
    let content_words = words(content);

    if query_words.is_empty() || content_words.is_empty() {
        return None;
    }

    let mut total_score = 0usize;
    let mut matched = 0usize;

    for query_word in &query_words {
        let mut best_word_score = 0u8;

        for content_word in &content_words {
            if content_word.contains(query_word) {
                best_word_score = 85;
                break;
            }

            let distance = levenshtein_distance(query_word, content_word);
            let max_len = query_word.chars().count().max(content_word.chars().count());

            // Allow 40% difference for fuzzy match
            if max_len > 0 && distance as f64 / max_len as f64 <= 0.4 {
                let similarity = 1.0 - (distance as f64 / max_len as f64);
                best_word_score = best_word_score.max((similarity * 75.0) as u8);
            }
        }

        if best_word_score > 0 {
            total_score += best_word_score as usize;
            matched += 1;
        }
    }

    // Require at least half of the query words to match
    if matched >= query_words.len().div_ceil(2) {
        Some((total_score / query_words.len()).min(90) as u8)
    } else {
        None
    }
}

/// Generate a snippet with context around the match.
///
/// Positions are computed on `folded` and applied to `original`; the two are
/// char-aligned, so slicing by char index never splits a character.
fn generate_snippet(original: &str, folded: &str, query: &str) -> String {
    let byte_pos = folded
        .find(query)
        .or_else(|| query.split_whitespace().find_map(|w| folded.find(w)))
        .unwrap_or(0);
    let char_pos = folded[..byte_pos].chars().count();

    let chars: Vec<char> = original.chars().collect();
    let start = char_pos.saturating_sub(CONTEXT_CHARS);
    let end = (char_pos + query.chars().count() + CONTEXT_CHARS).min(chars.len());

    let mut snippet: String = chars[start..end].iter().collect();
    if start > 0 {
        snippet = format!("...{}", snippet);
    }
    if end < chars.len() {
        snippet.push_str("...");
    }

    if snippet.chars().count() > MAX_SNIPPET_LENGTH {
        snippet = snippet.chars().take(MAX_SNIPPET_LENGTH - 3).collect();
        snippet.push_str("...");
    }

    snippet
}

/// Levenshtein distance between two strings, in chars.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
