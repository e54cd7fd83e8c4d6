//! Search-index document model and parser.
//!
//! The documentation generator ships the index as a JavaScript file:
//!
//! ```text
//! var documenterSearchIndex = {"docs":
//! [{"location":"...","page":"...","title":"...","text":"...","category":"..."}, ...]
//! }
//! ```
//!
//! [`parse_search_index`] accepts that wrapper as well as the bare JSON object.

use crate::error::{IndexError, IndexResult};
use crate::models::DocRecord;
use crate::validation::{validate_value, ValidationReport, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static JS_ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+[A-Za-z_$][A-Za-z0-9_$]*\s*=\s*")
        .expect("Failed to compile JS assignment regex")
});

/// The top-level search-index object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchIndexDocument {
    /// Ordered records
    pub docs: Vec<DocRecord>,
}

impl SearchIndexDocument {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the index has no records.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// A parsed document together with its structural report.
#[derive(Debug, Clone)]
pub struct ParsedIndex {
    /// Records that could be decoded
    pub document: SearchIndexDocument,

    /// Structural report of the raw payload
    pub report: ValidationReport,
}

/// Remove the `var name = ...;` wrapper around the JSON payload, if present.
///
/// Returns `None` when the input is neither a JSON object nor an assignment
/// of one.
pub fn strip_js_wrapper(raw: &str) -> Option<&str> {
    let body = match JS_ASSIGNMENT_RE.find(raw) {
        Some(m) => &raw[m.end()..],
        None => raw,
    };
    let body = body.trim().trim_end_matches(';').trim_end();
    if body.starts_with('{') {
        Some(body)
    } else {
        None
    }
}

/// Parse a search index from its raw text.
///
/// In strict mode any structural violation fails the parse with
/// [`IndexError::Invalid`]. Otherwise violations are logged and every record
/// that decodes cleanly is kept, in order.
///
/// # Errors
///
/// - [`IndexError::Malformed`] if there is no JSON object, or no usable `docs` array
/// - [`IndexError::Json`] if the payload is not valid JSON
/// - [`IndexError::Invalid`] in strict mode when violations were found
pub fn parse_search_index(raw: &str, strict: bool) -> IndexResult<ParsedIndex> {
    let body = strip_js_wrapper(raw).ok_or_else(|| {
        IndexError::Malformed("expected a JSON object or a `var name = {...}` assignment".into())
    })?;

    let value: Value = serde_json::from_str(body)?;
    let mut report = validate_value(&value);

    let records = value.get("docs").and_then(Value::as_array);

    let mut docs = Vec::with_capacity(records.map_or(0, Vec::len));
    for (index, record) in records.into_iter().flatten().enumerate() {
        match serde_json::from_value::<DocRecord>(record.clone()) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                // Every dropped record must be accounted for in the report
                if report.violations_for(index).next().is_none() {
                    report.violations.push(Violation::Undecodable {
                        index,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    if !report.is_valid() {
        if strict {
            return Err(IndexError::Invalid {
                violations: report.violations,
            });
        }
        for violation in &report.violations {
            tracing::warn!("Search index violation: {}", violation);
        }
    }

    let records = records.ok_or_else(|| IndexError::Malformed("no \"docs\" array".into()))?;

    tracing::debug!(
        "Parsed search index: {} of {} records kept",
        docs.len(),
        records.len()
    );

    Ok(ParsedIndex {
        document: SearchIndexDocument { docs },
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    const WRAPPED: &str = "var documenterSearchIndex = {\"docs\":\n[{\"location\":\"API/\",\"page\":\"API\",\"title\":\"API\",\"text\":\"CurrentModule = StomataModels\",\"category\":\"page\"}]\n}\n";

    #[test]
    fn test_strip_js_wrapper() {
        assert!(strip_js_wrapper(WRAPPED).unwrap().starts_with("{\"docs\""));
        assert_eq!(strip_js_wrapper("  {\"docs\":[]};  "), Some("{\"docs\":[]}"));
        assert_eq!(strip_js_wrapper("const idx={}"), Some("{}"));
        assert_eq!(strip_js_wrapper("[1, 2]"), None);
        assert_eq!(strip_js_wrapper("var x = 3;"), None);
    }

    #[test]
    fn test_parse_wrapped_index() {
        let parsed = parse_search_index(WRAPPED, true).unwrap();
        assert_eq!(parsed.document.len(), 1);
        assert_eq!(parsed.document.docs[0].text, "CurrentModule = StomataModels");
        assert_eq!(parsed.document.docs[0].category, Category::Page);
        assert!(parsed.report.is_valid());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_search_index("[]", false),
            Err(IndexError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            parse_search_index("{\"docs\": [", false),
            Err(IndexError::Json(_))
        ));
    }

    #[test]
    fn test_strict_mode_rejects_violations() {
        let raw = r#"{"docs":[{"location":"","page":"Home","title":"Home","text":"","category":"page"}]}"#;
        match parse_search_index(raw, true) {
            Err(IndexError::Invalid { violations }) => {
                assert_eq!(violations, vec![Violation::EmptyLocation { index: 0 }]);
            }
            other => panic!("Expected Invalid error, got: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_mode_keeps_decodable_records() {
        let raw = r#"{"docs":[
            {"location":"","page":"Home","title":"Home","text":"","category":"page"},
            {"location":"API/","page":"API","title":"API","category":"macro"},
            {"location":"API/#x","page":"API","title":"x","text":"","category":"type"}
        ]}"#;
        let parsed = parse_search_index(raw, false).unwrap();

        assert_eq!(parsed.report.record_count, 3);
        assert_eq!(parsed.report.violations.len(), 2);
        // The unknown category cannot be decoded; the empty location can.
        assert_eq!(parsed.document.len(), 2);
        assert_eq!(parsed.document.docs[1].title, "x");
    }

    #[test]
    fn test_padded_category_is_never_dropped_silently() {
        let raw = r#"{"docs":[
            {"location":"API/","page":"API","title":"API","text":"","category":"page"},
            {"location":"API/#x","page":"API","title":"x","text":"","category":" type "}
        ]}"#;

        match parse_search_index(raw, true) {
            Err(IndexError::Invalid { violations }) => assert_eq!(
                violations,
                vec![Violation::UnknownCategory {
                    index: 1,
                    value: " type ".to_string()
                }]
            ),
            other => panic!("Expected Invalid error, got: {:?}", other),
        }

        let parsed = parse_search_index(raw, false).unwrap();
        assert_eq!(parsed.document.len(), 1);
        assert_eq!(parsed.report.count_of(Category::Type), 0);
        assert_eq!(parsed.report.violations_for(1).count(), 1);
    }

    #[test]
    fn test_every_dropped_record_has_a_violation() {
        let raw = r#"{"docs":[
            {"location":"API/","page":"API","title":"API","category":"page"},
            {"location":"API/#y","page":"API","title":"y","category":"function","text":null},
            {"location":"API/#z","page":"API","title":"z","category":"type"}
        ]}"#;
        let parsed = parse_search_index(raw, false).unwrap();

        let kept = parsed.document.len();
        let dropped: Vec<usize> = (0..parsed.report.record_count)
            .filter(|i| parsed.report.violations_for(*i).next().is_some())
            .collect();
        assert_eq!(kept + dropped.len(), 3);
        assert_eq!(dropped, vec![1]);
    }

    #[test]
    fn test_lenient_mode_still_needs_docs_array() {
        assert!(matches!(
            parse_search_index(r#"{"docs": {}}"#, false),
            Err(IndexError::Malformed(_))
        ));
    }
}
