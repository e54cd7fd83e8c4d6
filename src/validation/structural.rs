//! Structural checks over a raw search-index value.
//!
//! The checks run on `serde_json::Value` rather than on decoded records so
//! that every problem in a document is reported, not just the first one serde
//! would stop at.

use crate::domain::Category;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Fields every record must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["location", "page", "title", "category"];

/// Fields a record may carry.
pub const OPTIONAL_FIELDS: [&str; 1] = ["text"];

/// The single key of the top-level object.
pub const DOCS_KEY: &str = "docs";

/// A single structural problem found in a search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The top-level value is not an object
    NotAnObject,
    /// The top-level object has no "docs" key
    MissingDocsKey,
    /// The top-level object has a key other than "docs"
    UnexpectedTopLevelKey { key: String },
    /// "docs" is not an array
    DocsNotArray,
    /// A record is not an object
    RecordNotObject { index: usize },
    /// A record lacks a required field
    MissingField { index: usize, field: String },
    /// A record field is present but not a string
    FieldNotString { index: usize, field: String },
    /// A record's category is outside the fixed set
    UnknownCategory { index: usize, value: String },
    /// A record's location is the empty string
    EmptyLocation { index: usize },
    /// A record passed the field checks but could not be decoded
    Undecodable { index: usize, message: String },
}

impl Violation {
    /// Index of the offending record, for record-level violations.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Self::RecordNotObject { index }
            | Self::MissingField { index, .. }
            | Self::FieldNotString { index, .. }
            | Self::UnknownCategory { index, .. }
            | Self::EmptyLocation { index }
            | Self::Undecodable { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "top-level value is not an object"),
            Self::MissingDocsKey => write!(f, "top-level object has no \"docs\" key"),
            Self::UnexpectedTopLevelKey { key } => {
                write!(f, "unexpected top-level key \"{}\"", key)
            }
            Self::DocsNotArray => write!(f, "\"docs\" is not an array"),
            Self::RecordNotObject { index } => write!(f, "record {} is not an object", index),
            Self::MissingField { index, field } => {
                write!(f, "record {} is missing field \"{}\"", index, field)
            }
            Self::FieldNotString { index, field } => {
                write!(f, "record {} field \"{}\" is not a string", index, field)
            }
            Self::UnknownCategory { index, value } => {
                write!(f, "record {} has unknown category \"{}\"", index, value)
            }
            Self::EmptyLocation { index } => write!(f, "record {} has an empty location", index),
            Self::Undecodable { index, message } => {
                write!(f, "record {} could not be decoded: {}", index, message)
            }
        }
    }
}

/// Outcome of validating a search index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of entries in "docs" (zero when "docs" is unusable)
    pub record_count: usize,

    /// Records per recognised category
    pub category_counts: BTreeMap<Category, usize>,

    /// Every problem found, in document order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the index satisfies every structural property.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of records of a given category.
    pub fn count_of(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    /// Violations attached to a given record.
    pub fn violations_for(&self, index: usize) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.record_index() == Some(index))
    }
}

/// Validate a parsed JSON value against the search-index shape.
pub fn validate_value(value: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(top) = value.as_object() else {
        report.violations.push(Violation::NotAnObject);
        return report;
    };

    for key in top.keys().filter(|k| k.as_str() != DOCS_KEY) {
        report
            .violations
            .push(Violation::UnexpectedTopLevelKey { key: key.clone() });
    }

    let Some(docs) = top.get(DOCS_KEY) else {
        report.violations.push(Violation::MissingDocsKey);
        return report;
    };

    let Some(records) = docs.as_array() else {
        report.violations.push(Violation::DocsNotArray);
        return report;
    };

    report.record_count = records.len();
    for (index, record) in records.iter().enumerate() {
        match record.as_object() {
            Some(fields) => validate_record(index, fields, &mut report),
            None => report.violations.push(Violation::RecordNotObject { index }),
        }
    }

    report
}

fn validate_record(index: usize, fields: &Map<String, Value>, report: &mut ValidationReport) {
    for field in REQUIRED_FIELDS {
        match fields.get(field) {
            None => report.violations.push(Violation::MissingField {
                index,
                field: field.to_string(),
            }),
            Some(value) if !value.is_string() => {
                report.violations.push(Violation::FieldNotString {
                    index,
                    field: field.to_string(),
                })
            }
            Some(_) => {}
        }
    }

    for field in OPTIONAL_FIELDS {
        if fields.get(field).is_some_and(|v| !v.is_string()) {
            report.violations.push(Violation::FieldNotString {
                index,
                field: field.to_string(),
            });
        }
    }

    if let Some(location) = fields.get("location").and_then(Value::as_str) {
        if location.is_empty() {
            report.violations.push(Violation::EmptyLocation { index });
        }
    }

    if let Some(raw) = fields.get("category").and_then(Value::as_str) {
        match raw.parse::<Category>() {
            Ok(category) => *report.category_counts.entry(category).or_default() += 1,
            Err(_) => report.violations.push(Violation::UnknownCategory {
                index,
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(location: &str, category: &str) -> Value {
        json!({
            "location": location,
            "page": "API",
            "title": "Title",
            "text": "",
            "category": category,
        })
    }

    #[test]
    fn test_valid_index() {
        let value = json!({ "docs": [record("API/", "page"), record("API/#x", "type")] });
        let report = validate_value(&value);
        assert!(report.is_valid());
        assert_eq!(report.record_count, 2);
        assert_eq!(report.count_of(Category::Page), 1);
        assert_eq!(report.count_of(Category::Type), 1);
        assert_eq!(report.count_of(Category::Function), 0);
    }

    #[test]
    fn test_top_level_not_object() {
        let report = validate_value(&json!([1, 2]));
        assert_eq!(report.violations, vec![Violation::NotAnObject]);
    }

    #[test]
    fn test_missing_docs_and_extra_keys() {
        let report = validate_value(&json!({ "pages": [] }));
        assert_eq!(
            report.violations,
            vec![
                Violation::UnexpectedTopLevelKey {
                    key: "pages".to_string()
                },
                Violation::MissingDocsKey,
            ]
        );
    }

    #[test]
    fn test_docs_not_array() {
        let report = validate_value(&json!({ "docs": {} }));
        assert_eq!(report.violations, vec![Violation::DocsNotArray]);
        assert_eq!(report.record_count, 0);
    }

    #[test]
    fn test_text_is_optional() {
        let value = json!({ "docs": [{
            "location": "API/",
            "page": "API",
            "title": "API",
            "category": "page",
        }]});
        assert!(validate_value(&value).is_valid());
    }

    #[test]
    fn test_record_level_violations() {
        let value = json!({ "docs": [
            "not a record",
            { "location": "", "page": "API", "title": 3, "category": "macro" },
            { "location": "API/", "page": "API", "title": "t", "category": "page", "text": null },
        ]});
        let report = validate_value(&value);

        assert_eq!(report.record_count, 3);
        assert_eq!(
            report.violations,
            vec![
                Violation::RecordNotObject { index: 0 },
                Violation::FieldNotString {
                    index: 1,
                    field: "title".to_string()
                },
                Violation::EmptyLocation { index: 1 },
                Violation::UnknownCategory {
                    index: 1,
                    value: "macro".to_string()
                },
                Violation::FieldNotString {
                    index: 2,
                    field: "text".to_string()
                },
            ]
        );
        assert_eq!(report.violations_for(1).count(), 3);
    }

    #[test]
    fn test_missing_required_field() {
        let value = json!({ "docs": [{ "location": "API/", "page": "API", "category": "page" }]});
        let report = validate_value(&value);
        assert_eq!(
            report.violations,
            vec![Violation::MissingField {
                index: 0,
                field: "title".to_string()
            }]
        );
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let json = serde_json::to_value(Violation::EmptyLocation { index: 2 }).unwrap();
        assert_eq!(json, json!({ "kind": "empty_location", "index": 2 }));
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            Violation::EmptyLocation { index: 2 }.to_string(),
            "record 2 has an empty location"
        );
    }
}
