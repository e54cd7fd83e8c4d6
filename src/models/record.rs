//! Search-index record model.

use crate::domain::symbol::unqualified;
use crate::domain::{Category, Location, ValidationError};
use serde::{Deserialize, Serialize};

/// One entry of a documentation search index.
///
/// Records are independent and immutable once generated; the index holds them
/// as an ordered sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocRecord {
    /// URL fragment identifying the documentation anchor
    pub location: String,

    /// Documentation page title
    pub page: String,

    /// Anchor display title
    pub title: String,

    /// Rendered documentation prose (may be empty)
    #[serde(default)]
    pub text: String,

    /// Record category
    pub category: Category,
}

impl DocRecord {
    /// Create a record from its parts.
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category,
        }
    }

    /// The location as a validated value object.
    pub fn parsed_location(&self) -> Result<Location, ValidationError> {
        Location::new(self.location.as_str())
    }

    /// Whether this record documents a type or a function.
    pub fn is_api_item(&self) -> bool {
        self.category.is_api_item()
    }

    /// Title without the module prefix (`StomataModels.OSMWang` -> `OSMWang`).
    ///
    /// Only API records are module-qualified; other titles are returned as-is.
    pub fn symbol_name(&self) -> &str {
        if self.is_api_item() {
            unqualified(&self.title)
        } else {
            &self.title
        }
    }

    /// Text with runs of whitespace collapsed to single spaces.
    ///
    /// The generator pads wrapped docstring lines with long runs of spaces.
    pub fn plain_text(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Absolute URL of the record, when the location is usable.
    pub fn url(&self, base_url: &str) -> Option<String> {
        self.parsed_location().ok().map(|loc| loc.to_url(base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_text() {
        let record: DocRecord = serde_json::from_str(
            r#"{"location":"API/","page":"API","title":"API","category":"page"}"#,
        )
        .unwrap();
        assert_eq!(record.text, "");
        assert_eq!(record.category, Category::Page);
    }

    #[test]
    fn test_deserialize_rejects_unknown_category() {
        let result = serde_json::from_str::<DocRecord>(
            r#"{"location":"API/","page":"API","title":"API","category":"macro"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_symbol_name() {
        let api = DocRecord::new(
            "API/#StomataModels.OSMWang",
            "API",
            "StomataModels.OSMWang",
            "",
            Category::Type,
        );
        assert_eq!(api.symbol_name(), "OSMWang");

        let section = DocRecord::new(
            "#StomtaModels.jl",
            "Home",
            "StomtaModels.jl",
            "",
            Category::Section,
        );
        assert_eq!(section.symbol_name(), "StomtaModels.jl");
    }

    #[test]
    fn test_plain_text_collapses_whitespace() {
        let record = DocRecord::new(
            "API/",
            "API",
            "API",
            "relies mainly on Photosynthesis and PlantHydraulics     modules\n\nto predict",
            Category::Page,
        );
        assert_eq!(
            record.plain_text(),
            "relies mainly on Photosynthesis and PlantHydraulics modules to predict"
        );
    }

    #[test]
    fn test_url_requires_location() {
        let empty = DocRecord::new("", "Home", "Home", "", Category::Page);
        assert_eq!(empty.url("https://docs.example.org"), None);

        let api = DocRecord::new("API/", "API", "API", "", Category::Page);
        assert_eq!(
            api.url("https://docs.example.org"),
            Some("https://docs.example.org/API/".to_string())
        );
    }
}
