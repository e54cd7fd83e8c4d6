//! Record category value object.

use super::errors::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of categories a search-index record can carry.
///
/// Serialized as the lowercase names used by the generated index.
///
/// # Example
///
/// ```
/// use stomata_docs_mcp::domain::Category;
///
/// let category: Category = "function".parse().unwrap();
/// assert_eq!(category, Category::Function);
/// assert!(category.is_api_item());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A heading inside a page
    Section,
    /// A paragraph of page prose
    Page,
    /// A docstring for a type
    Type,
    /// A docstring for a function
    Function,
}

impl Category {
    /// All categories in index order.
    pub const ALL: [Category; 4] = [
        Category::Section,
        Category::Page,
        Category::Type,
        Category::Function,
    ];

    /// The name used in the generated index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Page => "page",
            Self::Type => "type",
            Self::Function => "function",
        }
    }

    /// Whether records of this category document an API item (type or function).
    pub fn is_api_item(&self) -> bool {
        matches!(self, Self::Type | Self::Function)
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!("section".parse::<Category>().unwrap(), Category::Section);
        assert_eq!("page".parse::<Category>().unwrap(), Category::Page);
        assert_eq!("type".parse::<Category>().unwrap(), Category::Type);
        assert_eq!("function".parse::<Category>().unwrap(), Category::Function);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "macro".parse::<Category>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownCategory("macro".to_string()));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Type".parse::<Category>().is_err());
        assert!(" type ".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Function).unwrap();
        assert_eq!(json, "\"function\"");

        let parsed: Category = serde_json::from_str("\"section\"").unwrap();
        assert_eq!(parsed, Category::Section);
    }

    #[test]
    fn test_is_api_item() {
        assert!(Category::Type.is_api_item());
        assert!(Category::Function.is_api_item());
        assert!(!Category::Page.is_api_item());
        assert!(!Category::Section.is_api_item());
    }
}
