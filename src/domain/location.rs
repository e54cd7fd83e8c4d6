//! Location value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A non-empty URL fragment identifying a documentation anchor.
///
/// A location has the shape `page_path#anchor`, where either part may be
/// missing (`API/` is a page without an anchor, `#Use-StomataModels` is an
/// anchor on the root page).
///
/// # Example
///
/// ```
/// use stomata_docs_mcp::domain::Location;
///
/// let loc = Location::new("API/#StomataModels.ESMMedlyn").unwrap();
/// assert_eq!(loc.page_path(), "API/");
/// assert_eq!(loc.anchor(), Some("StomataModels.ESMMedlyn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// Create a new Location, validating that it's not blank.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyLocation` if the fragment is blank.
    pub fn new(location: impl Into<String>) -> Result<Self, ValidationError> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(ValidationError::EmptyLocation);
        }
        Ok(Self(location))
    }

    /// Get the location as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The page part, before any `#`.
    pub fn page_path(&self) -> &str {
        match self.0.split_once('#') {
            Some((page, _)) => page,
            None => &self.0,
        }
    }

    /// The anchor part, after the first `#`, if present and non-empty.
    pub fn anchor(&self) -> Option<&str> {
        self.0
            .split_once('#')
            .map(|(_, anchor)| anchor)
            .filter(|anchor| !anchor.is_empty())
    }

    /// Build an absolute URL against a documentation base URL.
    ///
    /// The anchor is percent-encoded so symbols such as `β_factor` survive
    /// being pasted into a browser.
    pub fn to_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let page = self.page_path().trim_start_matches('/');
        let mut url = if page.is_empty() {
            format!("{}/", base)
        } else {
            format!("{}/{}", base, page)
        };
        if let Some(anchor) = self.anchor() {
            url.push('#');
            url.push_str(&urlencoding::encode(anchor));
        }
        url
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Location::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_rejects_blank() {
        assert_eq!(Location::new(""), Err(ValidationError::EmptyLocation));
        assert_eq!(Location::new("   "), Err(ValidationError::EmptyLocation));
    }

    #[test]
    fn test_location_parts() {
        let loc = Location::new("API/#StomataModels.envir_diff!").unwrap();
        assert_eq!(loc.page_path(), "API/");
        assert_eq!(loc.anchor(), Some("StomataModels.envir_diff!"));

        let page_only = Location::new("API/").unwrap();
        assert_eq!(page_only.page_path(), "API/");
        assert_eq!(page_only.anchor(), None);

        let root_anchor = Location::new("#Use-StomataModels").unwrap();
        assert_eq!(root_anchor.page_path(), "");
        assert_eq!(root_anchor.anchor(), Some("Use-StomataModels"));
    }

    #[test]
    fn test_to_url_encodes_anchor() {
        let loc = Location::new("API/#StomataModels.β_factor").unwrap();
        let url = loc.to_url("https://docs.example.org/previews/PR26/");
        assert_eq!(
            url,
            "https://docs.example.org/previews/PR26/API/#StomataModels.%CE%B2_factor"
        );
    }

    #[test]
    fn test_to_url_root_page() {
        let loc = Location::new("#StomtaModels.jl").unwrap();
        assert_eq!(
            loc.to_url("https://docs.example.org"),
            "https://docs.example.org/#StomtaModels.jl"
        );
    }

    #[test]
    fn test_location_serde() {
        let loc: Location = serde_json::from_str("\"API/\"").unwrap();
        assert_eq!(loc.as_str(), "API/");
        assert!(serde_json::from_str::<Location>("\"\"").is_err());
    }
}
