//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided location is empty.
    EmptyLocation,

    /// The provided category is not one of the fixed record categories.
    UnknownCategory(String),

    /// The provided symbol name is empty.
    EmptySymbol,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLocation => write!(f, "Location cannot be empty"),
            Self::UnknownCategory(value) => write!(
                f,
                "Unknown category: {} (expected section, page, type or function)",
                value
            ),
            Self::EmptySymbol => write!(f, "Symbol name cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
