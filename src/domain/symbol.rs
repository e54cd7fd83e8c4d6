//! SymbolName value object.

use super::errors::ValidationError;
use std::fmt;

/// A user-supplied API symbol, possibly module-qualified.
///
/// `StomataModels.ESMMedlyn` and `ESMMedlyn` name the same item; the
/// unqualified form is what matching compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolName(String);

impl SymbolName {
    /// Create a new SymbolName from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySymbol` if the input is blank.
    pub fn new(symbol: impl Into<String>) -> Result<Self, ValidationError> {
        let symbol = symbol.into().trim().to_string();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self(symbol))
    }

    /// The symbol as given (trimmed).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The symbol without its module prefix.
    pub fn unqualified(&self) -> &str {
        unqualified(&self.0)
    }

    /// The module prefix, if any.
    pub fn module(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(module, _)| module)
    }
}

/// Strip a `Module.` prefix from a symbol or record title.
pub fn unqualified(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((_, tail)) if !tail.is_empty() => tail,
        _ => name,
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_trims_and_rejects_blank() {
        assert_eq!(SymbolName::new("  "), Err(ValidationError::EmptySymbol));
        assert_eq!(SymbolName::new(" OSMWang ").unwrap().as_str(), "OSMWang");
    }

    #[test]
    fn test_unqualified() {
        let symbol = SymbolName::new("StomataModels.β_factor").unwrap();
        assert_eq!(symbol.unqualified(), "β_factor");
        assert_eq!(symbol.module(), Some("StomataModels"));

        let bare = SymbolName::new("envir_diff!").unwrap();
        assert_eq!(bare.unqualified(), "envir_diff!");
        assert_eq!(bare.module(), None);
    }

    #[test]
    fn test_unqualified_keeps_trailing_dot_names() {
        assert_eq!(unqualified("StomtaModels.jl"), "jl");
        assert_eq!(unqualified("Weird."), "Weird.");
    }
}
