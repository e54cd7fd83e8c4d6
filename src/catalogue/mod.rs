//! API catalogue derived from `type` and `function` records.
//!
//! The catalogue parses docstring text into structured items (signature,
//! summary, fields with units, subtypes) and reconstructs the type hierarchy.

pub mod api_item;
pub mod hierarchy;

pub use api_item::{ApiItem, ApiKind, FieldDoc};
pub use hierarchy::TypeHierarchy;

use crate::domain::symbol::unqualified;
use crate::models::DocRecord;

/// Structured view over the API records of an index.
#[derive(Debug, Clone, Default)]
pub struct ApiCatalogue {
    items: Vec<ApiItem>,
    hierarchy: TypeHierarchy,
}

impl ApiCatalogue {
    /// Parse every API record, keeping index order.
    pub fn from_records(records: &[DocRecord]) -> Self {
        let items: Vec<ApiItem> = records.iter().filter_map(ApiItem::from_record).collect();
        let hierarchy = TypeHierarchy::build(&items);
        Self { items, hierarchy }
    }

    pub fn items(&self) -> &[ApiItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Look up an item by qualified or unqualified name.
    ///
    /// Exact names win over case-insensitive ones.
    pub fn get(&self, name: &str) -> Option<&ApiItem> {
        let name = name.trim();
        let short = unqualified(name);

        self.items
            .iter()
            .find(|item| item.qualified_name == name || item.name == name)
            .or_else(|| {
                let lowered = short.to_lowercase();
                self.items
                    .iter()
                    .find(|item| item.name.to_lowercase() == lowered)
            })
    }

    /// Items of one kind, in index order.
    pub fn of_kind(&self, kind: ApiKind) -> impl Iterator<Item = &ApiItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }
}
