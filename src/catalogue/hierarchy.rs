//! Type hierarchy reconstructed from subtype listings.

use super::api_item::ApiItem;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

/// Parent/child relation between documented types.
///
/// Abstract types list every subtype, transitive ones included. The direct
/// parent of a type is the listing type with the fewest subtypes.
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    parents: BTreeMap<String, String>,
    children: BTreeMap<String, Vec<String>>,
}

impl TypeHierarchy {
    /// Build the hierarchy from catalogue items.
    pub fn build(items: &[ApiItem]) -> Self {
        let mut parents: BTreeMap<String, (String, usize)> = BTreeMap::new();

        for item in items.iter().filter(|i| !i.subtypes.is_empty()) {
            for sub in &item.subtypes {
                let width = item.subtypes.len();
                let replace = parents
                    .get(sub)
                    .map_or(true, |(_, best)| width < *best);
                if replace && *sub != item.name {
                    parents.insert(sub.clone(), (item.name.clone(), width));
                }
            }
        }

        let parents: BTreeMap<String, String> = parents
            .into_iter()
            .map(|(child, (parent, _))| (child, parent))
            .collect();

        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for item in items {
            let direct: Vec<String> = item
                .subtypes
                .iter()
                .filter(|sub| parents.get(*sub) == Some(&item.name))
                .cloned()
                .collect();
            if !direct.is_empty() {
                children.insert(item.name.clone(), direct);
            }
        }

        Self { parents, children }
    }

    /// Whether `name` takes part in any parent/child relation.
    pub fn contains(&self, name: &str) -> bool {
        self.parents.contains_key(name) || self.children.contains_key(name)
    }

    /// Direct supertype.
    pub fn parent(&self, name: &str) -> Option<&str> {
        self.parents.get(name).map(String::as_str)
    }

    /// Direct subtypes in listing order.
    pub fn children(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Supertypes, nearest first.
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([name.to_string()]);
        let mut current = name;

        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent.to_string()) {
                break;
            }
            chain.push(parent.to_string());
            current = parent;
        }
        chain
    }

    /// All subtypes, depth first.
    pub fn descendants(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = HashSet::from([name.to_string()]);
        self.collect_descendants(name, &mut seen, &mut out);
        out
    }

    fn collect_descendants(&self, name: &str, seen: &mut HashSet<String>, out: &mut Vec<String>) {
        for child in self.children(name) {
            if seen.insert(child.clone()) {
                out.push(child.clone());
                self.collect_descendants(child, seen, out);
            }
        }
    }

    /// Types with subtypes but no supertype.
    pub fn roots(&self) -> Vec<&str> {
        self.children
            .keys()
            .filter(|name| !self.parents.contains_key(*name))
            .map(String::as_str)
            .collect()
    }

    /// Render the subtree under `name`, two spaces per level.
    pub fn render(&self, name: &str) -> String {
        let mut out = String::new();
        let mut seen = HashSet::new();
        self.render_into(name, 0, &mut seen, &mut out);
        out
    }

    fn render_into(&self, name: &str, depth: usize, seen: &mut HashSet<String>, out: &mut String) {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), name);
        if !seen.insert(name.to_string()) {
            return;
        }
        for child in self.children(name) {
            self.render_into(child, depth + 1, seen, out);
        }
    }
}
