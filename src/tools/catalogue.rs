//! API catalogue tools: item descriptions and the type hierarchy.

use crate::catalogue::ApiItem;
use crate::domain::SymbolName;
use crate::error::SearchResult;
use crate::matching::SymbolMatcher;
use crate::metrics::Metrics;
use crate::tools::IndexLoader;

/// An API item with its place in the type hierarchy.
#[derive(Debug, Clone)]
pub struct ApiDescription {
    pub item: ApiItem,

    /// Supertypes, nearest first
    pub ancestors: Vec<String>,

    /// Direct subtypes
    pub children: Vec<String>,

    /// Confidence of the symbol resolution (100 for an exact name)
    pub confidence: u8,
}

/// A rendered hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyView {
    /// Types the rendering starts from
    pub roots: Vec<String>,

    /// Indented tree, one type per line
    pub tree: String,
}

/// Catalogue tools over the parsed API.
#[derive(Clone)]
pub struct CatalogueTools {
    loader: IndexLoader,
    min_confidence: u8,
    metrics: Metrics,
}

impl CatalogueTools {
    pub fn new(loader: IndexLoader, min_confidence: u8, metrics: Metrics) -> Self {
        Self {
            loader,
            min_confidence,
            metrics,
        }
    }

    /// Describe an API item.
    ///
    /// Exact names are looked up directly; anything else goes through the
    /// symbol matcher. Returns `None` when nothing resolves.
    pub async fn describe(&self, symbol: &SymbolName) -> SearchResult<Option<ApiDescription>> {
        let (loaded, _) = self.loader.get_or_load().await?;
        let catalogue = &loaded.catalogue;

        let resolved = match catalogue.get(symbol.as_str()) {
            Some(item) => Some((item, 100)),
            None => SymbolMatcher::new()
                .resolve(
                    symbol.as_str(),
                    loaded.snapshot.records(),
                    self.min_confidence,
                )
                .and_then(|m| {
                    catalogue
                        .get(&m.record.title)
                        .map(|item| (item, m.confidence))
                }),
        };

        let description = resolved.map(|(item, confidence)| {
            let hierarchy = catalogue.hierarchy();
            ApiDescription {
                item: item.clone(),
                ancestors: hierarchy.ancestors(&item.name),
                children: hierarchy.children(&item.name).to_vec(),
                confidence,
            }
        });

        self.metrics.record_query(usize::from(description.is_some()));
        Ok(description)
    }

    /// Render the hierarchy under `root`, or under every root type.
    ///
    /// Returns `None` when `root` is not part of any hierarchy.
    pub async fn hierarchy(
        &self,
        root: Option<&SymbolName>,
    ) -> SearchResult<Option<HierarchyView>> {
        let (loaded, _) = self.loader.get_or_load().await?;
        let hierarchy = loaded.catalogue.hierarchy();

        let roots: Vec<String> = match root {
            Some(symbol) => {
                let name = loaded
                    .catalogue
                    .get(symbol.as_str())
                    .map(|item| item.name.clone())
                    .unwrap_or_else(|| symbol.unqualified().to_string());
                if !hierarchy.contains(&name) {
                    return Ok(None);
                }
                vec![name]
            }
            None => hierarchy.roots().into_iter().map(String::from).collect(),
        };

        let tree: String = roots.iter().map(|r| hierarchy.render(r)).collect();
        self.metrics.record_query(roots.len());

        Ok(Some(HierarchyView { roots, tree }))
    }
}
