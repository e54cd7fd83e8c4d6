//! MCP tool handlers for the documentation server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::config::Config;
use crate::domain::Location;
use crate::metrics::Metrics;
use crate::models::DocRecord;
use crate::physiology::{HydraulicState, LeafDrivers};
use crate::repositories::DocsRepository;
use crate::services::{
    BetaRequest, ConductanceRequest, DocsService, DocsServiceImpl, MarginalRiskRequest,
    PhysiologyService, PhysiologyServiceImpl,
};
use crate::tools::{CatalogueTools, IndexLoader, IndexStatus, LookupTools, SearchTools};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes a documentation search index and the
/// documented StomataModels equations.
#[derive(Clone)]
pub struct DocsMcpServer {
    docs_service: Arc<dyn DocsService>,
    physiology_service: Arc<dyn PhysiologyService>,
    /// Base URL records are resolved against, when configured
    docs_base_url: Option<String>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for DocsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "stomata-docs-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for the StomataModels documentation search index - provides full-text search, symbol lookup, API descriptions with field units, the type hierarchy, and evaluation of the documented stomatal conductance equations.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchDocsParams {
    /// Words to search for in titles, symbol names and docstrings
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
    /// Minimum confidence (0-100)
    #[serde(default)]
    min_confidence: Option<u8>,
    /// One of section, page, type, function
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FindSymbolToolParams {
    /// Symbol name, e.g. ESMMedlyn, StomataModels.β_factor or medlyn
    symbol: String,
    #[serde(default)]
    max_results: Option<usize>,
    #[serde(default)]
    min_confidence: Option<u8>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LocationParams {
    /// Record location, e.g. API/#StomataModels.OSMWang
    location: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListEntriesToolParams {
    /// Page title, e.g. API or Home
    #[serde(default)]
    page: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SymbolParams {
    /// Type or function name, qualified or not
    symbol: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TypeHierarchyParams {
    /// Type to start from; all root types when omitted
    #[serde(default)]
    root: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmpiricalConductanceParams {
    /// ball_berry, gentine, leuning or medlyn
    model: String,
    /// Minimal stomatal conductance [mol m⁻² s⁻¹]
    g0: f64,
    /// Slope of the conductance-photosynthesis relation
    g1: f64,
    /// Leuning VPD parameter [Pa]
    #[serde(default)]
    d0: Option<f64>,
    /// β correction factor (0-1), default 1
    #[serde(default)]
    beta: Option<f64>,
    /// Net photosynthetic rate A
    #[serde(default)]
    a_net: Option<f64>,
    /// Leaf surface CO₂
    #[serde(default)]
    cs: Option<f64>,
    /// Atmospheric CO₂
    #[serde(default)]
    ca: Option<f64>,
    /// Relative humidity (0-1)
    #[serde(default)]
    rh: Option<f64>,
    /// Vapour pressure deficit [Pa]
    #[serde(default)]
    vpd: Option<f64>,
    /// CO₂ compensation point Γ*
    #[serde(default)]
    gamma_star: Option<f64>,
    /// Leaf hydraulic conductance (Gentine)
    #[serde(default)]
    k_leaf: Option<f64>,
    /// Maximal leaf hydraulic conductance (Gentine)
    #[serde(default)]
    k_max: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct BetaFactorParams {
    /// BetaGLinear{Pleaf,Psoil,SWC} or BetaVLinear{Pleaf,Psoil,SWC}
    beta_function: String,
    /// Lower bound (β = 0 at or below)
    lower: f64,
    /// Upper bound (β = 1 at or above)
    upper: f64,
    /// Leaf water potential [MPa]
    #[serde(default)]
    pl: Option<f64>,
    /// Soil water potential [MPa]
    #[serde(default)]
    ps: Option<f64>,
    /// Soil water content
    #[serde(default)]
    swc: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MarginalRiskParams {
    /// eller, sperry, wang, wap or wap_mod
    model: String,
    /// Quadratic parameter a (wap, wap_mod)
    #[serde(default)]
    a: Option<f64>,
    /// Quadratic parameter b (wap)
    #[serde(default)]
    b: Option<f64>,
    #[serde(default)]
    a_net: Option<f64>,
    #[serde(default)]
    a_max: Option<f64>,
    /// Hydraulic conductance K
    #[serde(default)]
    k: Option<f64>,
    #[serde(default)]
    k_max: Option<f64>,
    /// ∂K/∂E
    #[serde(default)]
    dk_de: Option<f64>,
    /// Transpiration rate E
    #[serde(default)]
    e: Option<f64>,
    /// Critical transpiration rate
    #[serde(default)]
    e_crit: Option<f64>,
    /// Leaf xylem pressure [MPa]
    #[serde(default)]
    p: Option<f64>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

// Tool router implementation
#[tool_router]
impl DocsMcpServer {
    /// Create a new documentation MCP server.
    ///
    /// Tools and services are constructed internally around one shared,
    /// cached index loader.
    pub fn new(repo: Arc<dyn DocsRepository>, config: &Config, metrics: Metrics) -> Self {
        let loader = IndexLoader::new(repo, config.cache_ttl_secs());

        let search_tools = SearchTools::new(
            loader.clone(),
            config.max_search_results,
            config.match_confidence_threshold,
            metrics.clone(),
        );
        let lookup_tools = LookupTools::new(loader.clone(), metrics.clone());
        let catalogue_tools =
            CatalogueTools::new(loader.clone(), config.match_confidence_threshold, metrics);

        let docs_service = Arc::new(DocsServiceImpl::new(
            loader,
            search_tools,
            lookup_tools,
            catalogue_tools,
        )) as Arc<dyn DocsService>;

        let physiology_service =
            Arc::new(PhysiologyServiceImpl::new()) as Arc<dyn PhysiologyService>;

        Self::with_services(docs_service, physiology_service, config.docs_base_url.clone())
    }

    /// Create a server around existing services.
    pub fn with_services(
        docs_service: Arc<dyn DocsService>,
        physiology_service: Arc<dyn PhysiologyService>,
        docs_base_url: Option<String>,
    ) -> Self {
        Self {
            docs_service,
            physiology_service,
            docs_base_url,
            tool_router: Self::tool_router(),
        }
    }

    /// JSON view of a record, with its URL when a base URL is configured.
    fn record_json(&self, index: usize, record: &DocRecord, include_text: bool) -> Value {
        let mut value = json!({
            "index": index,
            "location": record.location,
            "page": record.page,
            "title": record.title,
            "category": record.category,
        });
        if include_text {
            value["text"] = json!(record.plain_text());
        }
        if let Some(url) = self
            .docs_base_url
            .as_deref()
            .and_then(|base| record.url(base))
        {
            value["url"] = json!(url);
        }
        value
    }

    fn status_json(status: &IndexStatus) -> Value {
        json!({
            "source": status.source,
            "loaded_at": status.loaded_at.to_rfc3339(),
            "from_cache": status.from_cache,
            "record_count": status.report.record_count,
            "is_valid": status.report.is_valid(),
            "category_counts": status.report.category_counts,
            "violations": status.report.violations,
            "pages": status.pages,
        })
    }

    /// Full-text search across the documentation index.
    #[tool(
        description = "Search the StomataModels documentation (titles, symbol names and docstrings) using fuzzy matching. Returns ranked records with excerpts showing where the query was found."
    )]
    async fn search_docs(
        &self,
        params: Parameters<SearchDocsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .docs_service
            .search_docs(
                params.query.clone(),
                params.max_results,
                params.min_confidence,
                params.category,
            )
            .await
            .map_err(to_mcp_error)?;

        json_result(&json!({
            "query": params.query,
            "result_count": response.results.len(),
            "index_size": response.index_size,
            "from_cache": response.from_cache,
            "results": response.results.iter().map(|hit| {
                let mut entry = self.record_json(hit.record_index, &hit.record, false);
                entry["confidence"] = json!(hit.confidence);
                entry["matches"] = json!(hit.matches);
                entry
            }).collect::<Vec<_>>(),
        }))
    }

    /// Resolve a symbol name to type and function records.
    #[tool(
        description = "Find documented types and functions by name. Exact names, differently qualified names and fuzzy abbreviations are accepted; results carry a confidence score."
    )]
    async fn find_symbol(
        &self,
        params: Parameters<FindSymbolToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .docs_service
            .find_symbol(params.symbol.clone(), params.max_results, params.min_confidence)
            .await
            .map_err(to_mcp_error)?;

        json_result(&json!({
            "symbol": params.symbol,
            "from_cache": response.from_cache,
            "matches": response.matches.iter().map(|m| {
                let mut entry = self.record_json(m.record_index, &m.record, false);
                entry["confidence"] = json!(m.confidence);
                entry["match_type"] = json!(m.match_type.as_str());
                entry
            }).collect::<Vec<_>>(),
        }))
    }

    /// Retrieve the records at a documentation location.
    #[tool(
        description = "Retrieve every record at an exact location (e.g. 'API/#StomataModels.ESMMedlyn' or 'API/'), including the full docstring text"
    )]
    async fn get_doc_entry(
        &self,
        params: Parameters<LocationParams>,
    ) -> Result<CallToolResult, McpError> {
        let entries = self
            .docs_service
            .get_doc_entry(&params.0.location)
            .await
            .map_err(to_mcp_error)?;

        json_result(&json!({
            "location": params.0.location,
            "entries": entries
                .iter()
                .map(|e| self.record_json(e.index, &e.record, true))
                .collect::<Vec<_>>(),
        }))
    }

    /// List records by page and category.
    #[tool(description = "List index records, optionally filtered by page title and category, with offset/limit pagination")]
    async fn list_entries(
        &self,
        params: Parameters<ListEntriesToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .docs_service
            .list_entries(params.page, params.category, params.offset, params.limit)
            .await
            .map_err(to_mcp_error)?;

        json_result(&json!({
            "total": response.total,
            "offset": response.offset,
            "entries": response
                .entries
                .iter()
                .map(|e| self.record_json(e.index, &e.record, false))
                .collect::<Vec<_>>(),
        }))
    }

    /// Report the structure of the loaded index.
    #[tool(
        description = "Report the source, load time, per-category record counts and structural violations of the currently loaded search index"
    )]
    async fn validate_index(&self) -> Result<CallToolResult, McpError> {
        let status = self
            .docs_service
            .validate_index()
            .await
            .map_err(to_mcp_error)?;

        json_result(&Self::status_json(&status))
    }

    /// Reload the index from its source.
    #[tool(description = "Discard the cached search index and load it again from its source")]
    async fn refresh_index(&self) -> Result<CallToolResult, McpError> {
        let status = self
            .docs_service
            .refresh_index()
            .await
            .map_err(to_mcp_error)?;

        json_result(&Self::status_json(&status))
    }

    /// Describe a documented type or function.
    #[tool(
        description = "Describe a documented type or function: kind, signature, summary, fields or arguments with units, subtypes, and its place in the type hierarchy"
    )]
    async fn describe_api_item(
        &self,
        params: Parameters<SymbolParams>,
    ) -> Result<CallToolResult, McpError> {
        let description = self
            .docs_service
            .describe_api_item(&params.0.symbol)
            .await
            .map_err(to_mcp_error)?;

        let mut value = json!({
            "item": description.item,
            "ancestors": description.ancestors,
            "children": description.children,
            "confidence": description.confidence,
        });
        if let Some(url) = self.docs_base_url.as_deref().and_then(|base| {
            Location::new(description.item.location.as_str())
                .ok()
                .map(|loc| loc.to_url(base))
        }) {
            value["url"] = json!(url);
        }

        json_result(&value)
    }

    /// Render the documented type hierarchy.
    #[tool(
        description = "Render the documented type hierarchy as an indented tree, starting at a given type or at every root type"
    )]
    async fn type_hierarchy(
        &self,
        params: Parameters<TypeHierarchyParams>,
    ) -> Result<CallToolResult, McpError> {
        let view = self
            .docs_service
            .type_hierarchy(params.0.root)
            .await
            .map_err(to_mcp_error)?;

        json_result(&json!({
            "roots": view.roots,
            "tree": view.tree,
        }))
    }

    /// Evaluate an empirical stomatal conductance model.
    #[tool(
        description = "Evaluate the documented empirical stomatal conductance equation (Ball-Berry, Gentine, Leuning or Medlyn) and return gsw in mol m⁻² s⁻¹"
    )]
    async fn empirical_conductance(
        &self,
        params: Parameters<EmpiricalConductanceParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let result = self
            .physiology_service
            .empirical_conductance(ConductanceRequest {
                model: p.model,
                g0: p.g0,
                g1: p.g1,
                d0: p.d0,
                beta: p.beta,
                drivers: LeafDrivers {
                    a_net: p.a_net,
                    cs: p.cs,
                    ca: p.ca,
                    rh: p.rh,
                    vpd: p.vpd,
                    gamma_star: p.gamma_star,
                    k_leaf: p.k_leaf,
                    k_max: p.k_max,
                },
            })
            .map_err(to_mcp_error)?;

        json_result(&json!(result))
    }

    /// Evaluate a linear β correction factor.
    #[tool(
        description = "Evaluate a linear β correction factor: 1 at or above the upper bound, 0 at or below the lower bound, linear in between"
    )]
    async fn beta_factor(
        &self,
        params: Parameters<BetaFactorParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let result = self
            .physiology_service
            .beta_factor(BetaRequest {
                beta_function: p.beta_function,
                lower: p.lower,
                upper: p.upper,
                pl: p.pl,
                ps: p.ps,
                swc: p.swc,
            })
            .map_err(to_mcp_error)?;

        json_result(&json!(result))
    }

    /// Evaluate the marginal risk of an optimization model.
    #[tool(
        description = "Evaluate the documented marginal risk ∂Θ/∂E of an optimization stomatal model (Eller, Sperry, Wang, WAP or WAPMod)"
    )]
    async fn marginal_risk(
        &self,
        params: Parameters<MarginalRiskParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;

        let result = self
            .physiology_service
            .marginal_risk(MarginalRiskRequest {
                model: p.model,
                a: p.a,
                b: p.b,
                state: HydraulicState {
                    a_net: p.a_net,
                    a_max: p.a_max,
                    k: p.k,
                    k_max: p.k_max,
                    dk_de: p.dk_de,
                    e: p.e,
                    e_crit: p.e_crit,
                    p: p.p,
                },
            })
            .map_err(to_mcp_error)?;

        json_result(&json!(result))
    }
}
