//! StomataModels Docs MCP Server - Main entry point
//!
//! Serves a documentation search index over the Model Context Protocol on stdio.

use anyhow::Result;
use std::sync::Arc;
use stomata_docs_mcp::client::{AsyncIndexClient, AsyncIndexClientImpl};
use stomata_docs_mcp::repositories::{DocsRepository, SourceDocsRepository};
use stomata_docs_mcp::{Config, DocsMcpServer, IndexClient, IndexSource};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env must be applied before the log filter is built
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // Logs go to stderr; stdout carries the MCP protocol
    let log_level = config.as_ref().map_or("error", |c| c.log_level.as_str());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let source = IndexSource::parse(&config.index_source);
    info!(
        "Starting StomataModels docs MCP server with index source: {}",
        source
    );

    let sync_client = IndexClient::new(&config);
    let metrics = sync_client.metrics().clone();
    let client = Arc::new(AsyncIndexClientImpl::new(sync_client)) as Arc<dyn AsyncIndexClient>;

    let repo = Arc::new(SourceDocsRepository::new(client, source)) as Arc<dyn DocsRepository>;

    let server = DocsMcpServer::new(repo, &config, metrics.clone());

    info!(
        "Index cache TTL: {} minutes, strict validation: {}",
        config.cache_ttl_minutes, config.strict_validation
    );

    info!("Starting MCP server with stdio transport");
    stomata_docs_mcp::server::run_server(server).await?;

    let summary = metrics.summary();
    info!(
        "Shutdown: {} index loads ({} failed, avg {:.1} ms), {} queries, {} records served",
        summary.index_loads_total,
        summary.index_load_errors_total,
        summary.index_load_duration_avg_ms,
        summary.queries_total,
        summary.records_served_total
    );
    Ok(())
}
