//! MCP server for the StomataModels documentation.
//!
//! This module provides the MCP protocol server that exposes the documentation
//! search index and the documented equations to AI assistants.

pub mod handlers;

pub use handlers::DocsMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the documentation MCP server with stdio transport.
///
/// Communicates via stdin/stdout and returns once the client disconnects.
pub async fn run_server(server: DocsMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
