//! MCP server entrypoint (stdio transport).
//!
//! Launches an MCP server that exposes a Paperless-ngx archive's documents over
//! stdio for editor/agent integrations. Requires `PAPERLESS_SERVER` and
//! `PAPERLESS_API_KEY` in the environment; missing configuration or a failed
//! tag-cache bootstrap aborts startup before any tool becomes callable.
use anyhow::{Context, Result};
use paperless_mcp::{config, logging, mcp::PaperlessMcpServer, paperless::PaperlessClient};
use rmcp::{service::ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    config::init_config()
        .context("PAPERLESS_SERVER and PAPERLESS_API_KEY environment variables are required")?;
    logging::init_tracing();

    let client = Arc::new(PaperlessClient::new().context("failed to build Paperless client")?);
    let tags = Arc::new(
        client
            .fetch_tag_cache()
            .await
            .context("failed to bootstrap tag cache from Paperless")?,
    );
    tracing::info!(tags = tags.len(), "Tag cache ready");

    let server = PaperlessMcpServer::new(client, tags);

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    Ok(())
}
