//! Daemon entry point for the Fatebook MCP server.
//!
//! Loads configuration from `.env`, the environment, and CLI flags, then
//! serves the MCP protocol over stdio and/or streamable HTTP.

mod config;

use fatebook_core::client::FatebookClient;
use fatebook_core::control::FatebookControlPlane;
use fatebook_mcp::server::{McpHttpServerConfig, serve_stdio, spawn_streamable_http};
use tracing::info;

use crate::config::FatebookConfig;

fn init_logging() {
    // stdout carries the MCP stream.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();
    init_logging();

    let config = FatebookConfig::from_args()?;
    let client = FatebookClient::new(config.api_key.clone(), &config.client_config())?;
    let control = FatebookControlPlane::new(client);
    info!(base_url = %config.base_url, "starting fatebook-mcpd");

    let http = config.mcp_serve.then(|| {
        spawn_streamable_http(control.clone(), McpHttpServerConfig::new(config.mcp_http_addr))
    });

    if config.enable_stdio {
        let result = serve_stdio(control).await;
        if let Some(handle) = http {
            info!("stdio session ended; stopping HTTP transport");
            handle.abort();
        }
        result?;
    } else if let Some(handle) = http {
        handle.await?;
    }
    Ok(())
}
