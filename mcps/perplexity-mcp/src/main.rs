//! Perplexity MCP Server
//!
//! Web search via Perplexity AI with recency filtering and citations.
//!
//! # Configuration
//! `PERPLEXITY_API_KEY` is required, from the environment or a `.env` file.
//! `TRANSPORT=sse` (default) serves HTTP on `HOST`:`PORT`; any other value
//! serves stdio.

use std::process::ExitCode;

use perplexity_mcp::{config::Config, models, transport, PerplexityMcpServer, Transport};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    mcp_common::init_tracing("perplexity_mcp")?;

    tracing::info!("Starting Perplexity MCP Server");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if !config.is_configured() {
        tracing::error!("PERPLEXITY_API_KEY environment variable is required");
        return Ok(ExitCode::FAILURE);
    }

    models::log_model_info(&config.model);

    tracing::info!("Transport: {}", config.transport);
    let server = PerplexityMcpServer::new(&config)?;

    match config.transport {
        Transport::Sse => transport::serve_sse(server, &config.host, config.port).await?,
        Transport::Stdio => transport::serve_stdio(server).await?,
    }

    tracing::info!("Server shutting down");
    Ok(ExitCode::SUCCESS)
}
