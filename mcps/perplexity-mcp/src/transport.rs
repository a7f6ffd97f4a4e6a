//! MCP transport layer for stdio and SSE

use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

use crate::server::PerplexityMcpServer;

/// Path the HTTP transport is mounted at
pub const MCP_PATH: &str = "/mcp";

/// Serve over stdin/stdout until the client disconnects
pub async fn serve_stdio(server: PerplexityMcpServer) -> anyhow::Result<()> {
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running on stdio, waiting for requests...");
    service.waiting().await?;

    Ok(())
}

/// Bind a listener, accepting hostnames, IPv4 and bare IPv6 addresses like `::`
pub async fn bind(host: &str, port: u16) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port)).await
}

/// Serve over HTTP at `http://{host}:{port}/mcp`
///
/// Uses MCP's streamable HTTP transport, which streams responses to clients
/// as server-sent events. Runs until Ctrl-C.
pub async fn serve_sse(server: PerplexityMcpServer, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    };
    use std::sync::Arc;

    let ct = tokio_util::sync::CancellationToken::new();

    // Each session gets a clone; clones share the backend and config
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            cancellation_token: ct.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service(MCP_PATH, service);
    let tcp_listener = bind(host, port).await?;

    tracing::info!(
        "Server listening on http://{}{}",
        tcp_listener.local_addr()?,
        MCP_PATH
    );

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received Ctrl-C, shutting down");
            ct.cancel();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ipv4_host() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().is_ipv4());
    }

    #[tokio::test]
    async fn test_bind_bare_ipv6_host() {
        // Skip on hosts without IPv6 loopback
        if std::net::TcpListener::bind("[::1]:0").is_err() {
            eprintln!("Skipping: IPv6 unavailable");
            return;
        }

        let listener = bind("::1", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().is_ipv6());
    }
}
