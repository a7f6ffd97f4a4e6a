//! MCP Server implementation for Perplexity web search
//!
//! Exposes a single `search_web` tool. Upstream failures never surface as
//! MCP errors: they are flattened into the tool's text result so the calling
//! agent always gets something readable.

use mcp_common::{
    async_trait, text_success, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult,
    McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::backends::{perplexity::PerplexityBackend, SearchBackend};
use crate::config::Config;
use crate::params::SearchWebParams;
use crate::types::{Recency, SearchAnswer, SearchError};

/// Prefix of every error result returned by `search_web`
pub const ERROR_PREFIX: &str = "Error searching with Perplexity: ";

/// The Perplexity MCP Server
#[derive(Clone)]
pub struct PerplexityMcpServer {
    backend: Arc<dyn SearchBackend>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl PerplexityMcpServer {
    /// Create a server backed by the Perplexity API
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let backend: Arc<dyn SearchBackend> = Arc::new(PerplexityBackend::new(config)?);

        if !backend.is_available() {
            tracing::warn!(
                "Backend '{}' is not available (check PERPLEXITY_API_KEY)",
                backend.name()
            );
        }

        Ok(Self::with_backend(backend))
    }

    /// Create a server with an explicit backend
    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            tool_router: Self::tool_router(),
        }
    }

    /// Run a search and flatten the outcome to the text the tool returns
    pub async fn search_text(&self, query: &str, recency: &str) -> String {
        if Recency::parse(recency).is_none() {
            tracing::debug!("Forwarding unrecognized recency filter '{}'", recency);
        }

        tracing::info!("Searching for: {} (recency: {})", query, recency);

        flatten(self.backend.search(query, recency).await)
    }

    #[tool(
        description = "Search the web using Perplexity AI with recency filtering. Returns an \
                       up-to-date answer with numbered citations to its sources. Results can be \
                       filtered by recency: 'day', 'week', 'month' (default), or 'year'."
    )]
    async fn search_web(
        &self,
        Parameters(params): Parameters<SearchWebParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.search_text(&params.query, params.recency()).await;
        Ok(text_success(text))
    }
}

fn flatten(result: Result<SearchAnswer, SearchError>) -> String {
    match result {
        Ok(answer) => answer.render(),
        Err(e) => {
            tracing::warn!("Perplexity search failed: {}", e);
            format!("{}{}", ERROR_PREFIX, e)
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for PerplexityMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Perplexity MCP Server - provides a search_web tool backed by Perplexity AI. \
                 Answers include numbered citations and can be limited to results from the \
                 last day, week, month, or year."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "perplexity-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for PerplexityMcpServer {
    fn server_name(&self) -> &str {
        "perplexity-mcp"
    }

    fn server_description(&self) -> Option<&str> {
        Some("MCP server for Perplexity AI web search integration")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "search_web" => {
                let params: SearchWebParams = serde_json::from_value(params)?;
                self.search_web(Parameters(params)).await.map_err(Into::into)
            }
            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
