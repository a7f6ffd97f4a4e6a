//! Embeddable MCP trait for in-process execution
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly, without
//! spawning a subprocess or speaking JSON-RPC over a transport.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use perplexity_mcp::{Config, PerplexityMcpServer};
//!
//! let server = PerplexityMcpServer::new(Config::load()?)?;
//! let result = server
//!     .call_tool("search_web", serde_json::json!({ "query": "rust 2024 edition" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not match the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server whose tools can be invoked in-process
///
/// Servers built with `#[tool_router]` usually implement `list_tools` by
/// delegating to `ToolRouter::list_all` and `call_tool` by deserializing
/// `params` into the tool's parameter struct.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name, matching the name used in MCP client configuration
    fn server_name(&self) -> &str;

    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name with JSON object arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoServer;

    #[async_trait]
    impl EmbeddableMcp for EchoServer {
        fn server_name(&self) -> &str {
            "echo"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
            match name {
                "echo" => {
                    let text: String = serde_json::from_value(params)?;
                    Ok(crate::text_success(text))
                }
                _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
            }
        }
    }

    #[test]
    fn test_default_description() {
        let server = EchoServer;
        assert_eq!(server.server_name(), "echo");
        assert!(server.server_description().is_none());
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let result = EchoServer.call_tool("unknown", serde_json::json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_bad_params_map_to_invalid_params() {
        let result = EchoServer.call_tool("echo", serde_json::json!(42)).await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_call_echo() {
        let result = EchoServer
            .call_tool("echo", serde_json::json!("hi"))
            .await
            .unwrap();
        assert_eq!(crate::first_text(&result), Some("hi"));
    }
}
