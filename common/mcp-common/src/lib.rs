//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] sets up stderr logging, keeping
//!   stdout free for the stdio transport
//! - **Results**: helpers for building and reading text `CallToolResult`s
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process tool calls
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, text_success};
//!
//! init_tracing("perplexity_mcp")?;
//!
//! fn my_tool(&self) -> Result<CallToolResult, McpError> {
//!     Ok(text_success("done"))
//! }
//! ```

pub mod embeddable;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use init::{init_tracing, LogFormat};
pub use result::{first_text, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
