//! Result helpers for MCP tool responses

use rmcp::model::{CallToolResult, Content};

/// Create a successful plain text response
///
/// ```rust,ignore
/// use mcp_common::text_success;
///
/// fn my_tool(&self) -> Result<CallToolResult, McpError> {
///     Ok(text_success("Operation completed successfully"))
/// }
/// ```
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Text of the first content item, if it is text
///
/// Useful for in-process callers that only care about a single
/// text answer.
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
}
