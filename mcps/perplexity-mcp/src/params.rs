//! Parameter types for Perplexity MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECENCY: &str = "month";

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchWebParams {
    #[schemars(description = "The search query to find information about")]
    pub query: String,

    #[schemars(
        description = "Filter results by how recent they are. Options: 'day' (last 24h), \
                       'week' (last 7 days), 'month' (last 30 days), 'year' (last 365 days). \
                       Defaults to 'month'."
    )]
    #[serde(default)]
    pub recency: Option<String>,
}

impl SearchWebParams {
    pub fn recency(&self) -> &str {
        self.recency.as_deref().unwrap_or(DEFAULT_RECENCY)
    }
}
