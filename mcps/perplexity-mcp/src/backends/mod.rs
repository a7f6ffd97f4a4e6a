//! Search backend implementations
//!
//! The MCP server talks to a [`SearchBackend`] rather than to reqwest
//! directly, so tool behavior can be exercised against a stub.

use async_trait::async_trait;

use crate::types::{SearchAnswer, SearchError};

pub mod perplexity;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Run one search. `recency` is forwarded to the provider unchecked.
    async fn search(&self, query: &str, recency: &str) -> Result<SearchAnswer, SearchError>;

    /// Check if this backend is configured and available
    fn is_available(&self) -> bool;
}
