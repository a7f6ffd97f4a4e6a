//! Perplexity MCP Library
//!
//! Web search via Perplexity AI, exposed as a single `search_web` MCP tool
//! with recency filtering and numbered citations.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use perplexity_mcp::{Config, PerplexityMcpServer};
//!
//! let server = PerplexityMcpServer::new(&Config::load()?)?;
//! let text = server.search_text("rust 2024 edition", "month").await;
//! ```
//!
//! # Configuration
//! Set `PERPLEXITY_API_KEY` (required) and optionally `PERPLEXITY_MODEL`
//! in the environment or a `.env` file,
//! or configure in `~/.binks/perplexity.toml`

pub mod backends;
pub mod config;
pub mod format;
pub mod models;
pub mod params;
pub mod payload;
pub mod server;
pub mod transport;
pub mod types;

// Re-export main server type
pub use server::{PerplexityMcpServer, ERROR_PREFIX};

pub use config::{Config, ConfigError, Transport};
pub use format::format_response_with_citations;
pub use models::{available_models, ModelInfo};
pub use params::SearchWebParams;
pub use payload::build_payload;
pub use types::{Recency, SearchAnswer, SearchError, SearchRequest};
