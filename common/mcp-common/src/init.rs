//! Server initialization utilities
//!
//! Logging always goes to stderr. When a server runs over the stdio
//! transport, stdout carries JSON-RPC frames and must stay clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines, selected with `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text without ANSI colors
    #[default]
    Text,
    /// One JSON object per line, for log aggregation
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` means text.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> Self {
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Build the default `<crate>=info` directive layered over `RUST_LOG`
fn build_filter(crate_name: &str) -> anyhow::Result<EnvFilter> {
    let directive = format!("{}=info", crate_name.replace('-', "_"));
    Ok(EnvFilter::from_default_env().add_directive(directive.parse()?))
}

/// Initialize tracing/logging for an MCP server
///
/// * `RUST_LOG` filters as usual, with `info` enabled for `crate_name`
/// * `LOG_FORMAT=json` switches to structured JSON output
///
/// Can only be called once per process.
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("perplexity_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = build_filter(crate_name)?;
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}
