//! Configuration loading for perplexity-mcp
//!
//! Configuration is resolved once at startup, lowest priority first:
//! 1. Default values
//! 2. TOML file at `PERPLEXITY_CONFIG_PATH`, or `~/.binks/perplexity.toml`
//! 3. A `.env` file in the working directory or one of its parents
//! 4. Environment variables (`PERPLEXITY_API_KEY`, `PERPLEXITY_MODEL`,
//!    `PERPLEXITY_API_URL`, `TRANSPORT`, `HOST`, `PORT`)
//!
//! Variables set in the real environment always win over `.env` entries.
//!
//! ```toml
//! [perplexity]
//! model = "sonar-pro"
//!
//! [server]
//! transport = "stdio"
//! port = 8055
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const ENV_API_KEY: &str = "PERPLEXITY_API_KEY";
pub const ENV_MODEL: &str = "PERPLEXITY_MODEL";
pub const ENV_API_URL: &str = "PERPLEXITY_API_URL";
pub const ENV_CONFIG_PATH: &str = "PERPLEXITY_CONFIG_PATH";
pub const ENV_TRANSPORT: &str = "TRANSPORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_API_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8055;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PERPLEXITY_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Which MCP transport loop the process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// HTTP server streaming responses as server-sent events
    #[default]
    Sse,
    /// JSON-RPC over stdin/stdout
    Stdio,
}

impl Transport {
    /// `"sse"` selects the HTTP transport; any other value selects stdio.
    pub fn from_name(name: &str) -> Self {
        if name == "sse" {
            Transport::Sse
        } else {
            Transport::Stdio
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Sse => f.write_str("sse"),
            Transport::Stdio => f.write_str("stdio"),
        }
    }
}

/// Resolved server configuration
#[derive(Clone)]
pub struct Config {
    /// Perplexity API key, sent as a bearer token
    pub api_key: Option<String>,
    /// Model id placed in every request payload
    pub model: String,
    /// Chat completions endpoint
    pub api_url: String,
    pub transport: Transport,
    /// Bind address for the HTTP transport
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            transport: Transport::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// Keeps the key out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("transport", &self.transport)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

// On-disk layout; every field optional so partial files work
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    perplexity: PerplexitySection,
    #[serde(default)]
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
struct PerplexitySection {
    api_key: Option<String>,
    model: Option<String>,
    api_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    transport: Option<String>,
    host: Option<String>,
    port: Option<u16>,
}

impl Config {
    /// Load configuration from the config file, `.env`, and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let dotenv = match dotenvy::dotenv_iter() {
            Ok(iter) => collect_dotenv(iter)?,
            Err(e) if e.not_found() => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        if !dotenv.is_empty() {
            tracing::info!("Loaded {} variables from .env", dotenv.len());
        }

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    /// Load configuration, reading variables through `lookup`
    ///
    /// `lookup` stands in for the process environment, so callers can
    /// resolve a config without touching global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match Self::find_config_path(&lookup) {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::read_file(path)?
            }
            Some(path) => {
                tracing::debug!("Config file {} not found, using defaults", path.display());
                FileConfig::default()
            }
            None => FileConfig::default(),
        };

        Self::merge(file, &lookup)
    }

    /// True iff an API key is present and non-empty
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    fn find_config_path<F>(lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Explicit path
        if let Some(path) = lookup(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        // 2. ~/.binks/perplexity.toml
        lookup("HOME").map(|home| PathBuf::from(home).join(".binks").join("perplexity.toml"))
    }

    fn read_file(path: PathBuf) -> Result<FileConfig, ConfigError> {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    fn merge<F>(file: FileConfig, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        // An empty key stays empty so the startup check reports it
        let api_key = lookup(ENV_API_KEY).or(file.perplexity.api_key);

        let model = non_empty(ENV_MODEL)
            .or(file.perplexity.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_url = non_empty(ENV_API_URL)
            .or(file.perplexity.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_api_url(&api_url)?;

        let transport = lookup(ENV_TRANSPORT)
            .or(file.server.transport)
            .map(|name| Transport::from_name(&name))
            .unwrap_or_default();

        let host = non_empty(ENV_HOST)
            .or(file.server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            api_key,
            model,
            api_url,
            transport,
            host,
            port,
        })
    }
}

/// Read `KEY=value` pairs from a dotenv file; a missing file yields no entries
pub fn read_dotenv_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => collect_dotenv(iter),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn collect_dotenv(iter: dotenvy::Iter<File>) -> Result<HashMap<String, String>, ConfigError> {
    Ok(iter.collect::<Result<HashMap<_, _>, _>>()?)
}

fn validate_api_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
