//! Configuration for the citation form

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted chat API configuration
    #[serde(default)]
    pub cohere: CohereConfig,
    /// Page configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl RagConfig {
    /// Load configuration: defaults, then an optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load configuration with environment values taken from a lookup function
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Apply `RAG_HOST`, `RAG_PORT`, `COHERE_BASE_URL` and `COHERE_MODEL` overrides
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("RAG_HOST").filter(|v| !v.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("RAG_PORT").filter(|v| !v.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid RAG_PORT: {}", port)))?;
        }
        if let Some(url) = lookup("COHERE_BASE_URL").filter(|v| !v.is_empty()) {
            self.cohere.base_url = url;
        }
        if let Some(model) = lookup("COHERE_MODEL").filter(|v| !v.is_empty()) {
            self.cohere.model = model;
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 200MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            max_upload_size: 200 * 1024 * 1024,
        }
    }
}

/// Hosted chat API (Cohere) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CohereConfig {
    /// API base URL
    pub base_url: String,
    /// Chat model name
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Connector ids requested on every chat call
    pub connectors: Vec<String>,
    /// Attach uploaded documents to the chat request.
    /// Off by default: uploads are only used to resolve citations.
    pub ground_on_uploads: bool,
    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cohere.ai".to_string(),
            model: "command-r".to_string(),
            api_key_env: "COHERE_API_KEY".to_string(),
            connectors: vec!["web-search".to_string()],
            ground_on_uploads: false,
            timeout_secs: None,
        }
    }
}

/// Page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Page title
    pub title: String,
    /// Accepted upload extensions (lowercase, no dot)
    pub accepted_extensions: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "RAG with Citations - Command-r".to_string(),
            accepted_extensions: vec!["txt".to_string()],
        }
    }
}

impl UiConfig {
    /// Whether a filename has one of the accepted extensions
    pub fn accepts(&self, filename: &str) -> bool {
        let ext = match filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => return false,
        };
        self.accepted_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext))
    }

    /// Value for the HTML `accept` attribute
    pub fn accept_attribute(&self) -> String {
        self.accepted_extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// API credential read from the environment
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Read the credential from the process environment
    pub fn from_env(var: &str) -> Option<Self> {
        Self::from_lookup(var, |key| std::env::var(key).ok())
    }

    /// Read the credential through a lookup function; empty values count as absent
    pub fn from_lookup<F>(var: &str, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(var)
            .filter(|key| !key.is_empty())
            .map(|api_key| Self { api_key })
    }

    /// Create credentials from a known key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"<redacted>").finish()
    }
}
