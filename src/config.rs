//! Configuration types for the dashboard client.
//!
//! Loaded from TOML; every section and field falls back to its default, so a
//! file only needs the values it changes:
//!
//! ```toml
//! [server]
//! base_url = "http://192.168.137.217:5050"
//!
//! [search]
//! model = "senbai"
//! k = 10
//! multilingual = true
//! output_languages = ["en", "ms"]
//! ```

use mulling_search::query::{DEFAULT_K, MAX_K};
use mulling_search::{ClientConfig, Language, Model};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the MulLing service lives.
    pub server: ServerConfig,
    /// Initial form state for searches.
    pub search: SearchDefaults,
}

/// Service connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent override (None = crate default).
    pub user_agent: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: client.base_url,
            timeout_seconds: client.timeout_seconds,
            user_agent: client.user_agent,
        }
    }
}

/// Search form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Retrieval model.
    pub model: Model,
    /// Input language.
    pub lang: Language,
    /// Number of results.
    pub k: u32,
    /// Query across all corpora instead of only the input language's.
    pub multilingual: bool,
    /// Normalise the cross-language merge (multilingual only).
    pub normalize: bool,
    /// Corpora allowed in multilingual results.
    pub output_languages: Vec<Language>,
    /// Show the cluster-grouped view instead of the flat list.
    pub clustering: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            model: Model::default(),
            lang: Language::English,
            k: DEFAULT_K,
            multilingual: false,
            normalize: true,
            output_languages: Language::corpus().to_vec(),
            clustering: false,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else defaults.
    ///
    /// # Errors
    ///
    /// Same as [`DashboardConfig::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DashboardError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::mulling_dirs::config_file()
    }

    /// Checks values the TOML types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] or a wrapped client config error.
    pub fn validate(&self) -> Result<()> {
        self.client_config().validate()?;
        if self.search.k == 0 || self.search.k > MAX_K {
            return Err(DashboardError::Config(format!(
                "search.k must be between 1 and {MAX_K}"
            )));
        }
        if self.search.output_languages.contains(&Language::Unspecified) {
            return Err(DashboardError::Config(
                "search.output_languages cannot contain \"null\"".into(),
            ));
        }
        if self.search.multilingual
            && !self.search.normalize
            && self.search.output_languages.len() == 1
        {
            return Err(DashboardError::Config(
                "search.normalize = false needs at least two output_languages".into(),
            ));
        }
        Ok(())
    }

    /// Client settings for [`mulling_search::MullingClient`].
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.server.base_url.clone(),
            timeout_seconds: self.server.timeout_seconds,
            user_agent: self.server.user_agent.clone(),
        }
    }
}
