//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/mindfulart/config.toml` by default.
//!
//! API key values support secret references:
//! - `pass::path/in/store`: resolved via `pass show`
//! - `env::VAR_NAME`: resolved from the environment
//! - plain text: used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use mindfulart_gallery::GalleryStore;
use mindfulart_providers::{DEFAULT_LIMIT, SearchAggregator};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the mindfulart client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Search settings.
    pub search: SearchSettings,

    /// Harvard Art Museums settings.
    #[cfg(feature = "harvard")]
    pub harvard: HarvardSettings,

    /// Rijksmuseum settings.
    #[cfg(feature = "rijksmuseum")]
    pub rijksmuseum: RijksmuseumSettings,

    /// Gallery storage settings.
    pub gallery: GallerySettings,
}

/// Search settings shared by every provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Items requested from each provider.
    pub limit: usize,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            timeout_secs: 10,
        }
    }
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Gallery storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// Path to the galleries file. Defaults to the user data directory.
    pub path: Option<PathBuf>,
}

/// API keys given on the command line. They take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyOverrides {
    pub harvard: Option<String>,
    pub rijksmuseum: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if there is no file.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mindfulart")
    }

    /// Path of the gallery file, from `[gallery] path` or the default location.
    pub fn gallery_path(&self) -> PathBuf {
        self.gallery
            .path
            .clone()
            .unwrap_or_else(GalleryStore::default_path)
    }

    /// Opens the gallery store this configuration points at.
    pub fn open_gallery_store(&self) -> ClientResult<GalleryStore> {
        Ok(GalleryStore::open(self.gallery_path())?)
    }

    /// Checks the values that are not covered by provider validation.
    pub fn validate_search(&self) -> ClientResult<()> {
        if self.search.limit == 0 {
            return Err(ClientError::Config(
                "[search] limit must be greater than zero".to_string(),
            ));
        }
        if self.search.timeout_secs == 0 {
            return Err(ClientError::Config(
                "[search] timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the search aggregator: Rijksmuseum first, then Harvard.
    ///
    /// Secret references are resolved here. A provider whose settings fail
    /// provider-side validation is still registered and reports a warning on
    /// every search.
    pub fn search_aggregator(&self, keys: &ApiKeyOverrides) -> ClientResult<SearchAggregator> {
        self.validate_search()?;

        #[allow(unused_mut)]
        let mut aggregator = SearchAggregator::new();

        #[cfg(feature = "rijksmuseum")]
        aggregator.register_rijksmuseum(self.rijksmuseum.to_provider_config(
            keys.rijksmuseum.as_deref(),
            self.search.timeout(),
        )?);

        #[cfg(feature = "harvard")]
        aggregator.register_harvard(
            self.harvard
                .to_provider_config(keys.harvard.as_deref(), self.search.timeout())?,
        );

        #[cfg(not(any(feature = "harvard", feature = "rijksmuseum")))]
        let _ = keys;

        Ok(aggregator)
    }
}

// ---------------------------------------------------------------------------
// Provider settings
// ---------------------------------------------------------------------------

/// Harvard Art Museums provider settings.
#[cfg(feature = "harvard")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvardSettings {
    /// API key (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// API base URL.
    pub base_url: Option<String>,
}

#[cfg(feature = "harvard")]
impl HarvardSettings {
    /// Converts to provider configuration, resolving the API key.
    pub fn to_provider_config(
        &self,
        key_override: Option<&str>,
        timeout: Duration,
    ) -> ClientResult<mindfulart_providers::harvard::HarvardConfig> {
        use mindfulart_providers::harvard::HarvardConfig;

        let mut config = HarvardConfig::new().with_timeout(timeout);
        if let Some(key) = crate::secret::resolve_api_key(
            "Harvard",
            key_override,
            self.api_key.as_deref(),
        )? {
            config = config.with_api_key(key);
        }
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }
}

/// Rijksmuseum provider settings.
#[cfg(feature = "rijksmuseum")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RijksmuseumSettings {
    /// API key (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// API base URL.
    pub base_url: Option<String>,

    /// Collection language, `en` or `nl`.
    pub language: Option<String>,
}

#[cfg(feature = "rijksmuseum")]
impl RijksmuseumSettings {
    /// Converts to provider configuration, resolving the API key.
    pub fn to_provider_config(
        &self,
        key_override: Option<&str>,
        timeout: Duration,
    ) -> ClientResult<mindfulart_providers::rijksmuseum::RijksmuseumConfig> {
        use mindfulart_providers::rijksmuseum::RijksmuseumConfig;

        let mut config = RijksmuseumConfig::new().with_timeout(timeout);
        if let Some(key) = crate::secret::resolve_api_key(
            "Rijksmuseum",
            key_override,
            self.api_key.as_deref(),
        )? {
            config = config.with_api_key(key);
        }
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(ref language) = self.language {
            config = config.with_language(language);
        }
        Ok(config)
    }
}
