//! Rijksmuseum provider configuration.

use std::time::Duration;

use url::Url;

/// Configuration for the Rijksmuseum provider.
#[derive(Debug, Clone)]
pub struct RijksmuseumConfig {
    /// API key. `None` or blank disables the provider with a warning.
    pub api_key: Option<String>,

    /// Base URL of the site, without the `/api` path.
    pub base_url: String,

    /// Collection language segment (`en` or `nl`).
    pub language: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,
}

impl Default for RijksmuseumConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RijksmuseumConfig {
    /// Default site URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.rijksmuseum.nl";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub const API_KEY_ENV: &'static str = "RIJKS_API_KEY";

    /// Creates a configuration with no API key and default endpoint.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("mindfulart/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the API key if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the collection search endpoint URL.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/api/{}/collection",
            self.base_url.trim_end_matches('/'),
            self.language
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url '{}' is not a valid URL: {}", self.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if !matches!(self.language.as_str(), "en" | "nl") {
            return Err(format!(
                "language must be 'en' or 'nl', got '{}'",
                self.language
            ));
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
