//! Harvard Art Museums provider configuration.

use std::time::Duration;

use url::Url;

/// Configuration for the Harvard Art Museums provider.
#[derive(Debug, Clone)]
pub struct HarvardConfig {
    /// API key. `None` or blank disables the provider with a warning.
    pub api_key: Option<String>,

    /// Base URL of the API, without the `/object` path.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,
}

impl Default for HarvardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HarvardConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.harvardartmuseums.org";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Environment variable users set the key with; named in the warning.
    pub const API_KEY_ENV: &'static str = "HARVARD_API_KEY";

    /// Fields requested from the API, kept small to limit payload size.
    pub const FIELDS: &'static str =
        "id,title,dated,primaryimageurl,url,people,images.baseimageurl,images.iiifbaseuri";

    /// Creates a configuration with no API key and default endpoint.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("mindfulart/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
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

    /// Returns the search endpoint URL.
    pub fn object_url(&self) -> String {
        format!("{}/object", self.base_url.trim_end_matches('/'))
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
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
