//! Error types for artwork provider operations.
//!
//! Provider errors never reach the end user directly. Each one carries an
//! internal message for the logs and renders a short, generic warning through
//! [`ProviderError::warning`].

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Missing or invalid configuration, e.g. no API key.
    ConfigurationError,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Connection failed, DNS resolution, body read failure, etc.
    NetworkError,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The body was not a JSON object.
    InvalidResponse,
    /// The body was a JSON object but did not match the expected schema.
    SchemaValidation,
    /// Unexpected state or a bug.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns a stable machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::Timeout => "timeout",
            Self::NetworkError => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
            Self::SchemaValidation => "schema_validation",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while searching a provider.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    /// Internal detail, logged but not shown to users (except for configuration errors).
    message: String,
    /// Display name of the provider (e.g. "Harvard").
    provider: Option<String>,
    /// HTTP status for [`ProviderErrorCode::HttpStatus`].
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            status: None,
            source: None,
        }
    }

    /// Creates a configuration error. The message is shown to users as-is.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an error for a non-2xx response.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::HttpStatus, message);
        err.status = Some(status);
        err
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::SchemaValidation, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the user-facing warning for this error.
    ///
    /// Only configuration messages are passed through; every other class maps
    /// to a fixed phrase so response bodies and parser output never leak.
    pub fn warning(&self) -> String {
        let provider = self.provider.as_deref().unwrap_or("Provider");
        match self.code {
            ProviderErrorCode::ConfigurationError => format!("{} {}", provider, self.message),
            ProviderErrorCode::Timeout => format!("{} request timed out", provider),
            ProviderErrorCode::NetworkError => format!("{} request failed", provider),
            ProviderErrorCode::HttpStatus => match self.status {
                Some(status) => format!("{} HTTP {}", provider, status),
                None => format!("{} HTTP error", provider),
            },
            ProviderErrorCode::InvalidResponse => {
                format!("{} API returned non-object JSON", provider)
            }
            ProviderErrorCode::SchemaValidation => {
                format!("{} schema validation failed", provider)
            }
            ProviderErrorCode::InternalError => {
                format!("{} search failed unexpectedly", provider)
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
