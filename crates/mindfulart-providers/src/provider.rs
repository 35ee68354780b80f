//! ArtworkProvider trait definition.
//!
//! This module defines the [`ArtworkProvider`] trait, which is the core
//! abstraction for museum collection backends (Harvard, Rijksmuseum).
//!
//! Providers are responsible for:
//! - Checking their own credentials before any network I/O
//! - Fetching and validating the collection API response
//! - Mapping records into canonical [`Artwork`] values
//!
//! A provider never fails a search. Every expected failure is folded into a
//! [`ProviderOutcome`] carrying a single warning.

use std::future::Future;
use std::pin::Pin;

use mindfulart_core::{Artwork, Source};
use tracing::warn;

use crate::error::{ProviderError, ProviderResult};

/// A boxed future for async trait methods.
///
/// Using boxed futures keeps the trait object-safe so providers can be
/// stored as `Arc<dyn ArtworkProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What one provider contributed to a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderOutcome {
    /// Mapped artworks, in the order the API returned them.
    pub items: Vec<Artwork>,
    /// User-facing warning when the provider could not contribute cleanly.
    pub warning: Option<String>,
}

impl ProviderOutcome {
    /// Creates a successful outcome.
    pub fn with_items(items: Vec<Artwork>) -> Self {
        Self {
            items,
            warning: None,
        }
    }

    /// Creates a degraded outcome with no items.
    pub fn with_warning(warning: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            warning: Some(warning.into()),
        }
    }

    /// Folds a provider result into an outcome, logging the internal detail.
    pub fn from_result(result: ProviderResult<Vec<Artwork>>) -> Self {
        match result {
            Ok(items) => Self::with_items(items),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &ProviderError) -> Self {
        warn!(
            code = err.code().as_str(),
            provider = err.provider().unwrap_or("unknown"),
            "provider degraded: {}",
            err
        );
        Self::with_warning(err.warning())
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

/// The core abstraction for museum collection providers.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; the aggregator shares them via `Arc`
/// - `search` must not return early with a panic or error for expected failures
/// - Configuration (API key, base URL, timeout) is injected at construction;
///   implementations never read the process environment
///
/// # Example Implementation
///
/// ```ignore
/// struct StaticProvider(Vec<Artwork>);
///
/// impl ArtworkProvider for StaticProvider {
///     fn name(&self) -> &str { "Static" }
///     fn source(&self) -> Source { Source::Harvard }
///
///     fn search<'a>(&'a self, _query: &'a str, limit: usize) -> BoxFuture<'a, ProviderOutcome> {
///         Box::pin(async move {
///             ProviderOutcome::with_items(self.0.iter().take(limit).cloned().collect())
///         })
///     }
/// }
/// ```
pub trait ArtworkProvider: Send + Sync {
    /// Display name used in warnings (e.g. "Harvard").
    fn name(&self) -> &str;

    /// The adapter identity stamped on every artwork this provider returns.
    fn source(&self) -> Source;

    /// Searches the collection for `query`, returning at most `limit` items.
    fn search<'a>(&'a self, query: &'a str, limit: usize) -> BoxFuture<'a, ProviderOutcome>;
}

/// A provider that always reports the same error.
///
/// Used when a provider fails to initialize so the failure still shows up as
/// a warning in every search.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    source: Source,
    error: ProviderError,
}

impl ErrorProvider {
    /// Creates a new error provider.
    pub fn new(name: impl Into<String>, source: Source, error: ProviderError) -> Self {
        let name = name.into();
        let error = ProviderError::new(error.code(), error.message()).with_provider(&name);
        Self {
            name,
            source,
            error,
        }
    }
}

impl ArtworkProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> Source {
        self.source
    }

    fn search<'a>(&'a self, _query: &'a str, _limit: usize) -> BoxFuture<'a, ProviderOutcome> {
        Box::pin(async move { ProviderOutcome::from_error(&self.error) })
    }
}
