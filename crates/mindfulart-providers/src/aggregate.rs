//! Concurrent search across every registered provider.
//!
//! The aggregator fans one query out to all providers at once and merges
//! whatever comes back. It never fails: each provider either contributes
//! items or a warning, and a provider that panics is reported the same way.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::join_all;
use mindfulart_core::{SearchResult, sort_by_title};
use tracing::{debug, error, info};

use crate::error::ProviderError;
use crate::provider::{ArtworkProvider, ProviderOutcome};

/// Items requested from each provider when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 24;

/// Fans a query out to registered providers and merges their outcomes.
#[derive(Clone, Default)]
pub struct SearchAggregator {
    providers: Vec<Arc<dyn ArtworkProvider>>,
}

impl std::fmt::Debug for SearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("providers", &self.provider_names().collect::<Vec<_>>())
            .finish()
    }
}

impl SearchAggregator {
    /// Creates an aggregator with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register a provider.
    pub fn with_provider(mut self, provider: Arc<dyn ArtworkProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Registers a provider. Items and warnings follow registration order.
    pub fn register(&mut self, provider: Arc<dyn ArtworkProvider>) {
        debug!(provider = provider.name(), "registered provider");
        self.providers.push(provider);
    }

    /// Names of the registered providers, in registration order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registers the Rijksmuseum provider.
    ///
    /// If the provider cannot be built, an [`ErrorProvider`](crate::ErrorProvider)
    /// stands in so the failure shows up as a warning on every search.
    #[cfg(feature = "rijksmuseum")]
    pub fn register_rijksmuseum(&mut self, config: crate::rijksmuseum::RijksmuseumConfig) {
        use crate::rijksmuseum::RijksmuseumProvider;

        let provider: Arc<dyn ArtworkProvider> = match RijksmuseumProvider::new(config) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                error!(error = %e, "failed to create Rijksmuseum provider");
                Arc::new(crate::provider::ErrorProvider::new(
                    RijksmuseumProvider::NAME,
                    mindfulart_core::Source::Rijksmuseum,
                    e,
                ))
            }
        };
        self.register(provider);
    }

    /// Registers the Harvard Art Museums provider.
    #[cfg(feature = "harvard")]
    pub fn register_harvard(&mut self, config: crate::harvard::HarvardConfig) {
        use crate::harvard::HarvardProvider;

        let provider: Arc<dyn ArtworkProvider> = match HarvardProvider::new(config) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                error!(error = %e, "failed to create Harvard provider");
                Arc::new(crate::provider::ErrorProvider::new(
                    HarvardProvider::NAME,
                    mindfulart_core::Source::Harvard,
                    e,
                ))
            }
        };
        self.register(provider);
    }

    /// The default registry: Rijksmuseum first, then Harvard.
    #[cfg(all(feature = "rijksmuseum", feature = "harvard"))]
    pub fn museums(
        rijksmuseum: crate::rijksmuseum::RijksmuseumConfig,
        harvard: crate::harvard::HarvardConfig,
    ) -> Self {
        let mut aggregator = Self::new();
        aggregator.register_rijksmuseum(rijksmuseum);
        aggregator.register_harvard(harvard);
        aggregator
    }

    /// Searches every provider concurrently and merges the results.
    ///
    /// A blank query returns an empty result without calling any provider.
    /// Items are sorted by title; warnings keep registration order.
    pub async fn search(&self, query: &str, limit: usize) -> SearchResult {
        let query = query.trim();
        if query.is_empty() {
            debug!("ignoring blank query");
            return SearchResult::default();
        }

        let searches = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move {
                let outcome = AssertUnwindSafe(async { provider.search(query, limit).await })
                    .catch_unwind()
                    .await;
                match outcome {
                    Ok(outcome) => outcome,
                    Err(_panic) => {
                        error!(provider = provider.name(), "provider panicked during search");
                        ProviderOutcome::from_error(
                            &ProviderError::internal("provider panicked")
                                .with_provider(provider.name()),
                        )
                    }
                }
            }
        });

        let outcomes = join_all(searches).await;

        let mut result = SearchResult::default();
        for outcome in outcomes {
            result.items.extend(outcome.items);
            result.warnings.extend(outcome.warning);
        }
        sort_by_title(&mut result.items);

        info!(
            query,
            items = result.items.len(),
            warnings = result.warnings.len(),
            "search complete"
        );
        result
    }
}
