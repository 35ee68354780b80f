//! Rijksmuseum provider implementation.

use mindfulart_core::{Artwork, Source};
use tracing::{debug, instrument};

use crate::error::{ProviderError, ProviderResult};
use crate::http;
use crate::provider::{ArtworkProvider, BoxFuture, ProviderOutcome};

use super::client::{CollectionResponse, map_art_object};
use super::config::RijksmuseumConfig;

/// Rijksmuseum collection provider.
#[derive(Debug)]
pub struct RijksmuseumProvider {
    config: RijksmuseumConfig,
    http_client: reqwest::Client,
}

impl RijksmuseumProvider {
    /// Display name used in warnings.
    pub const NAME: &'static str = "Rijksmuseum";

    /// Creates a new Rijksmuseum provider.
    pub fn new(config: RijksmuseumConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(e).with_provider(Self::NAME))?;
        let http_client = http::build_client(config.timeout, &config.user_agent)
            .map_err(|e| e.with_provider(Self::NAME))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &RijksmuseumConfig {
        &self.config
    }

    #[instrument(skip(self), fields(provider = "Rijksmuseum"))]
    async fn fetch(&self, query: &str, limit: usize) -> ProviderResult<Vec<Artwork>> {
        let api_key = self.config.api_key().ok_or_else(|| {
            ProviderError::configuration(format!(
                "API key not configured ({}); skipping provider.",
                RijksmuseumConfig::API_KEY_ENV
            ))
        })?;

        let page_size = limit.to_string();
        let request = self.http_client.get(self.config.collection_url()).query(&[
            ("key", api_key),
            ("q", query),
            ("imgonly", "true"),
            ("ps", page_size.as_str()),
        ]);

        debug!("querying Rijksmuseum collection");
        let body = http::get_json_object(request).await?;
        let response: CollectionResponse = http::decode(body)?;

        let objects = response
            .art_objects
            .ok_or_else(|| ProviderError::schema("response has no artObjects list"))?;

        debug!(
            total = response.count.unwrap_or_default(),
            returned = objects.len(),
            "Rijksmuseum search complete"
        );

        Ok(objects.iter().map(map_art_object).collect())
    }
}

impl ArtworkProvider for RijksmuseumProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn source(&self) -> Source {
        Source::Rijksmuseum
    }

    fn search<'a>(&'a self, query: &'a str, limit: usize) -> BoxFuture<'a, ProviderOutcome> {
        Box::pin(async move {
            let result = self
                .fetch(query, limit)
                .await
                .map_err(|e| e.with_provider(Self::NAME));
            ProviderOutcome::from_result(result)
        })
    }
}
