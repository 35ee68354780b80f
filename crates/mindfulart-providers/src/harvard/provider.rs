//! Harvard Art Museums provider implementation.

use mindfulart_core::{Artwork, Source};
use tracing::{debug, instrument};

use crate::error::{ProviderError, ProviderResult};
use crate::http;
use crate::provider::{ArtworkProvider, BoxFuture, ProviderOutcome};

use super::client::{ObjectSearchResponse, map_record};
use super::config::HarvardConfig;

/// Harvard Art Museums provider.
///
/// Searches the `/object` endpoint for records that have an image.
#[derive(Debug)]
pub struct HarvardProvider {
    config: HarvardConfig,
    http_client: reqwest::Client,
}

impl HarvardProvider {
    /// Display name used in warnings.
    pub const NAME: &'static str = "Harvard";

    /// Creates a new Harvard provider.
    ///
    /// A missing API key is not an error here; it is reported on every search.
    pub fn new(config: HarvardConfig) -> ProviderResult<Self> {
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

    pub fn config(&self) -> &HarvardConfig {
        &self.config
    }

    #[instrument(skip(self), fields(provider = "Harvard"))]
    async fn fetch(&self, query: &str, limit: usize) -> ProviderResult<Vec<Artwork>> {
        let api_key = self.config.api_key().ok_or_else(|| {
            ProviderError::configuration(format!(
                "API key not configured ({}); skipping provider.",
                HarvardConfig::API_KEY_ENV
            ))
        })?;

        let size = limit.to_string();
        let request = self.http_client.get(self.config.object_url()).query(&[
            ("apikey", api_key),
            ("q", query),
            ("size", size.as_str()),
            ("hasimage", "1"),
            ("fields", HarvardConfig::FIELDS),
        ]);

        debug!("querying Harvard Art Museums");
        let body = http::get_json_object(request).await?;
        let response: ObjectSearchResponse = http::decode(body)?;

        if let Some(total) = response.info.as_ref().and_then(|info| info.totalrecords) {
            debug!(total, returned = response.records.len(), "Harvard search complete");
        }

        Ok(response.records.iter().map(map_record).collect())
    }
}

impl ArtworkProvider for HarvardProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn source(&self) -> Source {
        Source::Harvard
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
