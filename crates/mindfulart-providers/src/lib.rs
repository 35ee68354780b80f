//! ArtworkProvider trait and implementations.
//!
//! This crate provides the abstraction layer for museum collection backends:
//!
//! - [`ArtworkProvider`] - The core trait that all collection backends implement
//! - [`ProviderOutcome`] - Items or a warning, never an error
//! - [`SearchAggregator`] - Concurrent fan-out and merge across providers
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │ Rijksmuseum API │    │  Harvard API    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌───────────────────┐  ┌─────────────────┐
//! │RijksmuseumProvider│  │ HarvardProvider │
//! └────────┬──────────┘  └────────┬────────┘
//!          │                      │
//!          │   ArtworkProvider    │
//!          └──────────┬───────────┘
//!                     │
//!                     ▼ join_all + catch_unwind
//!              ┌──────────────────┐
//!              │ SearchAggregator │
//!              └──────┬───────────┘
//!                     │
//!                     ▼ sort by title
//!              ┌──────────────┐
//!              │ SearchResult │
//!              └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mindfulart_providers::{SearchAggregator, DEFAULT_LIMIT};
//! use mindfulart_providers::harvard::HarvardConfig;
//! use mindfulart_providers::rijksmuseum::RijksmuseumConfig;
//!
//! let aggregator = SearchAggregator::museums(
//!     RijksmuseumConfig::new().with_api_key(rijks_key),
//!     HarvardConfig::new().with_api_key(harvard_key),
//! );
//! let result = aggregator.search("sunflowers", DEFAULT_LIMIT).await;
//! ```

pub mod aggregate;
pub mod error;
#[cfg(feature = "harvard")]
pub mod harvard;
#[cfg(any(feature = "harvard", feature = "rijksmuseum"))]
mod http;
pub mod provider;
#[cfg(feature = "rijksmuseum")]
pub mod rijksmuseum;

// Re-export main types at crate root
pub use aggregate::{DEFAULT_LIMIT, SearchAggregator};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::{ArtworkProvider, BoxFuture, ErrorProvider, ProviderOutcome};
