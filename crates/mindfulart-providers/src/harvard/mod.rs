//! Harvard Art Museums provider implementation.
//!
//! This module provides a [`HarvardProvider`] that searches the Harvard Art
//! Museums object API.
//!
//! # Image selection
//!
//! Records may carry a `primaryimageurl`, and a list of images each with a
//! `baseimageurl` and an IIIF base URI. Thumbnails are requested through IIIF
//! at 500 px when possible; the main image is the primary image, then a
//! 1200 px IIIF rendition, then the first base image.
//!
//! # Example
//!
//! ```ignore
//! use mindfulart_providers::harvard::{HarvardConfig, HarvardProvider};
//!
//! let config = HarvardConfig::new().with_api_key(api_key);
//! let provider = HarvardProvider::new(config)?;
//!
//! let outcome = provider.search("sunflowers", 24).await;
//! ```

mod client;
mod config;
mod provider;

pub use client::{ObjectRecord, ObjectSearchResponse, map_record};
pub use config::HarvardConfig;
pub use provider::HarvardProvider;
