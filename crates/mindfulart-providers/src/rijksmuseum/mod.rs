//! Rijksmuseum provider implementation.
//!
//! Searches the Rijksmuseum collection API (`/api/<lang>/collection`) for
//! objects with images. The API serves images from Google's CDN, so
//! thumbnails are derived by rewriting the `=s<N>` size token.

mod client;
mod config;
mod provider;

pub use client::{ArtObject, CollectionResponse, map_art_object};
pub use config::RijksmuseumConfig;
pub use provider::RijksmuseumProvider;
