//! Artwork types shared by every provider.
//!
//! This module provides the canonical, provider-agnostic representation of a
//! museum object:
//! - [`Artwork`]: a normalized artwork as produced by a provider adapter
//! - [`Institution`]: the display grouping key
//! - [`Source`]: the adapter identity, used for compound keys
//! - [`SearchResult`]: the merged output of one aggregated search

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Title used when a provider record has no usable title.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Artist used when a provider record has no usable maker.
pub const DEFAULT_ARTIST: &str = "Unknown";

/// The museum an artwork belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Institution {
    #[serde(rename = "Rijksmuseum")]
    Rijksmuseum,
    #[serde(rename = "Harvard Art Museums")]
    HarvardArtMuseums,
}

impl Institution {
    /// Fixed display order used when grouping results.
    pub const ALL: [Institution; 2] = [Institution::Rijksmuseum, Institution::HarvardArtMuseums];

    /// Returns the human-readable institution name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rijksmuseum => "Rijksmuseum",
            Self::HarvardArtMuseums => "Harvard Art Museums",
        }
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The provider adapter an artwork came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Rijksmuseum,
    Harvard,
}

impl Source {
    /// Returns the stable identifier used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rijksmuseum => "rijksmuseum",
            Self::Harvard => "harvard",
        }
    }

    /// Returns the institution this source serves.
    pub fn institution(&self) -> Institution {
        match self {
            Self::Rijksmuseum => Institution::Rijksmuseum,
            Self::Harvard => Institution::HarvardArtMuseums,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rijksmuseum" | "rijks" => Ok(Self::Rijksmuseum),
            "harvard" => Ok(Self::Harvard),
            other => Err(format!("unknown source: {}", other)),
        }
    }
}

/// Compound identity of an artwork: ids are only unique within one source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtworkKey {
    pub source: Source,
    pub id: String,
}

impl ArtworkKey {
    pub fn new(source: Source, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }
}

impl fmt::Display for ArtworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.id)
    }
}

/// A normalized artwork.
///
/// Text fields are expected to be sanitized plain text and URL fields to be
/// absolute `http(s)` URLs; the provider adapters guarantee both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// Provider-stable identifier, unique within `source`.
    pub id: String,
    /// Plain-text title.
    pub title: String,
    /// Plain-text artist or maker.
    pub artist: String,
    /// Free-text date, when the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Canonical image URL.
    pub image_url: Option<String>,
    /// Smaller variant of the image, when one could be derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Public record page on the provider's site.
    pub object_url: Option<String>,
    pub institution: Institution,
    pub source: Source,
}

impl Artwork {
    /// Creates an artwork with default title and artist and no URLs.
    pub fn new(source: Source, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            artist: DEFAULT_ARTIST.to_string(),
            date: None,
            image_url: None,
            thumbnail_url: None,
            object_url: None,
            institution: source.institution(),
            source,
        }
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder method to set the artist.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Builder method to set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder method to set the canonical image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builder method to set the thumbnail URL.
    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Builder method to set the record page URL.
    pub fn with_object_url(mut self, url: impl Into<String>) -> Self {
        self.object_url = Some(url.into());
        self
    }

    /// Returns the `(source, id)` key of this artwork.
    pub fn key(&self) -> ArtworkKey {
        ArtworkKey::new(self.source, self.id.clone())
    }

    /// Returns true if this artwork has the given key.
    pub fn has_key(&self, key: &ArtworkKey) -> bool {
        self.source == key.source && self.id == key.id
    }
}

/// Orders two titles the way a reader expects in a listing.
///
/// Three levels, each consulted only when the previous one ties:
/// 1. base letters, ignoring accents and case (`Étude` files with `Eve`)
/// 2. accents, unaccented first (`cote` < `côte`)
/// 3. case, lowercase first (`a` < `A`)
///
/// Equal titles compare equal so a stable sort keeps their original order.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| decomposed_lowercase(a).cmp(decomposed_lowercase(b)))
        .then_with(|| compare_case(a, b))
}

fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

// Combining marks sort above every Latin base letter, so a bare letter wins.
fn decomposed_lowercase(title: &str) -> impl Iterator<Item = char> + '_ {
    title.nfd().flat_map(char::to_lowercase)
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return ca.cmp(&cb),
        }
    }
    a.nfd().count().cmp(&b.nfd().count())
}

/// Stable in-place sort of artworks by title.
pub fn sort_by_title(items: &mut [Artwork]) {
    items.sort_by(|a, b| compare_titles(&a.title, &b.title));
}

/// The merged result of searching every provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Items from all providers, sorted by title.
    pub items: Vec<Artwork>,
    /// One message per provider that could not contribute cleanly.
    pub warnings: Vec<String>,
}

impl SearchResult {
    /// Returns true if there are neither items nor warnings.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.warnings.is_empty()
    }

    /// Returns the items that have a displayable image.
    pub fn with_images(&self) -> impl Iterator<Item = &Artwork> {
        self.items
            .iter()
            .filter(|a| crate::images::has_display_image(a))
    }
}
