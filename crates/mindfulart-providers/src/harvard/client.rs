//! Harvard Art Museums API schema and record mapping.

use mindfulart_core::{Artwork, Source, sanitize_optional_text, to_safe_http_url};
use serde::Deserialize;

/// Thumbnail width requested through IIIF.
const IIIF_THUMBNAIL_WIDTH: u32 = 500;

/// Image width requested through IIIF when no primary image exists.
const IIIF_IMAGE_WIDTH: u32 = 1200;

/// Response from `GET /object`.
#[derive(Debug, Deserialize)]
pub struct ObjectSearchResponse {
    #[serde(default)]
    pub info: Option<ResponseInfo>,
    pub records: Vec<ObjectRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseInfo {
    #[serde(default)]
    pub totalrecords: Option<u64>,
}

/// One object record, restricted to the requested fields.
#[derive(Debug, Deserialize)]
pub struct ObjectRecord {
    pub id: serde_json::Number,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub dated: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub people: Option<Vec<Person>>,
    #[serde(default)]
    pub primaryimageurl: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ObjectImage>>,
}

#[derive(Debug, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectImage {
    #[serde(default)]
    pub baseimageurl: Option<String>,
    #[serde(default)]
    pub iiifbaseuri: Option<String>,
}

impl ObjectRecord {
    /// First IIIF base URI, without a trailing slash.
    fn iiif_base(&self) -> Option<&str> {
        self.images
            .iter()
            .flatten()
            .find_map(|image| image.iiifbaseuri.as_deref().filter(|s| !s.is_empty()))
            .map(|uri| uri.strip_suffix('/').unwrap_or(uri))
    }

    fn base_image(&self) -> Option<&str> {
        self.images
            .iter()
            .flatten()
            .find_map(|image| image.baseimageurl.as_deref().filter(|s| !s.is_empty()))
    }

    fn primary_image(&self) -> Option<&str> {
        self.primaryimageurl.as_deref().filter(|s| !s.is_empty())
    }
}

fn iiif_full(base: &str, width: u32) -> String {
    format!("{}/full/{},/0/default.jpg", base, width)
}

/// Converts a Harvard record to an [`Artwork`].
///
/// Thumbnails prefer IIIF; the main image prefers `primaryimageurl`.
pub fn map_record(record: &ObjectRecord) -> Artwork {
    let iiif = record.iiif_base();
    let base = record.base_image();
    let primary = record.primary_image();

    let thumbnail = match iiif {
        Some(iiif) => Some(iiif_full(iiif, IIIF_THUMBNAIL_WIDTH)),
        None => base.or(primary).map(str::to_string),
    };
    let image = match primary {
        Some(primary) => Some(primary.to_string()),
        None => iiif
            .map(|iiif| iiif_full(iiif, IIIF_IMAGE_WIDTH))
            .or_else(|| base.map(str::to_string)),
    };

    let artist = record
        .people
        .as_ref()
        .and_then(|people| people.first())
        .and_then(|person| person.name.as_deref());

    let mut artwork = Artwork::new(Source::Harvard, record.id.to_string());
    if let Some(title) = sanitize_optional_text(record.title.as_deref()) {
        artwork.title = title;
    }
    if let Some(artist) = sanitize_optional_text(artist) {
        artwork.artist = artist;
    }
    artwork.date = sanitize_optional_text(record.dated.as_deref());
    artwork.thumbnail_url = thumbnail.as_deref().and_then(to_safe_http_url);
    artwork.image_url = image.as_deref().and_then(to_safe_http_url);
    artwork.object_url = record.url.as_deref().and_then(to_safe_http_url);
    artwork
}
