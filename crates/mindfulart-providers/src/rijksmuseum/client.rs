//! Rijksmuseum collection API schema and record mapping.

use mindfulart_core::{
    Artwork, Source, THUMBNAIL_WIDTH, google_sized, sanitize_optional_text, to_safe_http_url,
};
use serde::Deserialize;

/// Id used when a record has neither `id` nor `objectNumber`.
const UNKNOWN_ID: &str = "unknown";

/// Response from `GET /api/<lang>/collection`.
///
/// `artObjects` is optional in the schema so that a missing list and a
/// malformed list can be told apart in logs; both are rejected by the provider.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub art_objects: Option<Vec<ArtObject>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub principal_or_first_maker: Option<String>,
    #[serde(default)]
    pub web_image: Option<WebImage>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Deserialize)]
pub struct WebImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub web: Option<String>,
}

/// Rewrites a plain `http://` record link to `https://`.
fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Converts a Rijksmuseum art object to an [`Artwork`].
///
/// The web image doubles as the full image; the thumbnail is a smaller Google
/// CDN rendition of it.
pub fn map_art_object(object: &ArtObject) -> Artwork {
    let id = object
        .id
        .as_deref()
        .or(object.object_number.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_ID);

    let web_image = object
        .web_image
        .as_ref()
        .and_then(|image| image.url.as_deref())
        .filter(|url| !url.is_empty());

    let record = object
        .links
        .as_ref()
        .and_then(|links| links.web.as_deref())
        .map(upgrade_to_https);

    let mut artwork = Artwork::new(Source::Rijksmuseum, id);
    if let Some(title) = sanitize_optional_text(object.title.as_deref()) {
        artwork.title = title;
    }
    if let Some(artist) = sanitize_optional_text(object.principal_or_first_maker.as_deref()) {
        artwork.artist = artist;
    }
    artwork.image_url = web_image.and_then(to_safe_http_url);
    artwork.thumbnail_url =
        web_image.and_then(|url| to_safe_http_url(&google_sized(url, THUMBNAIL_WIDTH)));
    artwork.object_url = record.as_deref().and_then(to_safe_http_url);
    artwork
}
