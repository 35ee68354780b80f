//! Image URL sizing for museum CDNs.
//!
//! Providers hand us one "best known" image URL per artwork. Depending on
//! where it is displayed we want a different pixel width: a fixed thumbnail
//! width in listings, and something close to the screen width in a full view.
//! This module rewrites URLs so the originating CDN serves that width:
//!
//! - IIIF image API paths (`/full/400,/0/default.jpg`)
//! - `width`/`w` query parameters
//! - `=s<N>` / `=w<N>` suffixes (Google-style CDNs)
//! - bare `googleusercontent.com` URLs, which accept an appended `=s<N>`
//!
//! Conventions are tried in order and the first match wins; an unrecognized
//! URL is returned unchanged.
//!
//! # Example
//!
//! ```
//! use mindfulart_core::images::normalize_image_url;
//!
//! let url = "https://ids.lib.harvard.edu/ids/iiif/1/square/200,/0/default.jpg";
//! assert_eq!(
//!     normalize_image_url(url, 500),
//!     "https://ids.lib.harvard.edu/ids/iiif/1/full/500,/0/default.jpg"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

use crate::artwork::Artwork;

/// Width requested for thumbnails in lists and rails.
pub const THUMBNAIL_WIDTH: u32 = 500;

/// Smallest width requested for a full view.
pub const MIN_FULL_VIEW_WIDTH: u32 = 1000;

/// Narrowest viewport considered when sizing a full view.
pub const MIN_VIEWPORT_WIDTH: u32 = 320;

/// IIIF region/size segment: `/full/<size>/0/` or `/square/<size>/0/`.
static IIIF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:full|square)/[^/]+/0/").expect("Invalid IIIF regex"));

/// Size token at the end of the path, with optional dash modifiers.
static SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=([sw])(\d+)((?:-[A-Za-z0-9]+)*)$").expect("Invalid CDN suffix regex")
});

/// Google size token anywhere in the path.
static GOOGLE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=s(\d+)").expect("Invalid Google token regex"));

/// A recognized URL sizing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingStrategy {
    /// IIIF image API size segment.
    Iiif,
    /// `width` or `w` query parameter.
    QueryParam,
    /// `=s<N>` / `=w<N>` path suffix.
    CdnSuffix,
    /// `googleusercontent.com` URL without a size token.
    GoogleCdn,
}

struct Resizer {
    strategy: SizingStrategy,
    resize: fn(&str, u32) -> Option<String>,
}

/// Ordered strategy table. Adding a CDN convention means adding an entry.
static RESIZERS: &[Resizer] = &[
    Resizer {
        strategy: SizingStrategy::Iiif,
        resize: resize_iiif,
    },
    Resizer {
        strategy: SizingStrategy::QueryParam,
        resize: resize_query_param,
    },
    Resizer {
        strategy: SizingStrategy::CdnSuffix,
        resize: resize_cdn_suffix,
    },
    Resizer {
        strategy: SizingStrategy::GoogleCdn,
        resize: resize_google,
    },
];

/// Rewrites `url` to request `width` pixels, reporting which convention matched.
pub fn resize_with_strategy(url: &str, width: u32) -> Option<(SizingStrategy, String)> {
    RESIZERS
        .iter()
        .find_map(|r| (r.resize)(url, width).map(|out| (r.strategy, out)))
}

/// Rewrites `url` to request `width` pixels, or returns it unchanged.
pub fn normalize_image_url(url: &str, width: u32) -> String {
    match resize_with_strategy(url, width) {
        Some((strategy, out)) => {
            trace!(?strategy, width, "resized image url");
            out
        }
        None => url.to_string(),
    }
}

/// Resizes a Google CDN URL; URLs on other hosts are returned unchanged.
pub fn google_sized(url: &str, width: u32) -> String {
    if !is_google_host(url) {
        return url.to_string();
    }
    resize_cdn_suffix(url, width)
        .or_else(|| resize_google(url, width))
        .unwrap_or_else(|| url.to_string())
}

/// Splits a URL into the part before `?`/`#` and the rest.
fn split_path(url: &str) -> (&str, &str) {
    let at = url.find(['?', '#']).unwrap_or(url.len());
    url.split_at(at)
}

fn is_google_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| {
            host == "googleusercontent.com" || host.ends_with(".googleusercontent.com")
        })
}

fn resize_iiif(url: &str, width: u32) -> Option<String> {
    let found = IIIF_REGEX.find(url)?;
    Some(format!(
        "{}/full/{},/0/{}",
        &url[..found.start()],
        width,
        &url[found.end()..]
    ))
}

fn resize_query_param(url: &str, width: u32) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let target = if pairs.iter().any(|(k, _)| k == "width") {
        "width"
    } else if pairs.iter().any(|(k, _)| k == "w") {
        "w"
    } else {
        return None;
    };

    let value = width.to_string();
    let resized: Vec<(String, String)> = pairs
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "height" | "h"))
        .map(|(k, v)| {
            if k == target {
                (k.clone(), value.clone())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect();

    if resized == pairs {
        return Some(url.to_string());
    }

    parsed.query_pairs_mut().clear().extend_pairs(&resized);
    Some(parsed.to_string())
}

fn resize_cdn_suffix(url: &str, width: u32) -> Option<String> {
    let (path, rest) = split_path(url);
    let caps = SUFFIX_REGEX.captures(path)?;
    let whole = caps.get(0)?;
    let kind = caps.get(1)?.as_str();
    let modifiers = caps.get(3).map_or("", |m| m.as_str());
    Some(format!(
        "{}={}{}{}{}",
        &path[..whole.start()],
        kind,
        width,
        modifiers,
        rest
    ))
}

fn resize_google(url: &str, width: u32) -> Option<String> {
    if !is_google_host(url) {
        return None;
    }
    let (path, rest) = split_path(url);
    let out = match GOOGLE_TOKEN_REGEX.captures(path).and_then(|c| c.get(1)) {
        Some(digits) => format!(
            "{}{}{}{}",
            &path[..digits.start()],
            width,
            &path[digits.end()..],
            rest
        ),
        None => format!("{}=s{}{}", path, width, rest),
    };
    Some(out)
}

/// The display surface a full view is rendered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Device pixels per CSS pixel.
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            device_pixel_ratio,
        }
    }
}

/// Width to request for a full view on `viewport`.
///
/// `max(1000, round(dpr * viewport_width))`, with the ratio clamped to at
/// least 1 and the viewport to at least 320 pixels.
pub fn full_view_width(viewport: Viewport) -> u32 {
    let dpr = if viewport.device_pixel_ratio.is_finite() && viewport.device_pixel_ratio > 1.0 {
        viewport.device_pixel_ratio
    } else {
        1.0
    };
    let css_width = f64::from(viewport.width.max(MIN_VIEWPORT_WIDTH));
    let device_width = (dpr * css_width).round().min(f64::from(u32::MAX)) as u32;
    device_width.max(MIN_FULL_VIEW_WIDTH)
}

/// Returns true if the artwork has any image URL to show.
pub fn has_display_image(artwork: &Artwork) -> bool {
    artwork.thumbnail_url.is_some() || artwork.image_url.is_some()
}

/// Thumbnail URL for list contexts, sized to [`THUMBNAIL_WIDTH`].
pub fn display_src(artwork: &Artwork) -> Option<String> {
    artwork
        .thumbnail_url
        .as_deref()
        .or(artwork.image_url.as_deref())
        .map(|url| normalize_image_url(url, THUMBNAIL_WIDTH))
}

/// Full view URL sized for `viewport`.
///
/// Prefers the canonical image so providers whose thumbnails are capped at
/// the thumbnail width still get a large rendition.
pub fn full_view_src(artwork: &Artwork, viewport: Viewport) -> Option<String> {
    let width = full_view_width(viewport);
    match artwork.image_url.as_deref() {
        Some(url) => Some(normalize_image_url(url, width)),
        None => display_src(artwork).map(|url| normalize_image_url(&url, width)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::Source;

    const IIIF: &str = "https://ids.lib.harvard.edu/ids/iiif/4333/";

    #[test]
    fn iiif_full_width_is_rewritten() {
        let url = format!("{}full/400,/0/default.jpg", IIIF);
        assert_eq!(
            normalize_image_url(&url, 500),
            format!("{}full/500,/0/default.jpg", IIIF)
        );
    }

    #[test]
    fn iiif_square_becomes_full() {
        let url = format!("{}square/200,/0/default.jpg", IIIF);
        assert_eq!(
            normalize_image_url(&url, 500),
            format!("{}full/500,/0/default.jpg", IIIF)
        );
    }

    #[test]
    fn iiif_keeps_query_and_named_sizes() {
        let url = format!("{}full/max/0/default.jpg?token=1", IIIF);
        let (strategy, out) = resize_with_strategy(&url, 1200).unwrap();
        assert_eq!(strategy, SizingStrategy::Iiif);
        assert_eq!(out, format!("{}full/1200,/0/default.jpg?token=1", IIIF));
    }

    #[test]
    fn google_suffix_is_replaced() {
        let url = "https://lh3.googleusercontent.com/xyz=s220";
        assert_eq!(
            normalize_image_url(url, 500),
            "https://lh3.googleusercontent.com/xyz=s500"
        );
    }

    #[test]
    fn google_without_token_gets_one_appended() {
        let url = "https://lh3.googleusercontent.com/xyz";
        let (strategy, out) = resize_with_strategy(url, 500).unwrap();
        assert_eq!(strategy, SizingStrategy::GoogleCdn);
        assert_eq!(out, "https://lh3.googleusercontent.com/xyz=s500");
    }

    #[test]
    fn google_token_mid_path_is_replaced() {
        let url = "https://lh3.googleusercontent.com/xyz=s0-rj/extra";
        assert_eq!(
            normalize_image_url(url, 500),
            "https://lh3.googleusercontent.com/xyz=s500-rj/extra"
        );
    }

    #[test]
    fn suffix_keeps_dash_modifiers() {
        assert_eq!(
            normalize_image_url("https://cdn.example.org/img=s800-no", 1400),
            "https://cdn.example.org/img=s1400-no"
        );
        assert_eq!(
            normalize_image_url("https://cdn.example.org/img=w300-c?x=1", 500),
            "https://cdn.example.org/img=w500-c?x=1"
        );
    }

    #[test]
    fn width_query_param_drops_height() {
        let out = normalize_image_url("https://img.example.org/a.jpg?width=300&height=200&q=80", 1200);
        assert_eq!(out, "https://img.example.org/a.jpg?width=1200&q=80");
    }

    #[test]
    fn w_query_param_drops_h() {
        let (strategy, out) =
            resize_with_strategy("https://img.example.org/a.jpg?w=300&h=200", 900).unwrap();
        assert_eq!(strategy, SizingStrategy::QueryParam);
        assert_eq!(out, "https://img.example.org/a.jpg?w=900");
    }

    #[test]
    fn width_wins_over_w() {
        let out = normalize_image_url("https://img.example.org/a.jpg?w=10&width=20", 600);
        assert_eq!(out, "https://img.example.org/a.jpg?w=10&width=600");
    }

    #[test]
    fn unrecognized_url_is_unchanged() {
        let url = "https://www.example.org/images/painting.jpg";
        assert_eq!(resize_with_strategy(url, 500), None);
        assert_eq!(normalize_image_url(url, 500), url);
        assert_eq!(normalize_image_url("not a url", 500), "not a url");
    }

    #[test]
    fn normalization_is_idempotent() {
        let urls = [
            format!("{}full/500,/0/default.jpg", IIIF),
            "https://lh3.googleusercontent.com/xyz=s500".to_string(),
            "https://cdn.example.org/img=w500-c".to_string(),
            "https://img.example.org/a.jpg?q=a+b&width=500".to_string(),
        ];
        for url in urls {
            let once = normalize_image_url(&url, 500);
            assert_eq!(once, url);
            assert_eq!(normalize_image_url(&once, 500), once);
        }
    }

    #[test]
    fn google_sized_ignores_other_hosts() {
        assert_eq!(
            google_sized("https://cdn.example.org/img=s0", 500),
            "https://cdn.example.org/img=s0"
        );
        assert_eq!(
            google_sized("https://lh3.googleusercontent.com/abc=s0", 500),
            "https://lh3.googleusercontent.com/abc=s500"
        );
        assert_eq!(
            google_sized("https://lh3.googleusercontent.com/abc", 500),
            "https://lh3.googleusercontent.com/abc=s500"
        );
    }

    #[test]
    fn full_view_width_has_floor() {
        assert_eq!(full_view_width(Viewport::new(800, 1.0)), 1000);
        assert_eq!(full_view_width(Viewport::new(1440, 2.0)), 2880);
        assert_eq!(full_view_width(Viewport::new(1333, 1.5)), 2000);
        assert_eq!(full_view_width(Viewport::new(100, 0.5)), 1000);
        assert_eq!(full_view_width(Viewport::new(1200, f64::NAN)), 1200);
    }

    #[test]
    fn display_image_predicate() {
        let bare = Artwork::new(Source::Harvard, "1");
        assert!(!has_display_image(&bare));
        assert_eq!(display_src(&bare), None);

        let with_image = bare.clone().with_image_url("https://example.org/a.jpg");
        assert!(has_display_image(&with_image));

        let with_thumb = bare.with_thumbnail_url("https://example.org/t.jpg");
        assert!(has_display_image(&with_thumb));
    }

    #[test]
    fn display_src_prefers_thumbnail_and_resizes() {
        let art = Artwork::new(Source::Harvard, "1")
            .with_image_url("https://example.org/full.jpg")
            .with_thumbnail_url(format!("{}full/300,/0/default.jpg", IIIF));
        assert_eq!(
            display_src(&art),
            Some(format!("{}full/500,/0/default.jpg", IIIF))
        );
    }

    #[test]
    fn full_view_prefers_canonical_image() {
        let art = Artwork::new(Source::Rijksmuseum, "SK-A-1")
            .with_image_url("https://lh3.googleusercontent.com/abc=s0")
            .with_thumbnail_url("https://lh3.googleusercontent.com/abc=s500");
        assert_eq!(
            full_view_src(&art, Viewport::new(1280, 2.0)),
            Some("https://lh3.googleusercontent.com/abc=s2560".to_string())
        );
    }

    #[test]
    fn full_view_falls_back_to_thumbnail() {
        let art = Artwork::new(Source::Harvard, "1")
            .with_thumbnail_url(format!("{}full/500,/0/default.jpg", IIIF));
        assert_eq!(
            full_view_src(&art, Viewport::default()),
            Some(format!("{}full/1280,/0/default.jpg", IIIF))
        );
        assert_eq!(full_view_src(&Artwork::new(Source::Harvard, "2"), Viewport::default()), None);
    }
}
