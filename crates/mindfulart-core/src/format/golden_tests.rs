//! Golden tests for output formatting.
//!
//! These tests use insta inline snapshots to keep the terminal layout stable.
//! Run with `cargo insta review` to update them after intentional changes.

use crate::artwork::{Artwork, SearchResult, Source};
use crate::format::{FormatOptions, OutputFormatter};
use crate::images::Viewport;

const IIIF: &str = "https://ids.lib.harvard.edu/ids/iiif/1";

fn rijks_item() -> Artwork {
    Artwork::new(Source::Rijksmuseum, "SK-A-1")
        .with_title("Alpha")
        .with_artist("R Artist")
        .with_image_url("https://lh3.googleusercontent.com/abc=s0")
        .with_thumbnail_url("https://lh3.googleusercontent.com/abc=s500")
        .with_object_url("https://www.rijksmuseum.nl/en/collection/SK-A-1")
}

fn harvard_items() -> Vec<Artwork> {
    vec![
        Artwork::new(Source::Harvard, "1")
            .with_title("Zeta")
            .with_artist("H Artist")
            .with_date("1890")
            .with_thumbnail_url(format!("{}/full/300,/0/default.jpg", IIIF)),
        Artwork::new(Source::Harvard, "2")
            .with_title("Bowl")
            .with_object_url("https://harvardartmuseums.org/collections/object/2"),
    ]
}

fn sample_result() -> SearchResult {
    let mut items = vec![rijks_item()];
    items.extend(harvard_items());
    SearchResult {
        items,
        warnings: vec!["Rijksmuseum request timed out".to_string()],
    }
}

#[test]
fn tty_grouped_listing() {
    let output = OutputFormatter::default().format_tty(&sample_result());
    insta::assert_snapshot!(output, @r"
Rijksmuseum (1)
   1. Alpha - R Artist
      https://lh3.googleusercontent.com/abc=s500
Harvard Art Museums (2)
   2. Bowl - Unknown
      (no image) https://harvardartmuseums.org/collections/object/2
   3. Zeta - H Artist, 1890
      https://ids.lib.harvard.edu/ids/iiif/1/full/500,/0/default.jpg
Note: Rijksmuseum request timed out
");
}

#[test]
fn tty_hides_items_without_images() {
    let formatter = OutputFormatter::new(FormatOptions {
        only_with_images: true,
        max_title_length: Some(4),
        ..FormatOptions::default()
    });
    let output = formatter.format_tty(&sample_result());
    insta::assert_snapshot!(output, @r"
Rijksmuseum (1)
   1. A... - R Artist
      https://lh3.googleusercontent.com/abc=s500
Harvard Art Museums (1)
   2. Zeta - H Artist, 1890
      https://ids.lib.harvard.edu/ids/iiif/1/full/500,/0/default.jpg
Note: Rijksmuseum request timed out
");
}

#[test]
fn tty_empty_with_warnings() {
    let result = SearchResult {
        items: vec![],
        warnings: vec![
            "Rijksmuseum API key not configured (RIJKS_API_KEY); skipping provider.".to_string(),
            "Harvard HTTP 500".to_string(),
        ],
    };
    let output = OutputFormatter::default().format_tty(&result);
    insta::assert_snapshot!(output, @r"
No artworks found.
Note: Rijksmuseum API key not configured (RIJKS_API_KEY); skipping provider.
Note: Harvard HTTP 500
");
}

#[test]
fn full_view_uses_viewport_width() {
    let output =
        OutputFormatter::default().format_full_view(&rijks_item(), Viewport::new(1440, 2.0));
    insta::assert_snapshot!(output, @r"
Alpha - R Artist
  image:  https://lh3.googleusercontent.com/abc=s2880
  record: https://www.rijksmuseum.nl/en/collection/SK-A-1
  key:    rijksmuseum:SK-A-1
");
}
