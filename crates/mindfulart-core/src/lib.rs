//! Core types: artworks, sanitizers, image URL normalization, formatting

pub mod artwork;
pub mod format;
pub mod images;
pub mod partition;
pub mod sanitize;
pub mod tracing;

pub use artwork::{
    Artwork, ArtworkKey, DEFAULT_ARTIST, DEFAULT_TITLE, Institution, SearchResult, Source,
    compare_titles, sort_by_title,
};
pub use format::{FormatOptions, OutputFormat, OutputFormatter, ellipsis, make_hyperlink};
pub use images::{
    SizingStrategy, THUMBNAIL_WIDTH, Viewport, display_src, full_view_src, full_view_width,
    google_sized, has_display_image, normalize_image_url,
};
pub use partition::{PartitionedResults, partition_by_institution};
pub use sanitize::{sanitize_optional_text, sanitize_plain_text, to_safe_http_url};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
