//! Output formatting for search results and artworks.
//!
//! This module provides formatters for displaying artworks in the terminal:
//! - **TTY**: human-readable listing grouped by institution, with optional
//!   OSC8 hyperlinks to the record pages
//! - **JSON**: machine-readable [`SearchResult`] output
//!
//! Numbering in the TTY listing follows display order (grouped by
//! institution), which is also the order [`OutputFormatter::display_order`]
//! returns, so callers can map a printed number back to an artwork.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::artwork::{Artwork, SearchResult};
use crate::images::{self, Viewport};
use crate::partition::partition_by_institution;

/// The output format for result display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for titles (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Whether to include OSC8 hyperlinks in TTY output.
    pub hyperlinks: bool,
    /// Hide artworks that have no displayable image.
    pub only_with_images: bool,
    /// Text shown when there is nothing to list.
    pub empty_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: None,
            hyperlinks: false,
            only_with_images: false,
            empty_text: "No artworks found.".to_string(),
        }
    }
}

/// Formatter for artworks and search results.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a formatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Returns the formatter options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Artworks in the order the TTY listing numbers them.
    pub fn display_order<'a>(&self, result: &'a SearchResult) -> Vec<Artwork> {
        let visible: Vec<&'a Artwork> = result
            .items
            .iter()
            .filter(|a| !self.options.only_with_images || images::has_display_image(a))
            .collect();
        partition_by_institution(visible).items().cloned().collect()
    }

    /// Formats a search result in the requested format.
    pub fn format(&self, result: &SearchResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Tty => self.format_tty(result),
            OutputFormat::Json => self.format_json(result),
        }
    }

    /// Formats a search result grouped by institution, followed by warnings.
    pub fn format_tty(&self, result: &SearchResult) -> String {
        let visible: Vec<&Artwork> = result
            .items
            .iter()
            .filter(|a| !self.options.only_with_images || images::has_display_image(a))
            .collect();
        let parts = partition_by_institution(visible);

        let mut lines = Vec::new();
        let mut index = 1;
        for (institution, items) in parts.iter() {
            if items.is_empty() {
                continue;
            }
            lines.push(format!("{} ({})", institution, items.len()));
            for artwork in items {
                lines.push(format!("  {:>2}. {}", index, self.artwork_heading(artwork)));
                lines.push(format!("      {}", self.image_line(artwork)));
                index += 1;
            }
        }

        if parts.is_empty() {
            lines.push(self.options.empty_text.clone());
        }

        for warning in &result.warnings {
            lines.push(format!("Note: {}", warning));
        }

        lines.join("\n")
    }

    /// Formats a search result as pretty-printed JSON.
    pub fn format_json(&self, result: &SearchResult) -> String {
        let items = if self.options.only_with_images {
            result.with_images().cloned().collect()
        } else {
            result.items.clone()
        };
        let output = SearchResult {
            items,
            warnings: result.warnings.clone(),
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Formats one artwork for a full view: heading, sized image and record link.
    pub fn format_full_view(&self, artwork: &Artwork, viewport: Viewport) -> String {
        let mut lines = vec![self.artwork_heading(artwork)];
        match images::full_view_src(artwork, viewport) {
            Some(src) => lines.push(format!("  image:  {}", src)),
            None => lines.push("  image:  (no image)".to_string()),
        }
        if let Some(ref object_url) = artwork.object_url {
            lines.push(format!("  record: {}", object_url));
        }
        lines.push(format!("  key:    {}", artwork.key()));
        lines.join("\n")
    }

    /// `Title - Artist, Date (Institution)` with the title optionally truncated and linked.
    fn artwork_heading(&self, artwork: &Artwork) -> String {
        let title = match self.options.max_title_length {
            Some(max) => ellipsis(&artwork.title, max),
            None => Cow::Borrowed(artwork.title.as_str()),
        };
        let title = match (&artwork.object_url, self.options.hyperlinks) {
            (Some(url), true) => make_hyperlink(url, &title),
            _ => title.into_owned(),
        };

        match artwork.date {
            Some(ref date) => format!("{} - {}, {}", title, artwork.artist, date),
            None => format!("{} - {}", title, artwork.artist),
        }
    }

    fn image_line(&self, artwork: &Artwork) -> String {
        match images::display_src(artwork) {
            Some(src) => src,
            None => match artwork.object_url {
                Some(ref url) => format!("(no image) {}", url),
                None => "(no image)".to_string(),
            },
        }
    }
}

/// Truncates a string to a maximum length, adding "..." if truncated.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Creates an OSC8 hyperlink for terminal output.
///
/// This creates an ANSI escape sequence that modern terminals interpret as a clickable link.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}

#[cfg(test)]
mod golden_tests;
