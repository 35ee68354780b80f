//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mindfulart_core::{OutputFormat, Source, Viewport};

use crate::config::ApiKeyOverrides;

/// mindfulart - Search museum collections and curate your own galleries
#[derive(Debug, Parser)]
#[command(name = "mindfulart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "MINDFULART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Harvard Art Museums API key (supports pass:: and env:: references)
    #[arg(long, global = true, env = "HARVARD_API_KEY", hide_env_values = true)]
    pub harvard_api_key: Option<String>,

    /// Rijksmuseum API key (supports pass:: and env:: references)
    #[arg(long, global = true, env = "RIJKS_API_KEY", hide_env_values = true)]
    pub rijks_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// API keys given as flags or environment variables.
    pub fn api_keys(&self) -> ApiKeyOverrides {
        ApiKeyOverrides {
            harvard: self.harvard_api_key.clone(),
            rijksmuseum: self.rijks_api_key.clone(),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search both museum collections
    Search(SearchArgs),

    /// Manage your galleries
    Gallery {
        #[command(subcommand)]
        action: GalleryAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `mindfulart search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Search terms
    pub query: String,

    /// Maximum number of results per museum
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Hide artworks without an image
    #[arg(long)]
    pub with_images: bool,

    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    /// Save picked results to this gallery (id or unique id prefix, can be repeated)
    #[arg(long, action = clap::ArgAction::Append, requires = "pick")]
    pub save_to: Vec<String>,

    /// Result numbers to save, as printed in the listing (can be repeated)
    #[arg(long, num_args = 1.., requires = "save_to")]
    pub pick: Vec<usize>,
}

impl SearchArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Gallery actions.
#[derive(Debug, Subcommand)]
pub enum GalleryAction {
    /// List galleries
    List,

    /// Show a gallery with full-size image links
    Show {
        /// Gallery id or unique id prefix
        id: String,

        /// Screen width in pixels used to size images
        #[arg(long, default_value_t = 1280)]
        viewport_width: u32,

        /// Device pixel ratio used to size images
        #[arg(long, default_value_t = 1.0)]
        dpr: f64,
    },

    /// Create a gallery
    Create {
        /// Gallery name
        name: String,

        /// Optional description
        #[arg(long, short, default_value = "")]
        description: String,
    },

    /// Rename a gallery
    Rename {
        /// Gallery id or unique id prefix
        id: String,

        /// New name
        name: String,

        /// New description (kept when omitted)
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Delete a gallery
    Delete {
        /// Gallery id or unique id prefix
        id: String,
    },

    /// Remove an artwork from a gallery
    Remove {
        /// Gallery id or unique id prefix
        id: String,

        /// Artwork source: rijksmuseum or harvard
        #[arg(value_parser = parse_source)]
        source: Source,

        /// Artwork id within its source
        artwork_id: String,
    },
}

impl GalleryAction {
    /// Viewport for `show`, or the default one.
    pub fn viewport(&self) -> Viewport {
        match self {
            Self::Show {
                viewport_width,
                dpr,
                ..
            } => Viewport::new(*viewport_width, *dpr),
            _ => Viewport::default(),
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration and gallery file paths
    Path,
}

fn parse_source(value: &str) -> Result<Source, String> {
    value.parse()
}
