//! The `search` command.

use std::io::IsTerminal;

use mindfulart_core::{Artwork, FormatOptions, OutputFormatter, SearchResult};
use mindfulart_gallery::GalleryStore;
use mindfulart_providers::SearchAggregator;
use tracing::{debug, info};

use crate::cli::SearchArgs;
use crate::config::{ApiKeyOverrides, ClientConfig};
use crate::error::{ClientError, ClientResult};

/// Runs a search, prints the listing and saves picked artworks.
///
/// A blank query prints nothing.
pub async fn run(
    args: &SearchArgs,
    config: &ClientConfig,
    keys: &ApiKeyOverrides,
) -> ClientResult<()> {
    if args.query.trim().is_empty() {
        debug!("blank query, nothing to do");
        return Ok(());
    }

    let aggregator = config
        .search_aggregator(keys)
        .map_err(ClientError::search_failed)?;
    let limit = args
        .limit
        .map(|l| l as usize)
        .unwrap_or(config.search.limit);

    let result = execute(&aggregator, &args.query, limit).await;
    let formatter = formatter(args, std::io::stdout().is_terminal());
    println!("{}", formatter.format(&result, args.output_format()));

    if !args.save_to.is_empty() {
        let picked = pick_artworks(&formatter.display_order(&result), &args.pick)?;
        let mut store = config.open_gallery_store()?;
        let message = save_picks(&mut store, &args.save_to, &picked)?;
        eprintln!("{}", message);
    }

    Ok(())
}

/// Runs the query against every provider.
pub async fn execute(aggregator: &SearchAggregator, query: &str, limit: usize) -> SearchResult {
    let result = aggregator.search(query, limit).await;
    debug!(
        items = result.items.len(),
        warnings = result.warnings.len(),
        "search finished"
    );
    result
}

/// Builds the listing formatter for the given flags.
pub fn formatter(args: &SearchArgs, hyperlinks: bool) -> OutputFormatter {
    OutputFormatter::new(FormatOptions {
        max_title_length: args.max_title_length,
        hyperlinks,
        only_with_images: args.with_images,
        ..FormatOptions::default()
    })
}

/// Maps 1-based listing numbers to artworks. Duplicates are saved once.
pub fn pick_artworks(listed: &[Artwork], picks: &[usize]) -> ClientResult<Vec<Artwork>> {
    let mut picked: Vec<Artwork> = Vec::with_capacity(picks.len());
    for &number in picks {
        let artwork = number
            .checked_sub(1)
            .and_then(|index| listed.get(index))
            .ok_or_else(|| {
                ClientError::Selection(format!(
                    "pick {} is out of range (1-{})",
                    number,
                    listed.len()
                ))
            })?;
        if !picked.iter().any(|a| a.key() == artwork.key()) {
            picked.push(artwork.clone());
        }
    }
    Ok(picked)
}

/// Adds every picked artwork to every target gallery.
///
/// Targets may be id prefixes; they are resolved before anything is written.
/// Returns a one-line summary.
pub fn save_picks(
    store: &mut GalleryStore,
    targets: &[String],
    picked: &[Artwork],
) -> ClientResult<String> {
    let mut ids = Vec::with_capacity(targets.len());
    let mut names = Vec::with_capacity(targets.len());
    for target in targets {
        let gallery = store.resolve(target)?;
        ids.push(gallery.id.clone());
        names.push(gallery.name.clone());
    }

    let mut added = 0;
    for artwork in picked {
        added += store.add_artwork_to_galleries(&ids, artwork)?;
    }
    info!(added, galleries = ids.len(), "saved search picks");

    Ok(format!(
        "Saved {} of {} picked artwork(s) to {}",
        added,
        picked.len() * ids.len(),
        names.join(", ")
    ))
}
