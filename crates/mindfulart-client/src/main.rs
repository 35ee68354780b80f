//! mindfulart CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mindfulart_core::{TracingConfig, init_tracing};
use tracing::{debug, error, warn};

use mindfulart_client::cli::{Cli, Command, ConfigAction, GalleryAction};
use mindfulart_client::commands;
use mindfulart_client::config::ClientConfig;
use mindfulart_client::error::{ClientError, ClientResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first so `debug = true` in the file can enable debug logs
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    };

    let debug = cli.debug || config.as_ref().is_ok_and(|c| c.debug);
    let tracing_config = if debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    let result = match config {
        Ok(config) => run(cli, config, config_path).await,
        Err(_) if matches!(&cli.command, Command::Search(args) if args.query.trim().is_empty()) => {
            Ok(())
        }
        Err(e) if matches!(cli.command, Command::Search(_)) => {
            Err(ClientError::search_failed(e))
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e, ClientError::SearchFailed(_)) {
                error!(error = ?e, "search failed");
            } else {
                debug!(error = ?e, "command failed");
            }
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: ClientConfig, config_path: PathBuf) -> ClientResult<()> {
    let keys = cli.api_keys();

    match cli.command {
        Command::Search(ref args) => commands::search::run(args, &config, &keys).await,
        Command::Gallery { action } => {
            let viewport = action.viewport();
            match action {
                GalleryAction::List => commands::gallery::list(&config),
                GalleryAction::Show { id, .. } => commands::gallery::show(&config, &id, viewport),
                GalleryAction::Create { name, description } => {
                    commands::gallery::create(&config, &name, &description)
                }
                GalleryAction::Rename {
                    id,
                    name,
                    description,
                } => commands::gallery::rename(&config, &id, &name, description.as_deref()),
                GalleryAction::Delete { id } => commands::gallery::delete(&config, &id),
                GalleryAction::Remove {
                    id,
                    source,
                    artwork_id,
                } => commands::gallery::remove(&config, &id, source, &artwork_id),
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => {
                if !config_path.exists() {
                    warn!(path = %config_path.display(), "no config file, validating defaults");
                }
                commands::config::validate(&config, &keys)
            }
            ConfigAction::Path => commands::config::path(&config, &config_path),
        },
    }
}
