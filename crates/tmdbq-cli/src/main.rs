//! tmdbq - TMDB movie discovery CLI.

/// Application configuration (TOML).
mod config;
/// Terminal table rendering.
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use tmdbq_api::tmdb::{
    DiscoverParams, Movie, TmdbClient, UrlBuilder, fetch_movies, sort_by_field,
};

/// Items fetched when `--max-items` is not given.
const DEFAULT_MAX_ITEMS: usize = 20;

/// CLI argument parser.
#[derive(Parser)]
#[command(about = "A CLI for The Movie Database (TMDB)", version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Display a ready-made movie list.
    List(ListArgs),
    /// Discover movies based on various criteria.
    Discover(DiscoverArgs),
    /// Display version number, author and license.
    Info,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct ListArgs {
    /// Now playing movies.
    #[arg(short = 'n', long)]
    now: bool,

    /// Popular movies.
    #[arg(short = 'p', long)]
    pop: bool,

    /// Top rated movies.
    #[arg(short = 't', long)]
    top: bool,

    /// Upcoming movies.
    #[arg(short = 'u', long)]
    up: bool,
}

impl ListArgs {
    /// Maps the selected flag to its TMDB endpoint name.
    const fn category(&self) -> &'static str {
        if self.now {
            "now_playing"
        } else if self.pop {
            "popular"
        } else if self.top {
            "top_rated"
        } else {
            "upcoming"
        }
    }
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Original language (not the country!), e.g. "en".
    #[arg(short = 'l', long)]
    language: Option<String>,

    /// Primary release year or dates, e.g. "2000", "2000,2010", "2000,gte".
    #[arg(short = 'y', long)]
    year: Option<String>,

    /// Votes average, e.g. "6.5,10" or "7,gte".
    #[arg(short = 'a', long)]
    average: Option<String>,

    /// Vote counts, e.g. "100,50000" or "500,gte".
    #[arg(short = 'v', long)]
    votes: Option<String>,

    /// With one or many genres, e.g. "comedy,action".
    #[arg(short = 'g', long)]
    genres: Option<String>,

    /// Without one or many genres.
    #[arg(short = 'w', long)]
    without_genres: Option<String>,

    /// Sort by field and order, e.g. "average,desc".
    #[arg(short = 's', long)]
    sort: Option<String>,

    /// Maximum number of movies (default 20, max 400).
    #[arg(short = 'm', long)]
    max_items: Option<String>,
}

impl DiscoverArgs {
    /// `true` when no flag at all was given.
    const fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.year.is_none()
            && self.average.is_none()
            && self.votes.is_none()
            && self.genres.is_none()
            && self.without_genres.is_none()
            && self.sort.is_none()
            && self.max_items.is_none()
    }
}

/// Shared services for command execution.
struct Deps {
    /// Validated URL construction.
    builder: UrlBuilder,
    /// Authenticated TMDB client.
    client: Arc<TmdbClient>,
}

/// Resolves the API token: `TMDB_API_TOKEN` env var first, then config.toml.
fn resolve_api_token(dir: Option<&PathBuf>) -> Result<String> {
    if let Ok(token) = std::env::var("TMDB_API_TOKEN")
        && !token.is_empty()
    {
        return Ok(token);
    }

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    config
        .api_token
        .filter(|token| !token.is_empty())
        .with_context(|| {
            format!(
                "missing API token: set the TMDB_API_TOKEN environment variable \
                 or add `api_token = \"...\"` to {}",
                config_path.display()
            )
        })
}

/// Builds the shared services from the resolved API token.
///
/// # Errors
///
/// Returns an error if no token can be resolved or the client fails to build.
#[instrument(skip_all)]
fn build_deps(dir: Option<&PathBuf>) -> Result<Deps> {
    let api_token = resolve_api_token(dir)?;
    let client = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")?;

    Ok(Deps {
        builder: UrlBuilder::new(),
        client: Arc::new(client),
    })
}

/// Parses `--max-items`, defaulting when absent.
fn resolve_max_items(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_ITEMS);
    };
    raw.parse()
        .ok()
        .context(r#"validation error: items must be an integer, e.g. "50""#)
}

/// Prints the rendered results table.
#[allow(clippy::print_stdout)]
fn print_table(movies: &[Movie]) {
    println!("{}", render::format_results(movies));
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let deps = build_deps(dir)?;
    let url = deps.builder.list(args.category())?;

    let movies = fetch_movies(deps.client, &url, DEFAULT_MAX_ITEMS)
        .await
        .context("failed to fetch movies")?;

    print_table(&movies);
    Ok(())
}

/// Runs the `discover` subcommand.
///
/// Shows the subcommand help when invoked without any flag.
///
/// # Errors
///
/// Returns an error if a filter fails validation, the client fails to build,
/// the fetch fails, or the sort spec is invalid.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    if args.is_empty() {
        return print_subcommand_help("discover");
    }

    let deps = build_deps(dir)?;
    let params = DiscoverParams {
        language: args.language.clone(),
        year: args.year.clone(),
        vote_average: args.average.clone(),
        vote_count: args.votes.clone(),
        with_genres: args.genres.clone(),
        without_genres: args.without_genres.clone(),
    };
    let url = deps.builder.discover(&params)?;
    let max_items = resolve_max_items(args.max_items.as_deref())?;

    let mut movies = fetch_movies(deps.client, &url, max_items)
        .await
        .context("failed to fetch movies")?;

    if let Some(sort) = args.sort.as_deref() {
        sort_by_field(&mut movies, sort)?;
    }

    print_table(&movies);
    Ok(())
}

/// Runs the `info` subcommand.
#[allow(clippy::print_stdout)]
fn run_info() {
    println!("tmdbq v{}", env!("CARGO_PKG_VERSION"));
    println!("A CLI for The Movie Database (TMDB)");
    println!("Licensed under the AGPL-3.0-only license");
}

/// Prints the long help of a named subcommand.
fn print_subcommand_help(name: &str) -> Result<()> {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut(name)
        .with_context(|| format!("unknown subcommand: {name}"))?;
    sub.print_help().context("failed to print help")?;
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => run_list(&args, cli.dir.as_ref()).await,
        Commands::Discover(args) => run_discover(&args, cli.dir.as_ref()).await,
        Commands::Info => {
            run_info();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_max_items_default() {
        // Arrange & Act
        let items = resolve_max_items(None).unwrap();

        // Assert
        assert_eq!(items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn test_resolve_max_items_parses() {
        // Arrange & Act
        let items = resolve_max_items(Some("50")).unwrap();

        // Assert
        assert_eq!(items, 50);
    }

    #[test]
    fn test_resolve_max_items_rejects_non_integers() {
        for raw in ["fifty", "5.5", "-1", ""] {
            // Arrange & Act
            let err = resolve_max_items(Some(raw)).unwrap_err().to_string();

            // Assert
            assert!(err.contains("items must be an integer"), "input: {raw}");
        }
    }

    #[test]
    fn test_list_category_mapping() {
        // Arrange
        let args = ListArgs {
            now: false,
            pop: true,
            top: false,
            up: false,
        };

        // Act & Assert
        assert_eq!(args.category(), "popular");
    }

    #[test]
    fn test_cli_parses() {
        // Arrange & Act & Assert
        Cli::command().debug_assert();
    }
}
