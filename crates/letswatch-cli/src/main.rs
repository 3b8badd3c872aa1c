//! letswatch - movie recommendations from genre, mood, era, and people preferences.

/// Application configuration (TOML).
mod config;
/// Recommendation card rendering.
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use letswatch_api::tmdb::TmdbClient;
use letswatch_core::{
    EraMapping, GenreCatalog, MoodMapping, PreferenceQuery, Preferences, ValidationError,
    find_people, recommend, resolve,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
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
    /// Recommend movies matching the given preferences.
    Recommend(RecommendArgs),
    /// List the TMDB movie genre catalog.
    Genres(LanguageArgs),
    /// List the supported moods and the genre each maps to.
    Moods,
    /// List the supported eras and their date ranges.
    Eras,
    /// Search TMDB for people by name.
    Person(PersonArgs),
}

/// Arguments for the `recommend` subcommand.
#[derive(clap::Args)]
struct RecommendArgs {
    /// Genre name, repeatable or comma-separated (e.g. "Comedy,Drama").
    #[arg(long = "genre", value_delimiter = ',')]
    genres: Vec<String>,

    /// Mood (Happy, Sad, Excited, Romantic, Scared), repeatable or comma-separated.
    #[arg(long = "mood", value_delimiter = ',')]
    moods: Vec<String>,

    /// Era (1950s .. 2020s), repeatable or comma-separated.
    #[arg(long = "era", value_delimiter = ',')]
    eras: Vec<String>,

    /// Actor name; the best TMDB match is used.
    #[arg(long, conflicts_with = "actor_id")]
    actor: Option<String>,

    /// TMDB person ID of the actor.
    #[arg(long)]
    actor_id: Option<u64>,

    /// Director name; the best TMDB match is used.
    #[arg(long, conflicts_with = "director_id")]
    director: Option<String>,

    /// TMDB person ID of the director.
    #[arg(long)]
    director_id: Option<u64>,

    /// Number of recommendations (default: config `recommend.limit`).
    #[arg(long)]
    limit: Option<usize>,

    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

impl RecommendArgs {
    /// Whether no preference at all was given.
    fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.moods.is_empty()
            && self.eras.is_empty()
            && self.actor.is_none()
            && self.actor_id.is_none()
            && self.director.is_none()
            && self.director_id.is_none()
    }

    /// Whether resolution needs TMDB (genre catalog or person search).
    fn needs_lookup(&self) -> bool {
        !self.genres.is_empty()
            || !self.moods.is_empty()
            || self.actor.is_some()
            || self.director.is_some()
    }

    /// Raw preferences; person names are not looked up yet.
    fn preferences(&self) -> Preferences {
        Preferences {
            genres: self.genres.clone(),
            moods: self.moods.clone(),
            eras: self.eras.clone(),
            actor_id: self.actor_id,
            director_id: self.director_id,
        }
    }
}

/// Arguments carrying only a language override.
#[derive(clap::Args)]
struct LanguageArgs {
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `person` subcommand.
#[derive(clap::Args)]
struct PersonArgs {
    /// Person name (e.g. "Tom Hanks").
    #[arg(long, required = true)]
    query: String,
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Loads the config file from `--dir` or the default location.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .min_interval(config.tmdb.min_interval())
        .build()
        .context("failed to build TMDB client")
}

/// Picks the most relevant person for `name`, or `None` when nobody matches.
///
/// A failed search drops the filter instead of failing the request.
async fn pick_person(client: &TmdbClient, name: &str, role: &str, language: &str) -> Option<u64> {
    let candidates = match find_people(client, name, language).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("{role} search failed, ignoring --{role}: {e:#}");
            return None;
        }
    };

    let Some((chosen, others)) = candidates.split_first() else {
        tracing::warn!("No {role} found matching '{name}'");
        return None;
    };
    tracing::info!("Using {role} {} (ID {})", chosen.name, chosen.id);
    if !others.is_empty() {
        let alternatives: Vec<String> = others
            .iter()
            .map(|p| format!("{} (ID {})", p.name, p.id))
            .collect();
        tracing::debug!(role, alternatives = %alternatives.join(", "), "other person matches");
    }
    Some(chosen.id)
}

/// Resolves preferences that need TMDB lookups.
///
/// A genre catalog failure degrades to an empty catalog, so genre and
/// mood selections drop out while eras and people still apply.
async fn resolve_online(
    client: &TmdbClient,
    args: &RecommendArgs,
    language: &str,
) -> Result<PreferenceQuery> {
    let mut preferences = args.preferences();
    let catalog = if preferences.needs_genre_catalog() {
        GenreCatalog::fetch(client, language)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Genre catalog unavailable, ignoring genres and moods: {e:#}");
                GenreCatalog::default()
            })
    } else {
        GenreCatalog::default()
    };

    if let Some(name) = &args.actor {
        preferences.actor_id = pick_person(client, name, "actor", language).await;
    }
    if let Some(name) = &args.director {
        preferences.director_id = pick_person(client, name, "director", language).await;
    }

    Ok(resolve(
        &preferences,
        &catalog,
        &MoodMapping::standard(),
        &EraMapping::standard(),
    )?)
}

/// Runs the `recommend` subcommand.
///
/// # Errors
///
/// Returns an error if no usable preference was given, the config or
/// client cannot be set up, or every discovery call failed.
#[instrument(skip_all)]
async fn run_recommend(args: &RecommendArgs, dir: Option<&PathBuf>) -> Result<()> {
    if args.is_empty() {
        return Err(ValidationError::EmptyQuery.into());
    }

    // Era and ID-only preferences are resolved before any credentials are read.
    let offline_query = if args.needs_lookup() {
        None
    } else {
        Some(resolve(
            &args.preferences(),
            &GenreCatalog::default(),
            &MoodMapping::standard(),
            &EraMapping::standard(),
        )?)
    };

    let config = load_config(dir)?;
    let options = config.aggregate_options(args.limit, args.language.as_deref());
    let client = build_tmdb_client(&config)?;

    let query = match offline_query {
        Some(query) => query,
        None => resolve_online(&client, args, &options.language).await?,
    };

    let recommendations = recommend(&client, &query, &options).await;
    if recommendations.is_unavailable() {
        let reasons: Vec<String> = recommendations
            .notices
            .iter()
            .map(ToString::to_string)
            .collect();
        bail!("{}", reasons.join("; "));
    }

    if recommendations.entries.is_empty() {
        tracing::info!("No movies found matching your preferences.");
        return Ok(());
    }

    tracing::info!("Here are your movie recommendations:");
    for (i, entry) in recommendations.entries.iter().enumerate() {
        for line in render::card(i.saturating_add(1), entry) {
            tracing::info!("{line}");
        }
    }
    if !recommendations.notices.is_empty() {
        tracing::warn!(
            "{} provider call(s) failed; some details may be missing",
            recommendations.notices.len()
        );
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genres(args: &LanguageArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let language = args.language.as_deref().unwrap_or(&config.tmdb.language);

    let catalog = GenreCatalog::fetch(&client, language).await?;

    tracing::info!("ID\tName");
    for (name, id) in catalog.iter() {
        tracing::info!("{id}\t{name}");
    }
    tracing::info!("Total: {} genres", catalog.len());

    Ok(())
}

/// Runs the `moods` subcommand.
fn run_moods() {
    tracing::info!("Mood\t\tGenre");
    for (mood, genre) in MoodMapping::standard().iter() {
        tracing::info!("{mood}\t\t{genre}");
    }
}

/// Runs the `eras` subcommand.
fn run_eras() {
    tracing::info!("Era\tFrom\t\tTo");
    for (era, range) in EraMapping::standard().iter() {
        tracing::info!(
            "{era}\t{}\t{}",
            range.start().format("%Y-%m-%d"),
            range.end().format("%Y-%m-%d")
        );
    }
}

/// Runs the `person` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_person(args: &PersonArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let language = args.language.as_deref().unwrap_or(&config.tmdb.language);

    let people = find_people(&client, &args.query, language).await?;
    if people.is_empty() {
        tracing::info!("No people found matching '{}'", args.query);
        return Ok(());
    }

    tracing::info!("ID\tName\t\t\tKnownFor");
    for person in &people {
        tracing::info!(
            "{}\t{}\t\t{}",
            person.id,
            person.name,
            person.known_for_department.as_deref().unwrap_or("-"),
        );
    }
    tracing::info!("Total: {} people", people.len());

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Recommend(args) => run_recommend(&args, cli.dir.as_ref()).await,
        Commands::Genres(args) => run_genres(&args, cli.dir.as_ref()).await,
        Commands::Moods => {
            run_moods();
            Ok(())
        }
        Commands::Eras => {
            run_eras();
            Ok(())
        }
        Commands::Person(args) => run_person(&args, cli.dir.as_ref()).await,
    }
}
