//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use letswatch_api::tmdb::GenreJoin;
use letswatch_core::{AggregateOptions, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Recommendation defaults.
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// TMDB request settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Response language (e.g. "en-US").
    pub language: String,
    /// Release region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Include adult titles in discovery.
    pub include_adult: bool,
    /// Minimum gap between request starts, in milliseconds.
    pub min_interval_ms: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            region: None,
            include_adult: false,
            min_interval_ms: 25,
        }
    }
}

impl TmdbConfig {
    /// Request pacing interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Recommendation defaults.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecommendConfig {
    /// Number of recommendations shown.
    pub limit: usize,
    /// Discovery pages fetched per era.
    pub pages_per_query: u32,
    /// Concurrent provider calls per stage.
    pub concurrency: usize,
    /// `all` requires every genre, `any` accepts one of them.
    pub genre_match: GenreJoin,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            pages_per_query: 1,
            concurrency: 4,
            genre_match: GenreJoin::All,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// carries out-of-range values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Rejects settings the engine cannot run with.
    fn validate(&self) -> Result<()> {
        ensure!(
            self.recommend.pages_per_query >= 1,
            "recommend.pages_per_query must be at least 1"
        );
        ensure!(
            self.recommend.concurrency >= 1,
            "recommend.concurrency must be at least 1"
        );
        ensure!(
            !self.tmdb.language.trim().is_empty(),
            "tmdb.language must not be empty"
        );
        Ok(())
    }

    /// Engine options, with CLI overrides for limit and language.
    #[must_use]
    pub fn aggregate_options(&self, limit: Option<usize>, language: Option<&str>) -> AggregateOptions {
        AggregateOptions {
            limit: limit.unwrap_or(self.recommend.limit),
            pages_per_query: self.recommend.pages_per_query,
            concurrency: self.recommend.concurrency,
            genre_match: self.recommend.genre_match,
            language: language.map_or_else(|| self.tmdb.language.clone(), String::from),
            include_adult: self.tmdb.include_adult,
            region: self.tmdb.region.clone(),
        }
    }
}
