//! Discovery fan-out, deduplication, and truncation.
//!
//! One discovery window is queried per date range (or a single unbounded
//! window when the query has none). Windows run concurrently but their
//! results are merged in submission order, so the output is the same as
//! sequential execution.

use std::collections::HashMap;

use futures::StreamExt;
use letswatch_api::tmdb::{DiscoverMovieParams, GenreJoin, LocalTmdbApi, TmdbMovieResult};
use tracing::instrument;

use crate::catalog::DateRange;
use crate::model::MovieSummary;
use crate::notice::Notice;
use crate::resolver::PreferenceQuery;

/// Default number of recommendations.
pub const DEFAULT_LIMIT: usize = 10;

/// Default number of discovery windows fetched at once.
const DEFAULT_CONCURRENCY: usize = 4;

/// Tuning for [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Maximum number of movies returned.
    pub limit: usize,
    /// Discovery pages fetched per window.
    pub pages_per_query: u32,
    /// Windows (and enrichments) in flight at once.
    pub concurrency: usize,
    /// Whether a movie must match all selected genres or any of them.
    pub genre_match: GenreJoin,
    /// Response language.
    pub language: String,
    /// Include adult titles.
    pub include_adult: bool,
    /// Release region filter.
    pub region: Option<String>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            pages_per_query: 1,
            concurrency: DEFAULT_CONCURRENCY,
            genre_match: GenreJoin::All,
            language: String::from("en-US"),
            include_adult: false,
            region: None,
        }
    }
}

/// Deduplicated discovery results plus any provider notices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Movies in first-seen order, at most `limit` long.
    pub movies: Vec<MovieSummary>,
    /// Failures encountered along the way.
    pub notices: Vec<Notice>,
}

impl Aggregation {
    /// Whether every discovery call failed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.notices
            .iter()
            .any(|notice| matches!(notice, Notice::ProviderUnavailable { .. }))
    }
}

/// Outcome of the pages fetched for one window.
#[derive(Debug, Default)]
struct WindowResult {
    results: Vec<TmdbMovieResult>,
    notices: Vec<Notice>,
    /// First-page failure: the window contributed nothing.
    failure: Option<String>,
}

/// Builds the discovery parameters shared by every window of `query`.
fn base_params(query: &PreferenceQuery, options: &AggregateOptions) -> DiscoverMovieParams {
    DiscoverMovieParams {
        with_genres: query.genre_ids().iter().copied().collect(),
        genre_join: options.genre_match,
        with_cast: query.actor_id(),
        with_crew: query.director_id(),
        include_adult: options.include_adult,
        region: options.region.clone(),
        ..DiscoverMovieParams::default()
    }
    .language(&options.language)
}

/// Fetches up to `pages` pages for one window, stopping at the provider's last page.
async fn fetch_window(
    api: &(impl LocalTmdbApi + Sync),
    base: &DiscoverMovieParams,
    range: Option<DateRange>,
    pages: u32,
) -> WindowResult {
    let mut window = WindowResult::default();
    let mut params = base.clone();
    if let Some(range) = range {
        params = params.release_dates(range.start(), range.end());
    }

    for page in 1..=pages.max(1) {
        params = params.page(page);
        match api.discover_movie(&params).await {
            Ok(response) => {
                tracing::debug!(
                    range = ?range.map(|r| r.to_string()),
                    page,
                    results = response.results.len(),
                    "discovery page fetched"
                );
                window.results.extend(response.results);
                if page >= response.total_pages {
                    break;
                }
            }
            Err(e) => {
                let reason = format!("{e:#}");
                window.notices.push(Notice::DiscoveryFailed {
                    range,
                    page,
                    reason: reason.clone(),
                });
                if page == 1 {
                    window.failure = Some(reason);
                }
                break;
            }
        }
    }
    window
}

/// Runs discovery for `query` and returns at most `options.limit` unique movies.
///
/// Movies keep the position of their first occurrence; a later occurrence
/// of the same ID replaces the stored data. Results without an ID are
/// discarded. A limit of zero returns immediately without any provider
/// call. When every window fails, the result is empty and carries a
/// single [`Notice::ProviderUnavailable`].
#[instrument(skip_all, fields(limit = options.limit, windows = query.date_ranges().len().max(1)))]
pub async fn aggregate(
    api: &(impl LocalTmdbApi + Sync),
    query: &PreferenceQuery,
    options: &AggregateOptions,
) -> Aggregation {
    if options.limit == 0 {
        return Aggregation::default();
    }

    let windows: Vec<Option<DateRange>> = if query.date_ranges().is_empty() {
        vec![None]
    } else {
        query.date_ranges().iter().copied().map(Some).collect()
    };
    let base = base_params(query, options);

    let outcomes: Vec<WindowResult> = futures::stream::iter(windows)
        .map(|range| fetch_window(api, &base, range, options.pages_per_query))
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    merge_windows(outcomes, options.limit)
}

/// Deduplicates window results in submission order and logs their notices.
///
/// When every window failed on its first page, the failure is logged once
/// and the per-window notices are dropped.
fn merge_windows(outcomes: Vec<WindowResult>, limit: usize) -> Aggregation {
    if let Some(last_failure) = outcomes
        .iter()
        .map(|w| w.failure.as_ref())
        .collect::<Option<Vec<_>>>()
        .and_then(|failures| failures.last().map(|reason| (*reason).clone()))
    {
        tracing::error!(reason = %last_failure, "every discovery call failed");
        return Aggregation {
            movies: Vec::new(),
            notices: vec![Notice::ProviderUnavailable { reason: last_failure }],
        };
    }

    let mut order: Vec<u64> = Vec::new();
    let mut by_id: HashMap<u64, MovieSummary> = HashMap::new();
    let mut notices = Vec::new();
    for window in outcomes {
        notices.extend(window.notices.into_iter().map(Notice::logged));
        for movie in window.results.into_iter().filter_map(MovieSummary::from_tmdb) {
            if by_id.insert(movie.id, movie.clone()).is_none() {
                order.push(movie.id);
            }
        }
    }

    let seen = order.len();
    let movies: Vec<MovieSummary> = order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .take(limit)
        .collect();
    tracing::info!(unique = seen, returned = movies.len(), "discovery aggregated");

    Aggregation { movies, notices }
}
