//! Aggregation followed by enrichment.

use letswatch_api::tmdb::LocalTmdbApi;
use tracing::instrument;

use crate::aggregator::{AggregateOptions, aggregate};
use crate::enricher::enrich_all;
use crate::model::{MovieDetail, MovieSummary};
use crate::notice::Notice;
use crate::resolver::PreferenceQuery;

/// One rendered-ready movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Discovery data.
    pub movie: MovieSummary,
    /// Enrichment data.
    pub detail: MovieDetail,
}

/// Recommendations in aggregation order plus every notice raised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    /// Entries in aggregation order.
    pub entries: Vec<Recommendation>,
    /// Discovery notices first, then enrichment notices in entry order.
    pub notices: Vec<Notice>,
}

impl Recommendations {
    /// Whether every discovery call failed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.notices
            .iter()
            .any(|notice| matches!(notice, Notice::ProviderUnavailable { .. }))
    }
}

/// Aggregates discovery results for `query` and enriches each movie.
#[instrument(skip_all)]
pub async fn recommend(
    api: &(impl LocalTmdbApi + Sync),
    query: &PreferenceQuery,
    options: &AggregateOptions,
) -> Recommendations {
    let aggregation = aggregate(api, query, options).await;
    let mut notices = aggregation.notices;
    if aggregation.movies.is_empty() {
        return Recommendations {
            entries: Vec::new(),
            notices,
        };
    }

    let enrichments = enrich_all(
        api,
        &aggregation.movies,
        options.concurrency,
        &options.language,
    )
    .await;

    let entries = aggregation
        .movies
        .into_iter()
        .zip(enrichments)
        .map(|(movie, enrichment)| {
            notices.extend(enrichment.notices);
            Recommendation {
                movie,
                detail: enrichment.detail,
            }
        })
        .collect();

    Recommendations { entries, notices }
}
