//! Per-movie detail enrichment.
//!
//! Credits and reviews are fetched concurrently; either may fail without
//! discarding the other. Batches run with bounded concurrency and keep
//! input order.

use futures::StreamExt;
use letswatch_api::tmdb::{LocalTmdbApi, TmdbCredits, TmdbReviewsResponse};
use tracing::instrument;

use crate::error::EnrichmentError;
use crate::model::{MovieDetail, MovieSummary, Review};
use crate::notice::Notice;

/// Number of billed cast members kept.
pub const TOP_CAST_LIMIT: usize = 5;

/// Crew job identifying a director.
pub const DIRECTOR_JOB: &str = "Director";

/// Placeholder for a cast member without a name.
const UNKNOWN_CAST_NAME: &str = "Unknown";

/// Only the first page of reviews is ranked.
const REVIEWS_PAGE: u32 = 1;

/// Detail for one movie plus any partial-failure notices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    /// Movie the detail belongs to.
    pub movie_id: u64,
    /// Collected detail; empty facets where a sub-call failed.
    pub detail: MovieDetail,
    /// Sub-call failures.
    pub notices: Vec<Notice>,
}

/// First [`TOP_CAST_LIMIT`] cast names in billing order.
fn top_cast(credits: &TmdbCredits) -> Vec<String> {
    credits
        .cast
        .iter()
        .take(TOP_CAST_LIMIT)
        .map(|member| {
            member
                .name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| String::from(UNKNOWN_CAST_NAME))
        })
        .collect()
}

/// Name of the first crew member credited as [`DIRECTOR_JOB`].
fn find_director(credits: &TmdbCredits) -> Option<String> {
    credits
        .crew
        .iter()
        .find(|member| member.job.as_deref() == Some(DIRECTOR_JOB))
        .and_then(|member| member.name.clone())
}

/// Highest-scoring review; on ties the earliest one wins.
fn best_review(response: TmdbReviewsResponse) -> Option<Review> {
    response
        .results
        .into_iter()
        .map(Review::from)
        .fold(None, |best: Option<Review>, review| match best {
            Some(current) if review.score() > current.score() => Some(review),
            Some(current) => Some(current),
            None => Some(review),
        })
}

/// Fetches credits and reviews for one movie.
///
/// # Errors
///
/// Returns [`EnrichmentError`] only when both sub-calls fail. A single
/// failure yields a partial detail and a notice.
#[instrument(skip(api, language))]
pub async fn enrich(
    api: &(impl LocalTmdbApi + Sync),
    movie_id: u64,
    language: &str,
) -> Result<Enrichment, EnrichmentError> {
    let (credits, reviews) = futures::join!(
        api.movie_credits(movie_id, language),
        api.movie_reviews(movie_id, language, REVIEWS_PAGE),
    );

    let mut enrichment = Enrichment {
        movie_id,
        ..Enrichment::default()
    };
    match (credits, reviews) {
        (Err(credits_err), Err(reviews_err)) => {
            return Err(EnrichmentError {
                movie_id,
                credits: format!("{credits_err:#}"),
                reviews: format!("{reviews_err:#}"),
            });
        }
        (credits, reviews) => {
            match credits {
                Ok(credits) => {
                    enrichment.detail.top_cast = top_cast(&credits);
                    enrichment.detail.director = find_director(&credits);
                }
                Err(e) => enrichment.notices.push(
                    Notice::CreditsUnavailable {
                        movie_id,
                        reason: format!("{e:#}"),
                    }
                    .logged(),
                ),
            }
            match reviews {
                Ok(reviews) => enrichment.detail.best_review = best_review(reviews),
                Err(e) => enrichment.notices.push(
                    Notice::ReviewsUnavailable {
                        movie_id,
                        reason: format!("{e:#}"),
                    }
                    .logged(),
                ),
            }
        }
    }

    tracing::debug!(
        cast = enrichment.detail.top_cast.len(),
        has_director = enrichment.detail.director.is_some(),
        has_review = enrichment.detail.best_review.is_some(),
        "movie enriched"
    );
    Ok(enrichment)
}

/// Enriches every movie, at most `concurrency` at a time.
///
/// The output has one entry per input movie, in input order. A movie
/// whose enrichment fails entirely gets an empty detail and an
/// [`Notice::EnrichmentFailed`] notice.
#[instrument(skip_all, fields(movies = movies.len()))]
pub async fn enrich_all(
    api: &(impl LocalTmdbApi + Sync),
    movies: &[MovieSummary],
    concurrency: usize,
    language: &str,
) -> Vec<Enrichment> {
    futures::stream::iter(movies)
        .map(|movie| async move {
            match enrich(api, movie.id, language).await {
                Ok(enrichment) => enrichment,
                Err(e) => Enrichment {
                    movie_id: movie.id,
                    detail: MovieDetail::default(),
                    notices: vec![
                        Notice::EnrichmentFailed {
                            movie_id: movie.id,
                            reason: e.to_string(),
                        }
                        .logged(),
                    ],
                },
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use letswatch_api::tmdb::TmdbCastMember;

    use super::*;
    use crate::test_support::MockTmdbApi;

    fn summary(id: u64) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {id}"),
            release_date: None,
            overview: None,
            poster_path: None,
            vote_average: None,
            popularity: None,
        }
    }

    #[tokio::test]
    async fn test_enrich_collects_cast_director_and_review() {
        // Arrange
        let api = MockTmdbApi::new()
            .with_credits(
                771,
                &["Macaulay Culkin", "Joe Pesci", "Daniel Stern", "John Heard", "Roberts Blossom", "Catherine O'Hara"],
                &[("John Hughes", "Screenplay"), ("Chris Columbus", "Director")],
            )
            .with_reviews(771, &[Some(8.0), Some(9.0), Some(9.0)]);

        // Act
        let enrichment = enrich(&api, 771, "en-US").await.unwrap();

        // Assert
        let detail = &enrichment.detail;
        assert_eq!(detail.top_cast.len(), TOP_CAST_LIMIT);
        assert_eq!(detail.top_cast[0], "Macaulay Culkin");
        assert!(!detail.top_cast.contains(&String::from("Catherine O'Hara")));
        assert_eq!(detail.director.as_deref(), Some("Chris Columbus"));
        // first of the two 9.0 reviews wins
        assert_eq!(detail.best_review.as_ref().unwrap().content, "review 1");
        assert!(enrichment.notices.is_empty());
    }

    #[tokio::test]
    async fn test_enrich_unrated_reviews_pick_first() {
        // Arrange
        let api = MockTmdbApi::new().with_reviews(5, &[None, None]);

        // Act
        let enrichment = enrich(&api, 5, "en-US").await.unwrap();

        // Assert
        assert_eq!(enrichment.detail.best_review.unwrap().content, "review 0");
    }

    #[tokio::test]
    async fn test_enrich_without_reviews_or_director() {
        // Arrange
        let api = MockTmdbApi::new().with_credits(9, &["Solo Actor"], &[("Jane Roe", "Producer")]);

        // Act
        let enrichment = enrich(&api, 9, "en-US").await.unwrap();

        // Assert
        assert_eq!(enrichment.detail.top_cast, ["Solo Actor"]);
        assert!(enrichment.detail.director.is_none());
        assert!(enrichment.detail.best_review.is_none());
    }

    #[tokio::test]
    async fn test_enrich_keeps_reviews_when_credits_fail() {
        // Arrange
        let api = MockTmdbApi::new()
            .failing_credits(42)
            .with_reviews(42, &[Some(6.0)]);

        // Act
        let enrichment = enrich(&api, 42, "en-US").await.unwrap();

        // Assert
        assert!(enrichment.detail.top_cast.is_empty());
        assert!(enrichment.detail.director.is_none());
        assert!(enrichment.detail.best_review.is_some());
        assert!(matches!(
            enrichment.notices.as_slice(),
            [Notice::CreditsUnavailable { movie_id: 42, .. }]
        ));
    }

    #[tokio::test]
    async fn test_enrich_fails_when_both_calls_fail() {
        // Arrange
        let api = MockTmdbApi::new().failing_credits(7).failing_reviews(7);

        // Act
        let err = enrich(&api, 7, "en-US").await.unwrap_err();

        // Assert
        assert_eq!(err.movie_id, 7);
        assert!(err.credits.contains("credits timed out"));
        assert!(err.reviews.contains("reviews timed out"));
    }

    #[tokio::test]
    async fn test_enrich_all_preserves_order_and_isolates_failures() {
        // Arrange
        let api = MockTmdbApi::new()
            .with_credits(1, &["A"], &[])
            .failing_credits(2)
            .failing_reviews(2)
            .with_credits(3, &["C"], &[]);
        let movies = [summary(1), summary(2), summary(3)];

        // Act
        let enrichments = enrich_all(&api, &movies, 2, "en-US").await;

        // Assert
        let ids: Vec<u64> = enrichments.iter().map(|e| e.movie_id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(enrichments[0].detail.top_cast, ["A"]);
        assert_eq!(enrichments[1].detail, MovieDetail::default());
        assert!(matches!(
            enrichments[1].notices.as_slice(),
            [Notice::EnrichmentFailed { movie_id: 2, .. }]
        ));
        assert_eq!(enrichments[2].detail.top_cast, ["C"]);
        assert_eq!(api.credits_calls(), 3);
    }

    #[test]
    fn test_top_cast_names_missing_member_unknown() {
        // Arrange
        let credits = TmdbCredits {
            cast: vec![
                TmdbCastMember {
                    name: None,
                    ..TmdbCastMember::default()
                },
                TmdbCastMember {
                    name: Some(String::from("Named")),
                    ..TmdbCastMember::default()
                },
            ],
            ..TmdbCredits::default()
        };

        // Act
        let cast = top_cast(&credits);

        // Assert
        assert_eq!(cast, ["Unknown", "Named"]);
    }
}
