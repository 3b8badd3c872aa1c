//! Movie value objects built from provider payloads.

use letswatch_api::tmdb::{TmdbMovieResult, TmdbReview};

/// Title used when the provider sends neither a title nor an original title.
const UNKNOWN_TITLE: &str = "Unknown title";

/// One discovered movie. `id` is the deduplication key.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Release date as sent by the provider (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Average user rating.
    pub vote_average: Option<f64>,
    /// Popularity snapshot at discovery time.
    pub popularity: Option<f64>,
}

impl MovieSummary {
    /// Converts a discovery result, or `None` if it has no ID.
    #[must_use]
    pub fn from_tmdb(result: TmdbMovieResult) -> Option<Self> {
        let id = result.id?;
        let title = non_empty(result.title)
            .or_else(|| non_empty(result.original_title))
            .unwrap_or_else(|| String::from(UNKNOWN_TITLE));
        Some(Self {
            id,
            title,
            release_date: non_empty(result.release_date),
            overview: non_empty(result.overview),
            poster_path: non_empty(result.poster_path),
            vote_average: result.vote_average,
            popularity: result.popularity,
        })
    }

    /// Four-digit release year, if the release date carries one.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Enrichment for one movie. Every facet may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDetail {
    /// Up to five cast names in billing order.
    pub top_cast: Vec<String>,
    /// First credited director.
    pub director: Option<String>,
    /// Highest-rated review.
    pub best_review: Option<Review>,
}

/// A user review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Author display name.
    pub author: Option<String>,
    /// Review body.
    pub content: String,
    /// Reviewer's rating, when given.
    pub rating: Option<f64>,
    /// Permalink.
    pub url: Option<String>,
}

impl Review {
    /// Rating used for ranking: a missing or NaN rating counts as zero.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.rating.filter(|r| !r.is_nan()).unwrap_or(0.0)
    }
}

impl From<TmdbReview> for Review {
    fn from(review: TmdbReview) -> Self {
        let rating = review.author_details.as_ref().and_then(|d| d.rating);
        Self {
            author: non_empty(review.author),
            content: review.content.unwrap_or_default(),
            rating,
            url: non_empty(review.url),
        }
    }
}

/// Treats empty strings like missing values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
