//! TMDB API response types and request parameters.
//!
//! Fields the core relies on are optional or defaulted, so a partial
//! payload decodes instead of failing the whole request.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// --- Genres ---

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbGenreListResponse {
    /// Genre entries.
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<TmdbGenre>,
}

/// Genre entry. Entries without an ID or name are unusable for lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: Option<u32>,
    /// Genre name.
    pub name: Option<String>,
}

// --- Search Person ---

/// Response from `search/person` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbSearchPersonResponse {
    /// Current page number.
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    /// Search results.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<TmdbPersonResult>,
    /// Total number of pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(deserialize_with = "null_as_default")]
    pub total_results: u32,
}

/// A single person search result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbPersonResult {
    /// TMDB person ID.
    pub id: Option<u64>,
    /// Display name.
    pub name: Option<String>,
    /// Department the person is best known for (e.g., "Acting", "Directing").
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
}

// --- Discover Movie ---

/// Response from `discover/movie` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbDiscoverMovieResponse {
    /// Current page number.
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    /// Discovered movies, in the requested sort order.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<TmdbMovieResult>,
    /// Total number of pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(deserialize_with = "null_as_default")]
    pub total_results: u32,
}

/// A single movie in a discovery result list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbMovieResult {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Release date (YYYY-MM-DD, empty string, or null).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Genre IDs.
    #[serde(deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
}

// --- Credits ---

/// Response from `movie/{movie_id}/credits` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbCredits {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// Cast entries in billing order.
    #[serde(deserialize_with = "null_as_default")]
    pub cast: Vec<TmdbCastMember>,
    /// Crew entries.
    #[serde(deserialize_with = "null_as_default")]
    pub crew: Vec<TmdbCrewMember>,
}

/// A cast entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbCastMember {
    /// Person name.
    pub name: Option<String>,
    /// Character played.
    pub character: Option<String>,
    /// Billing order (0 = top billed).
    pub order: Option<u32>,
}

/// A crew entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbCrewMember {
    /// Person name.
    pub name: Option<String>,
    /// Job title (e.g., "Director", "Screenplay").
    pub job: Option<String>,
    /// Department (e.g., "Directing").
    pub department: Option<String>,
}

// --- Reviews ---

/// Response from `movie/{movie_id}/reviews` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbReviewsResponse {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// Current page number.
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    /// Reviews in provider order.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<TmdbReview>,
    /// Total number of pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(deserialize_with = "null_as_default")]
    pub total_results: u32,
}

/// A single review.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbReview {
    /// Review author display name.
    pub author: Option<String>,
    /// Nested author details carrying the reviewer's rating.
    pub author_details: Option<TmdbAuthorDetails>,
    /// Review body.
    pub content: Option<String>,
    /// Permalink to the review.
    pub url: Option<String>,
}

/// Author details nested in a review.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbAuthorDetails {
    /// Author name.
    pub name: Option<String>,
    /// Author username.
    pub username: Option<String>,
    /// Rating the author gave the movie (0-10, or null).
    pub rating: Option<f64>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Request Parameters ---

/// How multiple genre IDs are combined in `with_genres`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreJoin {
    /// Movie must carry every genre (comma separated).
    #[default]
    All,
    /// Movie may carry any of the genres (pipe separated).
    Any,
}

impl GenreJoin {
    /// Separator TMDB expects between genre IDs.
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::All => ",",
            Self::Any => "|",
        }
    }
}

/// Parameters for `search/person` endpoint.
#[derive(Debug, Clone)]
pub struct SearchPersonParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchPersonParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Parameters for `discover/movie` endpoint.
#[derive(Debug, Clone)]
pub struct DiscoverMovieParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Sort order (default: "popularity.desc").
    pub sort_by: String,
    /// Genre filter; empty means no genre filter.
    pub with_genres: Vec<u32>,
    /// How `with_genres` entries are combined.
    pub genre_join: GenreJoin,
    /// Inclusive lower release-date bound.
    pub release_date_gte: Option<NaiveDate>,
    /// Inclusive upper release-date bound.
    pub release_date_lte: Option<NaiveDate>,
    /// Cast member person ID.
    pub with_cast: Option<u64>,
    /// Crew member person ID.
    pub with_crew: Option<u64>,
    /// Include adult content.
    pub include_adult: bool,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
}

impl Default for DiscoverMovieParams {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            page: 1,
            sort_by: String::from("popularity.desc"),
            with_genres: Vec::new(),
            genre_join: GenreJoin::All,
            release_date_gte: None,
            release_date_lte: None,
            with_cast: None,
            with_crew: None,
            include_adult: false,
            region: None,
        }
    }
}

impl DiscoverMovieParams {
    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Restricts release dates to `gte..=lte`.
    #[must_use]
    pub const fn release_dates(mut self, gte: NaiveDate, lte: NaiveDate) -> Self {
        self.release_date_gte = Some(gte);
        self.release_date_lte = Some(lte);
        self
    }

    /// Formats `with_genres` for the query string, `None` when empty.
    #[must_use]
    pub fn genres_param(&self) -> Option<String> {
        if self.with_genres.is_empty() {
            return None;
        }
        let ids: Vec<String> = self.with_genres.iter().map(ToString::to_string).collect();
        Some(ids.join(self.genre_join.separator()))
    }
}
