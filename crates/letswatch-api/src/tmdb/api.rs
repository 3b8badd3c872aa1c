//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    DiscoverMovieParams, SearchPersonParams, TmdbCredits, TmdbDiscoverMovieResponse,
    TmdbGenreListResponse, TmdbReviewsResponse, TmdbSearchPersonResponse,
};

/// TMDB API trait.
///
/// Abstracts the endpoints the recommendation engine consumes so tests
/// can substitute canned responses.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Lists the official movie genres.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genre_movie_list(&self, language: &str) -> Result<TmdbGenreListResponse>;

    /// Searches for people by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_person(&self, params: &SearchPersonParams) -> Result<TmdbSearchPersonResponse>;

    /// Discovers movies matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movie(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbDiscoverMovieResponse>;

    /// Fetches the cast and crew of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64, language: &str) -> Result<TmdbCredits>;

    /// Fetches one page of user reviews for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_reviews(
        &self,
        movie_id: u64,
        language: &str,
        page: u32,
    ) -> Result<TmdbReviewsResponse>;
}
