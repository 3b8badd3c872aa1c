//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints used for
//! movie discovery: genre listing, person search, `discover/movie`,
//! credits, and reviews.

mod api;
mod client;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, GenreJoin, SearchPersonParams, TmdbAuthorDetails, TmdbCastMember,
    TmdbCredits, TmdbCrewMember, TmdbDiscoverMovieResponse, TmdbGenre, TmdbGenreListResponse,
    TmdbMovieResult, TmdbPersonResult, TmdbReview, TmdbReviewsResponse, TmdbSearchPersonResponse,
};
