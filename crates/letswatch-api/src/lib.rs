//! API client library for letswatch.
//!
//! Provides the TMDB v3 client used to list genres, search people,
//! discover movies, and fetch per-movie credits and reviews.

/// TMDB API client.
pub mod tmdb;
