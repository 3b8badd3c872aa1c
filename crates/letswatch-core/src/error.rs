//! Typed errors surfaced by the engine.

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::DateRange;

/// The user's preferences cannot form a discovery query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No genre, date range, actor, or director survived resolution.
    #[error(
        "Please provide at least one genre, mood, movie era, actor, or director to get recommendations."
    )]
    EmptyQuery,
    /// A date range whose start lies after its end.
    #[error("invalid date range: {start} is after {end}")]
    InvertedRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },
    /// Two distinct date ranges share days.
    #[error("date ranges {first} and {second} overlap")]
    OverlappingRanges {
        /// Range selected first.
        first: DateRange,
        /// Range selected later.
        second: DateRange,
    },
}

/// Both enrichment sub-calls for a movie failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("movie {movie_id}: details unavailable (credits: {credits}; reviews: {reviews})")]
pub struct EnrichmentError {
    /// Movie that could not be enriched.
    pub movie_id: u64,
    /// Credits failure.
    pub credits: String,
    /// Reviews failure.
    pub reviews: String,
}
