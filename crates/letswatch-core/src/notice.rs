//! Warning-level side channel for degraded results.

use std::fmt;

use crate::catalog::DateRange;

/// A recoverable provider failure reported next to the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// One discovery call failed; its window contributed no further results.
    DiscoveryFailed {
        /// Date window of the failed call (`None` = unbounded).
        range: Option<DateRange>,
        /// Result page that failed.
        page: u32,
        /// Failure description.
        reason: String,
    },
    /// Every discovery call failed.
    ProviderUnavailable {
        /// Failure description of the last call.
        reason: String,
    },
    /// Credits could not be fetched; cast and director are empty.
    CreditsUnavailable {
        /// Affected movie.
        movie_id: u64,
        /// Failure description.
        reason: String,
    },
    /// Reviews could not be fetched; the best review is empty.
    ReviewsUnavailable {
        /// Affected movie.
        movie_id: u64,
        /// Failure description.
        reason: String,
    },
    /// Both credits and reviews failed for a movie.
    EnrichmentFailed {
        /// Affected movie.
        movie_id: u64,
        /// Failure description.
        reason: String,
    },
}

impl Notice {
    /// Logs the notice at warn level and hands it back.
    pub(crate) fn logged(self) -> Self {
        tracing::warn!(notice = %self, "degraded result");
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiscoveryFailed {
                range: Some(range),
                page,
                reason,
            } => write!(f, "discovery for {range} (page {page}) failed: {reason}"),
            Self::DiscoveryFailed {
                range: None,
                page,
                reason,
            } => write!(f, "discovery (page {page}) failed: {reason}"),
            Self::ProviderUnavailable { reason } => {
                write!(f, "could not fetch recommendations: {reason}")
            }
            Self::CreditsUnavailable { movie_id, reason } => {
                write!(f, "credits for movie {movie_id} unavailable: {reason}")
            }
            Self::ReviewsUnavailable { movie_id, reason } => {
                write!(f, "reviews for movie {movie_id} unavailable: {reason}")
            }
            Self::EnrichmentFailed { movie_id, reason } => {
                write!(f, "details for movie {movie_id} unavailable: {reason}")
            }
        }
    }
}
