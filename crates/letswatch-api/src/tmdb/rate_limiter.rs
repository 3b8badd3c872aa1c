//! Request pacing for the TMDB API.

use std::time::{Duration, Instant};

/// Default spacing between request starts (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Slot-reserving pacer for TMDB requests.
///
/// Each caller reserves the next free start slot and sleeps until it
/// outside the lock, so concurrent discovery and enrichment calls are
/// spaced by `min_interval` without holding the mutex while waiting.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RequestPacer {
    /// Minimum spacing between two request starts.
    min_interval: Duration,
    /// Start time handed to the most recent reservation.
    last_slot: Option<Instant>,
}

impl RequestPacer {
    /// Creates a pacer with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_slot: None,
        }
    }

    /// Creates a pacer with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Reserves the next start slot at or after `now` and returns how long
    /// the caller must wait before sending.
    pub(crate) fn reserve(&mut self, now: Instant) -> Duration {
        let slot = self
            .last_slot
            .and_then(|last| last.checked_add(self.min_interval))
            .map_or(now, |next| next.max(now));
        self.last_slot = Some(slot);
        slot.saturating_duration_since(now)
    }
}
