//! Preference resolution.
//!
//! Selections that cannot be resolved (a genre missing from the live
//! catalog, a mood whose genre is missing, an unknown era label) are
//! dropped without failing the request. The provider's catalog is
//! authoritative; each drop is logged at debug level.

use std::collections::BTreeSet;

use crate::catalog::{DateRange, EraMapping, GenreCatalog, MoodMapping};
use crate::error::ValidationError;

/// Raw user selections, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Genre names.
    pub genres: Vec<String>,
    /// Mood labels.
    pub moods: Vec<String>,
    /// Era labels.
    pub eras: Vec<String>,
    /// Already-chosen actor person ID.
    pub actor_id: Option<u64>,
    /// Already-chosen director person ID.
    pub director_id: Option<u64>,
}

impl Preferences {
    /// Whether nothing at all was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.moods.is_empty()
            && self.eras.is_empty()
            && self.actor_id.is_none()
            && self.director_id.is_none()
    }

    /// Whether resolution needs the provider's genre catalog.
    #[must_use]
    pub fn needs_genre_catalog(&self) -> bool {
        !self.genres.is_empty() || !self.moods.is_empty()
    }
}

/// Canonical, validated discovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceQuery {
    genre_ids: BTreeSet<u32>,
    date_ranges: Vec<DateRange>,
    actor_id: Option<u64>,
    director_id: Option<u64>,
}

impl PreferenceQuery {
    /// Builds a query, dropping repeated date ranges (first occurrence kept).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OverlappingRanges`] if two distinct ranges
    /// share days, or [`ValidationError::EmptyQuery`] if no filter remains.
    pub fn new(
        genre_ids: impl IntoIterator<Item = u32>,
        date_ranges: impl IntoIterator<Item = DateRange>,
        actor_id: Option<u64>,
        director_id: Option<u64>,
    ) -> Result<Self, ValidationError> {
        let genre_ids: BTreeSet<u32> = genre_ids.into_iter().collect();
        let mut unique_ranges: Vec<DateRange> = Vec::new();
        for range in date_ranges {
            if unique_ranges.contains(&range) {
                continue;
            }
            if let Some(first) = unique_ranges.iter().find(|r| r.overlaps(&range)) {
                return Err(ValidationError::OverlappingRanges {
                    first: *first,
                    second: range,
                });
            }
            unique_ranges.push(range);
        }

        if genre_ids.is_empty()
            && unique_ranges.is_empty()
            && actor_id.is_none()
            && director_id.is_none()
        {
            return Err(ValidationError::EmptyQuery);
        }

        Ok(Self {
            genre_ids,
            date_ranges: unique_ranges,
            actor_id,
            director_id,
        })
    }

    /// Unique genre IDs, ascending.
    #[must_use]
    pub const fn genre_ids(&self) -> &BTreeSet<u32> {
        &self.genre_ids
    }

    /// Date ranges in selection order.
    #[must_use]
    pub fn date_ranges(&self) -> &[DateRange] {
        &self.date_ranges
    }

    /// Actor filter.
    #[must_use]
    pub const fn actor_id(&self) -> Option<u64> {
        self.actor_id
    }

    /// Director filter.
    #[must_use]
    pub const fn director_id(&self) -> Option<u64> {
        self.director_id
    }
}

/// Resolves raw selections into a [`PreferenceQuery`].
///
/// Pure: the same inputs and tables always produce the same query.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyQuery`] when no genre, era, actor, or
/// director survives resolution, and
/// [`ValidationError::OverlappingRanges`] when `eras` maps two selected
/// labels to ranges sharing days.
pub fn resolve(
    preferences: &Preferences,
    catalog: &GenreCatalog,
    moods: &MoodMapping,
    eras: &EraMapping,
) -> Result<PreferenceQuery, ValidationError> {
    let mut genre_ids: Vec<u32> = Vec::new();

    for name in &preferences.genres {
        match catalog.id_of(name) {
            Some(id) => genre_ids.push(id),
            None => tracing::debug!(genre = %name, "dropping genre not present in catalog"),
        }
    }

    for mood in &preferences.moods {
        match moods.genre_for(mood).and_then(|genre| catalog.id_of(genre)) {
            Some(id) => genre_ids.push(id),
            None => tracing::debug!(mood = %mood, "dropping mood without a catalog genre"),
        }
    }

    let mut date_ranges: Vec<DateRange> = Vec::new();
    for era in &preferences.eras {
        match eras.range_for(era) {
            Some(range) => date_ranges.push(range),
            None => tracing::debug!(era = %era, "dropping unknown era"),
        }
    }

    let query = PreferenceQuery::new(
        genre_ids,
        date_ranges,
        preferences.actor_id,
        preferences.director_id,
    )?;
    tracing::debug!(
        genre_ids = ?query.genre_ids,
        date_ranges = query.date_ranges.len(),
        actor_id = ?query.actor_id,
        director_id = ?query.director_id,
        "preferences resolved"
    );
    Ok(query)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;
    use crate::test_support::date;

    fn catalog() -> GenreCatalog {
        GenreCatalog::new([
            ("Action", 28),
            ("Comedy", 35),
            ("Drama", 18),
            ("Romance", 10_749),
        ])
    }

    fn prefs(genres: &[&str], moods: &[&str], eras: &[&str]) -> Preferences {
        Preferences {
            genres: genres.iter().map(|s| String::from(*s)).collect(),
            moods: moods.iter().map(|s| String::from(*s)).collect(),
            eras: eras.iter().map(|s| String::from(*s)).collect(),
            actor_id: None,
            director_id: None,
        }
    }

    fn resolve_standard(preferences: &Preferences) -> Result<PreferenceQuery, ValidationError> {
        resolve(
            preferences,
            &catalog(),
            &MoodMapping::standard(),
            &EraMapping::standard(),
        )
    }

    #[test]
    fn test_empty_preferences_rejected() {
        // Arrange
        let preferences = Preferences::default();

        // Act
        let result = resolve_standard(&preferences);

        // Assert
        assert_eq!(result, Err(ValidationError::EmptyQuery));
        assert!(preferences.is_empty());
    }

    #[test]
    fn test_comedy_in_the_nineties() {
        // Arrange
        let preferences = prefs(&["Comedy"], &[], &["1990s"]);

        // Act
        let query = resolve_standard(&preferences).unwrap();

        // Assert
        assert_eq!(query.genre_ids().iter().copied().collect::<Vec<_>>(), [35]);
        assert_eq!(
            query.date_ranges(),
            [DateRange::new(date(1990, 1, 1), date(1999, 12, 31)).unwrap()]
        );
        assert_eq!(query.actor_id(), None);
    }

    #[test]
    fn test_moods_and_genres_are_deduplicated_and_sorted() {
        // Arrange: Happy maps to Comedy, which is also selected directly
        let preferences = prefs(&["Drama", "Comedy"], &["Happy", "Excited"], &[]);

        // Act
        let query = resolve_standard(&preferences).unwrap();

        // Assert
        assert_eq!(
            query.genre_ids().iter().copied().collect::<Vec<_>>(),
            [18, 28, 35]
        );
        assert!(query.date_ranges().is_empty());
    }

    #[test]
    fn test_eras_stay_disjoint() {
        // Arrange
        let preferences = prefs(&[], &[], &["1950s", "1980s"]);

        // Act
        let query = resolve_standard(&preferences).unwrap();

        // Assert
        assert_eq!(
            query.date_ranges(),
            [
                DateRange::new(date(1950, 1, 1), date(1959, 12, 31)).unwrap(),
                DateRange::new(date(1980, 1, 1), date(1989, 12, 31)).unwrap(),
            ]
        );
    }

    #[test]
    fn test_repeated_era_yields_one_range() {
        // Arrange
        let preferences = prefs(&[], &[], &["1990s", "1990s"]);

        // Act
        let query = resolve_standard(&preferences).unwrap();

        // Assert
        assert_eq!(query.date_ranges().len(), 1);
    }

    #[test]
    fn test_overlapping_ranges_rejected() {
        // Arrange
        let wide = DateRange::new(date(1950, 1, 1), date(1989, 12, 31)).unwrap();
        let eighties = DateRange::new(date(1980, 1, 1), date(1989, 12, 31)).unwrap();

        // Act
        let result = PreferenceQuery::new([35], [wide, eighties], None, None);

        // Assert
        assert_eq!(
            result,
            Err(ValidationError::OverlappingRanges {
                first: wide,
                second: eighties,
            })
        );
    }

    #[test]
    fn test_adjacent_ranges_accepted() {
        // Arrange
        let eighties = DateRange::new(date(1980, 1, 1), date(1989, 12, 31)).unwrap();
        let nineties = DateRange::new(date(1990, 1, 1), date(1999, 12, 31)).unwrap();

        // Act
        let query = PreferenceQuery::new([], [nineties, eighties, nineties], None, None).unwrap();

        // Assert
        assert_eq!(query.date_ranges(), [nineties, eighties]);
    }

    #[test]
    fn test_needs_genre_catalog() {
        // Arrange
        let by_genre = prefs(&["Comedy"], &[], &[]);
        let by_mood = prefs(&[], &["Happy"], &[]);
        let by_era = prefs(&[], &[], &["1990s"]);
        let by_person = Preferences {
            actor_id: Some(31),
            ..Preferences::default()
        };

        // Act & Assert
        assert!(by_genre.needs_genre_catalog());
        assert!(by_mood.needs_genre_catalog());
        assert!(!by_era.needs_genre_catalog());
        assert!(!by_person.needs_genre_catalog());
    }

    #[test]
    fn test_unresolvable_selections_are_dropped() {
        // Arrange: Horror is not in the catalog, so "Scared" cannot resolve either
        let preferences = prefs(&["Horror", "Nonexistent"], &["Scared", "Bored"], &["1890s"]);

        // Act
        let result = resolve_standard(&preferences);

        // Assert
        assert_eq!(result, Err(ValidationError::EmptyQuery));
    }

    #[test]
    fn test_person_only_query_is_valid() {
        // Arrange
        let preferences = Preferences {
            director_id: Some(488),
            ..Preferences::default()
        };

        // Act
        let query = resolve_standard(&preferences).unwrap();

        // Assert
        assert!(query.genre_ids().is_empty());
        assert_eq!(query.director_id(), Some(488));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        // Arrange
        let preferences = prefs(&["Romance", "Comedy"], &["Sad"], &["2000s", "1970s"]);

        // Act
        let first = resolve_standard(&preferences).unwrap();
        let second = resolve_standard(&preferences).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_dropped_genre_emits_debug_event() {
        // Arrange
        let preferences = prefs(&["Comedy", "Nonexistent"], &[], &[]);
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(Level::DEBUG)
                    .with_fields(expect::msg("dropping genre not present in catalog")),
            )
            .event(
                expect::event()
                    .at_level(Level::DEBUG)
                    .with_fields(expect::msg("preferences resolved")),
            )
            .only()
            .run_with_handle();

        // Act
        let result = with_default(subscriber, || resolve_standard(&preferences));

        // Assert
        assert!(result.is_ok());
        handle.assert_finished();
    }
}
