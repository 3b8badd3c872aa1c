//! Lookup tables the resolver translates names through.
//!
//! The genre catalog is a snapshot of the provider's genre list; the
//! mood and era tables are fixed. All three are plain values handed to
//! [`crate::resolve`], never process-wide state.

use std::fmt;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use letswatch_api::tmdb::{LocalTmdbApi, SearchPersonParams, TmdbGenreListResponse};
use tracing::instrument;

use crate::error::ValidationError;

/// Mood label to genre name pairs.
const STANDARD_MOODS: [(&str, &str); 5] = [
    ("Happy", "Comedy"),
    ("Sad", "Drama"),
    ("Excited", "Action"),
    ("Romantic", "Romance"),
    ("Scared", "Horror"),
];

/// Display name for a search result without one.
const UNKNOWN_PERSON_NAME: &str = "Unknown";

/// First year of each supported decade.
const STANDARD_DECADES: [i32; 8] = [1950, 1960, 1970, 1980, 1990, 2000, 2010, 2020];

/// Inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Provider genre names mapped to genre IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCatalog {
    /// Entries in provider order; the first entry wins on duplicate names.
    genres: Vec<(String, u32)>,
}

impl GenreCatalog {
    /// Builds a catalog from `(name, id)` pairs.
    pub fn new<S: Into<String>>(genres: impl IntoIterator<Item = (S, u32)>) -> Self {
        Self {
            genres: genres
                .into_iter()
                .map(|(name, id)| (name.into(), id))
                .collect(),
        }
    }

    /// Fetches the current movie genre list from TMDB.
    ///
    /// # Errors
    ///
    /// Returns an error if the genre list request fails.
    #[instrument(skip_all)]
    pub async fn fetch(api: &(impl LocalTmdbApi + Sync), language: &str) -> Result<Self> {
        let response = api
            .genre_movie_list(language)
            .await
            .context("failed to fetch genre catalog")?;
        let catalog = Self::from(response);
        tracing::debug!(genres = catalog.len(), "genre catalog fetched");
        Ok(catalog)
    }

    /// Looks up a genre ID by name.
    ///
    /// Exact matches win; otherwise the first ASCII case-insensitive match is used.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<u32> {
        let name = name.trim();
        self.genres
            .iter()
            .find(|(n, _)| n == name)
            .or_else(|| self.genres.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)))
            .map(|&(_, id)| id)
    }

    /// Iterates over `(name, id)` pairs in provider order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.genres.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Number of genres in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genres.len()
    }

    /// Whether the catalog has no genres.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl From<TmdbGenreListResponse> for GenreCatalog {
    /// Keeps entries that carry both an ID and a non-blank name.
    fn from(response: TmdbGenreListResponse) -> Self {
        Self::new(response.genres.into_iter().filter_map(|genre| {
            let id = genre.id;
            let entry = genre
                .name
                .filter(|name| !name.trim().is_empty())
                .zip(id);
            if entry.is_none() {
                tracing::debug!(id = ?id, "skipping incomplete genre entry");
            }
            entry
        }))
    }
}

/// Mood labels mapped to genre names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodMapping {
    entries: Vec<(String, String)>,
}

impl MoodMapping {
    /// The built-in five-mood table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_MOODS)
    }

    /// Builds a table from `(mood, genre name)` pairs.
    pub fn new<L: Into<String>, G: Into<String>>(
        entries: impl IntoIterator<Item = (L, G)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, genre)| (label.into(), genre.into()))
                .collect(),
        }
    }

    /// Genre name for a mood label (ASCII case-insensitive).
    #[must_use]
    pub fn genre_for(&self, mood: &str) -> Option<&str> {
        let mood = mood.trim();
        self.entries
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(mood))
            .map(|(_, genre)| genre.as_str())
    }

    /// Iterates over `(mood, genre name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, genre)| (label.as_str(), genre.as_str()))
    }
}

impl Default for MoodMapping {
    fn default() -> Self {
        Self::standard()
    }
}

/// Era labels mapped to release-date windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraMapping {
    entries: Vec<(String, DateRange)>,
}

impl EraMapping {
    /// One entry per decade, `1950s` through `2020s`.
    #[must_use]
    pub fn standard() -> Self {
        let entries = STANDARD_DECADES.iter().filter_map(|&decade| {
            let start = NaiveDate::from_ymd_opt(decade, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(decade.checked_add(9)?, 12, 31)?;
            let range = DateRange::new(start, end).ok()?;
            Some((format!("{decade}s"), range))
        });
        Self::new(entries)
    }

    /// Builds a table from `(era label, range)` pairs.
    pub fn new<L: Into<String>>(entries: impl IntoIterator<Item = (L, DateRange)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, range)| (label.into(), range))
                .collect(),
        }
    }

    /// Date range for an era label (ASCII case-insensitive).
    #[must_use]
    pub fn range_for(&self, era: &str) -> Option<DateRange> {
        let era = era.trim();
        self.entries
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(era))
            .map(|&(_, range)| range)
    }

    /// Iterates over `(era label, range)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DateRange)> {
        self.entries
            .iter()
            .map(|(label, range)| (label.as_str(), *range))
    }
}

impl Default for EraMapping {
    fn default() -> Self {
        Self::standard()
    }
}

/// A person returned by name search.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonCandidate {
    /// TMDB person ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Department the person is best known for.
    pub known_for_department: Option<String>,
}

/// Searches people by name, in provider relevance order.
///
/// A blank query or no match yields an empty list.
///
/// # Errors
///
/// Returns an error if the search request fails.
#[instrument(skip_all)]
pub async fn find_people(
    api: &(impl LocalTmdbApi + Sync),
    query: &str,
    language: &str,
) -> Result<Vec<PersonCandidate>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let params = SearchPersonParams::new(query).language(language);
    let response = api
        .search_person(&params)
        .await
        .with_context(|| format!("person search failed: {query}"))?;

    let candidates: Vec<PersonCandidate> = response
        .results
        .into_iter()
        .filter_map(|p| {
            Some(PersonCandidate {
                id: p.id?,
                name: p
                    .name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| String::from(UNKNOWN_PERSON_NAME)),
                known_for_department: p.known_for_department,
            })
        })
        .collect();
    tracing::debug!(query, found = candidates.len(), "person search completed");
    Ok(candidates)
}
