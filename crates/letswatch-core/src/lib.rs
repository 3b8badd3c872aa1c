//! Preference resolution and recommendation aggregation engine.
//!
//! Turns genre, mood, era, and person selections into a canonical
//! [`PreferenceQuery`], fans out TMDB discovery calls, deduplicates and
//! truncates the results, and enriches each surviving movie with cast,
//! director, and its best review. Provider failures degrade into
//! [`Notice`]s instead of aborting sibling work.

/// Aggregation of discovery results.
pub mod aggregator;
/// Genre catalog, mood and era tables, person lookup.
pub mod catalog;
/// Per-movie detail enrichment.
pub mod enricher;
mod error;
/// Movie value objects.
pub mod model;
/// Non-fatal warnings returned alongside results.
pub mod notice;
/// End-to-end recommendation pipeline.
pub mod pipeline;
/// Preference resolution.
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use aggregator::{AggregateOptions, Aggregation, DEFAULT_LIMIT, aggregate};
pub use catalog::{DateRange, EraMapping, GenreCatalog, MoodMapping, PersonCandidate, find_people};
pub use enricher::{Enrichment, enrich, enrich_all};
pub use error::{EnrichmentError, ValidationError};
pub use model::{MovieDetail, MovieSummary, Review};
pub use notice::Notice;
pub use pipeline::{Recommendation, Recommendations, recommend};
pub use resolver::{PreferenceQuery, Preferences, resolve};
