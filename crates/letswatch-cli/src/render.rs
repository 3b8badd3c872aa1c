//! Text rendering of recommendation cards.

use letswatch_core::Recommendation;

/// TMDB image CDN prefix for 500px-wide posters.
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Placeholder for any missing value.
const NOT_AVAILABLE: &str = "N/A";

/// Renders one recommendation as display lines.
///
/// `rank` is 1-based.
pub fn card(rank: usize, entry: &Recommendation) -> Vec<String> {
    let movie = &entry.movie;
    let detail = &entry.detail;

    let mut lines = vec![format!(
        "{rank}. {} ({})",
        movie.title,
        movie.release_year().unwrap_or(NOT_AVAILABLE)
    )];
    if let Some(poster) = &movie.poster_path {
        lines.push(format!("   Poster: {POSTER_BASE_URL}{poster}"));
    }
    lines.push(format!(
        "   Overview: {}",
        movie.overview.as_deref().unwrap_or("No overview available.")
    ));
    lines.push(format!(
        "   Rating: ⭐ {}",
        movie
            .vote_average
            .map_or_else(|| String::from(NOT_AVAILABLE), |v| format!("{v:.1}"))
    ));
    lines.push(format!(
        "   Top 5 Actors: {}",
        if detail.top_cast.is_empty() {
            String::from(NOT_AVAILABLE)
        } else {
            detail.top_cast.join(", ")
        }
    ));
    lines.push(format!(
        "   Director: {}",
        detail.director.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!(
        "   Best Review: {}",
        detail
            .best_review
            .as_ref()
            .map(|r| r.content.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| String::from("No reviews available."))
    ));
    lines
}
