//! TMDB API response types.

use std::collections::HashSet;

use serde::Deserialize;

/// A single movie record.
///
/// Identity is `id`; all other fields are descriptive. TMDB omits or nulls
/// some fields for obscure entries, so the string fields default to empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Release date (`YYYY-MM-DD`, possibly empty).
    #[serde(default)]
    pub release_date: String,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Vote average in `[0, 10]`.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u64,
}

/// One page of results from a TMDB list/discover endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverResponse {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<Movie>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

/// Removes repeated movie entries by ID, preserving first-seen order.
#[must_use]
pub fn deduplicate(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen: HashSet<u64> = HashSet::with_capacity(movies.len());
    movies.into_iter().filter(|m| seen.insert(m.id)).collect()
}
