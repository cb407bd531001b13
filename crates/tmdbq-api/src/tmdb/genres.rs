//! Fixed TMDB genre table.

use anyhow::{Result, bail};

/// TMDB movie genres, keyed by lowercase hyphenated name.
///
/// Sorted by name so lookups can binary-search and error messages list the
/// set in order. Closed set, fixed at build time.
const GENRES: &[(&str, u32)] = &[
    ("action", 28),
    ("adventure", 12),
    ("animation", 16),
    ("comedy", 35),
    ("crime", 80),
    ("documentary", 99),
    ("drama", 18),
    ("family", 10751),
    ("fantasy", 14),
    ("history", 36),
    ("horror", 27),
    ("music", 10402),
    ("mystery", 9648),
    ("romance", 10749),
    ("science-fiction", 878),
    ("thriller", 53),
    ("tv-movie", 10770),
    ("war", 10752),
    ("western", 37),
];

/// Resolves a genre name to its TMDB numeric ID.
///
/// Matching is case-sensitive and exact.
///
/// # Errors
///
/// Returns an error listing every valid genre name if `name` is unknown.
pub(crate) fn genre_id(name: &str) -> Result<u32> {
    match GENRES.binary_search_by(|(key, _)| key.cmp(&name)) {
        Ok(idx) => Ok(GENRES.get(idx).map_or(0, |(_, id)| *id)),
        Err(_) => {
            let mut listing = String::new();
            for (key, _) in GENRES {
                listing.push_str("\t- ");
                listing.push_str(key);
                listing.push('\n');
            }
            bail!("validation error: genre must be one of these genres:\n{listing}");
        }
    }
}
