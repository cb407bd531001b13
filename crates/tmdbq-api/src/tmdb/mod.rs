//! TMDB API client module.
//!
//! Builds validated discover/list URLs, fetches result pages over HTTP with
//! retry on rate limiting, and paginates concurrently up to the API ceiling.

mod api;
mod client;
mod genres;
mod pager;
mod query;
mod sort;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{DiscoverApi, LocalDiscoverApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use pager::{API_MAX_ITEMS, RESULTS_PER_PAGE, fetch_movies};
pub use query::{DiscoverParams, UrlBuilder};
pub use sort::sort_by_field;
pub use types::{DiscoverResponse, Movie, deduplicate};
