//! API client library for tmdbq.
//!
//! Provides a client for the TMDB movie API: validated discover queries,
//! concurrent paginated fetches, and result sorting.

/// TMDB API client.
pub mod tmdb;
