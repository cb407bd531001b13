//! `DiscoverApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::DiscoverResponse;

/// Single-page fetch seam between the pager and the HTTP client.
///
/// Abstracted for mock substitution in tests. Uses `trait_variant::make`
/// to generate a `Send`-bound async trait, which the pager requires to
/// spawn one task per page.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(DiscoverApi: Send)]
pub trait LocalDiscoverApi {
    /// Fetches one result page from a fully-built URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the HTTP request fails,
    /// the response status indicates failure, or the body does not decode.
    async fn fetch_page(&self, url: &str) -> Result<DiscoverResponse>;
}
