//! Concurrent multi-page fetch over the TMDB list/discover endpoints.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio::sync::Mutex;
use tracing::instrument;

use super::api::DiscoverApi;
use super::types::{Movie, deduplicate};

/// Movies returned per TMDB result page.
pub const RESULTS_PER_PAGE: usize = 20;

/// Cap on API calls for a single query.
const MAX_API_CALLS: usize = 20;

/// Hard ceiling on items a single query may request.
pub const API_MAX_ITEMS: usize = RESULTS_PER_PAGE * MAX_API_CALLS;

/// Appends the page selector to a fully-built query URL.
fn page_url(base_url: &str, page: u32) -> String {
    format!("{base_url}&page={page}")
}

/// Fetches up to `max_items` movies, paginating concurrently.
///
/// Page 1 is fetched first; when it already covers the request, no further
/// calls are made. Otherwise the remaining pages are fetched in parallel,
/// one task per page, and merged back in page order so truncation always
/// keeps the best-ranked entries. The merged list is truncated to
/// `max_items` and then deduplicated by movie ID, so duplicates inside the
/// window shrink the result rather than pull in later entries.
///
/// # Errors
///
/// Returns a validation error when `max_items` exceeds [`API_MAX_ITEMS`]
/// (checked before any request goes out), or the first page-fetch error
/// otherwise.
#[instrument(skip_all)]
pub async fn fetch_movies<A>(api: Arc<A>, base_url: &str, max_items: usize) -> Result<Vec<Movie>>
where
    A: DiscoverApi + Send + Sync + 'static,
{
    if max_items > API_MAX_ITEMS {
        bail!("validation error: movies can't be more than {API_MAX_ITEMS}");
    }

    let first = api
        .fetch_page(&page_url(base_url, 1))
        .await
        .context("failed to fetch page 1")?;

    // One page covers the request.
    if first.results.len() >= max_items {
        let mut movies = first.results;
        movies.truncate(max_items);
        return Ok(deduplicate(movies));
    }

    let wanted_pages =
        u32::try_from(max_items.div_ceil(RESULTS_PER_PAGE)).context("page count overflow")?;
    let total_pages = wanted_pages.min(first.total_pages);

    tracing::debug!(
        total_pages = total_pages,
        max_items = max_items,
        "fetching remaining pages concurrently"
    );

    let accumulated: Arc<Mutex<Vec<(u32, Vec<Movie>)>>> = Arc::new(Mutex::new(Vec::new()));
    let mut handles = Vec::new();
    for page in 2..=total_pages {
        let api = Arc::clone(&api);
        let accumulated = Arc::clone(&accumulated);
        let url = page_url(base_url, page);
        handles.push(tokio::spawn(async move {
            let response = api
                .fetch_page(&url)
                .await
                .with_context(|| format!("failed to fetch page {page}"))?;
            accumulated.lock().await.push((page, response.results));
            Ok::<(), anyhow::Error>(())
        }));
    }
    for handle in handles {
        handle.await.context("page fetch task panicked")??;
    }

    // Tasks complete in arbitrary order; restore page order before merging
    // so truncation drops the tail pages, not whichever finished last.
    let mut pages = std::mem::take(&mut *accumulated.lock().await);
    pages.sort_unstable_by_key(|(page, _)| *page);

    let mut movies = first.results;
    for (_, results) in pages {
        movies.extend(results);
    }
    movies.truncate(max_items);
    let movies = deduplicate(movies);

    tracing::info!(
        total = movies.len(),
        pages = total_pages,
        "pagination completed"
    );
    Ok(movies)
}
