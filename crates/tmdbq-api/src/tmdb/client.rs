//! `TmdbClient` - authenticated single-page fetch with retry on rate limiting.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use tracing::instrument;
use url::Url;

use super::api::DiscoverApi;
use super::types::{DiscoverResponse, TmdbErrorResponse};

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Client-side timeout per request; exceeding it is a network-level failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Bearer API token.
    api_token: String,
    /// Retry cap for rate-limited requests.
    max_retries: u32,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    api_token: Option<String>,
    user_agent: Option<String>,
    max_retries: Option<u32>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            api_token: None,
            user_agent: None,
            max_retries: None,
        }
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the retry cap for 429 responses (default: 3).
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            api_token,
            max_retries: self.max_retries.unwrap_or(MAX_RETRIES),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Issues one GET attempt with Bearer auth.
    async fn send(&self, url: &Url) -> Result<Response> {
        self.http_client
            .get(url.clone())
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("request error: {url}"))
    }
}

/// Reads `Retry-After` as whole seconds, `None` if absent or unparseable.
fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Renders a failure status, preferring the structured TMDB error body.
async fn status_error(kind: &str, status: StatusCode, response: Response) -> anyhow::Error {
    let body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<TmdbErrorResponse>(&body) {
        return anyhow::anyhow!(
            "TMDB API {kind} (HTTP {status}): code={}, message={}",
            api_error.status_code,
            api_error.status_message,
        );
    }
    anyhow::anyhow!("TMDB API {kind} (HTTP {status})")
}

impl DiscoverApi for TmdbClient {
    /// Fetches one result page, retrying rate-limited attempts.
    ///
    /// Per-attempt classification: 5xx and non-429 4xx are permanent; a 429
    /// with a parseable `Retry-After` triggers a bounded wait-and-retry,
    /// sleeping for the server-provided delay; a 429 without one is treated
    /// as a client error. Network-level failures are not retried.
    #[instrument(skip_all)]
    async fn fetch_page(&self, url: &str) -> Result<DiscoverResponse> {
        let url = Url::parse(url).with_context(|| format!("invalid request URL: {url}"))?;

        let mut retries = 0u32;
        loop {
            tracing::debug!(url = %url, "TMDB API request");
            let response = self.send(&url).await?;
            let status = response.status();

            if status.is_server_error() {
                return Err(status_error("server error", status, response).await);
            }

            if status == StatusCode::TOO_MANY_REQUESTS
                && let Some(secs) = retry_after_secs(&response)
            {
                retries = retries.saturating_add(1);
                if retries > self.max_retries {
                    bail!(
                        "TMDB API rate limit exceeded after {} retries: {url}",
                        self.max_retries
                    );
                }
                // The server-provided delay takes precedence over any local
                // backoff schedule.
                let delay = Duration::from_secs(secs);
                tracing::warn!(
                    retry = retries,
                    max_retries = self.max_retries,
                    delay_secs = secs,
                    "TMDB API rate limited (429), honoring Retry-After"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if status.is_client_error() {
                return Err(status_error("client error", status, response).await);
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {url}"))?;
            let raw_result: std::result::Result<DiscoverResponse, _> =
                serde_json::from_str(&body);
            return raw_result.with_context(|| format!("decode error: {url}"));
        }
    }
}
