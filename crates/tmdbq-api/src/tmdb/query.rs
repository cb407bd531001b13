//! Discover/list URL construction with per-field validation.
//!
//! Each filter field is an independently optional raw string. An empty field
//! emits no query fragment; a non-empty field must parse to a valid fragment
//! or the whole build fails with the first offending field.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local};

use super::genres::genre_id;

/// No movie predates the Roundhay Garden Scene.
const EARLIEST_MOVIE: i32 = 1888;

/// Vote average bounds enforced by TMDB.
const MIN_VOTE_AVERAGE: f64 = 0.0;
/// Upper vote average bound.
const MAX_VOTE_AVERAGE: f64 = 10.0;

/// Reference list of ISO 639-1 codes, included in language errors.
const HELP_ISO639_1: &str = "https://en.wikipedia.org/wiki/List_of_ISO_639-1_codes";

/// Predefined movie list endpoint names.
const LIST_CATEGORIES: [&str; 4] = ["now_playing", "popular", "top_rated", "upcoming"];

/// Filter criteria for discover movie searches.
///
/// Every field is optional; `None` or an empty string is skipped entirely.
#[derive(Debug, Clone, Default)]
pub struct DiscoverParams {
    /// Original language (ISO 639-1 code).
    pub language: Option<String>,
    /// Release year spec: `"2000"`, `"2000,2010"`, `"2000,gte"`, `"2000,lte"`.
    pub year: Option<String>,
    /// Vote average spec: `"7.0,8.0"`, `"7.5,gte"`, `"7.5,lte"`.
    pub vote_average: Option<String>,
    /// Vote count spec: `"500,1000"`, `"500,gte"`, `"500,lte"`.
    pub vote_count: Option<String>,
    /// Comma-separated genre names to include.
    pub with_genres: Option<String>,
    /// Comma-separated genre names to exclude.
    pub without_genres: Option<String>,
}

/// Genre filter direction, mapped to `with_genres`/`without_genres`.
#[derive(Debug, Clone, Copy)]
enum GenreFilter {
    /// Include matching genres.
    With,
    /// Exclude matching genres.
    Without,
}

impl GenreFilter {
    const fn key(self) -> &'static str {
        match self {
            Self::With => "with",
            Self::Without => "without",
        }
    }
}

/// Constructs validated TMDB API URLs.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    /// API base URL without a trailing slash.
    base_url: String,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlBuilder {
    /// Creates a builder targeting the production TMDB v3 API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: String::from("https://api.themoviedb.org/3"),
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Builds a URL for one of TMDB's predefined movie list endpoints.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing the valid categories if `category`
    /// is not one of them.
    pub fn list(&self, category: &str) -> Result<String> {
        if !LIST_CATEGORIES.contains(&category) {
            bail!(
                "validation error: movie list parameter must be one of: {:?}",
                LIST_CATEGORIES
            );
        }
        Ok(format!("{}/movie/{category}?", self.base_url))
    }

    /// Builds a discover URL from the given filter parameters.
    ///
    /// Fields are evaluated in a fixed order (language, year, vote average,
    /// vote count, with-genres, without-genres); the first invalid field
    /// fails the whole build. Each fragment is self-terminated with `&` and
    /// exactly one trailing separator is removed at the end.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first invalid field.
    pub fn discover(&self, params: &DiscoverParams) -> Result<String> {
        let mut url = format!("{}/discover/movie?", self.base_url);

        type Handler = fn(&str) -> Result<String>;
        let handlers: [(&Option<String>, Handler); 6] = [
            (&params.language, handle_language),
            (&params.year, handle_year),
            (&params.vote_average, handle_vote_average),
            (&params.vote_count, handle_vote_count),
            (&params.with_genres, |raw| {
                handle_genres(raw, GenreFilter::With)
            }),
            (&params.without_genres, |raw| {
                handle_genres(raw, GenreFilter::Without)
            }),
        ];
        for (field, handler) in handlers {
            if let Some(raw) = field.as_deref().filter(|s| !s.is_empty()) {
                url.push_str(&handler(raw)?);
            }
        }

        Ok(url.strip_suffix('&').unwrap_or(&url).to_owned())
    }
}

/// Strips surrounding quote/comma noise, then surrounding whitespace.
fn clean(raw: &str) -> &str {
    raw.trim_matches(|c| c == '"' || c == ',').trim()
}

/// `true` for the open-ended bound tokens.
fn is_comparison(token: &str) -> bool {
    token == "gte" || token == "lte"
}

fn handle_language(raw: &str) -> Result<String> {
    let code = clean(raw);
    if code.len() != 2 {
        bail!("validation error: language must be a 2-letter ISO 639-1 code (see {HELP_ISO639_1})");
    }
    Ok(format!("with_original_language={code}&"))
}

fn handle_year(raw: &str) -> Result<String> {
    let parts: Vec<&str> = clean(raw).split(',').collect();
    if parts.len() > 2 {
        bail!(r#"year format: use "2000", "2000,gte", "2000,lte", or "2000,2010""#);
    }
    let first = parts.first().copied().unwrap_or_default();
    let year = validate_year(first)?;
    let Some(second) = parts.get(1) else {
        return Ok(format!("primary_release_year={year}&"));
    };
    if is_comparison(second) {
        return Ok(format!("primary_release_date.{second}={year}-01-01&"));
    }
    let year2 = validate_year(second)?;
    Ok(format!(
        "primary_release_date.gte={year}-01-01&primary_release_date.lte={year2}-12-31&"
    ))
}

fn handle_vote_average(raw: &str) -> Result<String> {
    let parts: Vec<&str> = clean(raw).split(',').collect();
    if parts.len() != 2 {
        bail!(r#"vote average format: use "7.0,8.0", "7.5,gte" or "7.5,lte""#);
    }
    let first = parts.first().copied().unwrap_or_default();
    let second = parts.get(1).copied().unwrap_or_default();
    let val = validate_vote_average(first)?;
    if is_comparison(second) {
        return Ok(format!("vote_average.{second}={val}&"));
    }
    let val2 = validate_vote_average(second)?;
    Ok(format!("vote_average.gte={val}&vote_average.lte={val2}&"))
}

fn handle_vote_count(raw: &str) -> Result<String> {
    let parts: Vec<&str> = clean(raw).split(',').collect();
    if parts.len() > 2 {
        bail!(r#"vote count format: use "500,1000", "500,gte", or "500,lte""#);
    }
    let first = parts.first().copied().unwrap_or_default();
    let val = validate_vote_count(first)?;
    let Some(second) = parts.get(1) else {
        // A bare count is ambiguous; a range or comparator is required.
        bail!(r#"vote count format: use "500,1000", "500,gte", or "500,lte""#);
    };
    if is_comparison(second) {
        return Ok(format!("vote_count.{second}={val}&"));
    }
    let val2 = validate_vote_count(second)?;
    Ok(format!("vote_count.gte={val}&vote_count.lte={val2}&"))
}

fn handle_genres(raw: &str, filter: GenreFilter) -> Result<String> {
    let mut ids: Vec<String> = Vec::new();
    for name in clean(raw).split(',') {
        let id = genre_id(name)?;
        ids.push(id.to_string());
    }
    Ok(format!("{}_genres={}&", filter.key(), ids.join(",")))
}

/// Validates a 4-digit year within `[1888, current year]`.
///
/// Returns the input slice so the fragment reproduces it verbatim.
fn validate_year(part: &str) -> Result<&str> {
    let year: i32 = if part.len() == 4 {
        part.parse().ok()
    } else {
        None
    }
    .with_context(|| {
        format!(r#"year format: use "2000", "2000,2010", "2000,gte", or "2000,lte" (got {part:?})"#)
    })?;

    let current_year = Local::now().year();
    if !(EARLIEST_MOVIE..=current_year).contains(&year) {
        bail!("validation error: year must be between {EARLIEST_MOVIE} and {current_year}");
    }
    Ok(part)
}

/// Validates a vote average value within `[0, 10]`, returning the input slice.
fn validate_vote_average(part: &str) -> Result<&str> {
    let value: f64 = part
        .parse()
        .ok()
        .context(r#"validation error: vote average must be a float, e.g. "7.5""#)?;
    if !(MIN_VOTE_AVERAGE..=MAX_VOTE_AVERAGE).contains(&value) {
        bail!(r#"vote average format: use "7.0,8.0", "7.5,gte", or "7.5,lte""#);
    }
    Ok(part)
}

/// Validates a non-negative integer vote count, returning the input slice.
fn validate_vote_count(part: &str) -> Result<&str> {
    let count: i64 = part
        .parse()
        .ok()
        .context(r#"validation error: vote count must be an integer, e.g. "1000""#)?;
    if count < 0 {
        bail!("validation error: vote count must be >= 0");
    }
    Ok(part)
}
