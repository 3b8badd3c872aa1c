//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::rate_limiter::RequestPacer;
use super::types::{
    DiscoverMovieParams, SearchPersonParams, TmdbCredits, TmdbDiscoverMovieResponse,
    TmdbErrorResponse, TmdbGenreListResponse, TmdbReviewsResponse, TmdbSearchPersonResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff duration between retries.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Request pacer shared by concurrent calls.
    pacer: Arc<Mutex<RequestPacer>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            min_interval: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
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

    /// Sets the minimum spacing between request starts (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
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

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let pacer = self
            .min_interval
            .map_or_else(RequestPacer::default_interval, RequestPacer::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            pacer: Arc::new(Mutex::new(pacer)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Waits for this caller's request slot.
    async fn pace(&self) {
        let wait = self.pacer.lock().await.reserve(Instant::now());
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    /// Sends a GET request with Bearer auth, query params, and pacing.
    /// Retries up to `MAX_RETRIES` times on HTTP 429.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            self.pace().await;

            let request = self
                .http_client
                .get(url.clone())
                .bearer_auth(&self.api_token)
                .query(query)
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(url = %request.url(), "TMDB API request");

            let response = self
                .http_client
                .execute(request)
                .await
                .with_context(|| format!("request failed: {path}"))?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                retries = retries.saturating_add(1);
                if retries > MAX_RETRIES {
                    bail!("TMDB API rate limit exceeded after {MAX_RETRIES} retries: {path}");
                }
                tracing::warn!(
                    retry = retries,
                    max_retries = MAX_RETRIES,
                    "TMDB API rate limited (429). Retrying..."
                );
                tokio::time::sleep(RETRY_BACKOFF.saturating_mul(retries)).await;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                    bail!(
                        "TMDB API error (HTTP {}): code={}, message={}",
                        status,
                        error_response.status_code,
                        error_response.status_message,
                    );
                }
                bail!("TMDB API error (HTTP {status}): {body}");
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            return serde_json::from_str(&body)
                .with_context(|| format!("failed to decode JSON response: {path}"));
        }
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn genre_movie_list(&self, language: &str) -> Result<TmdbGenreListResponse> {
        let query = [("language", String::from(language))];
        self.get_json("genre/movie/list", &query).await
    }

    #[instrument(skip_all)]
    async fn search_person(&self, params: &SearchPersonParams) -> Result<TmdbSearchPersonResponse> {
        let query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        self.get_json("search/person", &query).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn discover_movie(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbDiscoverMovieResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("sort_by", params.sort_by.clone()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(genres) = params.genres_param() {
            query.push(("with_genres", genres));
        }
        if let Some(gte) = params.release_date_gte {
            query.push(("release_date.gte", gte.format("%Y-%m-%d").to_string()));
        }
        if let Some(lte) = params.release_date_lte {
            query.push(("release_date.lte", lte.format("%Y-%m-%d").to_string()));
        }
        if let Some(cast) = params.with_cast {
            query.push(("with_cast", cast.to_string()));
        }
        if let Some(crew) = params.with_crew {
            query.push(("with_crew", crew.to_string()));
        }
        if let Some(ref region) = params.region {
            query.push(("region", region.clone()));
        }

        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_credits(&self, movie_id: u64, language: &str) -> Result<TmdbCredits> {
        let path = format!("movie/{movie_id}/credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_reviews(
        &self,
        movie_id: u64,
        language: &str,
        page: u32,
    ) -> Result<TmdbReviewsResponse> {
        let path = format!("movie/{movie_id}/reviews");
        let query = [
            ("language", String::from(language)),
            ("page", page.to_string()),
        ];
        self.get_json(&path, &query).await
    }
}
