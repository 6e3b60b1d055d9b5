//! Client for the TMDB movie listings.
//!
//! Each call to [`TmdbClient::fetch`] makes exactly one request and maps the first page of
//! results into [`MovieRecord`]s. Nothing is cached and nothing is retried.

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::{
    config::TmdbConfig,
    dates::format_release_date,
    error::{ConfigError, FetchError, MappingError},
    genres::resolve_genres,
    models::{Endpoint, MovieRecord},
};

/// Only the first this many results of a page are kept.
pub const MAX_RESULTS: usize = 10;

pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("TMDB_API_KEY"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key,
        })
    }

    /// Fetch the first page of a listing, truncated to [`MAX_RESULTS`] entries.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Vec<MovieRecord>, FetchError> {
        let span = info_span!("tmdb_fetch", endpoint = endpoint.path());
        self.fetch_page(endpoint).instrument(span).await
    }

    async fn fetch_page(&self, endpoint: Endpoint) -> Result<Vec<MovieRecord>, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        let response = self
            .client
            .get(&url)
            .query(&[
                ("language", "en-US"),
                ("include_adult", "false"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(why) => {
                    debug!(%status, "Failed to read the error body: {}", why);
                    String::new()
                }
            };
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await?;
        if status != StatusCode::OK {
            // Any other 2xx is unexpected from a listing endpoint; report it and move on
            warn!(%status, %body, "Unexpected success status from TMDB");
            return Ok(Vec::new());
        }

        let movies = parse_listing(&body)?;
        debug!(count = movies.len(), "Fetched movies");
        Ok(movies)
    }
}

/// Map a listing response body into movie records.
///
/// A body without a `results` key is an empty listing. Any malformed result fails the whole
/// page, so callers never see a partial list.
pub fn parse_listing(body: &str) -> Result<Vec<MovieRecord>, FetchError> {
    let payload: Value = serde_json::from_str(body).map_err(MappingError::InvalidJson)?;
    let payload = payload.as_object().ok_or(MappingError::NotAnObject)?;
    let results = match payload.get("results") {
        None => return Ok(Vec::new()),
        Some(Value::Array(results)) => results,
        Some(_) => return Err(MappingError::ResultsNotAnArray.into()),
    };

    results
        .iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(index, result)| {
            RawMovie::deserialize(result)
                .map_err(|source| MappingError::InvalidResult { index, source })?
                .into_record()
        })
        .collect()
}

/// One entry of `results` as TMDB sends it. Extra keys are ignored.
#[derive(Debug, Deserialize)]
struct RawMovie {
    id: u64,
    title: String,
    overview: String,
    popularity: f64,
    release_date: String,
    genre_ids: Vec<u64>,
    // Required, but may be null
    #[serde(deserialize_with = "Option::deserialize")]
    backdrop_path: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    poster_path: Option<String>,
}

impl RawMovie {
    fn into_record(self) -> Result<MovieRecord, FetchError> {
        Ok(MovieRecord {
            release_date: format_release_date(&self.release_date)?,
            genres: resolve_genres(&self.genre_ids),
            id: self.id,
            title: self.title,
            overview: self.overview,
            popularity: self.popularity,
            backdrop_path: self.backdrop_path,
            poster_path: self.poster_path,
        })
    }
}
