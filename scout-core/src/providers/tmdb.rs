//! TMDB `find` endpoint adapter.
//!
//! Looks content up by its IMDb id and reads the first movie or TV result.
//! Authentication uses a v4 read-access token as a bearer header.

use std::fmt;

use async_trait::async_trait;
use scout_config::{Credential, TmdbConfig};
use scout_model::{CompositeId, ContentKind, MetadataRecord};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::http::{get_json, join_segments};
use super::traits::{MetadataProvider, ProviderError, settle};

const PROVIDER_NAME: &str = "tmdb";
const EXTERNAL_SOURCE: &str = "imdb_id";

#[derive(Debug, Default, Deserialize)]
struct TmdbFindResponse {
    #[serde(default)]
    movie_results: Vec<TmdbMovieResult>,
    #[serde(default)]
    tv_results: Vec<TmdbTvResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    title: Option<String>,
    original_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvResult {
    name: Option<String>,
    original_name: Option<String>,
}

/// TMDB lookups by IMDb id.
pub struct TmdbProvider {
    http: reqwest::Client,
    api_key: Credential,
    base_url: Url,
    language: String,
}

impl fmt::Debug for TmdbProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbProvider")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl TmdbProvider {
    pub fn new(config: &TmdbConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Share an existing HTTP client (and its connection pool).
    pub fn with_client(config: &TmdbConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            language: config.language.clone(),
        }
    }

    async fn find(&self, imdb_id: &str) -> Result<TmdbFindResponse, ProviderError> {
        let api_key = self.api_key.expose().ok_or(ProviderError::MissingApiKey)?;
        let url = join_segments(&self.base_url, ["find", imdb_id])?;
        debug!(provider = PROVIDER_NAME, %url, "TMDB find request");

        let request = self
            .http
            .get(url)
            .query(&[
                ("external_source", EXTERNAL_SOURCE),
                ("language", self.language.as_str()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(api_key);

        get_json(request).await
    }

    async fn find_movie(
        &self,
        imdb_id: &str,
    ) -> Result<Option<MetadataRecord>, ProviderError> {
        let response = self.find(imdb_id).await?;
        Ok(response.movie_results.into_iter().next().and_then(|movie| {
            movie
                .title
                .map(|title| MetadataRecord::movie(title, movie.original_title))
        }))
    }

    async fn find_episode(
        &self,
        id: &CompositeId,
    ) -> Result<Option<MetadataRecord>, ProviderError> {
        let response = self.find(&id.base_id).await?;
        Ok(response.tv_results.into_iter().next().and_then(|show| {
            show.name
                .map(|name| MetadataRecord::episode(name, show.original_name, id))
        }))
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    async fn lookup(
        &self,
        kind: ContentKind,
        external_id: &str,
    ) -> Option<MetadataRecord> {
        let result = match kind {
            ContentKind::Movie => self.find_movie(external_id).await,
            ContentKind::Series => {
                let Some(id) = CompositeId::parse(external_id) else {
                    debug!(
                        provider = PROVIDER_NAME,
                        id = external_id,
                        "series id is not base:season:episode; skipping"
                    );
                    return None;
                };
                self.find_episode(&id).await
            }
        };

        settle(PROVIDER_NAME, kind, external_id, result)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
