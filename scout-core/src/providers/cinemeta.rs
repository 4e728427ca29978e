//! Cinemeta adapter, the credential-free fallback.

use async_trait::async_trait;
use scout_config::CinemetaConfig;
use scout_model::{CompositeId, ContentKind, MetadataRecord};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::http::{get_json, join_segments};
use super::traits::{MetadataProvider, ProviderError, settle};

const PROVIDER_NAME: &str = "cinemeta";

#[derive(Debug, Deserialize)]
struct CinemetaResponse {
    meta: Option<CinemetaMeta>,
}

#[derive(Debug, Deserialize)]
struct CinemetaMeta {
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CinemetaProvider {
    http: reqwest::Client,
    base_url: Url,
}

impl CinemetaProvider {
    pub fn new(config: &CinemetaConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &CinemetaConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
        }
    }

    /// Fetch the title for `id`; Cinemeta has no original-language title.
    async fn meta_name(
        &self,
        kind: ContentKind,
        id: &str,
    ) -> Result<Option<String>, ProviderError> {
        let file = format!("{id}.json");
        let url =
            join_segments(&self.base_url, ["meta", kind.as_str(), file.as_str()])?;
        debug!(provider = PROVIDER_NAME, %url, "Cinemeta meta request");

        let response: CinemetaResponse = get_json(self.http.get(url)).await?;
        Ok(response.meta.and_then(|meta| meta.name))
    }
}

#[async_trait]
impl MetadataProvider for CinemetaProvider {
    async fn lookup(
        &self,
        kind: ContentKind,
        external_id: &str,
    ) -> Option<MetadataRecord> {
        let result = match kind {
            ContentKind::Movie => self
                .meta_name(kind, external_id)
                .await
                .map(|name| name.map(|name| MetadataRecord::movie(name, None))),
            ContentKind::Series => {
                let Some(id) = CompositeId::parse(external_id) else {
                    debug!(
                        provider = PROVIDER_NAME,
                        id = external_id,
                        "series id is not base:season:episode; skipping"
                    );
                    return None;
                };
                self.meta_name(kind, &id.base_id).await.map(|name| {
                    name.map(|name| MetadataRecord::episode(name, None, &id))
                })
            }
        };

        settle(PROVIDER_NAME, kind, external_id, result)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
