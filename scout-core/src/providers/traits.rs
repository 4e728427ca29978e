use async_trait::async_trait;
use scout_model::{ContentKind, MetadataRecord};
use tracing::{debug, warn};

/// Failures inside a provider adapter. They never cross the
/// [`MetadataProvider`] boundary; adapters log them and report no result.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Base URL {0} cannot take path segments")]
    InvalidBaseUrl(String),
}

/// One external metadata source, normalized into [`MetadataRecord`].
///
/// `lookup` never fails: transport errors, bad statuses and malformed bodies
/// all come back as `None` so the resolver can move on to the next adapter.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up `external_id` as content of the given kind.
    async fn lookup(
        &self,
        kind: ContentKind,
        external_id: &str,
    ) -> Option<MetadataRecord>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Collapse an adapter's internal result into the trait contract.
pub(crate) fn settle(
    provider: &'static str,
    kind: ContentKind,
    external_id: &str,
    result: Result<Option<MetadataRecord>, ProviderError>,
) -> Option<MetadataRecord> {
    match result {
        Ok(Some(record)) if !record.is_empty() => Some(record),
        Ok(_) | Err(ProviderError::NotFound) => {
            debug!(provider, %kind, id = external_id, "provider has no result");
            None
        }
        Err(err) => {
            warn!(
                provider,
                %kind,
                id = external_id,
                error = %err,
                "provider lookup failed"
            );
            None
        }
    }
}
