use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use super::traits::ProviderError;

/// Send `request` and decode a successful JSON body.
pub(crate) async fn get_json<T>(request: RequestBuilder) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(match status.as_u16() {
            401 => ProviderError::InvalidApiKey,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited,
            _ => ProviderError::Status(status),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| ProviderError::ParseError(err.to_string()))
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn join_segments<'a, I>(
    base: &Url,
    segments: I,
) -> Result<Url, ProviderError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProviderError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
