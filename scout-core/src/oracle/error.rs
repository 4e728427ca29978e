#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("oracle did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("oracle returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed oracle response: {0}")]
    MalformedEnvelope(String),

    #[error("oracle API key not configured")]
    MissingCredential,
}
