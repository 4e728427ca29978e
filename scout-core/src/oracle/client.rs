//! OpenAI-compatible chat-completions oracle (Groq by default).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use scout_config::{Credential, OracleConfig};
use scout_model::Candidate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::RankingOracle;
use super::error::OracleError;
use super::prompt::render_prompt;

const ORACLE_NAME: &str = "chat-completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Ranking oracle over an OpenAI-compatible chat completions endpoint.
pub struct ChatCompletionsOracle {
    http: reqwest::Client,
    api_key: Credential,
    endpoint: Url,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl fmt::Debug for ChatCompletionsOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsOracle")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionsOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &OracleConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout(self.timeout)
        } else {
            OracleError::Transport(err)
        }
    }
}

#[async_trait]
impl RankingOracle for ChatCompletionsOracle {
    async fn rank_query(
        &self,
        candidates: &[Candidate],
        query: &str,
    ) -> Result<String, OracleError> {
        let api_key = self
            .api_key
            .expose()
            .ok_or(OracleError::MissingCredential)?;

        let prompt = render_prompt(candidates, query);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            oracle = ORACLE_NAME,
            model = %self.model,
            candidates = candidates.len(),
            query,
            "sending ranking request"
        );

        // The timeout covers the whole exchange, body included.
        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status));
        }

        let envelope: ChatResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                OracleError::Timeout(self.timeout)
            } else {
                OracleError::MalformedEnvelope(err.to_string())
            }
        })?;

        let reply = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                OracleError::MalformedEnvelope(
                    "missing choices[0].message.content".to_string(),
                )
            })?;

        let reply = reply.trim().to_string();
        debug!(oracle = ORACLE_NAME, reply = %reply, "received ranking reply");
        Ok(reply)
    }

    fn name(&self) -> &'static str {
        ORACLE_NAME
    }
}
