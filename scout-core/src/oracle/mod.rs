//! Ranking oracle: prompt rendering and the chat-completions client.

pub mod client;
pub mod error;
pub mod prompt;

use async_trait::async_trait;
use scout_model::Candidate;

pub use client::ChatCompletionsOracle;
pub use error::OracleError;
pub use prompt::render_prompt;

/// External service that picks the most relevant candidates for a query.
///
/// Implementations return the raw reply text; interpreting it is the
/// selection parser's job. Every failure is an `Err`, never a panic.
#[async_trait]
pub trait RankingOracle: Send + Sync {
    async fn rank_query(
        &self,
        candidates: &[Candidate],
        query: &str,
    ) -> Result<String, OracleError>;

    /// Oracle name for logging
    fn name(&self) -> &'static str;
}
