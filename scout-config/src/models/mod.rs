pub mod credential;
pub mod sources;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_CINEMETA_BASE_URL, DEFAULT_FUSION_MAX_RESULTS,
    DEFAULT_ORACLE_ENDPOINT, DEFAULT_ORACLE_MAX_TOKENS, DEFAULT_ORACLE_MODEL,
    DEFAULT_ORACLE_TEMPERATURE, DEFAULT_ORACLE_TIMEOUT, DEFAULT_TMDB_BASE_URL,
    DEFAULT_TMDB_LANGUAGE,
};

use credential::Credential;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub cinemeta: CinemetaConfig,
    pub oracle: OracleConfig,
    pub fusion: FusionConfig,
    pub metadata: ConfigMetadata,
}

/// Primary structured metadata provider.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Credential,
    pub base_url: Url,
    /// Language requested for localized titles.
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: Credential::missing(),
            base_url: default_url(DEFAULT_TMDB_BASE_URL),
            language: DEFAULT_TMDB_LANGUAGE.to_string(),
        }
    }
}

/// Credential-free fallback metadata provider.
#[derive(Debug, Clone)]
pub struct CinemetaConfig {
    pub base_url: Url,
}

impl Default for CinemetaConfig {
    fn default() -> Self {
        Self {
            base_url: default_url(DEFAULT_CINEMETA_BASE_URL),
        }
    }
}

/// Chat-completions ranking oracle.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: Credential,
    pub endpoint: Url,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: Credential::missing(),
            endpoint: default_url(DEFAULT_ORACLE_ENDPOINT),
            model: DEFAULT_ORACLE_MODEL.to_string(),
            temperature: DEFAULT_ORACLE_TEMPERATURE,
            max_tokens: DEFAULT_ORACLE_MAX_TOKENS,
            timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FusionConfig {
    /// Hard cap on the length of a fused ranking.
    pub max_results: usize,
    pub no_relevant_items: NoRelevantPolicy,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_FUSION_MAX_RESULTS,
            no_relevant_items: NoRelevantPolicy::default(),
        }
    }
}

/// What fusion returns when the oracle explicitly reports that nothing is
/// relevant (or replies with nothing at all).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoRelevantPolicy {
    /// Honor the oracle and return an empty ranking.
    #[default]
    #[serde(alias = "return_empty")]
    Empty,
    /// Ignore the signal and return the caller's top candidates.
    #[serde(alias = "keep_fallback")]
    Fallback,
}

impl FromStr for NoRelevantPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "return_empty" => Ok(NoRelevantPolicy::Empty),
            "fallback" | "keep_fallback" => Ok(NoRelevantPolicy::Fallback),
            other => Err(format!(
                "expected `empty` or `fallback`, got `{other}`"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

fn default_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in default URL should parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.tmdb.language, "cs");
        assert_eq!(config.oracle.max_tokens, 150);
        assert_eq!(config.oracle.timeout, Duration::from_secs(15));
        assert_eq!(config.fusion.max_results, 10);
        assert_eq!(config.fusion.no_relevant_items, NoRelevantPolicy::Empty);
        assert!(!config.tmdb.api_key.is_present());
    }

    #[test]
    fn policy_parses_both_spellings() {
        assert_eq!("fallback".parse(), Ok(NoRelevantPolicy::Fallback));
        assert_eq!("Return_Empty".parse(), Ok(NoRelevantPolicy::Empty));
        assert!("sometimes".parse::<NoRelevantPolicy>().is_err());
    }
}
