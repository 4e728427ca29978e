use serde::{Deserialize, Serialize};

use crate::util::{first_non_empty_var, non_empty_var};

use super::NoRelevantPolicy;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub cinemeta: FileCinemetaConfig,
    #[serde(default)]
    pub oracle: FileOracleConfig,
    #[serde(default)]
    pub fusion: FileFusionConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCinemetaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileOracleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Humantime string, e.g. `"15s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileFusionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_relevant_items: Option<NoRelevantPolicy>,
}

/// Environment-derived configuration values.
///
/// Numeric and duration values are kept raw so the loader can report a
/// precise error for a malformed variable instead of silently ignoring it.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_language: Option<String>,
    pub cinemeta_base_url: Option<String>,
    pub oracle_api_key: Option<String>,
    pub oracle_endpoint: Option<String>,
    pub oracle_model: Option<String>,
    pub oracle_temperature: Option<String>,
    pub oracle_max_tokens: Option<String>,
    pub oracle_timeout: Option<String>,
    pub fusion_max_results: Option<String>,
    pub fusion_no_relevant: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            tmdb_api_key: non_empty_var("TMDB_API_KEY"),
            tmdb_base_url: non_empty_var("TMDB_BASE_URL"),
            tmdb_language: non_empty_var("TMDB_LANGUAGE"),
            cinemeta_base_url: non_empty_var("CINEMETA_BASE_URL"),
            oracle_api_key: first_non_empty_var(&[
                "ORACLE_API_KEY",
                "GROQ_API_KEY",
            ]),
            oracle_endpoint: non_empty_var("ORACLE_ENDPOINT"),
            oracle_model: non_empty_var("ORACLE_MODEL"),
            oracle_temperature: non_empty_var("ORACLE_TEMPERATURE"),
            oracle_max_tokens: non_empty_var("ORACLE_MAX_TOKENS"),
            oracle_timeout: non_empty_var("ORACLE_TIMEOUT"),
            fusion_max_results: non_empty_var("FUSION_MAX_RESULTS"),
            fusion_no_relevant: non_empty_var("FUSION_NO_RELEVANT"),
        }
    }
}
