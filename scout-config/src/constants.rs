use std::time::Duration;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_LANGUAGE: &str = "cs";

pub const DEFAULT_CINEMETA_BASE_URL: &str = "https://v3-cinemeta.strem.io";

pub const DEFAULT_ORACLE_ENDPOINT: &str =
    "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_ORACLE_MODEL: &str =
    "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_ORACLE_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_ORACLE_MAX_TOKENS: u32 = 150;
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEFAULT_FUSION_MAX_RESULTS: usize = 10;

/// Hard ceiling on a fused ranking; the oracle is asked for this many picks.
pub const MAX_FUSION_RESULTS: usize = 10;

/// Upper bound accepted for the oracle sampling temperature.
pub const MAX_ORACLE_TEMPERATURE: f32 = 2.0;
