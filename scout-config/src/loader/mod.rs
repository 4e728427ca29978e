//! Composition of the file, environment and default layers into a
//! [`Config`].

pub mod error;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::constants::{
    DEFAULT_CINEMETA_BASE_URL, DEFAULT_FUSION_MAX_RESULTS,
    DEFAULT_ORACLE_ENDPOINT, DEFAULT_ORACLE_MAX_TOKENS, DEFAULT_ORACLE_MODEL,
    DEFAULT_ORACLE_TEMPERATURE, DEFAULT_ORACLE_TIMEOUT, DEFAULT_TMDB_BASE_URL,
    DEFAULT_TMDB_LANGUAGE, MAX_FUSION_RESULTS, MAX_ORACLE_TEMPERATURE,
};
use crate::models::credential::{Credential, CredentialSource};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    CinemetaConfig, Config, ConfigMetadata, FusionConfig, NoRelevantPolicy,
    OracleConfig, TmdbConfig,
};
use crate::util::{non_blank, parse_duration};
use crate::validation::{ConfigWarnings, collect_warnings};

use error::ConfigLoadError;

/// Result of a successful load: the effective configuration plus anything
/// worth telling the operator about.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// TOML file consulted before the environment. A path that does not exist
    /// is skipped, not treated as an error.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// `.env` file merged into the process environment before it is read.
    /// Variables already set in the process are not overridden.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Path this loader reads its TOML layer from, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose against an explicit environment snapshot instead of the
    /// process environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file, config_path) = self.read_config_file()?;
        let mut config = compose(file, env)?;
        config.metadata = ConfigMetadata {
            config_path,
            env_file_loaded: false,
        };

        log_credential("TMDB", &config.tmdb.api_key);
        log_credential("oracle", &config.oracle.api_key);

        let warnings = collect_warnings(&config);
        for warning in warnings.iter() {
            match &warning.hint {
                Some(hint) => warn!(hint = %hint, "{}", warning.message),
                None => warn!("{}", warning.message),
            }
        }

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let Some(path) = self.env_file.as_deref() else {
            return Ok(false);
        };
        if !path.exists() {
            debug!(path = %path.display(), "env file not found; skipping");
            return Ok(false);
        }
        dotenvy::from_path(path)?;
        Ok(true)
    }

    fn read_config_file(
        &self,
    ) -> Result<(FileConfig, Option<PathBuf>), ConfigLoadError> {
        let Some(path) = self.config_path.as_deref() else {
            return Ok((FileConfig::default(), None));
        };

        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let file = toml::from_str::<FileConfig>(&raw).map_err(
                    |source| ConfigLoadError::ConfigFileParse {
                        path: path.to_path_buf(),
                        source,
                    },
                )?;
                debug!(path = %path.display(), "loaded config file");
                Ok((file, Some(path.to_path_buf())))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; falling back to environment"
                );
                Ok((FileConfig::default(), None))
            }
            Err(source) => Err(ConfigLoadError::ConfigFileIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn log_credential(label: &str, credential: &Credential) {
    if credential.source() != CredentialSource::Missing {
        info!(source = %credential.source(), "{label} API key found");
    }
}

fn compose(file: FileConfig, env: EnvConfig) -> Result<Config, ConfigLoadError> {
    let tmdb = TmdbConfig {
        api_key: Credential::resolve(
            file.tmdb.api_key.as_deref(),
            env.tmdb_api_key.as_deref(),
        ),
        base_url: layered_url(
            "tmdb.base_url",
            file.tmdb.base_url,
            env.tmdb_base_url,
            DEFAULT_TMDB_BASE_URL,
        )?,
        language: non_blank(file.tmdb.language)
            .or_else(|| non_blank(env.tmdb_language))
            .unwrap_or_else(|| DEFAULT_TMDB_LANGUAGE.to_string()),
    };

    let cinemeta = CinemetaConfig {
        base_url: layered_url(
            "cinemeta.base_url",
            file.cinemeta.base_url,
            env.cinemeta_base_url,
            DEFAULT_CINEMETA_BASE_URL,
        )?,
    };

    let temperature = layered(
        "oracle.temperature",
        file.oracle.temperature,
        env.oracle_temperature.as_deref(),
        parse_from_str::<f32>,
    )?
    .unwrap_or(DEFAULT_ORACLE_TEMPERATURE);
    if !temperature.is_finite()
        || !(0.0..=MAX_ORACLE_TEMPERATURE).contains(&temperature)
    {
        return Err(ConfigLoadError::InvalidValue {
            field: "oracle.temperature",
            reason: format!(
                "{temperature} is outside 0.0..={MAX_ORACLE_TEMPERATURE}"
            ),
        });
    }

    let max_tokens = layered(
        "oracle.max_tokens",
        file.oracle.max_tokens,
        env.oracle_max_tokens.as_deref(),
        parse_from_str::<u32>,
    )?
    .unwrap_or(DEFAULT_ORACLE_MAX_TOKENS);
    ensure_positive("oracle.max_tokens", max_tokens as u64)?;

    let file_timeout = match non_blank(file.oracle.timeout) {
        Some(raw) => Some(parse_timeout(&raw)?),
        None => None,
    };
    let timeout = layered(
        "oracle.timeout",
        file_timeout,
        env.oracle_timeout.as_deref(),
        |raw| {
            parse_duration(raw).ok_or_else(|| format!("`{raw}` is not a duration"))
        },
    )?
    .unwrap_or(DEFAULT_ORACLE_TIMEOUT);
    ensure_positive("oracle.timeout", timeout.as_millis() as u64)?;

    let oracle = OracleConfig {
        api_key: Credential::resolve(
            file.oracle.api_key.as_deref(),
            env.oracle_api_key.as_deref(),
        ),
        endpoint: layered_url(
            "oracle.endpoint",
            file.oracle.endpoint,
            env.oracle_endpoint,
            DEFAULT_ORACLE_ENDPOINT,
        )?,
        model: non_blank(file.oracle.model)
            .or_else(|| non_blank(env.oracle_model))
            .unwrap_or_else(|| DEFAULT_ORACLE_MODEL.to_string()),
        temperature,
        max_tokens,
        timeout,
    };

    let max_results = layered(
        "fusion.max_results",
        file.fusion.max_results,
        env.fusion_max_results.as_deref(),
        parse_from_str::<usize>,
    )?
    .unwrap_or(DEFAULT_FUSION_MAX_RESULTS);
    ensure_positive("fusion.max_results", max_results as u64)?;
    if max_results > MAX_FUSION_RESULTS {
        return Err(ConfigLoadError::InvalidValue {
            field: "fusion.max_results",
            reason: format!("must be at most {MAX_FUSION_RESULTS}"),
        });
    }

    let fusion = FusionConfig {
        max_results,
        no_relevant_items: layered(
            "fusion.no_relevant_items",
            file.fusion.no_relevant_items,
            env.fusion_no_relevant.as_deref(),
            NoRelevantPolicy::from_str,
        )?
        .unwrap_or_default(),
    };

    Ok(Config {
        tmdb,
        cinemeta,
        oracle,
        fusion,
        metadata: ConfigMetadata::default(),
    })
}

/// File value if present, otherwise the parsed environment value.
fn layered<T, F>(
    field: &'static str,
    file: Option<T>,
    env: Option<&str>,
    parse: F,
) -> Result<Option<T>, ConfigLoadError>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    if file.is_some() {
        return Ok(file);
    }
    match env {
        Some(raw) => parse(raw.trim())
            .map(Some)
            .map_err(|reason| ConfigLoadError::InvalidValue { field, reason }),
        None => Ok(None),
    }
}

fn layered_url(
    field: &'static str,
    file: Option<String>,
    env: Option<String>,
    default: &str,
) -> Result<Url, ConfigLoadError> {
    let raw = non_blank(file)
        .or_else(|| non_blank(env))
        .unwrap_or_else(|| default.to_string());
    let url = Url::parse(&raw)
        .map_err(|source| ConfigLoadError::InvalidUrl { field, source })?;
    if url.cannot_be_a_base() {
        return Err(ConfigLoadError::InvalidValue {
            field,
            reason: format!("{raw} cannot be used as a base URL"),
        });
    }
    Ok(url)
}

fn parse_from_str<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|err| format!("`{raw}` could not be parsed: {err}"))
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    parse_duration(raw).ok_or_else(|| ConfigLoadError::InvalidValue {
        field: "oracle.timeout",
        reason: format!("`{raw}` is not a duration"),
    })
}

fn ensure_positive(
    field: &'static str,
    value: u64,
) -> Result<(), ConfigLoadError> {
    if value == 0 {
        return Err(ConfigLoadError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
