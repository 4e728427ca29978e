use std::io::Write;
use std::time::Duration;

use scout_config::models::sources::EnvConfig;
use scout_config::{
    ConfigLoadError, ConfigLoader, CredentialSource, NoRelevantPolicy,
};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn file_credentials_take_precedence_over_environment() {
    let file = write_config(
        r#"
[tmdb]
api_key = "file-tmdb"

[oracle]
api_key = "file-oracle"
"#,
    );
    let env = EnvConfig {
        tmdb_api_key: Some("env-tmdb".into()),
        oracle_api_key: Some("env-oracle".into()),
        ..EnvConfig::default()
    };

    let load = ConfigLoader::new()
        .with_config_path(file.path())
        .load_with_env(env)
        .expect("config loads");

    assert_eq!(load.config.tmdb.api_key.expose(), Some("file-tmdb"));
    assert_eq!(load.config.tmdb.api_key.source(), CredentialSource::File);
    assert_eq!(load.config.oracle.api_key.expose(), Some("file-oracle"));
    assert!(load.warnings.is_empty());
    assert_eq!(load.config.metadata.config_path.as_deref(), Some(file.path()));
}

#[test]
fn environment_fills_in_what_the_file_leaves_out() {
    let file = write_config(
        r#"
[oracle]
model = "llama-from-file"
"#,
    );
    let env = EnvConfig {
        oracle_api_key: Some("env-oracle".into()),
        oracle_model: Some("llama-from-env".into()),
        oracle_timeout: Some("2500ms".into()),
        fusion_no_relevant: Some("fallback".into()),
        ..EnvConfig::default()
    };

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load_with_env(env)
        .expect("config loads")
        .config;

    assert_eq!(config.oracle.model, "llama-from-file");
    assert_eq!(
        config.oracle.api_key.source(),
        CredentialSource::Environment
    );
    assert_eq!(config.oracle.timeout, Duration::from_millis(2500));
    assert_eq!(config.fusion.no_relevant_items, NoRelevantPolicy::Fallback);
}

#[test]
fn missing_file_and_keys_degrade_to_warnings() {
    let dir = tempfile::tempdir().expect("temp dir");
    let load = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load_with_env(EnvConfig::default())
        .expect("missing file is not fatal");

    assert!(load.config.metadata.config_path.is_none());
    assert_eq!(load.warnings.len(), 2);
    assert_eq!(load.config.tmdb.api_key.source(), CredentialSource::Missing);
    assert_eq!(load.config.fusion.max_results, 10);
}

#[test]
fn malformed_toml_is_reported() {
    let file = write_config("[tmdb\napi_key = ");
    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load_with_env(EnvConfig::default())
        .expect_err("malformed file must fail");

    assert!(matches!(err, ConfigLoadError::ConfigFileParse { .. }));
}

#[test]
fn invalid_environment_values_are_rejected() {
    let env = EnvConfig {
        oracle_timeout: Some("whenever".into()),
        ..EnvConfig::default()
    };
    let err = ConfigLoader::new()
        .load_with_env(env)
        .expect_err("bad duration must fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { field: "oracle.timeout", .. }
    ));

    let env = EnvConfig {
        fusion_max_results: Some("0".into()),
        ..EnvConfig::default()
    };
    let err = ConfigLoader::new()
        .load_with_env(env)
        .expect_err("zero max results must fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { field: "fusion.max_results", .. }
    ));
}

#[test]
fn max_results_above_the_ceiling_is_rejected() {
    let env = EnvConfig {
        fusion_max_results: Some("25".into()),
        ..EnvConfig::default()
    };
    let err = ConfigLoader::new()
        .load_with_env(env)
        .expect_err("25 results exceeds the ceiling");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { field: "fusion.max_results", .. }
    ));

    let file = write_config(
        r#"
[fusion]
max_results = 11
"#,
    );
    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load_with_env(EnvConfig::default())
        .expect_err("11 results exceeds the ceiling");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { field: "fusion.max_results", .. }
    ));

    let env = EnvConfig {
        fusion_max_results: Some("10".into()),
        ..EnvConfig::default()
    };
    let config = ConfigLoader::new()
        .load_with_env(env)
        .expect("ten is allowed")
        .config;
    assert_eq!(config.fusion.max_results, 10);
}

#[test]
fn invalid_base_url_is_rejected() {
    let env = EnvConfig {
        tmdb_base_url: Some("not a url".into()),
        ..EnvConfig::default()
    };
    let err = ConfigLoader::new()
        .load_with_env(env)
        .expect_err("bad url must fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidUrl { field: "tmdb.base_url", .. }
    ));
}

#[test]
fn file_overrides_provider_settings() {
    let file = write_config(
        r#"
[tmdb]
base_url = "http://127.0.0.1:9000/3"
language = "en-US"

[cinemeta]
base_url = "http://127.0.0.1:9001"

[oracle]
temperature = 0.0
max_tokens = 64
timeout = "3s"

[fusion]
max_results = 5
no_relevant_items = "empty"
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load_with_env(EnvConfig::default())
        .expect("config loads")
        .config;

    assert_eq!(config.tmdb.base_url.as_str(), "http://127.0.0.1:9000/3");
    assert_eq!(config.tmdb.language, "en-US");
    assert_eq!(config.cinemeta.base_url.as_str(), "http://127.0.0.1:9001/");
    assert_eq!(config.oracle.temperature, 0.0);
    assert_eq!(config.oracle.max_tokens, 64);
    assert_eq!(config.oracle.timeout, Duration::from_secs(3));
    assert_eq!(config.fusion.max_results, 5);
}
