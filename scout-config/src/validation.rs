use crate::models::Config;
use crate::models::credential::CredentialSource;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

/// Non-fatal findings about a composed configuration.
pub fn collect_warnings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.tmdb.api_key.source() == CredentialSource::Missing {
        warnings.push_with_hint(
            "TMDB API key is not configured; TMDB lookups will fail and fall back to Cinemeta",
            "Set [tmdb] api_key in the config file or the TMDB_API_KEY environment variable",
        );
    }

    if config.oracle.api_key.source() == CredentialSource::Missing {
        warnings.push_with_hint(
            "Oracle API key is not configured; reranking will keep the caller's ordering",
            "Set [oracle] api_key in the config file or ORACLE_API_KEY / GROQ_API_KEY",
        );
    }

    warnings
}
