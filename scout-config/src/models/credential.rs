use std::fmt;

use zeroize::Zeroizing;

/// Where an API credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read from the TOML configuration file.
    File,
    /// Read from the process environment (including a loaded `.env`).
    Environment,
    /// Not configured anywhere; calls that need it will fail at the
    /// transport layer and degrade.
    Missing,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::File => f.write_str("config file"),
            CredentialSource::Environment => f.write_str("environment"),
            CredentialSource::Missing => f.write_str("missing"),
        }
    }
}

/// An API secret together with its provenance.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct Credential {
    value: Option<Zeroizing<String>>,
    source: CredentialSource,
}

impl Credential {
    pub fn from_file(value: impl Into<String>) -> Self {
        Self {
            value: Some(Zeroizing::new(value.into())),
            source: CredentialSource::File,
        }
    }

    pub fn from_env(value: impl Into<String>) -> Self {
        Self {
            value: Some(Zeroizing::new(value.into())),
            source: CredentialSource::Environment,
        }
    }

    pub fn missing() -> Self {
        Self {
            value: None,
            source: CredentialSource::Missing,
        }
    }

    /// File value first, environment second. Blank values count as absent.
    pub fn resolve(file: Option<&str>, env: Option<&str>) -> Self {
        fn pick(raw: Option<&str>) -> Option<&str> {
            raw.map(str::trim).filter(|value| !value.is_empty())
        }

        if let Some(value) = pick(file) {
            return Self::from_file(value);
        }
        if let Some(value) = pick(env) {
            return Self::from_env(value);
        }
        Self::missing()
    }

    pub fn expose(&self) -> Option<&str> {
        self.value.as_deref().map(String::as_str)
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::missing()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_value_wins_over_environment() {
        let credential = Credential::resolve(Some("from-file"), Some("from-env"));
        assert_eq!(credential.expose(), Some("from-file"));
        assert_eq!(credential.source(), CredentialSource::File);
    }

    #[test]
    fn blank_file_value_falls_through_to_environment() {
        let credential = Credential::resolve(Some("  "), Some("from-env"));
        assert_eq!(credential.expose(), Some("from-env"));
        assert_eq!(credential.source(), CredentialSource::Environment);
    }

    #[test]
    fn absent_everywhere_is_missing() {
        let credential = Credential::resolve(None, Some(""));
        assert!(!credential.is_present());
        assert_eq!(credential.source(), CredentialSource::Missing);
    }

    #[test]
    fn debug_output_redacts_secret() {
        let credential = Credential::from_env("super-secret");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
