//! Shared configuration library for Scout.
//!
//! Configuration is layered: a TOML file wins over the process environment
//! (optionally seeded from a `.env` file), which wins over built-in defaults.
//! API credentials follow the same order and remember where they came from.
//! A missing credential is reported as a [`ConfigWarning`], never as an
//! error; the request that needs it degrades at call time instead.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::credential::{Credential, CredentialSource};
pub use models::{
    CinemetaConfig, Config, ConfigMetadata, FusionConfig, NoRelevantPolicy,
    OracleConfig, TmdbConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
