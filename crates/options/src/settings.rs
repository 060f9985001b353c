use crate::config::{LogLevel, duration};
use crate::error::format_context;
use crate::option::{
    ServiceOption, with_cache_enabled, with_log_level, with_retries, with_timeout,
};
use config::{Case, Config, Environment, File};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Prefix of environment overrides, e.g. `TUNER__RETRIES=5`.
pub const ENV_PREFIX: &str = "TUNER";
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading [`ServiceSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Settings file not found{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub trait SettingsErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SettingsError>;
}

impl<T> SettingsErrorExt<T> for Result<T, config::ConfigError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SettingsError> {
        self.map_err(|source| SettingsError::Config { source, context: Some(context.into()) })
    }
}

impl From<config::ConfigError> for SettingsError {
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

/// Externally supplied service settings. Every field is optional; absent
/// fields leave the default (or a later option) in charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub address: Option<String>,
    #[serde(deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
    pub cache_enabled: Option<bool>,
    pub log_level: Option<LogLevel>,
}

impl ServiceSettings {
    /// Translates the present fields into options, in the order timeout,
    /// retries, cache, log level.
    ///
    /// Options appended after these override them.
    pub fn to_options(&self) -> Vec<ServiceOption> {
        let mut options = Vec::with_capacity(4);

        if let Some(timeout) = self.timeout {
            options.push(with_timeout(timeout));
        }
        if let Some(retries) = self.retries {
            options.push(with_retries(retries));
        }
        if let Some(enabled) = self.cache_enabled {
            options.push(with_cache_enabled(enabled));
        }
        if let Some(level) = &self.log_level {
            options.push(with_log_level(level.clone()));
        }

        options
    }
}

/// Loads [`ServiceSettings`] from an optional file overlaid with environment variables.
///
/// 1. **File**: when `path` is given it must exist; the format (TOML, JSON, YAML, ...)
///    follows the extension.
/// 2. **Environment**: variables prefixed with `TUNER__` override file values
///    (e.g. `TUNER__CACHE_ENABLED=false` maps to `cache_enabled`).
///
/// # Errors
///
/// - [`SettingsError::FileNotFound`] if `path` does not exist.
/// - [`SettingsError::Config`] if a source cannot be read or a value does not
///   fit its field (including malformed durations).
pub fn load_settings(path: Option<&Path>) -> Result<ServiceSettings, SettingsError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(SettingsError::FileNotFound {
                message: path.display().to_string().into(),
                context: None,
            });
        }
        info!("Loading settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .convert_case(Case::Snake),
        )
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<ServiceSettings>()
        .context("Failed to deserialize settings")?;

    Ok(settings)
}
