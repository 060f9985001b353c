use crate::config::{LogLevel, ServiceConfig};
use std::fmt;
use std::time::Duration;
use tracing::trace;

/// One pending write to a single [`ServiceConfig`] field.
///
/// Options never read the configuration they are applied to, so a sequence
/// of them resolves field by field: the last option targeting a field wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOption {
    Timeout(Duration),
    Retries(u32),
    CacheEnabled(bool),
    LogLevel(LogLevel),
}

/// The field a [`ServiceOption`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Timeout,
    Retries,
    CacheEnabled,
    LogLevel,
}

impl ConfigField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Retries => "retries",
            Self::CacheEnabled => "cache_enabled",
            Self::LogLevel => "log_level",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServiceOption {
    /// Writes the carried value into `config`, overwriting whatever was there.
    pub fn apply(self, config: &mut ServiceConfig) {
        match self {
            Self::Timeout(timeout) => config.timeout = timeout,
            Self::Retries(retries) => config.retries = retries,
            Self::CacheEnabled(enabled) => config.cache_enabled = enabled,
            Self::LogLevel(level) => config.log_level = level,
        }
    }

    pub const fn field(&self) -> ConfigField {
        match self {
            Self::Timeout(_) => ConfigField::Timeout,
            Self::Retries(_) => ConfigField::Retries,
            Self::CacheEnabled(_) => ConfigField::CacheEnabled,
            Self::LogLevel(_) => ConfigField::LogLevel,
        }
    }
}

/// Sets the request timeout.
pub const fn with_timeout(timeout: Duration) -> ServiceOption {
    ServiceOption::Timeout(timeout)
}

/// Sets the number of retries.
pub const fn with_retries(retries: u32) -> ServiceOption {
    ServiceOption::Retries(retries)
}

/// Enables or disables caching.
pub const fn with_cache_enabled(enabled: bool) -> ServiceOption {
    ServiceOption::CacheEnabled(enabled)
}

/// Sets the logging level. Any string is accepted.
pub fn with_log_level(level: impl Into<LogLevel>) -> ServiceOption {
    ServiceOption::LogLevel(level.into())
}

/// Resolves `options` over [`ServiceConfig::DEFAULT`] in iteration order.
pub fn apply_options<I>(options: I) -> ServiceConfig
where
    I: IntoIterator<Item = ServiceOption>,
{
    options.into_iter().collect()
}

impl Extend<ServiceOption> for ServiceConfig {
    fn extend<I: IntoIterator<Item = ServiceOption>>(&mut self, options: I) {
        for option in options {
            trace!(field = %option.field(), "Applying service option");
            option.apply(self);
        }
    }
}

impl FromIterator<ServiceOption> for ServiceConfig {
    fn from_iter<I: IntoIterator<Item = ServiceOption>>(options: I) -> Self {
        let mut config = Self::DEFAULT;
        config.extend(options);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RETRIES;

    #[test]
    fn each_option_writes_only_its_field() {
        let cases = [
            (with_timeout(Duration::from_secs(5)), ConfigField::Timeout),
            (with_retries(9), ConfigField::Retries),
            (with_cache_enabled(false), ConfigField::CacheEnabled),
            (with_log_level("warn"), ConfigField::LogLevel),
        ];

        for (option, field) in cases {
            assert_eq!(option.field(), field);

            let mut config = ServiceConfig::DEFAULT;
            option.clone().apply(&mut config);

            assert_eq!(
                config.timeout == ServiceConfig::DEFAULT.timeout,
                field != ConfigField::Timeout,
                "{option:?}"
            );
            assert_eq!(
                config.retries == ServiceConfig::DEFAULT.retries,
                field != ConfigField::Retries,
                "{option:?}"
            );
            assert_eq!(
                config.cache_enabled == ServiceConfig::DEFAULT.cache_enabled,
                field != ConfigField::CacheEnabled,
                "{option:?}"
            );
            assert_eq!(
                config.log_level == ServiceConfig::DEFAULT.log_level,
                field != ConfigField::LogLevel,
                "{option:?}"
            );
        }
    }

    #[test]
    fn empty_sequence_yields_default() {
        assert_eq!(apply_options([]), ServiceConfig::DEFAULT);
    }

    #[test]
    fn later_options_override_earlier_ones() {
        struct Case {
            options: Vec<ServiceOption>,
            retries: u32,
        }

        let cases = [
            Case { options: vec![with_retries(5), with_retries(2)], retries: 2 },
            Case { options: vec![with_retries(2), with_retries(5)], retries: 5 },
            Case { options: vec![with_retries(7), with_cache_enabled(false)], retries: 7 },
            Case { options: vec![with_cache_enabled(false)], retries: DEFAULT_RETRIES },
        ];

        for case in cases {
            let label = format!("{:?}", case.options);
            assert_eq!(apply_options(case.options).retries, case.retries, "{label}");
        }
    }

    #[test]
    fn extend_continues_from_current_state() {
        let mut config = apply_options([with_retries(1)]);
        config.extend([with_timeout(Duration::from_millis(250))]);

        assert_eq!(config.retries, 1);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn field_names_match_serialized_keys() {
        assert_eq!(ConfigField::CacheEnabled.to_string(), "cache_enabled");
        assert_eq!(ConfigField::LogLevel.as_str(), "log_level");
    }
}
