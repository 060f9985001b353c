use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Baseline timeout of a freshly constructed service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Baseline retry count of a freshly constructed service.
pub const DEFAULT_RETRIES: u32 = 3;
/// Caching is on unless an option turns it off.
pub const DEFAULT_CACHE_ENABLED: bool = true;
/// Upper bound enforced by [`ServiceConfig::validate`].
pub const MAX_RETRIES: u32 = 100;

/// Logging verbosity of a service.
///
/// This is an open enumeration: any string is accepted and carried as-is.
/// The conventional names are available as constants and are the only ones
/// [`LogLevel::is_known`] recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(Cow<'static, str>);

impl LogLevel {
    pub const TRACE: Self = Self(Cow::Borrowed("trace"));
    pub const DEBUG: Self = Self(Cow::Borrowed("debug"));
    pub const INFO: Self = Self(Cow::Borrowed("info"));
    pub const WARN: Self = Self(Cow::Borrowed("warn"));
    pub const ERROR: Self = Self(Cow::Borrowed("error"));

    pub fn new(level: impl Into<Cow<'static, str>>) -> Self {
        Self(level.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Maps a conventional level name (case-insensitive) onto a tracing filter.
    ///
    /// Returns `None` for anything outside `trace`, `debug`, `info`, `warn`,
    /// `error` and `off`.
    pub fn to_level_filter(&self) -> Option<LevelFilter> {
        let name = self.0.trim();
        [
            ("trace", LevelFilter::TRACE),
            ("debug", LevelFilter::DEBUG),
            ("info", LevelFilter::INFO),
            ("warn", LevelFilter::WARN),
            ("error", LevelFilter::ERROR),
            ("off", LevelFilter::OFF),
        ]
        .into_iter()
        .find_map(|(known, filter)| name.eq_ignore_ascii_case(known).then_some(filter))
    }

    pub fn is_known(&self) -> bool {
        self.to_level_filter().is_some()
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for LogLevel {
    fn from(level: &'static str) -> Self {
        Self(Cow::Borrowed(level))
    }
}

impl From<String> for LogLevel {
    fn from(level: String) -> Self {
        Self(Cow::Owned(level))
    }
}

/// The fully populated configuration owned by a [`Service`](crate::Service).
///
/// Every construction starts from [`ServiceConfig::DEFAULT`], so no field is
/// ever unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    #[serde(serialize_with = "duration::serialize")]
    pub timeout: Duration,
    pub retries: u32,
    pub cache_enabled: bool,
    pub log_level: LogLevel,
}

impl ServiceConfig {
    /// `{timeout: 30s, retries: 3, cache_enabled: true, log_level: "info"}`
    pub const DEFAULT: Self = Self {
        timeout: DEFAULT_TIMEOUT,
        retries: DEFAULT_RETRIES,
        cache_enabled: DEFAULT_CACHE_ENABLED,
        log_level: LogLevel::INFO,
    };

    /// Checks the values plain construction accepts uncritically.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidConfiguration`] for the first violation found:
    /// - `timeout` is zero.
    /// - `retries` exceeds [`MAX_RETRIES`].
    /// - `log_level` is not a conventional level name.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(ServiceError::InvalidConfiguration {
                message: "timeout must be greater than zero".into(),
                context: None,
            });
        }

        if self.retries > MAX_RETRIES {
            return Err(ServiceError::InvalidConfiguration {
                message: format!("retries must not exceed {MAX_RETRIES}, got {}", self.retries)
                    .into(),
                context: None,
            });
        }

        if !self.log_level.is_known() {
            return Err(ServiceError::InvalidConfiguration {
                message: format!("unrecognized log level '{}'", self.log_level).into(),
                context: None,
            });
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Durations in humantime format (`"30s"`, `"1m 30s"`).
pub(crate) mod duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(crate) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub(crate) fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_documented_baseline() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.retries, 3);
        assert!(cfg.cache_enabled);
        assert_eq!(cfg.log_level, LogLevel::INFO);
        assert_eq!(cfg, ServiceConfig::DEFAULT);
    }

    #[test]
    fn log_level_is_open() {
        let custom = LogLevel::from("verbose");
        assert_eq!(custom.as_str(), "verbose");
        assert!(!custom.is_known());
        assert_eq!(custom.to_level_filter(), None);

        assert_eq!(LogLevel::from("DEBUG".to_owned()).to_level_filter(), Some(LevelFilter::DEBUG));
        assert_eq!(LogLevel::WARN.to_level_filter(), Some(LevelFilter::WARN));
        assert_eq!(LogLevel::from("off").to_level_filter(), Some(LevelFilter::OFF));
        assert_eq!(LogLevel::from("2").to_level_filter(), None);
    }

    #[test]
    fn owned_and_borrowed_levels_compare_by_value() {
        assert_eq!(LogLevel::from("info".to_owned()), LogLevel::INFO);
        assert_eq!(LogLevel::new("error"), LogLevel::ERROR);
    }

    #[test]
    fn validate_rejects_nonsensical_values() {
        struct Case {
            name: &'static str,
            config: ServiceConfig,
            ok: bool,
        }

        let cases = [
            Case { name: "default", config: ServiceConfig::DEFAULT, ok: true },
            Case {
                name: "zero timeout",
                config: ServiceConfig { timeout: Duration::ZERO, ..ServiceConfig::DEFAULT },
                ok: false,
            },
            Case {
                name: "retries at limit",
                config: ServiceConfig { retries: MAX_RETRIES, ..ServiceConfig::DEFAULT },
                ok: true,
            },
            Case {
                name: "retries above limit",
                config: ServiceConfig { retries: MAX_RETRIES + 1, ..ServiceConfig::DEFAULT },
                ok: false,
            },
            Case {
                name: "zero retries",
                config: ServiceConfig { retries: 0, ..ServiceConfig::DEFAULT },
                ok: true,
            },
            Case {
                name: "unknown log level",
                config: ServiceConfig { log_level: "loud".into(), ..ServiceConfig::DEFAULT },
                ok: false,
            },
        ];

        for case in cases {
            assert_eq!(case.config.validate().is_ok(), case.ok, "case: {}", case.name);
        }
    }

    #[test]
    fn serializes_timeout_as_humantime() {
        let cfg = ServiceConfig { timeout: Duration::from_secs(90), ..ServiceConfig::DEFAULT };
        let value = serde_json::to_value(&cfg).expect("serialize config");

        assert_eq!(value["timeout"], "1m 30s");
        assert_eq!(value["log_level"], "info");
        assert_eq!(value["retries"], DEFAULT_RETRIES);
    }
}
