use crate::builder::ServiceBuilder;
use crate::config::{LogLevel, ServiceConfig};
use crate::error::{Result, ServiceError, ServiceErrorExt};
use crate::option::ServiceOption;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// A service bound to an address and a sealed [`ServiceConfig`].
///
/// The configuration is resolved once, at construction, and is only ever
/// handed out by shared reference afterwards.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Service {
    address: String,
    config: ServiceConfig,
}

impl Service {
    /// Creates a service from the default configuration with `options`
    /// applied in order. Later options targeting the same field override
    /// earlier ones.
    ///
    /// Values are accepted as given; use [`Service::try_new`] to reject
    /// nonsensical ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use tuner_options::{Service, with_retries, with_timeout};
    ///
    /// let service = Service::new(
    ///     "localhost:8080",
    ///     [with_timeout(Duration::from_secs(60)), with_retries(5)],
    /// );
    ///
    /// assert_eq!(service.timeout(), Duration::from_secs(60));
    /// assert_eq!(service.retries(), 5);
    /// assert!(service.cache_enabled());
    /// ```
    pub fn new(
        address: impl Into<String>,
        options: impl IntoIterator<Item = ServiceOption>,
    ) -> Self {
        let address = address.into();
        let mut applied = 0_usize;
        let config: ServiceConfig = options.into_iter().inspect(|_| applied += 1).collect();

        debug!(%address, applied, "Service configuration sealed");

        Self { address, config }
    }

    /// Validated counterpart of [`Service::new`].
    ///
    /// Options are resolved exactly as [`Service::new`] resolves them; the
    /// result is then checked before the service is returned.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidAddress`] if `address` is empty or blank.
    /// - [`ServiceError::InvalidConfiguration`] if [`ServiceConfig::validate`] fails.
    pub fn try_new(
        address: impl Into<String>,
        options: impl IntoIterator<Item = ServiceOption>,
    ) -> Result<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ServiceError::InvalidAddress {
                message: "address cannot be empty".into(),
                context: None,
            });
        }

        let service = Self::new(address, options);
        service.config.validate().context(format!("service at {}", service.address))?;

        Ok(service)
    }

    #[must_use = "The builder must be given an address before it can build a service."]
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub const fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub const fn retries(&self) -> u32 {
        self.config.retries
    }

    pub const fn cache_enabled(&self) -> bool {
        self.config.cache_enabled
    }

    pub const fn log_level(&self) -> &LogLevel {
        &self.config.log_level
    }

    /// Consumes the service and releases its configuration.
    pub fn into_config(self) -> ServiceConfig {
        self.config
    }
}
