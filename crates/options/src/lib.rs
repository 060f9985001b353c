//! # Options
//!
//! Builds a [`Service`] from an ordered sequence of [`ServiceOption`]s applied over a
//! fixed default configuration.
//!
//! # Core Rules
//!
//! - **Baseline**: construction always starts from [`ServiceConfig::DEFAULT`]
//!   (`30s` timeout, `3` retries, caching on, log level `info`), so no field is ever unset.
//! - **Ordering**: options apply strictly in the order given; the last option
//!   targeting a field wins.
//! - **Sealing**: the resolved configuration is moved into the [`Service`] and never
//!   exposed mutably again.
//! - **No failure by default**: [`Service::new`] accepts any values. [`Service::try_new`]
//!   and [`ServiceBuilder::try_build`] validate at the constructor boundary instead.
//!
//! # Architectural Overview
//!
//! 1.  **[`ServiceOption`]**: one pending write to one field, created with
//!     [`with_timeout`], [`with_retries`], [`with_cache_enabled`] and [`with_log_level`].
//! 2.  **[`Service`]**: owns the address and the sealed [`ServiceConfig`].
//! 3.  **[`ServiceBuilder`]**: a typestate fluent front end that records options in call order.
//! 4.  **[`ServiceSettings`]**: file and environment settings translated into options.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use tuner_options::prelude::*;
//!
//! let service = Service::new(
//!     "localhost:8080",
//!     [
//!         with_timeout(Duration::from_secs(60)),
//!         with_retries(5),
//!         with_cache_enabled(false),
//!         with_log_level("debug"),
//!     ],
//! );
//!
//! assert_eq!(
//!     service.config(),
//!     &ServiceConfig {
//!         timeout: Duration::from_secs(60),
//!         retries: 5,
//!         cache_enabled: false,
//!         log_level: LogLevel::DEBUG,
//!     }
//! );
//!
//! let defaults = Service::new("localhost:8080", []);
//! assert_eq!(defaults.config(), &ServiceConfig::DEFAULT);
//! ```

mod builder;
mod config;
mod error;
mod option;
mod service;
mod settings;

pub use crate::builder::{NoAddress, ServiceBuilder, WithAddress};
pub use crate::config::{
    DEFAULT_CACHE_ENABLED, DEFAULT_RETRIES, DEFAULT_TIMEOUT, LogLevel, MAX_RETRIES, ServiceConfig,
};
pub use crate::error::{ServiceError, ServiceErrorExt};
pub use crate::option::{
    ConfigField, ServiceOption, apply_options, with_cache_enabled, with_log_level, with_retries,
    with_timeout,
};
pub use crate::service::Service;
pub use crate::settings::{
    ENV_PREFIX, ENV_SEPARATOR, ServiceSettings, SettingsError, SettingsErrorExt, load_settings,
};

pub mod prelude {
    pub use crate::{
        LogLevel, Service, ServiceConfig, ServiceError, ServiceOption, apply_options,
        with_cache_enabled, with_log_level, with_retries, with_timeout,
    };
}
