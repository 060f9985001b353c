use crate::config::LogLevel;
use crate::error::ServiceError;
use crate::option::{
    ServiceOption, with_cache_enabled, with_log_level, with_retries, with_timeout,
};
use crate::service::Service;
use private::Sealed;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct NoAddress;
#[derive(Debug)]
pub struct WithAddress(String);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoAddress {}
impl Sealed for WithAddress {}

/// A fluent front end over [`Service::new`].
///
/// Every setter records a [`ServiceOption`] in call order, so calling the
/// same setter twice keeps the second value. Building is only possible once
/// an address has been supplied.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use tuner_options::Service;
///
/// let service = Service::builder()
///     .retries(1)
///     .address("localhost:8080")
///     .timeout(Duration::from_secs(5))
///     .retries(2)
///     .build();
///
/// assert_eq!(service.retries(), 2);
/// assert_eq!(service.timeout(), Duration::from_secs(5));
/// ```
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct ServiceBuilder<S: Sealed = NoAddress> {
    state: S,
    options: Vec<ServiceOption>,
}

#[allow(private_bounds)]
impl<S: Sealed> ServiceBuilder<S> {
    #[must_use = "Records an option on the service builder"]
    pub fn option(mut self, option: ServiceOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use = "Records a sequence of options on the service builder"]
    pub fn options(mut self, options: impl IntoIterator<Item = ServiceOption>) -> Self {
        self.options.extend(options);
        self
    }

    #[must_use = "Sets the timeout of the service"]
    pub fn timeout(self, timeout: Duration) -> Self {
        self.option(with_timeout(timeout))
    }

    #[must_use = "Sets the retry count of the service"]
    pub fn retries(self, retries: u32) -> Self {
        self.option(with_retries(retries))
    }

    #[must_use = "Sets whether the service caches"]
    pub fn cache_enabled(self, enabled: bool) -> Self {
        self.option(with_cache_enabled(enabled))
    }

    #[must_use = "Sets the log level of the service"]
    pub fn log_level(self, level: impl Into<LogLevel>) -> Self {
        self.option(with_log_level(level))
    }

    /// Options recorded so far, in application order.
    pub fn pending(&self) -> &[ServiceOption] {
        &self.options
    }

    fn transition<N: Sealed>(self, state: N) -> ServiceBuilder<N> {
        ServiceBuilder { state, options: self.options }
    }
}

impl ServiceBuilder<NoAddress> {
    #[must_use = "Creates a new service builder with no options recorded"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the address the service is bound to"]
    pub fn address(self, address: impl Into<String>) -> ServiceBuilder<WithAddress> {
        self.transition(WithAddress(address.into()))
    }
}

impl ServiceBuilder<WithAddress> {
    /// Resolves the recorded options and seals them into a [`Service`].
    pub fn build(self) -> Service {
        Service::new(self.state.0, self.options)
    }

    /// Like [`ServiceBuilder::build`], but validated.
    ///
    /// # Errors
    ///
    /// See [`Service::try_new`].
    pub fn try_build(self) -> Result<Service, ServiceError> {
        Service::try_new(self.state.0, self.options)
    }
}
