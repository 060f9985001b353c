use crate::args::ResolveArgs;
use anyhow::Context;
use tuner_logger::LevelFilter;
use tuner_options::{LogLevel, Service, ServiceOption, load_settings};

/// Address used when neither settings nor flags supply one.
pub const DEFAULT_ADDRESS: &str = "localhost:8080";

/// Address and options collected from every layer, not yet sealed into a [`Service`].
#[derive(Debug, Clone)]
pub struct Resolution {
    address: String,
    options: Vec<ServiceOption>,
    strict: bool,
}

impl Resolution {
    /// Level named by the last log level option, `info` when there is none or
    /// `tracing` does not know the name.
    pub fn level_filter(&self) -> LevelFilter {
        self.options
            .iter()
            .rev()
            .find_map(|option| match option {
                ServiceOption::LogLevel(level) => Some(level),
                _ => None,
            })
            .and_then(LogLevel::to_level_filter)
            .unwrap_or(LevelFilter::INFO)
    }

    /// Seals the collected options, validating them under `--strict`.
    ///
    /// # Errors
    ///
    /// Fails if `--strict` validation rejects the resolved configuration.
    pub fn seal(self) -> anyhow::Result<Service> {
        if self.strict {
            Service::try_new(self.address, self.options).context("Service configuration rejected")
        } else {
            Ok(Service::new(self.address, self.options))
        }
    }
}

/// Collects settings first and flags second, so flags win.
///
/// # Errors
///
/// Fails if the settings cannot be loaded.
pub fn gather(args: &ResolveArgs) -> anyhow::Result<Resolution> {
    let settings = load_settings(args.config.as_deref()).context("Failed to load settings")?;

    let address = args
        .address
        .clone()
        .or_else(|| settings.address.clone())
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());

    let mut options = settings.to_options();
    options.extend(args.to_options());

    Ok(Resolution { address, options, strict: args.strict })
}

pub fn defaults() -> Service {
    Service::new(DEFAULT_ADDRESS, [])
}
