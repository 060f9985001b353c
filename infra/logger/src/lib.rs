//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for Tuner binaries.
//!
//! * Console output goes to **stderr** so that stdout stays free for command output.
//! * File output is optional: daily-rotated (by default), non-blocking, plain text or JSON.
//! * Filtering starts from a single [`LevelFilter`]; `RUST_LOG` refines it unless explicit
//!   directives are supplied through [`LoggerBuilder::directives`].
//! * The level can be changed after install with [`Logger::set_level`], so a binary can log
//!   while it is still working out which level it was asked for.
//!
//! ## Example
//!
//! ```rust
//! use tuner_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("tuner")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//!
//! tracing::debug!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fmt as std_fmt;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, reload};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;
type FilterHandle = reload::Handle<EnvFilter, Layered<Vec<BoxedLayer>, Registry>>;

/// Collects logger settings; nothing is installed until [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    log_dir: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl LoggerBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            log_dir: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }

    #[must_use = "The builder must be initialized to install the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (e.g. `tuner_options=trace,config=warn`).
    ///
    /// When set, `RUST_LOG` is ignored.
    #[must_use = "The builder must be initialized to install the logger."]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use = "The builder must be initialized to install the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes log files named `<name>.<date>.log` into `dir`, creating it if needed.
    #[must_use = "The builder must be initialized to install the logger."]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// File rotation policy. Only used together with [`LoggerBuilder::log_dir`].
    #[must_use = "The builder must be initialized to install the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Number of rotated files to keep. Only used together with [`LoggerBuilder::log_dir`].
    #[must_use = "The builder must be initialized to install the logger."]
    pub const fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Emits file records as JSON. Only used together with [`LoggerBuilder::log_dir`].
    #[must_use = "The builder must be initialized to install the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    ///
    /// - [`LoggerError::InvalidConfiguration`] for an empty name, `max_files == 0`,
    ///   no enabled output, or unparsable directives.
    /// - [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// - [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = env_filter(self.level, self.directives.as_deref())?;
        let (filter, handle) = reload::Layer::new(filter);

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
        if self.console {
            layers.push(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .compact()
                    .boxed(),
            );
        }

        let guard = match &self.log_dir {
            Some(dir) => {
                let (layer, guard) = self.file_layer(dir)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { guard, filter: handle, directives: self.directives })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let problem = if self.name.trim().is_empty() {
            Some("logger name cannot be empty")
        } else if !self.console && self.log_dir.is_none() {
            Some("no output enabled; enable the console or set a log directory")
        } else if self.log_dir.is_some() && self.max_files == 0 {
            Some("max_files must be greater than zero")
        } else {
            None
        };

        problem.map_or(Ok(()), |message| {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        })
    }

    fn file_layer(&self, dir: &Path) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
        fs::create_dir_all(dir)
            .context(format!("Failed to create log directory: {}", dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(&self.name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(dir)
            .context(format!("Failed to open log files in {}", dir.display()))?;

        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        let layer = if self.json { layer.json().boxed() } else { layer.boxed() };

        Ok((layer, guard))
    }
}

fn env_filter(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    match directives {
        Some(directives) => {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("invalid directives '{directives}': {e}").into(),
                context: None,
            })
        },
        None => Ok(builder.from_env_lossy()),
    }
}

/// Handle to the installed subscriber.
///
/// Keep it alive until shutdown: dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops file logging."]
pub struct Logger {
    guard: Option<WorkerGuard>,
    filter: FilterHandle,
    directives: Option<String>,
}

impl Logger {
    /// Starts configuring a logger. `name` prefixes rolled log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name.into())
    }

    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }

    /// Replaces the base level of the installed filter.
    ///
    /// Directives given at build time (or `RUST_LOG`) still refine the new level.
    ///
    /// # Errors
    ///
    /// [`LoggerError::Reload`] if the subscriber is gone or its filter lock is poisoned.
    pub fn set_level(&self, level: LevelFilter) -> Result<(), LoggerError> {
        let filter = env_filter(level, self.directives.as_deref())?;
        self.filter.reload(filter)?;
        Ok(())
    }
}

impl std_fmt::Debug for Logger {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.debug_struct("Logger")
            .field("writes_files", &self.writes_files())
            .field("directives", &self.directives)
            .finish_non_exhaustive()
    }
}
