//! Logging setup for chassis applications.
//!
//! Built on `tracing` and `tracing-subscriber`. The chassis only
//! decides the threshold (from `--quiet`/`--verbose`) and installs a
//! compact formatter on stderr; what applications log and how it is
//! transported stays their business.
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use chassis::logging::LoggingBuilder;
//! use tracing::Level;
//!
//! LoggingBuilder::new()
//!     .with_level(Level::DEBUG)
//!     .directive("hyper=warn")
//!     .init();
//! ```

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

/// Maps the quiet flag and verbosity count to a logging threshold.
///
/// Quiet always wins. Otherwise one `-v` enables progress output and
/// two or more enable debug output:
///
/// | input            | level   |
/// |------------------|---------|
/// | `quiet`          | `ERROR` |
/// | `verbosity == 0` | `WARN`  |
/// | `verbosity == 1` | `INFO`  |
/// | `verbosity >= 2` | `DEBUG` |
pub fn level_for(quiet: bool, verbosity: u8) -> Level {
    if quiet {
        Level::ERROR
    } else if verbosity >= 2 {
        Level::DEBUG
    } else if verbosity == 1 {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// A builder for configuring logging.
///
/// # Example
///
/// ```rust,ignore
/// LoggingBuilder::new()
///     .with_level(Level::INFO)
///     .with_target(true)
///     .init();
/// ```
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    level: Option<Level>,
    directives: Vec<String>,
    with_target: bool,
}

impl LoggingBuilder {
    /// Creates a new logging builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a filter directive, e.g. `"hyper=warn"`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Include the target (module path) in log output.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Builds the filter from the level and directives.
    ///
    /// `RUST_LOG`, when set, takes precedence over the programmatic
    /// level.
    fn build_filter(&self) -> EnvFilter {
        let base_level = self.level.unwrap_or(Level::WARN);
        let base_filter = base_level.to_string().to_lowercase();

        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initializes the logging system.
    ///
    /// A second initialization in the same process is ignored; the
    /// first subscriber keeps its threshold.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Tries to initialize the logging system, returning an error on
    /// failure.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();
        let layer = fmt::layer()
            .compact()
            .with_target(self.with_target)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init()
    }
}
