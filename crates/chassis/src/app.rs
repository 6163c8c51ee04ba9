//! Application bootstrap and run lifecycle.
//!
//! [`App`] is the composition root: it owns the option schema and the
//! config loader and drives one invocation through a fixed sequence:
//! parse the command line, apply the verbosity-derived logging
//! threshold, load configuration, dispatch to the entry point, and
//! translate the outcome into an exit code.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chassis::clap::Arg;
//! use chassis::{App, AppResult};
//!
//! fn main() {
//!     let code = App::new("greeter")
//!         .version("1.0.0")
//!         .config_file("greeter.toml")
//!         .arg(Arg::new("name").long("name"))
//!         .run(|ctx, matches| {
//!             let name = matches.get_one::<String>("name").map(String::as_str);
//!             println!("hello, {}!", name.unwrap_or("world"));
//!             Ok(0)
//!         });
//!     std::process::exit(code);
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches};
use tracing::{debug, error};

use crate::cli::{self, CommonArgs};
use crate::config::{ConfigLoader, ConfigResult, ConfigStore};
use crate::error::{AppError, AppResult};
use crate::logging::{self, LoggingBuilder};

/// Exit code for a successful invocation.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for fatal, user-correctable errors.
pub const EXIT_FATAL: i32 = 1;
/// Exit code for unexpected internal errors.
pub const EXIT_UNEXPECTED: i32 = 2;

/// Context handed to the application entry point.
///
/// Carries the configuration store (when the application declared a
/// config file) and the logging threshold resolved for this
/// invocation. The chassis never touches either again after dispatch.
#[derive(Debug)]
pub struct AppContext {
    config: Option<ConfigStore>,
    level: tracing::Level,
}

impl AppContext {
    /// The configuration store.
    ///
    /// # Panics
    ///
    /// Panics when the application never declared a config file;
    /// calling this without one is a programming error in the
    /// application, not a runtime condition.
    pub fn config(&self) -> &ConfigStore {
        self.config
            .as_ref()
            .expect("no config file declared for this application")
    }

    /// Mutable access to the configuration store.
    ///
    /// # Panics
    ///
    /// Panics when the application never declared a config file.
    pub fn config_mut(&mut self) -> &mut ConfigStore {
        self.config
            .as_mut()
            .expect("no config file declared for this application")
    }

    /// The store, or `None` when no config file was declared.
    pub fn config_opt(&self) -> Option<&ConfigStore> {
        self.config.as_ref()
    }

    /// Logging threshold resolved from `--quiet`/`--verbose`.
    pub fn level(&self) -> tracing::Level {
        self.level
    }
}

/// An application description plus the run lifecycle.
///
/// Built-in options (`--verbose`, `--quiet`, and, when configured,
/// `--version` and the config flags) come for free; application
/// options are added declaratively with [`App::arg`].
///
/// # Example
///
/// ```rust,ignore
/// let code = App::new("myapp")
///     .about("Does the thing")
///     .version("2.1.0")
///     .config_file("myapp.toml")
///     .run(|ctx, matches| {
///         // application logic
///         Ok(0)
///     });
/// std::process::exit(code);
/// ```
pub struct App {
    name: String,
    about: Option<String>,
    version: Option<String>,
    config_file: Option<String>,
    args: Vec<Arg>,
    config_dir: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl App {
    /// Creates an application with the given program name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            version: None,
            config_file: None,
            args: Vec::new(),
            config_dir: None,
            env_prefix: None,
        }
    }

    /// Sets the description shown in `--help`.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Sets the version string.
    ///
    /// Registers `--version`/`-V`, which prints the version and exits
    /// immediately with status 0, bypassing all further processing.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Declares the config file name, enabling the configuration
    /// subsystem.
    ///
    /// The default location is `~/<name>`; `--config-file`,
    /// `--skip-config`, and `--config` become available on the command
    /// line.
    pub fn config_file(mut self, name: impl Into<String>) -> Self {
        self.config_file = Some(name.into());
        self
    }

    /// Adds one application-specific argument.
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds several application-specific arguments.
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolves the default config file under this directory instead
    /// of the home directory.
    pub fn config_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.config_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Layers `PREFIX_SECTION__KEY` environment variables over the
    /// config file.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Runs with the process arguments and returns the exit code.
    pub fn run<F>(self, entry: F) -> i32
    where
        F: FnOnce(AppContext, ArgMatches) -> AppResult<i32>,
    {
        self.run_from(std::env::args_os(), entry)
    }

    /// Runs with explicit arguments (the first is the program name).
    ///
    /// Parse failures, `--help`, and `--version` print and exit the
    /// process here, exactly as the argument parser defines; the
    /// returned code covers every other outcome.
    pub fn run_from<I, T, F>(self, argv: I, entry: F) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(AppContext, ArgMatches) -> AppResult<i32>,
    {
        match self.try_run_from(argv, entry) {
            Ok(code) => code,
            Err(err) => err.exit(),
        }
    }

    /// Like [`App::run_from`], but hands parse/help/version outcomes
    /// back to the caller instead of exiting the process.
    pub fn try_run_from<I, T, F>(self, argv: I, entry: F) -> Result<i32, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(AppContext, ArgMatches) -> AppResult<i32>,
    {
        let Self {
            name,
            about,
            version,
            config_file,
            args,
            config_dir,
            env_prefix,
        } = self;

        let has_config = config_file.is_some();
        let matches = cli::build_command(name, about, version, has_config, args)
            .try_get_matches_from(argv)?;
        let common = CommonArgs::from_matches(&matches, has_config);

        let level = logging::level_for(common.quiet, common.verbosity);
        LoggingBuilder::new().with_level(level).init();

        let config = match &config_file {
            Some(default_name) => {
                match Self::load_config(
                    default_name,
                    &common,
                    config_dir.as_deref(),
                    env_prefix.as_deref(),
                ) {
                    Ok(store) => Some(store),
                    Err(err) => {
                        error!("{err}");
                        return Ok(EXIT_FATAL);
                    }
                }
            }
            None => None,
        };

        debug!(level = %level, "dispatching to application entry point");
        let ctx = AppContext { config, level };
        Ok(match entry(ctx, matches) {
            Ok(code) => code,
            Err(AppError::Fatal(message)) => {
                error!("{message}");
                EXIT_FATAL
            }
            Err(AppError::Unexpected(err)) => {
                error!("{err:?}");
                EXIT_UNEXPECTED
            }
        })
    }

    /// Builds and runs the config loader for one invocation.
    fn load_config(
        default_name: &str,
        common: &CommonArgs,
        config_dir: Option<&Path>,
        env_prefix: Option<&str>,
    ) -> ConfigResult<ConfigStore> {
        let mut loader = ConfigLoader::new(default_name)
            .skip(common.skip_config)
            .overrides(common.overrides.iter().cloned());
        if let Some(path) = &common.config_file {
            loader = loader.file(path);
        }
        if let Some(dir) = config_dir {
            loader = loader.home_dir(dir);
        }
        if let Some(prefix) = env_prefix {
            loader = loader.env_prefix(prefix);
        }
        loader.load()
    }
}

// =============================================================================
// Tests
// =============================================================================
