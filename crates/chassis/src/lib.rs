//! Chassis - a reusable foundation for command-line applications.
//!
//! This crate provides:
//! - Standardized option handling (`--verbose`, `--quiet`, `--version`,
//!   config flags, plus declarative application options)
//! - Optional layered configuration loading with command-line overrides
//! - Verbosity-driven logging thresholds
//! - A uniform mapping from failures to process exit codes
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chassis::clap::Arg;
//! use chassis::App;
//!
//! fn main() {
//!     let code = App::new("greeter")
//!         .about("Greets a name in a configurable language")
//!         .version("1.2.0")
//!         .config_file("greeter.toml")
//!         .arg(Arg::new("name").long("name"))
//!         .run(|ctx, matches| {
//!             let name = matches.get_one::<String>("name").map(String::as_str);
//!             let greeting = ctx.config().get("greetings", "en").unwrap_or("hello");
//!             println!("{greeting}, {}!", name.unwrap_or("world"));
//!             Ok(0)
//!         });
//!     std::process::exit(code);
//! }
//! ```
//!
//! # Lifecycle
//!
//! [`App::run`] drives one invocation through a fixed sequence: parse
//! the command line, apply the verbosity-derived logging threshold,
//! load the configuration file (if one was declared), then dispatch to
//! the application entry point and translate its result into an exit
//! code.
//!
//! # Exit Codes
//!
//! - `0`: success (or whatever the entry point returns)
//! - `1`: fatal, user-correctable error (bad config file, invalid
//!   override, [`AppError::Fatal`])
//! - `2`: unexpected internal error, logged with full diagnostics
//!
//! Usage errors (unknown flag, malformed value) are reported and
//! exited by the argument parser itself; `--version` prints and exits
//! with status 0 before anything else runs.
//!
//! # Configuration
//!
//! When an application declares a config file, the store is populated
//! once, early, from up to three layers: the file (the explicit
//! `--config-file` path, or `~/<name>` by default), environment
//! variables (when an [`App::env_prefix`] is set), and repeatable
//! `--config SECTION:KEY=VALUE` overrides, applied last in
//! command-line order. A missing or unreadable *default* file is
//! silently ignored; a file the user explicitly named must load.

pub mod app;
mod cli;
pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use app::{App, AppContext, EXIT_FATAL, EXIT_SUCCESS, EXIT_UNEXPECTED};
pub use config::{ConfigError, ConfigLoader, ConfigResult, ConfigStore};
pub use error::{AppError, AppResult};
pub use logging::LoggingBuilder;

// Re-export the argument parser and logging facade for downstream apps
pub use clap;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Brings in the application types and the commonly used logging
/// macros: `trace!`, `debug!`, `info!`, `warn!`, `error!`.
pub mod prelude {
    pub use crate::{App, AppContext, AppError, AppResult, ConfigStore};
    pub use tracing::{debug, error, info, trace, warn};
}
