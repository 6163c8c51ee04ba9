//! Configuration loading.
//!
//! One loader produces one populated [`ConfigStore`] per invocation.
//! Sources layer in a fixed order: config file, then environment
//! variables (when a prefix is set), then command-line override
//! directives. The file step distinguishes two cases on purpose: a
//! missing or unreadable *default* file is normal and silently
//! ignored, while a file the user explicitly named must load or the
//! invocation aborts.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables TOML configuration files
//! - `yaml-config`: enables YAML configuration files
//!
//! Both can be enabled simultaneously; the file extension decides the
//! parser.
//!
//! # Example
//!
//! ```rust,ignore
//! use chassis::ConfigLoader;
//!
//! let store = ConfigLoader::new("myapp.toml")
//!     .overrides(["server:port=9090"])
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::store::ConfigStore;

/// One `SECTION:KEY=VALUE` assignment from the command line.
#[derive(Debug, PartialEq, Eq)]
struct OverrideDirective<'a> {
    section: &'a str,
    key: &'a str,
    value: &'a str,
}

impl<'a> OverrideDirective<'a> {
    /// Splits on the first `=`, then the key spec on the first `:`.
    fn parse(raw: &'a str) -> ConfigResult<Self> {
        let (key_spec, value) = raw
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidOverride(raw.to_string()))?;
        let (section, key) = key_spec
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidOverride(raw.to_string()))?;
        Ok(Self {
            section,
            key,
            value,
        })
    }
}

/// Configuration loader.
///
/// # Example
///
/// ```rust,ignore
/// let store = ConfigLoader::new("myapp.toml")
///     .file("./local.toml")
///     .overrides(["server:port=9090"])
///     .load()?;
/// ```
pub struct ConfigLoader {
    /// Default file name, resolved under the home directory.
    default_name: String,
    /// Specific config file to load (overrides the default).
    file: Option<PathBuf>,
    /// Whether to skip file loading entirely.
    skip: bool,
    /// Environment variable prefix for the env layer.
    env_prefix: Option<String>,
    /// Raw override directives, in command-line order.
    overrides: Vec<String>,
    /// Directory used in place of the home directory.
    home_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader whose default file is `~/<default_name>`.
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
            file: None,
            skip: false,
            env_prefix: None,
            overrides: Vec::new(),
            home_dir: None,
        }
    }

    /// Sets a specific configuration file to load.
    ///
    /// Unlike the default file, failure to read this one is fatal: a
    /// user who names a file means it.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips file loading entirely; overrides still apply.
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Layers `PREFIX_SECTION__KEY` environment variables over the
    /// file contents.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Appends override directives, applied in order after all other
    /// sources.
    pub fn overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.extend(overrides.into_iter().map(Into::into));
        self
    }

    /// Overrides the directory used to resolve the default config file.
    pub fn home_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.home_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Loads and returns the populated store.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file cannot be read, when an
    /// environment override does not fit the section/key shape, or
    /// when an override directive is malformed. A failing *default*
    /// file is not an error; the store simply starts empty.
    pub fn load(self) -> ConfigResult<ConfigStore> {
        let mut store = if self.skip {
            debug!("config file loading skipped");
            ConfigStore::new()
        } else if let Some(path) = &self.file {
            debug!(path = %path.display(), "reading config file");
            Self::read_file(path)?
        } else {
            self.read_default()
        };

        if let Some(prefix) = &self.env_prefix {
            Self::merge_env(&mut store, prefix)?;
        }

        for raw in &self.overrides {
            let directive = OverrideDirective::parse(raw)?;
            store.set(directive.section, directive.key, directive.value);
        }

        Ok(store)
    }

    /// Resolved path of the default config file, if a home directory
    /// can be determined.
    fn default_path(&self) -> Option<PathBuf> {
        self.home_dir
            .clone()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(&self.default_name))
    }

    /// Attempts the default file; any failure leaves the store empty.
    fn read_default(&self) -> ConfigStore {
        let Some(path) = self.default_path() else {
            debug!("no home directory, skipping default config file");
            return ConfigStore::new();
        };

        debug!(path = %path.display(), "attempting to read default config file");
        match Self::read_file(&path) {
            Ok(store) => store,
            Err(err) => {
                debug!(error = %err, "failed to read default config file");
                ConfigStore::new()
            }
        }
    }

    /// Reads a single config file, dispatching on file extension.
    ///
    /// Only extensions enabled via feature flags are accepted.
    fn read_file(path: &Path) -> ConfigResult<ConfigStore> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Self::extract(Figment::from(Toml::file_exact(path)), path),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Self::extract(Figment::from(Yaml::file_exact(path)), path),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    #[cfg(any(feature = "toml-config", feature = "yaml-config"))]
    fn extract(figment: Figment, path: &Path) -> ConfigResult<ConfigStore> {
        figment.extract().map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layers `PREFIX_SECTION__KEY=value` environment variables over
    /// the store.
    ///
    /// Section and key names are lowercased; values are taken verbatim
    /// (the store holds strings, so no value parsing happens here).
    /// Variables are applied in sorted order for determinism.
    fn merge_env(store: &mut ConfigStore, prefix: &str) -> ConfigResult<()> {
        let prefix = format!("{}_", prefix.trim_end_matches('_'));

        let mut vars: Vec<(String, String)> = std::env::vars()
            .filter(|(name, _)| name.starts_with(&prefix))
            .collect();
        vars.sort();

        for (name, value) in vars {
            let spec = &name[prefix.len()..];
            let Some((section, key)) = spec.split_once("__") else {
                return Err(ConfigError::InvalidEnv(name));
            };
            if section.is_empty() || key.is_empty() {
                return Err(ConfigError::InvalidEnv(name));
            }
            debug!(variable = %name, "applying environment override");
            store.set(section.to_lowercase(), key.to_lowercase(), value);
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
