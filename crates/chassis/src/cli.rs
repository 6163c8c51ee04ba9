//! Built-in command-line options and their parsed projection.
//!
//! Every chassis application gets the same built-in option set, in a
//! fixed order, with application-specific options appended before
//! parsing happens. Argument tokenization, `--help` rendering, and
//! usage errors all belong to clap; this module only declares the
//! schema and reads the built-in fields back out of the parse result.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

/// Builds the command schema: built-in options first, then the
/// application's own arguments.
///
/// `--version`/`-V` is only registered when a version string is
/// supplied; clap prints the version and exits with status 0 before
/// any other processing. The config options are only registered when
/// the application declared a config file.
pub(crate) fn build_command(
    name: String,
    about: Option<String>,
    version: Option<String>,
    has_config: bool,
    extra: Vec<Arg>,
) -> Command {
    let mut cmd = Command::new(name)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("once for progress, twice for debug"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("disable all but errors, overrides -v"),
        );

    if let Some(about) = about {
        cmd = cmd.about(about);
    }
    if let Some(version) = version {
        cmd = cmd.version(version);
    }
    if has_config {
        cmd = cmd
            .arg(
                Arg::new("config-file")
                    .long("config-file")
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("config file to load"),
            )
            .arg(
                Arg::new("skip-config")
                    .long("skip-config")
                    .action(ArgAction::SetTrue)
                    .help("skip loading any config file"),
            )
            .arg(
                Arg::new("config")
                    .long("config")
                    .value_name("SECTION:KEY=VALUE")
                    .action(ArgAction::Append)
                    .help("override a configuration setting"),
            );
    }

    cmd.args(extra)
}

/// The built-in fields of one parsed invocation.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommonArgs {
    /// Number of `-v` occurrences.
    pub verbosity: u8,
    /// `-q` was given; wins over any verbosity.
    pub quiet: bool,
    /// Explicit config file path, if any.
    pub config_file: Option<PathBuf>,
    /// `--skip-config` was given.
    pub skip_config: bool,
    /// Raw `SECTION:KEY=VALUE` override strings, in command-line order.
    pub overrides: Vec<String>,
}

impl CommonArgs {
    /// Projects the built-in fields out of the parsed matches.
    ///
    /// The config fields are only read when they were registered.
    pub(crate) fn from_matches(matches: &ArgMatches, has_config: bool) -> Self {
        let mut args = Self {
            verbosity: matches.get_count("verbose"),
            quiet: matches.get_flag("quiet"),
            ..Self::default()
        };
        if has_config {
            args.config_file = matches.get_one::<PathBuf>("config-file").cloned();
            args.skip_config = matches.get_flag("skip-config");
            args.overrides = matches
                .get_many::<String>("config")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(
        argv: &[&str],
        version: Option<&str>,
        has_config: bool,
    ) -> Result<ArgMatches, clap::Error> {
        build_command(
            "test".to_string(),
            None,
            version.map(str::to_string),
            has_config,
            Vec::new(),
        )
        .try_get_matches_from(argv)
    }

    #[test]
    fn test_verbosity_is_counted() {
        let matches = parse(&["test", "-vv"], None, false).unwrap();
        let args = CommonArgs::from_matches(&matches, false);
        assert_eq!(args.verbosity, 2);
        assert!(!args.quiet);
    }

    #[test]
    fn test_verbosity_defaults_to_zero() {
        let matches = parse(&["test"], None, false).unwrap();
        let args = CommonArgs::from_matches(&matches, false);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_quiet_flag() {
        let matches = parse(&["test", "-q", "-v"], None, false).unwrap();
        let args = CommonArgs::from_matches(&matches, false);
        assert!(args.quiet);
        assert_eq!(args.verbosity, 1);
    }

    #[test]
    fn test_config_options_parse() {
        let matches = parse(
            &[
                "test",
                "--config-file",
                "/tmp/custom.toml",
                "--skip-config",
                "--config",
                "a:b=1",
                "--config",
                "a:b=2",
            ],
            None,
            true,
        )
        .unwrap();
        let args = CommonArgs::from_matches(&matches, true);

        assert_eq!(args.config_file, Some(PathBuf::from("/tmp/custom.toml")));
        assert!(args.skip_config);
        assert_eq!(args.overrides, vec!["a:b=1", "a:b=2"]);
    }

    #[test]
    fn test_config_options_absent_without_config_file() {
        let err = parse(&["test", "--config", "a:b=1"], None, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_version_flag_only_when_configured() {
        let err = parse(&["test", "--version"], Some("1.2.3"), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("1.2.3"));

        let err = parse(&["test", "--version"], None, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = parse(&["test", "--frobnicate"], None, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_application_args_are_registered() {
        let matches = build_command(
            "test".to_string(),
            None,
            None,
            false,
            vec![Arg::new("name").long("name")],
        )
        .try_get_matches_from(["test", "--name", "ada"])
        .unwrap();

        assert_eq!(
            matches.get_one::<String>("name").map(String::as_str),
            Some("ada")
        );
    }
}
