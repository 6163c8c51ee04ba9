//! Greeter Demo
//!
//! A small CLI built on the chassis: greets a name in a language
//! picked from configuration, with every chassis facility in play
//! (verbosity flags, version, config file, env layer, overrides).
//!
//! # Usage
//!
//! ```bash
//! cargo run --package greeter -- --name Ada
//! cargo run --package greeter -- --lang fr -v
//! cargo run --package greeter -- --config greetings:fr=salut --lang fr
//! GREETER_STYLE__SHOUT=true cargo run --package greeter
//! ```
//!
//! Configuration lives in `~/greeter.toml`:
//!
//! ```toml
//! [greetings]
//! en = "hello"
//! fr = "bonjour"
//!
//! [style]
//! shout = "true"
//! ```

use std::fs;

use anyhow::Context;
use chassis::clap::{Arg, ArgMatches};
use chassis::prelude::*;

/// Greetings available even without a config file.
fn builtin_greeting(lang: &str) -> Option<&'static str> {
    match lang {
        "en" => Some("hello"),
        "fr" => Some("bonjour"),
        _ => None,
    }
}

fn greet(ctx: AppContext, matches: ArgMatches) -> AppResult<i32> {
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or("world");
    let lang = matches
        .get_one::<String>("lang")
        .map(String::as_str)
        .unwrap_or("en");

    if let Some(path) = matches.get_one::<String>("banner") {
        let banner =
            fs::read_to_string(path).with_context(|| format!("failed to read banner {path:?}"))?;
        print!("{banner}");
    }

    let config = ctx.config();
    let Some(greeting) = config
        .get("greetings", lang)
        .or_else(|| builtin_greeting(lang))
    else {
        return Err(AppError::fatal(format!(
            "no greeting configured for language {lang:?}"
        )));
    };

    let shout = match config.get_parsed::<bool>("style", "shout") {
        Some(Ok(value)) => value,
        Some(Err(_)) => return Err(AppError::fatal("style.shout must be \"true\" or \"false\"")),
        None => false,
    };

    info!(name, lang, "greeting");
    let mut line = format!("{greeting}, {name}!");
    if shout {
        line = line.to_uppercase();
    }
    println!("{line}");

    Ok(0)
}

fn main() {
    let code = App::new("greeter")
        .about("Greets a name in a configurable language")
        .version(env!("CARGO_PKG_VERSION"))
        .config_file("greeter.toml")
        .env_prefix("GREETER")
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .help("who to greet (defaults to \"world\")"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .value_name("LANG")
                .help("greeting language (defaults to \"en\")"),
        )
        .arg(
            Arg::new("banner")
                .long("banner")
                .value_name("FILE")
                .help("print this file before the greeting"),
        )
        .run(greet);
    std::process::exit(code);
}
