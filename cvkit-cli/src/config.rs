use anyhow::{Context, Result};
use clap::ArgMatches;
use cvkit_lib::Variant;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "config.json";
pub const DEFAULT_OUTPUT: &str = "my_cv.html";
pub const DEFAULT_ARCHIVE_DIR: &str = "data/students";

/// `-` selects stdin/stdout instead of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Std,
    File(PathBuf),
}

impl Endpoint {
    fn parse(raw: &str) -> Self {
        if raw == "-" {
            Endpoint::Std
        } else {
            Endpoint::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Endpoint::Std => "<stdio>".to_string(),
            Endpoint::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Render,
    Check,
    Demos(PathBuf),
    Sample(Variant),
}

/// Everything one invocation needs, resolved from flags, env and `.env`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub input: Endpoint,
    pub output: Endpoint,
    pub template: Option<Variant>,
    pub stamp: bool,
    pub archive: Option<(String, PathBuf)>,
    pub verbose: u8,
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let template = parse_variant(matches, "template")?;

        let mode = if let Some(variant) = parse_variant(matches, "sample")? {
            Mode::Sample(variant)
        } else if let Some(dir) = matches.get_one::<String>("demos") {
            Mode::Demos(PathBuf::from(dir))
        } else if matches.get_flag("check") {
            Mode::Check
        } else {
            Mode::Render
        };

        let archive = matches.get_one::<String>("archive").map(|id| {
            let dir = matches
                .get_one::<String>("archive-dir")
                .map(String::as_str)
                .unwrap_or(DEFAULT_ARCHIVE_DIR);
            (id.clone(), PathBuf::from(dir))
        });

        Ok(Settings {
            mode,
            input: Endpoint::parse(string_arg(matches, "input", DEFAULT_INPUT)),
            output: Endpoint::parse(string_arg(matches, "output", DEFAULT_OUTPUT)),
            template,
            stamp: matches.get_flag("stamp"),
            archive,
            verbose: matches.get_count("verbose"),
        })
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose == 0 {
            "warn"
        } else {
            "debug"
        }
    }
}

fn string_arg<'a>(matches: &'a ArgMatches, id: &str, default: &'a str) -> &'a str {
    matches.get_one::<String>(id).map(String::as_str).unwrap_or(default)
}

fn parse_variant(matches: &ArgMatches, id: &str) -> Result<Option<Variant>> {
    matches
        .get_one::<String>(id)
        .map(|name| {
            name.parse::<Variant>()
                .with_context(|| format!("invalid value for --{}", id))
        })
        .transpose()
}
