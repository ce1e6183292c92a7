//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::modules::ModulesArgs;
use crate::commands::tree::TreeArgs;

pub struct CheckParams {
    pub paths: Vec<PathBuf>,
    pub strict: bool,
    pub brief: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            strict: m.get_flag("strict"),
            brief: m.get_flag("brief"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            paths: p.paths,
            strict: p.strict,
            brief: p.brief,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub paths: Vec<PathBuf>,
    pub module: Option<String>,
    pub no_groupings: bool,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            module: m.get_one::<String>("module").cloned(),
            no_groupings: m.get_flag("no_groupings"),
            json: m.get_flag("json"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            paths: p.paths,
            module: p.module,
            groupings: !p.no_groupings,
            json: p.json,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ModulesParams {
    pub paths: Vec<PathBuf>,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl ModulesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            json: m.get_flag("json"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<ModulesParams> for ModulesArgs {
    fn from(p: ModulesParams) -> Self {
        Self {
            paths: p.paths,
            json: p.json,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

/// Log level requested with `-v`; `RUST_LOG` still wins when set.
pub fn log_level(m: &ArgMatches) -> &'static str {
    match m.get_count("verbose") {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn parse_paths(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
