//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that the command builders compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema files or directories (positional, repeatable).
pub fn paths_arg() -> Arg {
    Arg::new("paths")
        .value_name("PATH")
        .num_args(1..)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("YANG files or directories of .yang files (use \"-\" for stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// One-line diagnostics (--brief).
pub fn brief_arg() -> Arg {
    Arg::new("brief")
        .long("brief")
        .action(ArgAction::SetTrue)
        .help("Print one line per diagnostic")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit JSON instead of text")
}

/// Hide grouping and typedef bodies (--no-groupings).
pub fn no_groupings_arg() -> Arg {
    Arg::new("no_groupings")
        .long("no-groupings")
        .action(ArgAction::SetTrue)
        .help("Omit grouping and typedef bodies")
}

/// Only print the named module (--module).
pub fn module_arg() -> Arg {
    Arg::new("module")
        .short('m')
        .long("module")
        .value_name("NAME")
        .help("Only print this module or submodule")
}

/// Parser execution budget (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Parser execution budget per source")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log progress to stderr (-v: debug, -vv: trace)")
}
