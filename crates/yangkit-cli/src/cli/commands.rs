//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("yangkit")
        .about("Semantic checks for YANG schema modules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(tree_command())
        .subcommand(modules_command())
}

/// Compile a set of modules and report diagnostics.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a set of modules")
        .override_usage(
            "\
  yangkit check <PATH>...
  yangkit check - < module.yang",
        )
        .after_help(
            r#"EXAMPLES:
  yangkit check ietf-interfaces.yang        # one module
  yangkit check models/                     # every .yang file in a directory
  yangkit check a.yang b.yang --strict      # warnings fail the check
  yangkit check models/ --brief             # one line per diagnostic"#,
        )
        .arg(paths_arg())
        .arg(strict_arg())
        .arg(brief_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Print the compiled schema tree.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Print the compiled schema tree")
        .override_usage(
            "\
  yangkit tree <PATH>...
  yangkit tree <PATH>... -m <NAME>",
        )
        .after_help(
            r#"EXAMPLES:
  yangkit tree models/                      # every module, indented
  yangkit tree models/ -m ietf-ip           # one module
  yangkit tree models/ --no-groupings       # data nodes only
  yangkit tree models/ --json               # JSON, one object per module"#,
        )
        .arg(paths_arg())
        .arg(module_arg())
        .arg(no_groupings_arg())
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// List the modules and submodules of a compilation set.
pub fn modules_command() -> Command {
    Command::new("modules")
        .about("List modules, revisions and their imports")
        .after_help(
            r#"EXAMPLES:
  yangkit modules models/
  yangkit modules models/ --json"#,
        )
        .arg(paths_arg())
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}
