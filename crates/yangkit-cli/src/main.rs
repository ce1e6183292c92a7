mod cli;
mod commands;

use tracing_subscriber::{EnvFilter, fmt};

use cli::{CheckParams, ModulesParams, TreeParams, build_cli, log_level};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(log_level(&matches));

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("modules", m)) => {
            let params = ModulesParams::from_matches(m);
            commands::modules::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the level chosen with `-v`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
