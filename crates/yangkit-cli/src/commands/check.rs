use std::path::PathBuf;

use super::run_common::compile;

pub struct CheckArgs {
    pub paths: Vec<PathBuf>,
    pub strict: bool,
    pub brief: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let schema = compile(&args.paths, args.fuel);

    let diagnostics = schema.diagnostics();
    if !diagnostics.is_empty() {
        let rendered = if args.brief {
            diagnostics.render_filtered_brief(schema.source_map())
        } else {
            diagnostics.render_filtered_colored(schema.source_map(), args.color)
        };
        eprint!("{}", rendered);
    }
    let warnings_fail = args.strict && diagnostics.has_warnings();

    if let Err(e) = schema.into_result() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    if warnings_fail {
        eprintln!("error: warnings are errors with --strict");
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
