//! Loading and compiling shared by every command.

use std::path::PathBuf;

use yangkit_lib::{SchemaBuilder, SchemaLinked};

use super::loader::load_sources;

/// Loads and compiles `paths`. Exits on unreadable input or an exhausted
/// parser budget; schema errors are left in the returned diagnostics.
pub fn compile(paths: &[PathBuf], fuel: Option<u32>) -> SchemaLinked {
    let source_map = load_sources(paths).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    let mut builder = SchemaBuilder::new(source_map);
    if let Some(fuel) = fuel {
        builder = builder.with_parse_fuel(fuel);
    }

    match builder.parse() {
        Ok(parsed) => parsed.analyze().link(),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Prints diagnostics to stderr and exits when the set has errors.
pub fn require_valid(schema: &SchemaLinked, color: bool) {
    if !schema.is_valid() {
        eprint!(
            "{}",
            schema
                .diagnostics()
                .render_filtered_colored(schema.source_map(), color)
        );
        std::process::exit(1);
    }
}
