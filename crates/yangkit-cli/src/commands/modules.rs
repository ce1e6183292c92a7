use std::fmt::Write;
use std::path::PathBuf;

use serde::Serialize;
use yangkit_lib::SchemaLinked;

use super::run_common::compile;

pub struct ModulesArgs {
    pub paths: Vec<PathBuf>,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

/// One row of the listing.
#[derive(Debug, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub kind: &'static str,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    /// Analysis failed or the revision repeats another source.
    pub failed: bool,
}

pub fn run(args: ModulesArgs) {
    let schema = compile(&args.paths, args.fuel);
    let rows = summaries(&schema);

    if args.json {
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize the module list: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render(&rows));
    }

    if !schema.is_valid() {
        eprint!(
            "{}",
            schema
                .diagnostics()
                .render_filtered_colored(schema.source_map(), args.color)
        );
        std::process::exit(1);
    }
}

pub fn summaries(schema: &SchemaLinked) -> Vec<ModuleSummary> {
    schema
        .units()
        .filter_map(|unit| {
            let module = unit.tree.module()?;
            let with_revision = |name: &str, revision: &Option<String>| match revision {
                Some(date) => format!("{}@{}", name, date),
                None => name.to_string(),
            };
            Some(ModuleSummary {
                name: unit.name()?.to_string(),
                revision: unit.revision().map(str::to_owned),
                kind: if unit.is_submodule() {
                    "submodule"
                } else {
                    "module"
                },
                source: schema
                    .source_map()
                    .kind(unit.source)
                    .display_name()
                    .to_string(),
                belongs_to: module.belongs_to.as_ref().map(|b| b.module.clone()),
                imports: module
                    .imports
                    .iter()
                    .map(|i| with_revision(&i.module, &i.revision_date))
                    .collect(),
                includes: module
                    .includes
                    .iter()
                    .map(|i| with_revision(&i.submodule, &i.revision_date))
                    .collect(),
                failed: unit.failed,
            })
        })
        .collect()
}

pub fn render(rows: &[ModuleSummary]) -> String {
    let mut out = String::new();
    format_rows(&mut out, rows).expect("String write never fails");
    out
}

fn format_rows(w: &mut String, rows: &[ModuleSummary]) -> std::fmt::Result {
    for row in rows {
        write!(w, "{} {}", row.kind, row.name)?;
        if let Some(rev) = &row.revision {
            write!(w, "@{}", rev)?;
        }
        write!(w, " ({})", row.source)?;
        if row.failed {
            w.write_str(" [failed]")?;
        }
        w.write_char('\n')?;
        if let Some(parent) = &row.belongs_to {
            writeln!(w, "  belongs-to {}", parent)?;
        }
        for import in &row.imports {
            writeln!(w, "  import {}", import)?;
        }
        for include in &row.includes {
            writeln!(w, "  include {}", include)?;
        }
    }
    Ok(())
}
