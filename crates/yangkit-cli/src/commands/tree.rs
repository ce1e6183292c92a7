use std::path::PathBuf;

use yangkit_lib::schema::SchemaTree;

use super::run_common::{compile, require_valid};

pub struct TreeArgs {
    pub paths: Vec<PathBuf>,
    pub module: Option<String>,
    pub groupings: bool,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let schema = compile(&args.paths, args.fuel);
    require_valid(&schema, args.color);

    let all: Vec<&SchemaTree> = schema.units().map(|u| &u.tree).collect();
    let selected: Vec<&SchemaTree> = match &args.module {
        Some(name) => match schema.unit_by_name(name) {
            Some(unit) => vec![&unit.tree],
            None => {
                eprintln!("error: no module named `{}` in the compilation set", name);
                std::process::exit(1);
            }
        },
        None => all.clone(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&selected).unwrap_or_else(|e| {
            eprintln!("error: failed to serialize the schema tree: {}", e);
            std::process::exit(1);
        });
        println!("{}", json);
        return;
    }

    let dumps: Vec<String> = selected
        .iter()
        .map(|tree| {
            tree.printer()
                .with_units(all.iter().copied())
                .with_groupings(args.groupings)
                .dump()
        })
        .collect();
    print!("{}", dumps.join("\n"));
}
