//! Helpers for compiling inline schema text in tests.

use crate::analyze::{Analysis, analyze_unit};
use crate::compilation::source_map::{SourceId, SourceMap};
use crate::compilation::{SchemaBuilder, SchemaLinked, Unit};
use crate::diagnostics::DiagnosticKind;
use crate::parser::parse;
use crate::schema::{NodeId, SchemaNode, SchemaTree};

pub fn compile(src: &str) -> SchemaLinked {
    SchemaBuilder::inline(src)
        .parse()
        .expect("parse within fuel")
        .analyze()
        .link()
}

/// Compiles several named sources as one set.
pub fn compile_files(files: &[(&str, &str)]) -> SchemaLinked {
    let mut map = SourceMap::new();
    for (path, content) in files {
        map.add_file(path, content);
    }
    SchemaBuilder::new(map)
        .parse()
        .expect("parse within fuel")
        .analyze()
        .link()
}

/// Walks one source without linking across files.
pub fn analyze(src: &str) -> Analysis {
    let map = SourceMap::inline(src);
    let id = SourceId(0);
    let parsed = parse(src, id).expect("parse within fuel");
    assert!(
        !parsed.diagnostics.has_errors(),
        "syntax errors:\n{}",
        parsed.diagnostics.render(&map)
    );
    analyze_unit(&parsed.root, id, &map)
}

/// One `file:line:col: severity: message` line per diagnostic.
pub fn brief(schema: &SchemaLinked) -> String {
    schema.diagnostics().render_brief(schema.source_map())
}

pub fn kinds(schema: &SchemaLinked) -> Vec<DiagnosticKind> {
    schema.diagnostics().kinds()
}

pub fn assert_valid(schema: &SchemaLinked) {
    assert!(schema.is_valid(), "{}", brief(schema));
}

pub fn only_unit(schema: &SchemaLinked) -> &Unit {
    let mut units = schema.units();
    let unit = units.next().expect("no unit analyzed");
    assert!(units.next().is_none(), "more than one unit");
    unit
}

/// Node at a `/`-separated path of names below the root.
pub fn node_at(tree: &SchemaTree, path: &str) -> NodeId {
    path.split('/').fold(NodeId::ROOT, |at, name| {
        *tree
            .children(at)
            .iter()
            .find(|&&c| tree.node(c).name == name)
            .unwrap_or_else(|| panic!("no `{name}` under `{}`", tree.node(at).name))
    })
}

pub fn at<'t>(tree: &'t SchemaTree, path: &str) -> &'t SchemaNode {
    tree.node(node_at(tree, path))
}
