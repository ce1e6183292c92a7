//! Binding `import` and `include` statements to units of the compilation set.

use tracing::debug;

use super::LinkUnit;
use crate::analyze::SchemaError;
use crate::compilation::source_map::SourceId;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::schema::{NodeId, NodeTag};

/// Identity of one unit in the compilation set.
#[derive(Debug, Clone)]
struct Entry {
    source: SourceId,
    name: String,
    revision: Option<String>,
    is_submodule: bool,
    /// Module a submodule belongs to.
    belongs_to: Option<String>,
    usable: bool,
}

impl Entry {
    fn matches(&self, name: &str, revision: Option<&str>, submodule: bool) -> bool {
        self.is_submodule == submodule
            && self.name == name
            && revision.is_none_or(|r| self.revision.as_deref() == Some(r))
    }
}

/// Binds every import and include of the usable units. A repeated module
/// name and revision makes the later unit unusable.
pub fn bind_sources(units: &mut [LinkUnit<'_>], diagnostics: &mut Diagnostics) {
    let mut entries: Vec<Entry> = units.iter().filter_map(entry).collect();
    reject_duplicates(units, &mut entries, diagnostics);

    for unit in units.iter_mut().filter(|u| u.usable) {
        let Some(own) = entries.iter().find(|e| e.source == unit.source).cloned() else {
            continue;
        };
        let Some(module) = unit.tree.node_mut(NodeId::ROOT).kind.module_data_mut() else {
            continue;
        };

        for import in &mut module.imports {
            match pick(&entries, &import.module, import.revision_date.as_deref(), false) {
                Some(found) => {
                    debug!(module = %import.module, prefix = %import.prefix, "import bound");
                    import.resolved = Some(found.source);
                }
                None => {
                    let detail = match &import.revision_date {
                        Some(date) => format!("{}@{}", import.module, date),
                        None => import.module.clone(),
                    };
                    SchemaError::at(
                        DiagnosticKind::UnresolvedReference,
                        "import",
                        Some(&import.module),
                        import.pos,
                        import.range,
                        detail,
                    )
                    .hint("add the imported module to the compilation set")
                    .report(unit.source, diagnostics);
                }
            }
        }

        // a module includes its own submodules, a submodule its siblings
        let parent = own.belongs_to.as_deref().unwrap_or(&own.name);
        for include in &mut module.includes {
            let found = pick(&entries, &include.submodule, include.revision_date.as_deref(), true);
            match found {
                Some(found) if found.belongs_to.as_deref() == Some(parent) => {
                    include.resolved = Some(found.source);
                }
                Some(found) => {
                    SchemaError::at(
                        DiagnosticKind::DataModelConstraintViolation,
                        "include",
                        Some(&include.submodule),
                        include.pos,
                        include.range,
                        format!(
                            "submodule `{}` belongs to `{}`, not `{parent}`",
                            found.name,
                            found.belongs_to.as_deref().unwrap_or("?")
                        ),
                    )
                    .report(unit.source, diagnostics);
                }
                None => {
                    SchemaError::at(
                        DiagnosticKind::UnresolvedReference,
                        "include",
                        Some(&include.submodule),
                        include.pos,
                        include.range,
                        include.submodule.clone(),
                    )
                    .hint("add the submodule to the compilation set")
                    .report(unit.source, diagnostics);
                }
            }
        }
    }
}

fn entry(unit: &LinkUnit<'_>) -> Option<Entry> {
    let root = unit.tree.get(NodeId::ROOT)?;
    let module = root.kind.module_data()?;
    Some(Entry {
        source: unit.source,
        name: root.name.clone(),
        revision: module.revision().map(str::to_owned),
        is_submodule: root.tag() == NodeTag::SubModule,
        belongs_to: module.belongs_to.as_ref().map(|b| b.module.clone()),
        usable: unit.usable,
    })
}

fn reject_duplicates(
    units: &mut [LinkUnit<'_>],
    entries: &mut [Entry],
    diagnostics: &mut Diagnostics,
) {
    for i in 0..entries.len() {
        if !entries[i].usable {
            continue;
        }
        let duplicate = entries[..i].iter().any(|e| {
            e.usable
                && e.name == entries[i].name
                && e.is_submodule == entries[i].is_submodule
                && e.revision == entries[i].revision
        });
        if !duplicate {
            continue;
        }
        entries[i].usable = false;
        let Some(unit) = units.iter_mut().find(|u| u.source == entries[i].source) else {
            continue;
        };
        unit.usable = false;
        let root = unit.tree.node(NodeId::ROOT);
        let detail = match &entries[i].revision {
            Some(rev) => format!("{}@{}", root.name, rev),
            None => root.name.clone(),
        };
        SchemaError::at(
            DiagnosticKind::DuplicateIdentifier,
            root.tag().keyword(),
            Some(&root.name),
            root.pos,
            root.range,
            detail,
        )
        .hint("another source in the compilation set defines the same revision")
        .report(entries[i].source, diagnostics);
    }
}

/// With a revision date the exact revision; without one the newest.
fn pick<'e>(
    entries: &'e [Entry],
    name: &str,
    revision: Option<&str>,
    submodule: bool,
) -> Option<&'e Entry> {
    entries
        .iter()
        .filter(|e| e.matches(name, revision, submodule))
        .filter(|e| e.usable || !e.is_duplicate_of_usable(entries))
        .max_by(|a, b| a.revision.cmp(&b.revision))
}

impl Entry {
    /// Duplicates are never bound; a unit that merely failed analysis is,
    /// so that references into it are blocked rather than unresolved.
    fn is_duplicate_of_usable(&self, entries: &[Entry]) -> bool {
        entries.iter().any(|e| {
            e.source != self.source
                && e.usable
                && e.name == self.name
                && e.is_submodule == self.is_submodule
                && e.revision == self.revision
        })
    }
}
