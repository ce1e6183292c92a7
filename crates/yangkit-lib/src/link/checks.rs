//! Reports for what linking could not settle, and checks that need linked trees.

use super::lookup::{Resolver, UnitView};
use super::path::parse_schema_node_id;
use super::{LinkPhase, LinkUnit, Origin, ResolutionState, Resolvable, ResolvableKind};
use crate::analyze::{SchemaError, suggestion};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::schema::{NodeId, NodeKind, NodeRef, NodeTag, SchemaTree};

/// Reports unresolved and failed references of every usable unit, then
/// runs the checks deferred until `uses` were bound: list keys, refine
/// targets and identity derivation cycles.
pub fn report_unresolved(units: &[LinkUnit<'_>], diagnostics: &mut Diagnostics) {
    let views = units
        .iter()
        .map(|u| UnitView {
            tree: &*u.tree,
            usable: u.usable,
        })
        .collect();
    let resolver = Resolver::new(views, LinkPhase::InterFile);

    for unit in units.iter().filter(|u| u.usable) {
        let mut errors = Vec::new();
        queue_errors(&resolver, unit, &mut errors);
        for &list in unit.deferred_keys {
            check_keys(&resolver, unit, list, &mut errors);
        }
        check_refines(&resolver, unit, &mut errors);
        check_identity_cycles(&resolver, unit, &mut errors);

        errors.sort_by_key(|e: &SchemaError| e.range.start());
        for err in &errors {
            err.report(unit.source, diagnostics);
        }
    }
}

fn queue_errors(resolver: &Resolver<'_>, unit: &LinkUnit<'_>, errors: &mut Vec<SchemaError>) {
    for item in unit.queue.iter() {
        let keyword = item.kind.keyword();
        let mut err = match &item.state {
            ResolutionState::Unresolved => SchemaError::at(
                DiagnosticKind::UnresolvedReference,
                keyword,
                Some(&item.reference),
                item.pos,
                item.range,
                item.reference.clone(),
            ),
            ResolutionState::Failed(reason) => SchemaError::at(
                DiagnosticKind::DataModelConstraintViolation,
                keyword,
                Some(&item.reference),
                item.pos,
                item.range,
                reason.clone(),
            ),
            ResolutionState::Resolved(_) | ResolutionState::Blocked => continue,
        };
        if let Some(hint) = hint(resolver, unit, item) {
            err = err.hint(hint);
        }
        errors.push(err);
    }
}

/// Where an instantiated reference was written, or a near miss for an
/// unresolved local one.
fn hint(resolver: &Resolver<'_>, unit: &LinkUnit<'_>, item: &Resolvable) -> Option<String> {
    match &item.origin {
        Some(Origin::UnionMember { union, .. }) => {
            let tree = resolver.tree(union.source);
            let typedef = tree
                .ancestors(union.node)
                .find(|&n| tree.node(n).tag() == NodeTag::Typedef)?;
            Some(format!(
                "member of the union in typedef `{}`",
                tree.node(typedef).name
            ))
        }
        Some(Origin::Grouping { leaf, .. }) => Some(format!(
            "path of leaf `{}` in the used grouping",
            resolver.node(*leaf).name
        )),
        None if item.state == ResolutionState::Unresolved => {
            near_miss(&*unit.tree, item.kind, &item.reference)
        }
        None => None,
    }
}

/// Similar local name of the kind the reference looks for.
fn near_miss(tree: &SchemaTree, kind: ResolvableKind, reference: &str) -> Option<String> {
    let tag = match kind {
        ResolvableKind::Uses => NodeTag::Grouping,
        ResolvableKind::DerivedType(_) => NodeTag::Typedef,
        ResolvableKind::Base | ResolvableKind::IdentityRef(_) => NodeTag::Identity,
        ResolvableKind::IfFeature(_) => NodeTag::Feature,
        ResolvableKind::Leafref(_) | ResolvableKind::Augment => return None,
    };
    let name = reference.rsplit(':').next().unwrap_or(reference);
    let candidates: Vec<&str> = tree
        .iter()
        .filter(|(_, n)| n.tag() == tag)
        .map(|(_, n)| n.name.as_str())
        .collect();
    suggestion(name, &candidates)
}

fn check_keys(
    resolver: &Resolver<'_>,
    unit: &LinkUnit<'_>,
    list: NodeId,
    errors: &mut Vec<SchemaError>,
) {
    let node = unit.tree.node(list);
    let NodeKind::List(data) = &node.kind else {
        return;
    };
    // an unbound `uses` is reported on its own
    let unbound_uses = unit.tree.children(list).iter().any(|&c| {
        matches!(&unit.tree.node(c).kind, NodeKind::Uses(u) if u.target.is_none())
    });
    if unbound_uses {
        return;
    }

    let children = resolver.data_children(NodeRef::new(unit.source, list));
    let (pos, range) = data.key_range.unwrap_or((node.pos, node.range));
    for key in &data.keys {
        let is_leaf = children.iter().any(|&c| {
            let child = resolver.node(c);
            child.name == *key && child.tag() == NodeTag::Leaf
        });
        if !is_leaf {
            errors.push(SchemaError::at(
                DiagnosticKind::DataModelConstraintViolation,
                "key",
                Some(&data.keys.join(" ")),
                pos,
                range,
                format!("key `{key}` is not a leaf of list `{}`", node.name),
            ));
        }
    }
}

/// Every `refine` must name a node of the used grouping.
fn check_refines(resolver: &Resolver<'_>, unit: &LinkUnit<'_>, errors: &mut Vec<SchemaError>) {
    for (_, node) in unit.tree.iter() {
        let NodeKind::Uses(data) = &node.kind else {
            continue;
        };
        let Some(grouping) = data.target else {
            continue;
        };
        for refine in &data.refines {
            let found = parse_schema_node_id(&refine.target)
                .ok()
                .and_then(|id| {
                    id.steps.iter().try_fold(grouping, |at, step| {
                        resolver
                            .schema_children(at)
                            .into_iter()
                            .find(|&c| resolver.node(c).name == step.name)
                    })
                });
            if found.is_none() {
                errors.push(
                    SchemaError::at(
                        DiagnosticKind::UnresolvedReference,
                        "refine",
                        Some(&refine.target),
                        refine.pos,
                        refine.range,
                        refine.target.clone(),
                    )
                    .hint(format!(
                        "refine paths are relative to grouping `{}`",
                        resolver.node(grouping).name
                    )),
                );
            }
        }
    }
}

/// `base` chains longer than one step that come back to where they started.
fn check_identity_cycles(
    resolver: &Resolver<'_>,
    unit: &LinkUnit<'_>,
    errors: &mut Vec<SchemaError>,
) {
    for (id, node) in unit.tree.iter() {
        let NodeKind::Identity(data) = &node.kind else {
            continue;
        };
        let start = NodeRef::new(unit.source, id);
        let mut visited = vec![start];
        let mut current = data.base_target;
        while let Some(next) = current {
            if next == start {
                let names: Vec<&str> = visited
                    .iter()
                    .chain(std::iter::once(&start))
                    .map(|&r| resolver.node(r).name.as_str())
                    .collect();
                errors.push(SchemaError::at(
                    DiagnosticKind::DataModelConstraintViolation,
                    "identity",
                    Some(&node.name),
                    node.pos,
                    node.range,
                    format!("base chain `{}` is circular", names.join(" -> ")),
                ));
                break;
            }
            if visited.contains(&next) {
                // cycle further up, reported from its own members
                break;
            }
            visited.push(next);
            current = match &resolver.node(next).kind {
                NodeKind::Identity(d) => d.base_target,
                _ => None,
            };
        }
    }
}
