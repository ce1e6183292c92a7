//! Reference linking.
//!
//! Every unit collects [`Resolvable`]s while it is analyzed. Linking runs
//! twice: once per unit when its module statement closes
//! ([`LinkPhase::IntraFile`]), and once over the whole compilation set after
//! imports and includes are bound ([`LinkPhase::InterFile`]).
//!
//! Each run repeats ranked passes until nothing changes. One pass computes
//! outcomes against a read-only [`lookup::Resolver`], then writes them into the
//! trees; the next pass sees the new bindings.

mod checks;
mod derived;
mod inter;
mod lookup;
pub mod path;
mod resolvable;

#[cfg(test)]
mod path_tests;

pub use checks::report_unresolved;
pub use inter::bind_sources;
pub use resolvable::{
    Origin, Resolvable, ResolutionQueue, ResolutionState, ResolvableKind, TypeSlot,
};

use tracing::{debug, trace};
use yangkit_core::BuiltinType;

use crate::compilation::source_map::SourceId;
use crate::schema::{NodeId, NodeKind, NodeRef, NodeTag, QName, SchemaTree, TypeSpec};
use derived::Derivation;
use lookup::{Lookup, Miss, Resolver, UnitView};

/// Which references a link run can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPhase {
    /// Only the unit itself; prefixed names from imports stay pending.
    IntraFile,
    /// Every unit, with imports and includes bound.
    InterFile,
}

/// One unit taking part in a link run.
pub struct LinkUnit<'a> {
    pub source: SourceId,
    pub tree: &'a mut SchemaTree,
    pub queue: &'a mut ResolutionQueue,
    /// False for units that failed analysis: never linked, never linked into.
    pub usable: bool,
    /// Lists whose keys are checked once `uses` are bound.
    pub deferred_keys: &'a [NodeId],
}

impl<'a> LinkUnit<'a> {
    pub fn new(tree: &'a mut SchemaTree, queue: &'a mut ResolutionQueue) -> Self {
        Self {
            source: tree.source(),
            tree,
            queue,
            usable: true,
            deferred_keys: &[],
        }
    }

    pub fn with_deferred_keys(mut self, lists: &'a [NodeId]) -> Self {
        self.deferred_keys = lists;
        self
    }

    pub fn usable(mut self, usable: bool) -> Self {
        self.usable = usable;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Pending,
    Blocked,
    Failed(String),
    Target(NodeRef),
    /// Effective type plus items for the members of a union at the end of
    /// the chain.
    Derived(Box<Derivation>, Vec<Resolvable>),
}

impl From<Miss> for Outcome {
    fn from(miss: Miss) -> Self {
        match miss {
            Miss::NotFound => Outcome::Pending,
            Miss::Blocked => Outcome::Blocked,
            Miss::Failed(reason) => Outcome::Failed(reason),
        }
    }
}

/// Resolves every pending item it can. Items that stay pending are left for
/// a later run or for [`report_unresolved`].
///
/// Once every unit is visible, groupings are instantiated at their `uses`
/// and the relative leafrefs that brings in are resolved too.
pub fn resolve_units(units: &mut [LinkUnit<'_>], phase: LinkPhase) {
    settle(units, phase);
    if phase == LinkPhase::InterFile && instantiate_groupings(units) > 0 {
        settle(units, phase);
    }
    for unit in units.iter().filter(|u| u.usable) {
        debug!(
            source = ?unit.source,
            ?phase,
            pending = unit.queue.pending_count(),
            "linked"
        );
    }
}

fn settle(units: &mut [LinkUnit<'_>], phase: LinkPhase) {
    let mut round = 0;
    loop {
        round += 1;
        let mut progress = false;
        for rank in 0..ResolvableKind::RANKS {
            let outcomes = compute_rank(units, phase, rank);
            for (unit, index, outcome) in outcomes {
                progress |= apply(&mut units[unit], index, outcome);
            }
        }
        trace!(?phase, round, progress, "link round");
        if !progress {
            break;
        }
    }
}

fn resolver<'u>(units: &'u [LinkUnit<'_>], phase: LinkPhase) -> Resolver<'u> {
    let views = units
        .iter()
        .map(|u| UnitView {
            tree: &*u.tree,
            usable: u.usable,
        })
        .collect();
    Resolver::new(views, phase)
}

/// Queues one leafref item per relative path of every grouping bound to a
/// `uses` outside any grouping. Returns how many were queued.
fn instantiate_groupings(units: &mut [LinkUnit<'_>]) -> usize {
    let found = {
        let resolver = resolver(units, LinkPhase::InterFile);
        let mut found = Vec::new();
        for (u, unit) in units.iter().enumerate().filter(|(_, u)| u.usable) {
            for item in unit.queue.iter() {
                let (ResolvableKind::Uses, ResolutionState::Resolved(grouping)) =
                    (item.kind, &item.state)
                else {
                    continue;
                };
                if unit.tree.is_within(item.consumer, NodeTag::Grouping) {
                    continue;
                }
                let uses = NodeRef::new(unit.source, item.consumer);
                for leafref in resolver.grouping_leafrefs(*grouping, uses) {
                    let instance = Resolvable::new(
                        ResolvableKind::Leafref(TypeSlot::of(item.consumer)),
                        leafref.path,
                        item.consumer,
                        item.pos,
                        item.range,
                    )
                    .instantiated(Origin::Grouping {
                        leaf: leafref.leaf,
                        uses: leafref.uses,
                    });
                    found.push((u, instance));
                }
            }
        }
        found
    };
    let count = found.len();
    for (u, item) in found {
        units[u].queue.enqueue(item);
    }
    debug!(count, "instantiated grouping leafrefs");
    count
}

fn compute_rank(
    units: &[LinkUnit<'_>],
    phase: LinkPhase,
    rank: u8,
) -> Vec<(usize, usize, Outcome)> {
    let resolver = resolver(units, phase);

    let mut outcomes = Vec::new();
    for (u, unit) in units.iter().enumerate().filter(|(_, u)| u.usable) {
        for index in unit.queue.pending_of_rank(rank) {
            let item = unit.queue.get(index);
            let outcome = compute(&resolver, unit.source, item);
            if outcome != Outcome::Pending {
                outcomes.push((u, index, outcome));
            }
        }
    }
    outcomes
}

fn compute(resolver: &Resolver<'_>, source: SourceId, item: &Resolvable) -> Outcome {
    let from = match &item.origin {
        Some(Origin::UnionMember { union, .. }) => *union,
        _ => NodeRef::new(source, item.consumer),
    };
    let name = || {
        QName::parse(&item.reference)
            .ok_or_else(|| Miss::Failed(format!("`{}` is not a valid name", item.reference)))
    };

    let found = match item.kind {
        ResolvableKind::Uses => name().and_then(|q| resolver.grouping(from, &q)),
        ResolvableKind::DerivedType(slot) => return derive_slot(resolver, source, item, slot),
        ResolvableKind::Base => name()
            .and_then(|q| resolver.top_level(from, &q, NodeTag::Identity))
            .and_then(|target| {
                if target == from {
                    Err(Miss::Failed(format!(
                        "identity `{}` is derived from itself",
                        item.reference
                    )))
                } else {
                    Ok(target)
                }
            }),
        ResolvableKind::IdentityRef(_) => {
            name().and_then(|q| resolver.top_level(from, &q, NodeTag::Identity))
        }
        ResolvableKind::IfFeature(_) => {
            name().and_then(|q| resolver.top_level(from, &q, NodeTag::Feature))
        }
        ResolvableKind::Leafref(slot) => match &item.origin {
            Some(Origin::Grouping { leaf, uses }) => {
                resolver.leafref_in(*leaf, &item.reference, uses)
            }
            _ => resolver.leafref(NodeRef::new(source, slot.node), &item.reference),
        },
        ResolvableKind::Augment => resolver.augment_target(from, &item.reference),
    };

    match found {
        Ok(target) => Outcome::Target(target),
        Err(miss) => miss.into(),
    }
}

/// Derives the slot's type, or the typedef union member the item stands for.
fn derive_slot(
    resolver: &Resolver<'_>,
    source: SourceId,
    item: &Resolvable,
    slot: TypeSlot,
) -> Outcome {
    let (at, spec) = match &item.origin {
        Some(Origin::UnionMember { union, member, .. }) => (
            *union,
            slot_spec(resolver.tree(union.source), TypeSlot::member(union.node, *member)),
        ),
        _ => (NodeRef::new(source, slot.node), slot_spec(resolver.tree(source), slot)),
    };
    let Some(spec) = spec else {
        return Outcome::Failed("type statement vanished".to_string());
    };
    let derivation = match resolver.derive(at, spec) {
        Ok(derivation) => derivation,
        Err(miss) => return miss.into(),
    };
    let members = match derivation.effective.members_from {
        Some(typedef) if derivation.effective.builtin == BuiltinType::Union => {
            match union_members(resolver, item, slot, typedef) {
                Ok(members) => members,
                Err(miss) => return miss.into(),
            }
        }
        _ => Vec::new(),
    };
    Outcome::Derived(Box::new(derivation), members)
}

/// Items checking every member of the union `typedef` declares, on behalf
/// of the item's consumer. Nested unions are flattened.
fn union_members(
    resolver: &Resolver<'_>,
    item: &Resolvable,
    slot: TypeSlot,
    typedef: NodeRef,
) -> Lookup<Vec<Resolvable>> {
    let mut typedefs = match &item.origin {
        Some(Origin::UnionMember { typedefs, .. }) => typedefs.clone(),
        _ => Vec::new(),
    };
    if typedefs.contains(&typedef) {
        return Err(Miss::Failed(format!(
            "typedef `{}` contains itself through a union member",
            resolver.node(typedef).name
        )));
    }
    typedefs.push(typedef);

    let mut out = Vec::new();
    let members = resolver.node(typedef).kind.type_spec().and_then(|s| s.members);
    if let Some(union) = members {
        let union = NodeRef::new(typedef.source, union);
        collect_members(resolver, item, slot, union, &typedefs, &mut out);
    }
    Ok(out)
}

fn collect_members(
    resolver: &Resolver<'_>,
    item: &Resolvable,
    slot: TypeSlot,
    union: NodeRef,
    typedefs: &[NodeRef],
    out: &mut Vec<Resolvable>,
) {
    let NodeKind::Union(data) = &resolver.node(union).kind else {
        return;
    };
    for (member, spec) in data.members.iter().enumerate() {
        let (kind, reference) = match spec.builtin {
            None => (ResolvableKind::DerivedType(slot), spec.name.to_string()),
            Some(BuiltinType::Leafref) => match &spec.path {
                Some(path) => (ResolvableKind::Leafref(slot), path.clone()),
                None => continue,
            },
            Some(BuiltinType::Identityref) => match &spec.base {
                Some(base) => (ResolvableKind::IdentityRef(slot), base.to_string()),
                None => continue,
            },
            Some(BuiltinType::Union) => {
                if let Some(nested) = spec.members {
                    let nested = NodeRef::new(union.source, nested);
                    collect_members(resolver, item, slot, nested, typedefs, out);
                }
                continue;
            }
            Some(_) => continue,
        };
        out.push(
            Resolvable::new(kind, reference, item.consumer, item.pos, item.range).instantiated(
                Origin::UnionMember {
                    union,
                    member,
                    typedefs: typedefs.to_vec(),
                },
            ),
        );
    }
}

/// Writes one outcome. Returns whether anything changed.
fn apply(unit: &mut LinkUnit<'_>, index: usize, outcome: Outcome) -> bool {
    let item = unit.queue.get(index).clone();
    let state = match outcome {
        Outcome::Pending => return false,
        Outcome::Blocked => ResolutionState::Blocked,
        Outcome::Failed(reason) => {
            trace!(reference = %item.reference, %reason, "link failed");
            ResolutionState::Failed(reason)
        }
        Outcome::Target(target) => {
            bind_target(unit.tree, &item, target);
            ResolutionState::Resolved(target)
        }
        Outcome::Derived(derivation, members) => {
            let ResolvableKind::DerivedType(slot) = item.kind else {
                unreachable!("derivations come from type references");
            };
            bind_derivation(unit, &item, slot, *derivation, members)
        }
    };
    unit.queue.set_state(index, state);
    true
}

fn bind_target(tree: &mut SchemaTree, item: &Resolvable, target: NodeRef) {
    if item.origin.is_some() {
        return;
    }
    match item.kind {
        ResolvableKind::Uses => {
            if let NodeKind::Uses(data) = &mut tree.node_mut(item.consumer).kind {
                data.target = Some(target);
            }
        }
        ResolvableKind::Augment => {
            if let NodeKind::Augment(data) = &mut tree.node_mut(item.consumer).kind {
                data.target = Some(target);
            }
        }
        ResolvableKind::Base => {
            if let NodeKind::Identity(data) = &mut tree.node_mut(item.consumer).kind {
                data.base_target = Some(target);
            }
        }
        ResolvableKind::IfFeature(i) => {
            if let Some(feature) = tree.node_mut(item.consumer).meta.if_features.get_mut(i) {
                feature.target = Some(target);
            }
        }
        ResolvableKind::IdentityRef(slot) => {
            if let Some(spec) = slot_spec_mut(tree, slot) {
                spec.identity = Some(target);
            }
        }
        ResolvableKind::Leafref(slot) => {
            if let Some(spec) = slot_spec_mut(tree, slot) {
                spec.leafref_target = Some(target);
            }
        }
        ResolvableKind::DerivedType(_) => {}
    }
}

/// Stores the effective type. A leafref path found at the end of the chain
/// and the members of a union there become new items, evaluated from this
/// consumer. Relative paths inside a grouping wait for its `uses`.
fn bind_derivation(
    unit: &mut LinkUnit<'_>,
    item: &Resolvable,
    slot: TypeSlot,
    derivation: Derivation,
    members: Vec<Resolvable>,
) -> ResolutionState {
    let typedef = derivation.typedef;
    if item.origin.is_none()
        && let Some(spec) = slot_spec_mut(unit.tree, slot)
    {
        spec.typedef = Some(typedef);
        spec.effective = Some(derivation.effective);
        spec.identity = derivation.identity;
    }

    let mut follow_ups = members;
    if let Some(path) = derivation.leafref {
        let mut leafref = Resolvable::new(
            ResolvableKind::Leafref(slot),
            path,
            item.consumer,
            item.pos,
            item.range,
        );
        leafref.origin = item.origin.clone();
        follow_ups.push(leafref);
    }
    let in_grouping = unit.tree.is_within(slot.node, NodeTag::Grouping);
    for follow_up in follow_ups {
        let relative = matches!(follow_up.kind, ResolvableKind::Leafref(_))
            && !follow_up.reference.trim_start().starts_with('/');
        if !(relative && in_grouping) {
            unit.queue.enqueue(follow_up);
        }
    }
    ResolutionState::Resolved(typedef)
}

fn slot_spec(tree: &SchemaTree, slot: TypeSlot) -> Option<&TypeSpec> {
    let kind = &tree.node(slot.node).kind;
    match (slot.member, kind) {
        (None, kind) => kind.type_spec(),
        (Some(i), NodeKind::Union(u)) => u.members.get(i),
        _ => None,
    }
}

fn slot_spec_mut(tree: &mut SchemaTree, slot: TypeSlot) -> Option<&mut TypeSpec> {
    let kind = &mut tree.node_mut(slot.node).kind;
    match (slot.member, kind) {
        (None, kind) => kind.type_spec_mut(),
        (Some(i), NodeKind::Union(u)) => u.members.get_mut(i),
        _ => None,
    }
}
