//! Name and path lookup over the units taking part in one link pass.
//!
//! A [`Resolver`] only reads trees. It is rebuilt for every ranked pass so
//! that targets bound by an earlier pass (a `uses` grouping, an `augment`
//! target) are visible to later ones.

use std::collections::HashMap;

use yangkit_core::BuiltinType;

use super::LinkPhase;
use super::path::{parse_leafref_path, parse_schema_node_id};
use crate::compilation::source_map::SourceId;
use crate::schema::{
    NodeId, NodeKind, NodeRef, NodeTag, QName, SchemaNode, SchemaTree, TypeSpec,
};

/// Why a lookup produced no target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Miss {
    /// Nothing matches yet. Binding more units may change that.
    NotFound,
    /// The target would live in a unit that failed analysis.
    Blocked,
    /// A match exists but cannot be used; the reason is kept for reporting.
    Failed(String),
}

pub(crate) type Lookup<T = NodeRef> = Result<T, Miss>;

/// A relative leafref found under a grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GroupingLeafref {
    pub leaf: NodeRef,
    pub path: String,
    pub uses: Vec<NodeRef>,
}

/// Read-only view of one unit.
pub(crate) struct UnitView<'u> {
    pub tree: &'u SchemaTree,
    pub usable: bool,
}

/// How children are reached by one path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Leafref paths: `choice` and `case` are transparent.
    Data,
    /// Schema node identifiers: `choice` and `case` are named steps.
    Schema,
}

pub(crate) struct Resolver<'u> {
    units: Vec<UnitView<'u>>,
    phase: LinkPhase,
    /// Bound top-level augments, keyed by target.
    augments: HashMap<NodeRef, Vec<NodeRef>>,
}

impl<'u> Resolver<'u> {
    pub(crate) fn new(units: Vec<UnitView<'u>>, phase: LinkPhase) -> Self {
        let mut augments: HashMap<NodeRef, Vec<NodeRef>> = HashMap::new();
        for unit in units.iter().filter(|u| u.usable) {
            for (id, node) in unit.tree.iter() {
                if let NodeKind::Augment(data) = &node.kind
                    && let Some(target) = data.target
                    && node
                        .parent
                        .is_some_and(|p| unit.tree.node(p).tag().is_module())
                {
                    augments
                        .entry(target)
                        .or_default()
                        .push(NodeRef::new(unit.tree.source(), id));
                }
            }
        }
        Self {
            units,
            phase,
            augments,
        }
    }

    fn view(&self, source: SourceId) -> Option<&UnitView<'u>> {
        self.units.iter().find(|u| u.tree.source() == source)
    }

    pub(crate) fn tree(&self, source: SourceId) -> &'u SchemaTree {
        self.view(source)
            .map(|u| u.tree)
            .expect("NodeRef into a unit outside the link pass")
    }

    pub(crate) fn node(&self, r: NodeRef) -> &'u SchemaNode {
        self.tree(r.source).node(r.node)
    }

    fn is_usable(&self, source: SourceId) -> bool {
        self.view(source).is_some_and(|u| u.usable)
    }

    /// Units a name with `prefix` can refer to, seen from `from`.
    ///
    /// No prefix, the unit's own prefix and the `belongs-to` prefix all mean
    /// the local unit, followed by its included submodules once those are
    /// bound. Any other prefix must match an `import`.
    fn scopes(&self, from: NodeRef, prefix: Option<&str>) -> Lookup<Vec<SourceId>> {
        let module = self.tree(from.source).module().ok_or(Miss::NotFound)?;
        let imported = match prefix {
            Some(p) if p != module.prefix => p,
            _ => {
                let mut scopes = vec![from.source];
                if self.phase == LinkPhase::InterFile {
                    scopes.extend(module.includes.iter().filter_map(|i| i.resolved));
                }
                return Ok(scopes);
            }
        };
        match module.import_by_prefix(imported).and_then(|i| i.resolved) {
            Some(source) if self.is_usable(source) => Ok(vec![source]),
            Some(_) => Err(Miss::Blocked),
            None => Err(Miss::NotFound),
        }
    }

    fn search(
        &self,
        scopes: &[SourceId],
        mut find: impl FnMut(&SchemaTree) -> Option<NodeId>,
    ) -> Lookup {
        let mut blocked = false;
        for &source in scopes {
            let Some(view) = self.view(source) else {
                continue;
            };
            if !view.usable {
                blocked = true;
                continue;
            }
            if let Some(id) = find(view.tree) {
                return Ok(NodeRef::new(source, id));
            }
        }
        Err(if blocked { Miss::Blocked } else { Miss::NotFound })
    }

    /// Identities, features and extensions: module top level only.
    pub(crate) fn top_level(&self, from: NodeRef, name: &QName, tag: NodeTag) -> Lookup {
        let scopes = self.scopes(from, name.prefix.as_deref())?;
        self.search(&scopes, |tree| tree.find_child(NodeId::ROOT, tag, &name.name))
    }

    /// Groupings and typedefs: every enclosing scope of `from`, innermost
    /// first, then the top level of the units the prefix names.
    pub(crate) fn lexical(&self, from: NodeRef, name: &QName, tag: NodeTag) -> Lookup {
        let scopes = self.scopes(from, name.prefix.as_deref())?;
        if scopes.first() == Some(&from.source) {
            let tree = self.tree(from.source);
            let nested = tree
                .ancestors(from.node)
                .find_map(|scope| tree.find_child(scope, tag, &name.name));
            if let Some(id) = nested {
                return Ok(NodeRef::new(from.source, id));
            }
        }
        self.search(&scopes, |tree| tree.find_child(NodeId::ROOT, tag, &name.name))
    }

    pub(crate) fn grouping(&self, uses: NodeRef, name: &QName) -> Lookup {
        let target = self.lexical(uses, name, NodeTag::Grouping)?;
        let tree = self.tree(uses.source);
        if target.source == uses.source && tree.ancestors(uses.node).any(|a| a == target.node) {
            return Err(Miss::Failed(format!(
                "grouping `{}` is used inside its own definition",
                name.name
            )));
        }
        Ok(target)
    }

    /// Evaluates a leafref path from the leaf that declares it.
    pub(crate) fn leafref(&self, from: NodeRef, text: &str) -> Lookup {
        self.leafref_in(from, text, &[])
    }

    /// Evaluates a leafref path of a grouping leaf where the grouping is
    /// used: a `..` step out of a grouping continues at the next of `uses`,
    /// innermost first.
    pub(crate) fn leafref_in(&self, from: NodeRef, text: &str, uses: &[NodeRef]) -> Lookup {
        let path = parse_leafref_path(text).map_err(Miss::Failed)?;
        let mut current = if path.absolute {
            let prefix = path.steps.first().and_then(|s| s.prefix.as_deref());
            self.module_root(from, prefix)?
        } else {
            let mut instances = uses.iter().copied();
            let mut current = self.context_leaf(from);
            for _ in 0..path.up {
                current = self.data_parent(current, text, &mut instances)?;
            }
            current
        };
        for step in &path.steps {
            current = self.step(current, &step.name, Walk::Data)?;
        }
        match self.node(current).tag() {
            NodeTag::Leaf | NodeTag::LeafList => Ok(current),
            other => Err(Miss::Failed(format!(
                "`{text}` points to a {other}, not a leaf or leaf-list"
            ))),
        }
    }

    /// Evaluates an augment's target path. A descendant path is only valid
    /// under `uses`, relative to the used grouping.
    pub(crate) fn augment_target(&self, augment: NodeRef, text: &str) -> Lookup {
        let id = parse_schema_node_id(text).map_err(Miss::Failed)?;
        let tree = self.tree(augment.source);
        let mut current = if id.absolute {
            let prefix = id.steps.first().and_then(|s| s.prefix.as_deref());
            self.module_root(augment, prefix)?
        } else {
            match tree.parent(augment.node).map(|p| &tree.node(p).kind) {
                Some(NodeKind::Uses(data)) => data.target.ok_or(Miss::NotFound)?,
                _ => {
                    return Err(Miss::Failed(format!(
                        "`{text}` must be an absolute path outside `uses`"
                    )));
                }
            }
        };
        for step in &id.steps {
            current = self.step(current, &step.name, Walk::Schema)?;
        }
        match self.node(current).tag() {
            NodeTag::Container
            | NodeTag::List
            | NodeTag::Choice
            | NodeTag::Case
            | NodeTag::Input
            | NodeTag::Output
            | NodeTag::Notification => Ok(current),
            other => Err(Miss::Failed(format!(
                "`{text}` names a {other}, which cannot be augmented"
            ))),
        }
    }

    fn module_root(&self, from: NodeRef, prefix: Option<&str>) -> Lookup {
        let scopes = self.scopes(from, prefix)?;
        scopes
            .first()
            .map(|&source| NodeRef::new(source, NodeId::ROOT))
            .ok_or(Miss::NotFound)
    }

    /// Nearest leaf or leaf-list at or above `from`; union members sit below
    /// the leaf that owns them.
    fn context_leaf(&self, from: NodeRef) -> NodeRef {
        let tree = self.tree(from.source);
        std::iter::once(from.node)
            .chain(tree.ancestors(from.node))
            .find(|&n| matches!(tree.node(n).tag(), NodeTag::Leaf | NodeTag::LeafList))
            .map_or(from, |n| NodeRef::new(from.source, n))
    }

    /// One `..` step: skips `choice`/`case`, crosses an augment to its
    /// target and a grouping to the `uses` instantiating it.
    fn data_parent(
        &self,
        at: NodeRef,
        text: &str,
        instances: &mut impl Iterator<Item = NodeRef>,
    ) -> Lookup {
        let mut current = at;
        loop {
            let tree = self.tree(current.source);
            let Some(parent) = tree.parent(current.node) else {
                return Err(Miss::Failed(format!("`{text}` climbs above the module")));
            };
            match &tree.node(parent).kind {
                NodeKind::Choice(_) | NodeKind::Case => {
                    current = NodeRef::new(current.source, parent);
                }
                NodeKind::Augment(data) => return data.target.ok_or(Miss::NotFound),
                NodeKind::Grouping => match instances.next() {
                    Some(uses) => current = uses,
                    None => {
                        return Err(Miss::Failed(format!(
                            "`{text}` leaves the grouping it is defined in"
                        )));
                    }
                },
                _ => return Ok(NodeRef::new(current.source, parent)),
            }
        }
    }

    /// Relative leafrefs declared under `grouping`, each with the `uses`
    /// chain that instantiates it, innermost first and ending at `uses`.
    pub(crate) fn grouping_leafrefs(
        &self,
        grouping: NodeRef,
        uses: NodeRef,
    ) -> Vec<GroupingLeafref> {
        let mut out = Vec::new();
        let mut chain = vec![uses];
        let mut expanding = vec![grouping];
        self.walk_grouping(grouping, &mut chain, &mut expanding, &mut out);
        out
    }

    fn walk_grouping(
        &self,
        at: NodeRef,
        chain: &mut Vec<NodeRef>,
        expanding: &mut Vec<NodeRef>,
        out: &mut Vec<GroupingLeafref>,
    ) {
        let tree = self.tree(at.source);
        for &child in tree.children(at.node) {
            let r = NodeRef::new(at.source, child);
            let node = tree.node(child);
            match &node.kind {
                NodeKind::Uses(data) => {
                    let Some(target) = data.target else {
                        continue;
                    };
                    if expanding.contains(&target) {
                        continue;
                    }
                    chain.insert(0, r);
                    expanding.push(target);
                    self.walk_grouping(target, chain, expanding, out);
                    expanding.pop();
                    chain.remove(0);
                }
                NodeKind::Leaf(_) | NodeKind::LeafList(_) => {
                    let Some(spec) = node.kind.type_spec() else {
                        continue;
                    };
                    let mut paths = Vec::new();
                    self.leafref_paths(r, spec, &mut Vec::new(), &mut paths);
                    out.extend(
                        paths
                            .into_iter()
                            .filter(|p| !p.trim_start().starts_with('/'))
                            .map(|path| GroupingLeafref {
                                leaf: r,
                                path,
                                uses: chain.clone(),
                            }),
                    );
                }
                NodeKind::Grouping | NodeKind::Typedef(_) | NodeKind::Augment(_) => {}
                _ => self.walk_grouping(r, chain, expanding, out),
            }
        }
    }

    /// Leafref paths a type can carry: its own, its union members' and the
    /// one at the end of its typedef chain.
    fn leafref_paths(
        &self,
        at: NodeRef,
        spec: &TypeSpec,
        typedefs: &mut Vec<NodeRef>,
        out: &mut Vec<String>,
    ) {
        match spec.builtin {
            Some(BuiltinType::Leafref) => out.extend(spec.path.clone()),
            Some(BuiltinType::Union) => {
                let Some(members) = spec.members else {
                    return;
                };
                let union = NodeRef::new(at.source, members);
                if let NodeKind::Union(data) = &self.node(union).kind {
                    for member in &data.members {
                        self.leafref_paths(union, member, typedefs, out);
                    }
                }
            }
            Some(_) => {}
            None => {
                let Ok(derivation) = self.derive(at, spec) else {
                    return;
                };
                out.extend(derivation.leafref);
                if let Some(typedef) = derivation.effective.members_from
                    && !typedefs.contains(&typedef)
                    && let Some(ty) = self.node(typedef).kind.type_spec()
                {
                    typedefs.push(typedef);
                    self.leafref_paths(typedef, ty, typedefs, out);
                }
            }
        }
    }

    fn step(&self, at: NodeRef, name: &str, walk: Walk) -> Lookup {
        self.step_children(at, walk)
            .into_iter()
            .find(|&c| self.node(c).name == name)
            .ok_or(Miss::NotFound)
    }

    /// Everything one path step below `at` can name.
    fn step_children(&self, at: NodeRef, walk: Walk) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut expanding = Vec::new();
        self.collect(at, walk, &[], &mut expanding, &mut out);
        if at.node == NodeId::ROOT
            && let Some(module) = self.tree(at.source).module()
        {
            // submodules share the top level of the module including them
            for source in module.includes.iter().filter_map(|i| i.resolved) {
                if self.is_usable(source) {
                    let root = NodeRef::new(source, NodeId::ROOT);
                    self.collect(root, walk, &[], &mut expanding, &mut out);
                }
            }
        }
        out
    }

    /// `overlay` pairs a target with an augment declared under the `uses`
    /// currently being expanded.
    fn collect(
        &self,
        at: NodeRef,
        walk: Walk,
        overlay: &[(NodeRef, NodeRef)],
        expanding: &mut Vec<NodeRef>,
        out: &mut Vec<NodeRef>,
    ) {
        let tree = self.tree(at.source);
        for &child in tree.children(at.node) {
            let r = NodeRef::new(at.source, child);
            match &tree.node(child).kind {
                NodeKind::Choice(_) | NodeKind::Case if walk == Walk::Data => {
                    self.collect(r, walk, overlay, expanding, out);
                }
                NodeKind::Uses(data) => {
                    let Some(grouping) = data.target else {
                        continue;
                    };
                    if expanding.contains(&grouping) {
                        continue;
                    }
                    let mut local = overlay.to_vec();
                    for &a in tree.children(child) {
                        if let NodeKind::Augment(aug) = &tree.node(a).kind
                            && let Some(target) = aug.target
                        {
                            local.push((target, NodeRef::new(at.source, a)));
                        }
                    }
                    expanding.push(grouping);
                    self.collect(grouping, walk, &local, expanding, out);
                    expanding.pop();
                }
                NodeKind::Container(_)
                | NodeKind::List(_)
                | NodeKind::Leaf(_)
                | NodeKind::LeafList(_)
                | NodeKind::Anyxml(_)
                | NodeKind::Choice(_)
                | NodeKind::Case
                | NodeKind::Rpc
                | NodeKind::Input
                | NodeKind::Output
                | NodeKind::Notification => out.push(r),
                _ => {}
            }
        }

        let augments: Vec<NodeRef> = self
            .augments
            .get(&at)
            .into_iter()
            .flatten()
            .copied()
            .chain(overlay.iter().filter(|(t, _)| *t == at).map(|&(_, a)| a))
            .collect();
        for augment in augments {
            self.collect(augment, walk, overlay, expanding, out);
        }
    }

    /// Data children of a node as a leafref path sees them.
    pub(crate) fn data_children(&self, at: NodeRef) -> Vec<NodeRef> {
        self.step_children(at, Walk::Data)
    }

    /// Schema children of a node as an augment or refine path sees them.
    pub(crate) fn schema_children(&self, at: NodeRef) -> Vec<NodeRef> {
        self.step_children(at, Walk::Schema)
    }
}
