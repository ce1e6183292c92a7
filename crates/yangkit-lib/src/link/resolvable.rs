//! Deferred references and their queue.

use rowan::TextRange;
use yangkit_core::Position;

use crate::schema::{NodeId, NodeRef};

/// Where a type-related reference writes its result: the `type` of a
/// leaf, leaf-list or typedef, or one member of a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSlot {
    pub node: NodeId,
    pub member: Option<usize>,
}

impl TypeSlot {
    pub fn of(node: NodeId) -> Self {
        Self { node, member: None }
    }

    pub fn member(node: NodeId, index: usize) -> Self {
        Self {
            node,
            member: Some(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvableKind {
    /// `uses` naming a grouping.
    Uses,
    /// `type` naming a typedef.
    DerivedType(TypeSlot),
    /// `base` of an identity.
    Base,
    /// `base` of an identityref type.
    IdentityRef(TypeSlot),
    /// One `if-feature` of the consumer's metadata.
    IfFeature(usize),
    /// `path` of a leafref type.
    Leafref(TypeSlot),
    /// Target node of an `augment`.
    Augment,
}

impl ResolvableKind {
    /// Linking order inside one phase: earlier kinds may make later ones
    /// resolvable (a leafref path through a resolved `uses`).
    pub fn phase_rank(&self) -> u8 {
        match self {
            Self::Uses => 0,
            Self::DerivedType(_) => 1,
            Self::Base => 2,
            Self::IdentityRef(_) => 3,
            Self::IfFeature(_) => 4,
            Self::Leafref(_) => 5,
            Self::Augment => 6,
        }
    }

    pub const RANKS: u8 = 7;

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Uses => "uses",
            Self::DerivedType(_) => "type",
            Self::Base | Self::IdentityRef(_) => "base",
            Self::IfFeature(_) => "if-feature",
            Self::Leafref(_) => "path",
            Self::Augment => "augment",
        }
    }
}

/// Where an item queued for one place was declared, when that is elsewhere.
/// Results of such items are kept in the queue, never written to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Member `member` of `union`, declared in a typedef and checked for
    /// the leaf using it. `typedefs` are the unions' typedefs expanded so far.
    UnionMember {
        union: NodeRef,
        member: usize,
        typedefs: Vec<NodeRef>,
    },
    /// Leafref of `leaf` in a grouping, evaluated where `uses` instantiate
    /// it, innermost `uses` first.
    Grouping { leaf: NodeRef, uses: Vec<NodeRef> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    Unresolved,
    Resolved(NodeRef),
    /// Found a target that cannot be used; the reason is reported after linking.
    Failed(String),
    /// Points into a unit that failed analysis; never reported.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolvable {
    pub kind: ResolvableKind,
    /// Token or path exactly as written.
    pub reference: String,
    pub consumer: NodeId,
    pub pos: Position,
    pub range: TextRange,
    pub state: ResolutionState,
    pub origin: Option<Origin>,
}

impl Resolvable {
    pub fn new(
        kind: ResolvableKind,
        reference: impl Into<String>,
        consumer: NodeId,
        pos: Position,
        range: TextRange,
    ) -> Self {
        Self {
            kind,
            reference: reference.into(),
            consumer,
            pos,
            range,
            state: ResolutionState::Unresolved,
            origin: None,
        }
    }

    pub fn instantiated(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.state == ResolutionState::Unresolved
    }
}

/// Append-only list of a unit's deferred references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionQueue {
    items: Vec<Resolvable>,
}

impl ResolutionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: Resolvable) {
        tracing::trace!(kind = item.kind.keyword(), reference = %item.reference, "enqueue");
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resolvable> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> &Resolvable {
        &self.items[index]
    }

    /// Indices of pending items of one rank, in enqueue order.
    pub fn pending_of_rank(&self, rank: u8) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_pending() && r.kind.phase_rank() == rank)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn set_state(&mut self, index: usize, state: ResolutionState) {
        self.items[index].state = state;
    }

    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|r| r.is_pending()).count()
    }
}
