//! Schema node model.
//!
//! Every compilation unit owns one [`SchemaTree`]: an arena of [`SchemaNode`]s
//! addressed by [`NodeId`] handles, rooted at exactly one module or submodule.
//! Children keep insertion order; parents are plain handles, never owners.
//! Links into other units use [`NodeRef`].

mod node;
mod printer;
mod types;

#[cfg(test)]
mod printer_tests;

pub use node::{
    AnyxmlData, AugmentData, BelongsTo, BitsData, ChoiceData, Config, ContainerData,
    EnumerationData, ExtensionArgument, ExtensionData, IdentityData, IfFeature, Import, Include,
    LeafData, LeafListData, ListData, Meta, ModuleData, Must, NodeKind, NodeTag, QName, Refine,
    Revision, SchemaNode, TypedefData, UnionData, UsesData, When,
};
pub use printer::SchemaPrinter;
pub use types::{
    BitMember, EffectiveType, EnumMember, IntervalRestriction, PatternRestriction, TypeSpec,
};

use serde::Serialize;
use serde::ser::Serializer;

use crate::compilation::source_map::SourceId;

/// Handle of a node inside one [`SchemaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// The module or submodule node: always the first node added.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in some unit of the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeRef {
    pub source: SourceId,
    pub node: NodeId,
}

impl NodeRef {
    pub fn new(source: SourceId, node: NodeId) -> Self {
        Self { source, node }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaTree {
    source: SourceId,
    nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            nodes: Vec::new(),
        }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Adds the module or submodule node. Must be the first node.
    pub fn add_root(&mut self, node: SchemaNode) -> NodeId {
        assert!(self.nodes.is_empty(), "schema tree already has a root");
        self.nodes.push(node);
        NodeId::ROOT
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.node_mut(parent).children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &SchemaNode {
        self.nodes.get(id.index()).expect("invalid NodeId")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        self.nodes.get_mut(id.index()).expect("invalid NodeId")
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.index())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// `id`'s parent, grandparent, and so on up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&n| self.parent(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SchemaNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Child of `parent` with the given tag and name.
    pub fn find_child(&self, parent: NodeId, tag: NodeTag, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).tag() == tag && self.node(c).name == name)
    }

    /// Module data of the root node.
    pub fn module(&self) -> Option<&ModuleData> {
        self.get(NodeId::ROOT).and_then(|n| n.kind.module_data())
    }

    /// Whether `id` sits inside a node with the given tag.
    pub fn is_within(&self, id: NodeId, tag: NodeTag) -> bool {
        self.ancestors(id).any(|a| self.node(a).tag() == tag)
    }

    /// Prefix the module uses for its own definitions.
    pub fn own_prefix(&self) -> Option<&str> {
        self.module().map(|m| m.prefix.as_str())
    }
}

/// Nested view used for serialization: children inline under their parent.
struct NodeView<'t> {
    tree: &'t SchemaTree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'t> {
            #[serde(flatten)]
            node: &'t SchemaNode,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            children: Vec<NodeView<'t>>,
        }

        let node = self.tree.node(self.id);
        Repr {
            node,
            children: node
                .children
                .iter()
                .map(|&id| NodeView {
                    tree: self.tree,
                    id,
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

impl Serialize for SchemaTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.nodes.is_empty() {
            return serializer.serialize_none();
        }
        NodeView {
            tree: self,
            id: NodeId::ROOT,
        }
        .serialize(serializer)
    }
}
