//! Sibling name collisions.

use rowan::TextRange;
use yangkit_core::Position;

use super::error::{Phase, SchemaError};
use super::stmt::StmtCtx;
use crate::diagnostics::DiagnosticKind;
use crate::schema::{NodeId, NodeKind, NodeTag, SchemaTree};

/// Namespaces in which sibling names must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    DataTree,
    /// Cases and short-hand data nodes directly under a choice.
    Case,
    Grouping,
    Typedef,
    Identity,
    Feature,
    Extension,
    EnumMember,
    BitMember,
}

impl Category {
    /// Category a node with `tag` occupies under a parent with `parent`.
    pub fn of(tag: NodeTag, parent: NodeTag) -> Option<Category> {
        match tag {
            NodeTag::Case => Some(Category::Case),
            NodeTag::Container
            | NodeTag::Leaf
            | NodeTag::LeafList
            | NodeTag::List
            | NodeTag::Choice
            | NodeTag::Anyxml
                if parent == NodeTag::Choice =>
            {
                Some(Category::Case)
            }
            NodeTag::Container
            | NodeTag::Leaf
            | NodeTag::LeafList
            | NodeTag::List
            | NodeTag::Choice
            | NodeTag::Anyxml
            | NodeTag::Rpc
            | NodeTag::Notification => Some(Category::DataTree),
            NodeTag::Grouping => Some(Category::Grouping),
            NodeTag::Typedef => Some(Category::Typedef),
            NodeTag::Identity => Some(Category::Identity),
            NodeTag::Feature => Some(Category::Feature),
            NodeTag::Extension => Some(Category::Extension),
            _ => None,
        }
    }
}

/// Fails with `DuplicateIdentifier` when a sibling introduced at an earlier
/// position already uses `name` in `category`.
pub fn check_sibling(
    tree: &SchemaTree,
    parent: NodeId,
    stmt: &StmtCtx,
    name: &str,
    category: Category,
) -> Result<(), SchemaError> {
    match earlier_sibling(tree, parent, stmt.pos(), name, category) {
        None => Ok(()),
        Some((pos, range)) => {
            let err = SchemaError::new(DiagnosticKind::DuplicateIdentifier, stmt, Phase::Entry, name);
            Err(match range {
                Some(range) => err.related(format!("first defined here at {pos}"), range),
                None => err,
            })
        }
    }
}

fn earlier_sibling(
    tree: &SchemaTree,
    parent: NodeId,
    pos: Position,
    name: &str,
    category: Category,
) -> Option<(Position, Option<TextRange>)> {
    let holder = tree.node(parent);
    match (category, &holder.kind) {
        (Category::EnumMember, NodeKind::Enumeration(data)) => data
            .members
            .iter()
            .find(|m| m.name == name && m.pos < pos)
            .map(|m| (m.pos, None)),
        (Category::BitMember, NodeKind::Bits(data)) => data
            .members
            .iter()
            .find(|m| m.name == name && m.pos < pos)
            .map(|m| (m.pos, None)),
        _ => holder
            .children
            .iter()
            .map(|&c| tree.node(c))
            .find(|n| {
                n.name == name
                    && n.pos < pos
                    && Category::of(n.tag(), holder.tag()) == Some(category)
            })
            .map(|n| (n.pos, Some(n.range))),
    }
}
