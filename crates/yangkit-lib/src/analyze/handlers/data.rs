//! Data definition statements and their structural attributes.

use yangkit_core::{MaxElements, OrderedBy};

use super::super::cardinality;
use super::super::collision::{self, Category};
use super::super::context::{Frame, FrameKind};
use super::super::error::{Phase, SchemaError};
use super::super::stmt::StmtCtx;
use super::super::validate;
use super::super::walker::{Descend, Walker};
use crate::diagnostics::DiagnosticKind;
use crate::link::ResolvableKind;
use crate::schema::{
    AnyxmlData, AugmentData, ChoiceData, Config, ContainerData, LeafData, LeafListData, ListData,
    NodeId, NodeKind, NodeTag, Refine, UsesData,
};

/// Holders of `data-def-stmt`s.
fn holds_data(tag: NodeTag) -> bool {
    matches!(
        tag,
        NodeTag::Module
            | NodeTag::SubModule
            | NodeTag::Container
            | NodeTag::List
            | NodeTag::Grouping
            | NodeTag::Case
            | NodeTag::Augment
            | NodeTag::Input
            | NodeTag::Output
            | NodeTag::Notification
    )
}

/// Short-hand cases: data nodes a choice holds without a `case`.
fn holds_shorthand(tag: NodeTag) -> bool {
    holds_data(tag) || tag == NodeTag::Choice
}

fn violation(ctx: &StmtCtx, detail: impl Into<String>) -> SchemaError {
    SchemaError::new(
        DiagnosticKind::DataModelConstraintViolation,
        ctx,
        Phase::Exit,
        detail,
    )
}

fn format_max(max: MaxElements) -> String {
    match max {
        MaxElements::Unbounded => "unbounded".to_string(),
        MaxElements::Bounded(n) => n.to_string(),
    }
}

fn check_bounds(ctx: &StmtCtx, min: u64, max: MaxElements) -> Result<(), SchemaError> {
    if max.admits(min) {
        return Ok(());
    }
    Err(violation(
        ctx,
        format!("min-elements {min} exceeds max-elements {}", format_max(max)),
    ))
}

impl Walker<'_> {
    /// Shared entry of container, leaf, leaf-list, list, choice and anyxml.
    fn open_data_node(
        &mut self,
        ctx: &StmtCtx,
        tag: NodeTag,
        make: impl FnOnce(Config) -> NodeKind,
    ) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = if tag == NodeTag::Choice {
            self.node_holder(ctx, holds_data)?
        } else {
            self.node_holder(ctx, holds_shorthand)?
        };
        let parent_tag = self.tree.node(parent).tag();
        if let Some(category) = Category::of(tag, parent_tag) {
            collision::check_sibling(&self.tree, parent, ctx, &name, category)?;
        }
        let config = self.resolve_config(ctx, parent)?;
        self.open_node(ctx, parent, make(config), &name);
        Ok(Descend::Children)
    }

    pub(super) fn enter_container(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_data_node(ctx, NodeTag::Container, |config| {
            NodeKind::Container(ContainerData {
                presence: None,
                config,
            })
        })
    }

    pub(super) fn enter_leaf(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_data_node(ctx, NodeTag::Leaf, |config| {
            NodeKind::Leaf(LeafData {
                ty: None,
                units: None,
                default: None,
                mandatory: false,
                config,
            })
        })
    }

    pub(super) fn exit_leaf(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let id = self.close_node(ctx)?;
        if let NodeKind::Leaf(d) = &self.tree.node(id).kind
            && d.default.is_some()
            && d.mandatory
        {
            return Err(violation(ctx, "a leaf with a `default` cannot be `mandatory true`"));
        }
        Ok(())
    }

    pub(super) fn enter_leaf_list(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_data_node(ctx, NodeTag::LeafList, |config| {
            NodeKind::LeafList(LeafListData {
                ty: None,
                units: None,
                min_elements: 0,
                max_elements: MaxElements::Unbounded,
                ordered_by: OrderedBy::System,
                config,
            })
        })
    }

    pub(super) fn exit_leaf_list(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let id = self.close_node(ctx)?;
        if let NodeKind::LeafList(d) = &self.tree.node(id).kind {
            check_bounds(ctx, d.min_elements, d.max_elements)?;
        }
        Ok(())
    }

    pub(super) fn enter_list(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_data_node(ctx, NodeTag::List, |config| {
            NodeKind::List(ListData {
                keys: Vec::new(),
                uniques: Vec::new(),
                min_elements: 0,
                max_elements: MaxElements::Unbounded,
                ordered_by: OrderedBy::System,
                config,
                key_range: None,
            })
        })
    }

    pub(super) fn exit_list(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let id = self.close_node(ctx)?;
        let node = self.tree.node(id);
        let NodeKind::List(data) = &node.kind else {
            return Ok(());
        };

        let children = self.tree.children(id);
        if !children
            .iter()
            .any(|&c| self.tree.node(c).tag().is_data_definition())
        {
            return Err(violation(ctx, "a list must define at least one data node"));
        }
        check_bounds(ctx, data.min_elements, data.max_elements)?;

        if data.keys.is_empty() {
            if data.config.value && !self.outside_datastore(id) {
                return Err(violation(ctx, "a configuration list must declare a `key`"));
            }
            return Ok(());
        }

        let has_uses = children
            .iter()
            .any(|&c| self.tree.node(c).tag() == NodeTag::Uses);
        if has_uses {
            self.deferred_keys.push(id);
            return Ok(());
        }
        let (pos, range) = data.key_range.unwrap_or((ctx.pos(), ctx.range()));
        for key in &data.keys {
            if self.tree.find_child(id, NodeTag::Leaf, key).is_none() {
                return Err(SchemaError::at(
                    DiagnosticKind::DataModelConstraintViolation,
                    "key",
                    Some(&data.keys.join(" ")),
                    pos,
                    range,
                    format!("key `{key}` is not a leaf of list `{}`", node.name),
                )
                .in_phase(Phase::Exit));
            }
        }
        Ok(())
    }

    /// Lists whose config is decided where they are instantiated.
    fn outside_datastore(&self, id: NodeId) -> bool {
        self.tree.ancestors(id).any(|a| {
            matches!(
                self.tree.node(a).tag(),
                NodeTag::Grouping
                    | NodeTag::Augment
                    | NodeTag::Input
                    | NodeTag::Output
                    | NodeTag::Notification
            )
        })
    }

    pub(super) fn enter_choice(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_data_node(ctx, NodeTag::Choice, |config| {
            NodeKind::Choice(ChoiceData {
                default: None,
                mandatory: false,
                config,
            })
        })
    }

    pub(super) fn exit_choice(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let id = self.close_node(ctx)?;
        let NodeKind::Choice(data) = &self.tree.node(id).kind else {
            return Ok(());
        };
        let Some(default) = &data.default else {
            return Ok(());
        };
        if data.mandatory {
            return Err(violation(ctx, "a choice with a `default` cannot be `mandatory true`"));
        }
        let exists = self.tree.children(id).iter().any(|&c| {
            let child = self.tree.node(c);
            child.name == *default
                && (child.tag() == NodeTag::Case || child.tag().is_data_definition())
        });
        if !exists {
            return Err(violation(ctx, format!("default case `{default}` does not exist")));
        }
        Ok(())
    }

    pub(super) fn enter_case(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = self.node_holder(ctx, |tag| matches!(tag, NodeTag::Choice))?;
        collision::check_sibling(&self.tree, parent, ctx, &name, Category::Case)?;
        self.open_node(ctx, parent, NodeKind::Case, &name);
        Ok(Descend::Children)
    }

    pub(super) fn enter_anyxml(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_data_node(ctx, NodeTag::Anyxml, |config| {
            NodeKind::Anyxml(AnyxmlData {
                mandatory: false,
                config,
            })
        })
    }

    pub(super) fn enter_grouping(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = self.node_holder(ctx, |tag| {
            matches!(
                tag,
                NodeTag::Module
                    | NodeTag::SubModule
                    | NodeTag::Container
                    | NodeTag::List
                    | NodeTag::Grouping
                    | NodeTag::Rpc
                    | NodeTag::Input
                    | NodeTag::Output
                    | NodeTag::Notification
            )
        })?;
        collision::check_sibling(&self.tree, parent, ctx, &name, Category::Grouping)?;
        self.open_node(ctx, parent, NodeKind::Grouping, &name);
        Ok(Descend::Children)
    }

    pub(super) fn enter_uses(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let grouping = validate::identifier_ref(ctx)?;
        cardinality::check(ctx)?;
        let parent = self.node_holder(ctx, holds_data)?;
        let reference = grouping.to_string();
        let id = self.open_node(
            ctx,
            parent,
            NodeKind::Uses(UsesData {
                grouping,
                target: None,
                refines: Vec::new(),
            }),
            &reference,
        );
        self.enqueue(ctx, ResolvableKind::Uses, &reference, id);
        Ok(Descend::Children)
    }

    pub(super) fn enter_refine(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        validate::schema_node_id(ctx, false)?;
        cardinality::check(ctx)?;
        self.node_holder(ctx, |tag| matches!(tag, NodeTag::Uses))?;
        self.stack.push(Frame::Refine(Refine {
            target: validate::argument(ctx)?.to_string(),
            pos: ctx.pos(),
            range: ctx.range(),
            ..Refine::default()
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_refine(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Refine(refine) = self.stack.pop(ctx, FrameKind::Refine)? else {
            unreachable!("pop checked the frame kind");
        };
        if let Some(min) = refine.min_elements {
            check_bounds(ctx, min, refine.max_elements.unwrap_or_default())?;
        }
        if let Some(id) = self.stack.peek(ctx, Phase::Exit)?.as_node()
            && let NodeKind::Uses(uses) = &mut self.tree.node_mut(id).kind
        {
            uses.refines.push(refine);
        }
        Ok(())
    }

    pub(super) fn enter_augment(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let path = validate::argument(ctx)?.to_string();
        let parent = self.node_holder(ctx, |tag| {
            matches!(tag, NodeTag::Module | NodeTag::SubModule | NodeTag::Uses)
        })?;
        let absolute = self.tree.node(parent).tag().is_module();
        validate::schema_node_id(ctx, absolute)?;
        cardinality::check(ctx)?;

        let id = self.open_node(
            ctx,
            parent,
            NodeKind::Augment(AugmentData {
                target_path: path.clone(),
                target: None,
            }),
            &path,
        );
        self.enqueue(ctx, ResolvableKind::Augment, &path, id);
        Ok(Descend::Children)
    }

    pub(super) fn exit_augment(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let id = self.close_node(ctx)?;
        let has_data = self.tree.children(id).iter().any(|&c| {
            let tag = self.tree.node(c).tag();
            tag.is_data_definition() || tag == NodeTag::Case
        });
        if !has_data {
            return Err(violation(ctx, "an augment must add at least one data node"));
        }
        Ok(())
    }

    pub(super) fn enter_key(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let keys = validate::key_list(ctx)?;
        let id = self.node_holder(ctx, |tag| matches!(tag, NodeTag::List))?;
        if let NodeKind::List(d) = &mut self.tree.node_mut(id).kind {
            d.keys = keys;
            d.key_range = Some((ctx.pos(), ctx.range()));
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_unique(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let paths = validate::unique_list(ctx)?;
        let id = self.node_holder(ctx, |tag| matches!(tag, NodeTag::List))?;
        if let NodeKind::List(d) = &mut self.tree.node_mut(id).kind {
            d.uniques.push(paths);
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_ordered_by(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let order = validate::ordered_by(ctx)?;
        let id = self.node_holder(ctx, |tag| matches!(tag, NodeTag::List | NodeTag::LeafList))?;
        match &mut self.tree.node_mut(id).kind {
            NodeKind::List(d) => d.ordered_by = order,
            NodeKind::LeafList(d) => d.ordered_by = order,
            _ => {}
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_min_elements(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let min = validate::non_negative(ctx)?;
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Refine(r) => {
                r.min_elements = Some(min);
                true
            }
            Frame::Node(id) => match &mut tree.node_mut(*id).kind {
                NodeKind::List(d) => {
                    d.min_elements = min;
                    true
                }
                NodeKind::LeafList(d) => {
                    d.min_elements = min;
                    true
                }
                _ => false,
            },
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_max_elements(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let max = validate::max_elements(ctx)?;
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Refine(r) => {
                r.max_elements = Some(max);
                true
            }
            Frame::Node(id) => match &mut tree.node_mut(*id).kind {
                NodeKind::List(d) => {
                    d.max_elements = max;
                    true
                }
                NodeKind::LeafList(d) => {
                    d.max_elements = max;
                    true
                }
                _ => false,
            },
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }
}
