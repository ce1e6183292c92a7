//! Attribute statements that write into their holder.

use super::super::cardinality;
use super::super::context::{Frame, FrameKind};
use super::super::error::{Phase, SchemaError};
use super::super::keyword::Keyword;
use super::super::stmt::StmtCtx;
use super::super::validate;
use super::super::walker::{Descend, Walker};
use crate::schema::{Must, NodeKind, NodeTag, When};

impl Walker<'_> {
    /// `description` and `reference`.
    pub(super) fn enter_documentation(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let text = validate::argument(ctx)?.to_string();
        let is_description = ctx.keyword() == Keyword::Description;
        let pick = |description: &mut Option<String>, reference: &mut Option<String>| {
            if is_description {
                *description = Some(text.clone());
            } else {
                *reference = Some(text.clone());
            }
        };

        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Node(id) => {
                let node = tree.node_mut(*id);
                match node.tag() {
                    NodeTag::Input
                    | NodeTag::Output
                    | NodeTag::Enumeration
                    | NodeTag::Bits
                    | NodeTag::Union => false,
                    _ => {
                        pick(&mut node.meta.description, &mut node.meta.reference);
                        true
                    }
                }
            }
            Frame::Revision(r) => {
                pick(&mut r.description, &mut r.reference);
                true
            }
            Frame::Enum(m) => {
                pick(&mut m.description, &mut m.reference);
                true
            }
            Frame::Bit(m) => {
                pick(&mut m.description, &mut m.reference);
                true
            }
            Frame::Range(r) | Frame::Length(r) => {
                pick(&mut r.description, &mut r.reference);
                true
            }
            Frame::Pattern(p) => {
                pick(&mut p.description, &mut p.reference);
                true
            }
            Frame::Must(m) => {
                pick(&mut m.description, &mut m.reference);
                true
            }
            Frame::When(w) => {
                pick(&mut w.description, &mut w.reference);
                true
            }
            Frame::Refine(r) => {
                pick(&mut r.description, &mut r.reference);
                true
            }
            Frame::Type(_)
            | Frame::Import(_)
            | Frame::Include(_)
            | Frame::BelongsTo(_)
            | Frame::Argument(_) => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_status(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let status = validate::status(ctx)?;
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Node(id) => {
                let node = tree.node_mut(*id);
                match node.tag() {
                    NodeTag::Extension
                    | NodeTag::Identity
                    | NodeTag::Feature
                    | NodeTag::Typedef
                    | NodeTag::Grouping
                    | NodeTag::Container
                    | NodeTag::Leaf
                    | NodeTag::LeafList
                    | NodeTag::List
                    | NodeTag::Choice
                    | NodeTag::Case
                    | NodeTag::Anyxml
                    | NodeTag::Uses
                    | NodeTag::Augment
                    | NodeTag::Rpc
                    | NodeTag::Notification => {
                        node.meta.status = status;
                        true
                    }
                    _ => false,
                }
            }
            Frame::Enum(m) => {
                m.status = status;
                true
            }
            Frame::Bit(m) => {
                m.status = status;
                true
            }
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_units(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let units = validate::argument(ctx)?.to_string();
        let id = self.node_holder(ctx, |tag| {
            matches!(tag, NodeTag::Leaf | NodeTag::LeafList | NodeTag::Typedef)
        })?;
        match &mut self.tree.node_mut(id).kind {
            NodeKind::Leaf(d) => d.units = Some(units),
            NodeKind::LeafList(d) => d.units = Some(units),
            NodeKind::Typedef(d) => d.units = Some(units),
            _ => {}
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_default(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let value = validate::argument(ctx)?.to_string();
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Refine(r) => {
                r.default = Some(value);
                true
            }
            Frame::Node(id) => match &mut tree.node_mut(*id).kind {
                NodeKind::Leaf(d) => {
                    d.default = Some(value);
                    true
                }
                NodeKind::Typedef(d) => {
                    d.default = Some(value);
                    true
                }
                NodeKind::Choice(d) => {
                    validate::identifier(ctx)?;
                    d.default = Some(value);
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

    /// The node's config was settled at its entry; this validates the
    /// statement and records refinements.
    pub(super) fn enter_config(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let value = validate::boolean(ctx)?;
        let tree = &self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Refine(r) => {
                r.config = Some(value);
                true
            }
            Frame::Node(id) => tree.node(*id).tag().is_config_bearing(),
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_mandatory(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let value = validate::boolean(ctx)?;
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Refine(r) => {
                r.mandatory = Some(value);
                true
            }
            Frame::Node(id) => match &mut tree.node_mut(*id).kind {
                NodeKind::Leaf(d) => {
                    d.mandatory = value;
                    true
                }
                NodeKind::Choice(d) => {
                    d.mandatory = value;
                    true
                }
                NodeKind::Anyxml(d) => {
                    d.mandatory = value;
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

    pub(super) fn enter_presence(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let text = validate::argument(ctx)?.to_string();
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Refine(r) => {
                r.presence = Some(text);
                true
            }
            Frame::Node(id) => match &mut tree.node_mut(*id).kind {
                NodeKind::Container(d) => {
                    d.presence = Some(text);
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

    pub(super) fn enter_must(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let condition = validate::argument(ctx)?.to_string();
        cardinality::check(ctx)?;
        let accepted = match self.stack.peek(ctx, Phase::Entry)? {
            Frame::Refine(_) => true,
            Frame::Node(id) => matches!(
                self.tree.node(*id).tag(),
                NodeTag::Container
                    | NodeTag::Leaf
                    | NodeTag::LeafList
                    | NodeTag::List
                    | NodeTag::Anyxml
            ),
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        self.stack.push(Frame::Must(Must {
            condition,
            ..Must::default()
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_must(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Must(must) = self.stack.pop(ctx, FrameKind::Must)? else {
            unreachable!("pop checked the frame kind");
        };
        let tree = &mut self.tree;
        match self.stack.peek_mut(ctx, Phase::Exit)? {
            Frame::Refine(r) => r.musts.push(must),
            Frame::Node(id) => tree.node_mut(*id).meta.musts.push(must),
            _ => {}
        }
        Ok(())
    }

    pub(super) fn enter_when(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let condition = validate::argument(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.node_holder(ctx, |tag| {
            matches!(
                tag,
                NodeTag::Container
                    | NodeTag::Leaf
                    | NodeTag::LeafList
                    | NodeTag::List
                    | NodeTag::Choice
                    | NodeTag::Case
                    | NodeTag::Anyxml
                    | NodeTag::Uses
                    | NodeTag::Augment
            )
        })?;
        self.stack.push(Frame::When(When {
            condition,
            ..When::default()
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_when(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::When(when) = self.stack.pop(ctx, FrameKind::When)? else {
            unreachable!("pop checked the frame kind");
        };
        if let Some(id) = self.stack.peek(ctx, Phase::Exit)?.as_node() {
            self.tree.node_mut(id).meta.when = Some(when);
        }
        Ok(())
    }

    /// `error-message` and `error-app-tag`.
    pub(super) fn enter_error_info(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let text = validate::argument(ctx)?.to_string();
        let is_message = ctx.keyword() == Keyword::ErrorMessage;
        let pick = |message: &mut Option<String>, tag: &mut Option<String>| {
            if is_message {
                *message = Some(text.clone());
            } else {
                *tag = Some(text.clone());
            }
        };
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Must(m) => {
                pick(&mut m.error_message, &mut m.error_app_tag);
                true
            }
            Frame::Range(r) | Frame::Length(r) => {
                pick(&mut r.error_message, &mut r.error_app_tag);
                true
            }
            Frame::Pattern(p) => {
                pick(&mut p.error_message, &mut p.error_app_tag);
                true
            }
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }
}
