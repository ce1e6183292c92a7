//! Module-level definitions: `identity`, `feature`, `extension`.

use super::super::cardinality;
use super::super::collision::{self, Category};
use super::super::context::{Frame, FrameKind};
use super::super::error::{Phase, SchemaError};
use super::super::stmt::StmtCtx;
use super::super::validate;
use super::super::walker::{Descend, Walker};
use crate::link::ResolvableKind;
use crate::schema::{ExtensionArgument, ExtensionData, IdentityData, IfFeature, NodeKind, NodeTag};

impl Walker<'_> {
    fn open_definition(
        &mut self,
        ctx: &StmtCtx,
        category: Category,
        kind: NodeKind,
    ) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = self.node_holder(ctx, NodeTag::is_module)?;
        collision::check_sibling(&self.tree, parent, ctx, &name, category)?;
        self.open_node(ctx, parent, kind, &name);
        Ok(Descend::Children)
    }

    pub(super) fn enter_identity(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_definition(ctx, Category::Identity, NodeKind::Identity(IdentityData::default()))
    }

    pub(super) fn enter_feature(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_definition(ctx, Category::Feature, NodeKind::Feature)
    }

    pub(super) fn enter_extension(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_definition(
            ctx,
            Category::Extension,
            NodeKind::Extension(ExtensionData::default()),
        )
    }

    pub(super) fn enter_if_feature(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier_ref(ctx)?;
        let id = self.node_holder(ctx, |tag| {
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
                    | NodeTag::Rpc
                    | NodeTag::Notification
                    | NodeTag::Feature
            )
        })?;
        let reference = name.to_string();
        let features = &mut self.tree.node_mut(id).meta.if_features;
        features.push(IfFeature { name, target: None });
        let index = features.len() - 1;
        self.enqueue(ctx, ResolvableKind::IfFeature(index), &reference, id);
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_argument(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.node_holder(ctx, |tag| matches!(tag, NodeTag::Extension))?;
        self.stack.push(Frame::Argument(ExtensionArgument {
            name,
            yin_element: false,
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_argument(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Argument(argument) = self.stack.pop(ctx, FrameKind::Argument)? else {
            unreachable!("pop checked the frame kind");
        };
        if let Some(id) = self.stack.peek(ctx, Phase::Exit)?.as_node()
            && let NodeKind::Extension(d) = &mut self.tree.node_mut(id).kind
        {
            d.argument = Some(argument);
        }
        Ok(())
    }

    pub(super) fn enter_yin_element(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let value = validate::boolean(ctx)?;
        match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Argument(argument) => argument.yin_element = value,
            _ => return Err(self.invalid_holder(ctx)),
        }
        Ok(Descend::Leaf)
    }
}
