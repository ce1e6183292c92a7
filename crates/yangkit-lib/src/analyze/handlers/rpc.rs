//! Operations: `rpc` with its `input`/`output`, and `notification`.

use super::super::cardinality;
use super::super::collision::{self, Category};
use super::super::error::SchemaError;
use super::super::keyword::Keyword;
use super::super::stmt::StmtCtx;
use super::super::validate;
use super::super::walker::{Descend, Walker};
use crate::schema::{NodeKind, NodeTag};

impl Walker<'_> {
    pub(super) fn enter_rpc(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_operation(ctx, NodeKind::Rpc)
    }

    pub(super) fn enter_notification(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_operation(ctx, NodeKind::Notification)
    }

    fn open_operation(&mut self, ctx: &StmtCtx, kind: NodeKind) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = self.node_holder(ctx, NodeTag::is_module)?;
        collision::check_sibling(&self.tree, parent, ctx, &name, Category::DataTree)?;
        self.open_node(ctx, parent, kind, &name);
        Ok(Descend::Children)
    }

    /// `input` and `output`, named after their keyword.
    pub(super) fn enter_rpc_io(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        validate::no_argument(ctx)?;
        let parent = self.node_holder(ctx, |tag| matches!(tag, NodeTag::Rpc))?;
        let kind = match ctx.keyword() {
            Keyword::Input => NodeKind::Input,
            _ => NodeKind::Output,
        };
        self.open_node(ctx, parent, kind, ctx.keyword_text());
        Ok(Descend::Children)
    }
}
