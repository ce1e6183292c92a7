//! Module header: `module`, `submodule`, linkage and revision statements.

use tracing::debug;

use super::super::cardinality;
use super::super::context::{Frame, FrameKind};
use super::super::error::{Phase, SchemaError};
use super::super::keyword::Keyword;
use super::super::stmt::StmtCtx;
use super::super::validate;
use super::super::walker::{Descend, Walker};
use crate::diagnostics::DiagnosticKind;
use crate::link::{self, LinkPhase};
use crate::schema::{
    BelongsTo, Import, Include, ModuleData, NodeId, NodeKind, NodeTag, Revision, SchemaNode,
};

impl Walker<'_> {
    pub(super) fn enter_module(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_unit(ctx, NodeKind::Module(ModuleData::default()))
    }

    pub(super) fn enter_submodule(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        self.open_unit(ctx, NodeKind::SubModule(ModuleData::default()))
    }

    fn open_unit(&mut self, ctx: &StmtCtx, kind: NodeKind) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?;
        cardinality::check(ctx)?;
        if !self.stack.is_empty() || !self.tree.is_empty() {
            return Err(self.invalid_holder(ctx));
        }

        debug!(unit = name, keyword = ctx.keyword_text(), "enter unit");
        self.tree
            .add_root(SchemaNode::new(kind, name, ctx.pos(), ctx.range()));
        self.stack.push(Frame::Node(NodeId::ROOT));
        Ok(Descend::Children)
    }

    pub(super) fn exit_module(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        self.check_prefixes()?;
        self.stack.pop_node(ctx, NodeId::ROOT)?;
        debug!(unit = %self.tree.node(NodeId::ROOT).name, "exit unit");

        link::resolve_units(
            &mut [link::LinkUnit::new(&mut self.tree, &mut self.queue)],
            LinkPhase::IntraFile,
        );
        Ok(())
    }

    /// Import prefixes must differ from each other and from the own prefix.
    fn check_prefixes(&self) -> Result<(), SchemaError> {
        let Some(module) = self.tree.module() else {
            return Ok(());
        };
        for (i, import) in module.imports.iter().enumerate() {
            let clash = import.prefix == module.prefix
                || module.imports[..i].iter().any(|e| e.prefix == import.prefix);
            if clash {
                return Err(SchemaError::at(
                    DiagnosticKind::DuplicateIdentifier,
                    "import",
                    Some(&import.module),
                    import.pos,
                    import.range,
                    format!("prefix {}", import.prefix),
                )
                .in_phase(Phase::Exit));
            }
        }
        Ok(())
    }

    fn root_holder(&self, ctx: &StmtCtx) -> Result<NodeId, SchemaError> {
        self.node_holder(ctx, NodeTag::is_module)
    }

    pub(super) fn enter_yang_version(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let version = validate::yang_version(ctx)?.to_string();
        let id = self.root_holder(ctx)?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            m.yang_version = Some(version);
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_namespace(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let uri = validate::uri(ctx)?.to_string();
        let id = self.node_holder(ctx, |tag| matches!(tag, NodeTag::Module))?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            m.namespace = Some(uri);
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_prefix(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let prefix = validate::identifier(ctx)?.to_string();
        let tree = &mut self.tree;
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Import(import) => {
                import.prefix = prefix;
                true
            }
            Frame::BelongsTo(belongs_to) => {
                belongs_to.prefix = prefix;
                true
            }
            Frame::Node(id) => match &mut tree.node_mut(*id).kind {
                NodeKind::Module(m) => {
                    m.prefix = prefix;
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

    pub(super) fn enter_import(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let module = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.root_holder(ctx)?;
        self.stack.push(Frame::Import(Import {
            module,
            prefix: String::new(),
            revision_date: None,
            pos: ctx.pos(),
            range: ctx.range(),
            resolved: None,
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_import(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Import(import) = self.stack.pop(ctx, FrameKind::Import)? else {
            unreachable!("pop checked the frame kind");
        };
        let id = self.root_holder(ctx)?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            m.imports.push(import);
        }
        Ok(())
    }

    pub(super) fn enter_include(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let submodule = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.root_holder(ctx)?;
        self.stack.push(Frame::Include(Include {
            submodule,
            revision_date: None,
            pos: ctx.pos(),
            range: ctx.range(),
            resolved: None,
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_include(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Include(include) = self.stack.pop(ctx, FrameKind::Include)? else {
            unreachable!("pop checked the frame kind");
        };
        let id = self.root_holder(ctx)?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            m.includes.push(include);
        }
        Ok(())
    }

    pub(super) fn enter_revision_date(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let date = validate::date(ctx)?.to_string();
        let accepted = match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Import(import) => {
                import.revision_date = Some(date);
                true
            }
            Frame::Include(include) => {
                include.revision_date = Some(date);
                true
            }
            _ => false,
        };
        if !accepted {
            return Err(self.invalid_holder(ctx));
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_belongs_to(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let module = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.node_holder(ctx, |tag| matches!(tag, NodeTag::SubModule))?;
        self.stack.push(Frame::BelongsTo(BelongsTo {
            module,
            prefix: String::new(),
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_belongs_to(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::BelongsTo(belongs_to) = self.stack.pop(ctx, FrameKind::BelongsTo)? else {
            unreachable!("pop checked the frame kind");
        };
        let id = self.root_holder(ctx)?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            m.prefix = belongs_to.prefix.clone();
            m.belongs_to = Some(belongs_to);
        }
        Ok(())
    }

    /// `organization` and `contact`.
    pub(super) fn enter_module_text(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let text = validate::argument(ctx)?.to_string();
        let id = self.root_holder(ctx)?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            match ctx.keyword() {
                Keyword::Organization => m.organization = Some(text),
                _ => m.contact = Some(text),
            }
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_revision(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let date = validate::date(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.root_holder(ctx)?;
        self.stack.push(Frame::Revision(Revision {
            date,
            ..Revision::default()
        }));
        Ok(Descend::Children)
    }

    pub(super) fn exit_revision(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Revision(revision) = self.stack.pop(ctx, FrameKind::Revision)? else {
            unreachable!("pop checked the frame kind");
        };
        let id = self.root_holder(ctx)?;
        if let Some(m) = self.tree.node_mut(id).kind.module_data_mut() {
            m.revisions.push(revision);
        }
        Ok(())
    }
}
