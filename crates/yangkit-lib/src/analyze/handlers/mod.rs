//! Statement handlers.
//!
//! Every known keyword has an entry handler; statements that push a frame
//! also have an exit handler. An entry handler validates the argument, checks
//! sub-statement cardinality, confirms the holder on top of the context stack,
//! runs collision detection for named children, then builds and attaches its
//! node or attribute. Exit handlers pop what their entry pushed and run the
//! checks that need the complete construct.

mod attributes;
mod data;
mod identity;
mod module;
mod rpc;
mod types;

use super::context::Frame;
use super::error::{Phase, SchemaError};
use super::keyword::Keyword;
use super::stmt::StmtCtx;
use super::walker::{Descend, Walker};
use crate::diagnostics::DiagnosticKind;
use crate::link::{Resolvable, ResolvableKind};
use crate::schema::{Config, NodeId, NodeKind, NodeTag, SchemaNode};

impl Walker<'_> {
    pub(super) fn enter(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        use Keyword::*;
        match ctx.keyword() {
            Module => self.enter_module(ctx),
            Submodule => self.enter_submodule(ctx),
            YangVersion => self.enter_yang_version(ctx),
            Namespace => self.enter_namespace(ctx),
            Prefix => self.enter_prefix(ctx),
            Import => self.enter_import(ctx),
            Include => self.enter_include(ctx),
            RevisionDate => self.enter_revision_date(ctx),
            BelongsTo => self.enter_belongs_to(ctx),
            Organization | Contact => self.enter_module_text(ctx),
            Revision => self.enter_revision(ctx),
            Description | Reference => self.enter_documentation(ctx),
            ExtensionDef => self.enter_extension(ctx),
            Argument => self.enter_argument(ctx),
            YinElement => self.enter_yin_element(ctx),
            Identity => self.enter_identity(ctx),
            Base => self.enter_base(ctx),
            Feature => self.enter_feature(ctx),
            IfFeature => self.enter_if_feature(ctx),
            Typedef => self.enter_typedef(ctx),
            Type => self.enter_type(ctx),
            Units => self.enter_units(ctx),
            Default => self.enter_default(ctx),
            Status => self.enter_status(ctx),
            Config => self.enter_config(ctx),
            Mandatory => self.enter_mandatory(ctx),
            Presence => self.enter_presence(ctx),
            OrderedBy => self.enter_ordered_by(ctx),
            Must => self.enter_must(ctx),
            ErrorMessage | ErrorAppTag => self.enter_error_info(ctx),
            MinElements => self.enter_min_elements(ctx),
            MaxElements => self.enter_max_elements(ctx),
            Value => self.enter_value(ctx),
            Grouping => self.enter_grouping(ctx),
            Container => self.enter_container(ctx),
            Leaf => self.enter_leaf(ctx),
            LeafList => self.enter_leaf_list(ctx),
            List => self.enter_list(ctx),
            Key => self.enter_key(ctx),
            Unique => self.enter_unique(ctx),
            Choice => self.enter_choice(ctx),
            Case => self.enter_case(ctx),
            Anyxml => self.enter_anyxml(ctx),
            Uses => self.enter_uses(ctx),
            Refine => self.enter_refine(ctx),
            Augment => self.enter_augment(ctx),
            When => self.enter_when(ctx),
            Rpc => self.enter_rpc(ctx),
            Input | Output => self.enter_rpc_io(ctx),
            Notification => self.enter_notification(ctx),
            Range | Length => self.enter_interval(ctx),
            Pattern => self.enter_pattern(ctx),
            Enum => self.enter_enum(ctx),
            Bit => self.enter_bit(ctx),
            Position => self.enter_position(ctx),
            Path => self.enter_path(ctx),
            RequireInstance => self.enter_require_instance(ctx),
            FractionDigits => self.enter_fraction_digits(ctx),
            Deviation | Deviate => Err(SchemaError::new(
                DiagnosticKind::UnsupportedStatement,
                ctx,
                Phase::Entry,
                ctx.keyword_text(),
            )),
            Extension => Ok(self.skip_extension(ctx)),
            Unknown => Err(self.unknown_statement(ctx)),
        }
    }

    pub(super) fn exit(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        use Keyword::*;
        match ctx.keyword() {
            Module | Submodule => self.exit_module(ctx),
            Import => self.exit_import(ctx),
            Include => self.exit_include(ctx),
            BelongsTo => self.exit_belongs_to(ctx),
            Revision => self.exit_revision(ctx),
            ExtensionDef | Identity | Feature | Grouping | Case | Uses | Rpc | Input | Output
            | Notification | Anyxml | Container => self.exit_node(ctx),
            Argument => self.exit_argument(ctx),
            Typedef => self.exit_typedef(ctx),
            Type => self.exit_type(ctx),
            Must => self.exit_must(ctx),
            When => self.exit_when(ctx),
            Leaf => self.exit_leaf(ctx),
            LeafList => self.exit_leaf_list(ctx),
            List => self.exit_list(ctx),
            Choice => self.exit_choice(ctx),
            Refine => self.exit_refine(ctx),
            Augment => self.exit_augment(ctx),
            Range | Length => self.exit_interval(ctx),
            Pattern => self.exit_pattern(ctx),
            Enum => self.exit_enum(ctx),
            Bit => self.exit_bit(ctx),
            _ => Err(SchemaError::new(
                DiagnosticKind::HolderMismatch,
                ctx,
                Phase::Exit,
                "statement pushed no frame",
            )),
        }
    }

    /// Human name of the frame on top, for holder errors.
    fn holder_name(&self, frame: &Frame) -> String {
        match frame {
            Frame::Node(id) => self.tree.node(*id).tag().keyword().to_string(),
            Frame::Type(spec) => format!("type {}", spec.name),
            other => other.kind().to_string(),
        }
    }

    pub(super) fn invalid_holder(&self, ctx: &StmtCtx) -> SchemaError {
        let holder = match self.stack.peek(ctx, Phase::Entry) {
            Ok(frame) => self.holder_name(frame),
            Err(err) => return err,
        };
        SchemaError::new(
            DiagnosticKind::InvalidHolder,
            ctx,
            Phase::Entry,
            format!("`{}` is not allowed under `{}`", ctx.keyword_text(), holder),
        )
    }

    /// The node on top of the stack, if its tag is accepted.
    pub(super) fn node_holder(
        &self,
        ctx: &StmtCtx,
        accepts: impl Fn(NodeTag) -> bool,
    ) -> Result<NodeId, SchemaError> {
        match self.stack.peek(ctx, Phase::Entry)? {
            Frame::Node(id) if accepts(self.tree.node(*id).tag()) => Ok(*id),
            _ => Err(self.invalid_holder(ctx)),
        }
    }

    /// Attach a new node under `parent` and push it.
    pub(super) fn open_node(&mut self, ctx: &StmtCtx, parent: NodeId, kind: NodeKind, name: &str) -> NodeId {
        let node = SchemaNode::new(kind, name, ctx.pos(), ctx.range());
        let id = self.tree.add_child(parent, node);
        self.stack.push(Frame::Node(id));
        id
    }

    /// Pop the node this statement pushed.
    pub(super) fn close_node(&mut self, ctx: &StmtCtx) -> Result<NodeId, SchemaError> {
        let id = self
            .stack
            .peek(ctx, Phase::Exit)?
            .as_node()
            .ok_or_else(|| {
                SchemaError::new(
                    DiagnosticKind::HolderMismatch,
                    ctx,
                    Phase::Exit,
                    format!("expected a `{}` node on top", ctx.keyword_text()),
                )
            })?;
        let tag = self.tree.node(id).tag();
        if tag.keyword() != ctx.keyword_text() {
            return Err(SchemaError::new(
                DiagnosticKind::HolderMismatch,
                ctx,
                Phase::Exit,
                format!("expected `{}` on top, found `{}`", ctx.keyword_text(), tag),
            ));
        }
        self.stack.pop_node(ctx, id)?;
        Ok(id)
    }

    fn exit_node(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        self.close_node(ctx).map(|_| ())
    }

    /// Effective config of a new data node under `parent`: its own `config`
    /// sub-statement when present, else the nearest config-bearing ancestor's.
    pub(super) fn resolve_config(&self, ctx: &StmtCtx, parent: NodeId) -> Result<Config, SchemaError> {
        let inherited = std::iter::once(parent)
            .chain(self.tree.ancestors(parent))
            .find_map(|id| self.tree.node(id).kind.config())
            .map_or(true, |c| c.value);

        let Some(stmt) = ctx.find(Keyword::Config) else {
            return Ok(Config::inherited(inherited));
        };
        let value = super::validate::boolean(&stmt)?;
        if value && !inherited {
            return Err(SchemaError::new(
                DiagnosticKind::DataModelConstraintViolation,
                &stmt,
                Phase::Entry,
                "`config true` under a `config false` node",
            ));
        }
        Ok(Config {
            value,
            explicit: true,
        })
    }

    /// Whether references from `id` wait for an instantiating leaf.
    pub(super) fn in_template(&self, id: NodeId) -> bool {
        self.tree.node(id).tag() == NodeTag::Typedef || self.tree.is_within(id, NodeTag::Typedef)
    }

    pub(super) fn enqueue(&mut self, ctx: &StmtCtx, kind: ResolvableKind, reference: &str, consumer: NodeId) {
        self.queue.enqueue(Resolvable::new(
            kind,
            reference,
            consumer,
            ctx.pos(),
            ctx.range(),
        ));
    }
}
