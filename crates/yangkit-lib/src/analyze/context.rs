//! Context stack: the currently open holders of the walk.
//!
//! A frame is either a node already attached to the tree, or an attribute
//! object still being filled by its sub-statements. Attribute frames are
//! moved into their holder when their statement exits.

use tracing::trace;

use super::error::{Phase, SchemaError};
use super::stmt::StmtCtx;
use crate::diagnostics::DiagnosticKind;
use crate::schema::{
    BelongsTo, BitMember, EnumMember, ExtensionArgument, Import, Include, IntervalRestriction,
    Must, NodeId, PatternRestriction, Refine, Revision, TypeSpec, When,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Node(NodeId),
    Type(Box<TypeSpec>),
    Range(IntervalRestriction),
    Length(IntervalRestriction),
    Pattern(PatternRestriction),
    Enum(EnumMember),
    Bit(BitMember),
    Import(Import),
    Include(Include),
    Revision(Revision),
    BelongsTo(BelongsTo),
    Must(Must),
    When(When),
    Refine(Refine),
    Argument(ExtensionArgument),
}

/// Payload-free discriminant of [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Node,
    Type,
    Range,
    Length,
    Pattern,
    Enum,
    Bit,
    Import,
    Include,
    Revision,
    BelongsTo,
    Must,
    When,
    Refine,
    Argument,
}

impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Node(_) => FrameKind::Node,
            Frame::Type(_) => FrameKind::Type,
            Frame::Range(_) => FrameKind::Range,
            Frame::Length(_) => FrameKind::Length,
            Frame::Pattern(_) => FrameKind::Pattern,
            Frame::Enum(_) => FrameKind::Enum,
            Frame::Bit(_) => FrameKind::Bit,
            Frame::Import(_) => FrameKind::Import,
            Frame::Include(_) => FrameKind::Include,
            Frame::Revision(_) => FrameKind::Revision,
            Frame::BelongsTo(_) => FrameKind::BelongsTo,
            Frame::Must(_) => FrameKind::Must,
            Frame::When(_) => FrameKind::When,
            Frame::Refine(_) => FrameKind::Refine,
            Frame::Argument(_) => FrameKind::Argument,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Frame::Node(id) => Some(*id),
            _ => None,
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FrameKind::Node => "node",
            FrameKind::Type => "type",
            FrameKind::Range => "range",
            FrameKind::Length => "length",
            FrameKind::Pattern => "pattern",
            FrameKind::Enum => "enum",
            FrameKind::Bit => "bit",
            FrameKind::Import => "import",
            FrameKind::Include => "include",
            FrameKind::Revision => "revision",
            FrameKind::BelongsTo => "belongs-to",
            FrameKind::Must => "must",
            FrameKind::When => "when",
            FrameKind::Refine => "refine",
            FrameKind::Argument => "argument",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
pub struct ContextStack {
    frames: Vec<Frame>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        trace!(depth = self.frames.len(), frame = %frame.kind(), "push");
        self.frames.push(frame);
    }

    /// Top of stack, or `StackEmpty`.
    pub fn peek(&self, stmt: &StmtCtx, phase: Phase) -> Result<&Frame, SchemaError> {
        self.frames.last().ok_or_else(|| empty(stmt, phase))
    }

    pub fn peek_mut(&mut self, stmt: &StmtCtx, phase: Phase) -> Result<&mut Frame, SchemaError> {
        self.frames.last_mut().ok_or_else(|| empty(stmt, phase))
    }

    /// Verify non-empty, verify the top is `expected`, then pop.
    pub fn pop(&mut self, stmt: &StmtCtx, expected: FrameKind) -> Result<Frame, SchemaError> {
        let top = self.peek(stmt, Phase::Exit)?;
        if top.kind() != expected {
            return Err(SchemaError::new(
                DiagnosticKind::HolderMismatch,
                stmt,
                Phase::Exit,
                format!("expected `{}` on top, found `{}`", expected, top.kind()),
            ));
        }
        trace!(depth = self.frames.len() - 1, frame = %expected, "pop");
        self.frames.pop().ok_or_else(|| empty(stmt, Phase::Exit))
    }

    /// Pop a node frame, verifying it is exactly `id`.
    pub fn pop_node(&mut self, stmt: &StmtCtx, id: NodeId) -> Result<(), SchemaError> {
        let top = self.peek(stmt, Phase::Exit)?;
        if top.as_node() != Some(id) {
            return Err(SchemaError::new(
                DiagnosticKind::HolderMismatch,
                stmt,
                Phase::Exit,
                format!("expected node `{}` on top, found `{}`", id.index(), top.kind()),
            ));
        }
        self.pop(stmt, FrameKind::Node).map(|_| ())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn empty(stmt: &StmtCtx, phase: Phase) -> SchemaError {
    SchemaError::new(DiagnosticKind::StackEmpty, stmt, phase, "no open holder")
}
