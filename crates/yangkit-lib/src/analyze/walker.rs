//! Depth-first walk of one compilation unit.
//!
//! The walk calls the entry handler of each statement, descends into its
//! sub-statements, then calls the exit handler. The first semantic error
//! aborts the unit: the partially built tree is kept for inspection but never
//! linked.

use rowan::{TextRange, TextSize};
use tracing::{debug, trace};
use yangkit_core::Position;

use super::context::ContextStack;
use super::error::{Phase, SchemaError};
use super::keyword::Keyword;
use super::stmt::{StmtCtx, keyword_of};
use crate::compilation::source_map::{SourceId, SourceMap};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::link::ResolutionQueue;
use crate::parser::ast;
use crate::schema::{NodeId, SchemaTree};

/// What the walker does after a statement's entry handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// The statement pushed a frame: visit sub-statements, then exit.
    Children,
    /// The statement mutated its holder: only extension statements may follow.
    Leaf,
    /// The statement is ignored along with its sub-statements.
    Skip,
}

/// Result of analyzing one unit.
#[derive(Debug)]
pub struct Analysis {
    pub tree: SchemaTree,
    pub queue: ResolutionQueue,
    /// Lists whose keys can only be checked once `uses` are linked.
    pub deferred_keys: Vec<NodeId>,
    /// Warnings, plus the error that aborted the walk if any.
    pub diagnostics: Diagnostics,
    pub failed: bool,
}

/// Walk state, threaded through every handler.
pub struct Walker<'a> {
    pub(super) source: SourceId,
    pub(super) sources: &'a SourceMap,
    pub(super) tree: SchemaTree,
    pub(super) stack: ContextStack,
    pub(super) queue: ResolutionQueue,
    pub(super) deferred_keys: Vec<NodeId>,
    pub(super) warnings: Diagnostics,
}

/// Analyze the statements of one parsed source.
pub fn analyze_unit(root: &ast::Root, source: SourceId, sources: &SourceMap) -> Analysis {
    let mut walker = Walker::new(source, sources);
    let result = walker.walk_root(root);
    walker.finish(result)
}

impl<'a> Walker<'a> {
    pub fn new(source: SourceId, sources: &'a SourceMap) -> Self {
        Self {
            source,
            sources,
            tree: SchemaTree::new(source),
            stack: ContextStack::new(),
            queue: ResolutionQueue::new(),
            deferred_keys: Vec::new(),
            warnings: Diagnostics::new(),
        }
    }

    fn finish(self, result: Result<(), SchemaError>) -> Analysis {
        let mut diagnostics = self.warnings;
        let failed = match result {
            Ok(()) => false,
            Err(err) => {
                debug!(source = ?self.source, error = %err, "unit aborted");
                err.report(self.source, &mut diagnostics);
                true
            }
        };
        Analysis {
            tree: self.tree,
            queue: self.queue,
            deferred_keys: self.deferred_keys,
            diagnostics,
            failed,
        }
    }

    /// A file holds exactly one `module` or `submodule`, optionally preceded
    /// or followed by extension statements.
    pub fn walk_root(&mut self, root: &ast::Root) -> Result<(), SchemaError> {
        let mut seen_unit = false;
        for stmt in root.statements() {
            let keyword = keyword_of(&stmt);
            let is_unit = matches!(keyword, Keyword::Module | Keyword::Submodule);
            if is_unit && seen_unit {
                let ctx = StmtCtx::new(&stmt, self.source, self.sources);
                return Err(SchemaError::new(
                    DiagnosticKind::InvalidHolder,
                    &ctx,
                    Phase::Entry,
                    "a file holds exactly one `module` or `submodule`",
                ));
            }
            if !is_unit && !matches!(keyword, Keyword::Extension) {
                let ctx = StmtCtx::new(&stmt, self.source, self.sources);
                return Err(SchemaError::new(
                    DiagnosticKind::InvalidHolder,
                    &ctx,
                    Phase::Entry,
                    format!(
                        "`{}` is not allowed at the top level",
                        ctx.keyword_text()
                    ),
                ));
            }
            seen_unit |= is_unit;
            self.visit(&stmt)?;
        }

        if !seen_unit {
            return Err(SchemaError::at(
                DiagnosticKind::MissingRequiredSubstatement,
                "module",
                None,
                Position::new(1, 1),
                TextRange::empty(TextSize::from(0)),
                "a file must contain a `module` or `submodule`",
            )
            .in_phase(Phase::Entry));
        }
        debug_assert!(self.stack.is_empty(), "context stack not unwound");
        Ok(())
    }

    fn visit(&mut self, stmt: &ast::Statement) -> Result<(), SchemaError> {
        let ctx = StmtCtx::new(stmt, self.source, self.sources);
        match self.enter(&ctx)? {
            Descend::Skip => Ok(()),
            Descend::Leaf => self.visit_leaf_children(&ctx),
            Descend::Children => {
                for child in ctx.substatements() {
                    self.visit(child)?;
                }
                self.exit(&ctx)
            }
        }
    }

    /// Statements that push nothing accept extension statements only.
    fn visit_leaf_children(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        for child in ctx.substatements() {
            match keyword_of(child) {
                Keyword::Extension => self.visit(child)?,
                Keyword::Unknown => return Err(self.unknown_statement(&ctx.child(child))),
                _ => {
                    let child = ctx.child(child);
                    return Err(SchemaError::new(
                        DiagnosticKind::InvalidHolder,
                        &child,
                        Phase::Entry,
                        format!(
                            "`{}` is not allowed under `{}`",
                            child.keyword_text(),
                            ctx.keyword_text()
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    pub(super) fn unknown_statement(&self, ctx: &StmtCtx) -> SchemaError {
        let err = SchemaError::new(
            DiagnosticKind::UnknownStatement,
            ctx,
            Phase::Entry,
            ctx.keyword_text(),
        );
        match super::utils::suggestion(ctx.keyword_text(), Keyword::TEXTS) {
            Some(hint) => err.hint(hint),
            None => err,
        }
    }

    /// Extension instances are skipped. A prefix no `import` declares earns
    /// a warning, since the statement can never be interpreted.
    pub(super) fn skip_extension(&mut self, ctx: &StmtCtx) -> Descend {
        let keyword = ctx.keyword_text();
        trace!(keyword, "extension statement skipped");
        let prefix = keyword.split(':').next().unwrap_or_default();
        let known = self.tree.module().is_some_and(|m| {
            m.prefix == prefix
                || m.belongs_to.as_ref().is_some_and(|b| b.prefix == prefix)
                || m.import_by_prefix(prefix).is_some()
        });
        if !known {
            self.warnings
                .report(self.source, DiagnosticKind::ExtensionSkipped, ctx.range())
                .message(keyword)
                .position(ctx.pos())
                .hint(format!("no `import` declares the prefix `{prefix}`"))
                .emit();
        }
        Descend::Skip
    }
}
