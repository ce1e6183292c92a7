//! Parser state and token-level operations.
//!
//! Trivia is buffered while looking ahead and flushed into the CST in front
//! of the next node or token, so the tree stays lossless.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::compilation::source_map::SourceId;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Lookaheads allowed between two bumps before the parser counts as stuck.
const STALL_LIMIT: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

pub struct Parser<'src> {
    source: &'src str,
    source_id: SourceId,
    tokens: Vec<Token>,
    pos: usize,
    trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    /// `{` of every block still open, innermost last.
    open_blocks: Vec<TextRange>,
    last_reported: Option<TextSize>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
    exec_fuel: Option<(u32, u32)>,
    max_depth: Option<u32>,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, source_id: SourceId, tokens: Vec<Token>) -> Self {
        Self {
            source,
            source_id,
            tokens,
            pos: 0,
            trivia: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            open_blocks: Vec::new(),
            last_reported: None,
            debug_fuel: std::cell::Cell::new(STALL_LIMIT),
            exec_fuel: None,
            max_depth: None,
            fatal: None,
        }
    }

    /// Caps the number of consumed tokens.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit.map(|l| (l, l));
        self
    }

    /// Caps block nesting.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        if let Some(err) = self.fatal {
            return Err(err);
        }

        let exec_fuel_consumed = self
            .exec_fuel
            .map_or(0, |(initial, remaining)| initial - remaining);
        let green: GreenNode = self.builder.finish();
        let root = Root::cast(SyntaxNode::new_root(green)).expect("parse_root opens a Root node");
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
            exec_fuel_consumed,
        })
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal.is_some()
    }

    fn fail(&mut self, err: Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
    }

    /// Kind of the next significant token; `Error` at end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.buffer_trivia();
        self.ensure_progress();
        self.tokens.get(self.pos).map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.buffer_trivia();
        match self.tokens.get(self.pos) {
            Some(t) => t.span,
            None => TextRange::empty(TextSize::of(self.source)),
        }
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        self.buffer_trivia();
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn should_stop(&self) -> bool {
        self.pos >= self.tokens.len() || self.has_fatal_error()
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    fn buffer_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.trivia.push(token);
            self.pos += 1;
        }
    }

    pub(super) fn flush_trivia(&mut self) {
        self.buffer_trivia();
        for token in self.trivia.drain(..) {
            self.builder
                .token(token.kind.into(), token_text(self.source, &token));
        }
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        for token in self.trivia.drain(..) {
            self.builder
                .token(token.kind.into(), token_text(self.source, &token));
        }
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn bump(&mut self) {
        self.buffer_trivia();
        assert!(self.pos < self.tokens.len(), "bump past end of input");
        self.debug_fuel.set(STALL_LIMIT);

        let exhausted = match &mut self.exec_fuel {
            Some((_, 0)) => true,
            Some((_, remaining)) => {
                *remaining -= 1;
                false
            }
            None => false,
        };
        if exhausted {
            self.fail(Error::ExecFuelExhausted);
        }

        for token in self.trivia.drain(..) {
            self.builder
                .token(token.kind.into(), token_text(self.source, &token));
        }
        let token = self.tokens[self.pos];
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.currently_is(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// One diagnostic per offset: recovery often trips twice on the same token.
    fn report(&mut self, kind: DiagnosticKind, range: TextRange, detail: Option<String>) {
        if self.last_reported == Some(range.start()) {
            return;
        }
        self.last_reported = Some(range.start());
        let builder = self.diagnostics.report(self.source_id, kind, range);
        match detail {
            Some(detail) => builder.message(detail).emit(),
            None => builder.emit(),
        }
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        self.report(kind, range, None);
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        let range = self.current_span();
        self.report(kind, range, Some(detail.into()));
    }

    /// Reports the current token and wraps it in an `Error` node.
    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        if self.pos < self.tokens.len() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Reports, then swallows tokens into an `Error` node up to `recovery`.
    pub(super) fn error_recover(&mut self, kind: DiagnosticKind, recovery: TokenSet) {
        if self.currently_is_one_of(recovery) || self.should_stop() {
            self.error(kind);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error(kind);
        while !self.currently_is_one_of(recovery) && !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }

    /// Opens a block at the current `{`. False once the nesting limit is hit.
    pub(super) fn open_block(&mut self) -> bool {
        if let Some(limit) = self.max_depth
            && self.open_blocks.len() as u32 >= limit
        {
            self.fail(Error::RecursionLimitExceeded);
            return false;
        }
        let brace = self.current_span();
        self.open_blocks.push(brace);
        self.debug_fuel.set(STALL_LIMIT);
        true
    }

    /// Closes the innermost block, reporting it when no `}` was seen.
    pub(super) fn close_block(&mut self, closed: bool) {
        let Some(brace) = self.open_blocks.pop() else {
            return;
        };
        self.debug_fuel.set(STALL_LIMIT);
        if closed || self.has_fatal_error() {
            return;
        }

        let end = self.current_span();
        if self.last_reported == Some(end.start()) {
            return;
        }
        self.last_reported = Some(end.start());
        // Spans to end of input so errors inside the block can be filtered.
        let range = TextRange::new(brace.start(), end.end());
        self.diagnostics
            .report(self.source_id, DiagnosticKind::UnclosedBlock, range)
            .message("block reaches end of file")
            .related_to("block opened here", brace)
            .emit();
    }
}
