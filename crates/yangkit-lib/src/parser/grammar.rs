//! Statement grammar.
//!
//! ```text
//! file      = statement*
//! statement = keyword argument? (";" | block)
//! argument  = unquoted | quoted ("+" quoted)*
//! block     = "{" statement* "}"
//! ```
//!
//! The grammar is keyword-agnostic: which statements exist, and where, is
//! the analyzer's business.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ARGUMENT_FIRST, STATEMENT_RECOVERY};

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        while !self.should_stop() && !self.currently_is(SyntaxKind::Error) {
            match self.current() {
                SyntaxKind::Word => self.parse_statement(),
                SyntaxKind::BraceClose => self.error_and_bump(DiagnosticKind::UnexpectedBlockClose),
                SyntaxKind::DqString | SyntaxKind::SqString => {
                    self.error_and_bump(DiagnosticKind::ExpectedKeyword)
                }
                _ => self.error_and_bump(DiagnosticKind::UnexpectedToken),
            }
        }

        self.flush_trivia();
        self.finish_node();
    }

    /// `keyword argument? (";" | block)`
    fn parse_statement(&mut self) {
        self.assert_current(SyntaxKind::Word);
        self.start_node(SyntaxKind::Statement);
        let keyword = self.current_text();
        self.bump();

        if self.currently_is_one_of(ARGUMENT_FIRST) {
            self.parse_argument();
        }

        match self.current() {
            SyntaxKind::Semicolon => self.bump(),
            SyntaxKind::BraceOpen => self.parse_block(),
            _ => {
                self.error_msg(
                    DiagnosticKind::ExpectedTerminator,
                    format!("after `{}`", keyword),
                );
                if self.currently_is(SyntaxKind::Garbage) {
                    self.error_recover(DiagnosticKind::UnexpectedToken, STATEMENT_RECOVERY);
                    self.eat_token(SyntaxKind::Semicolon);
                }
            }
        }

        self.finish_node();
    }

    /// Unquoted word, or quoted strings joined with `+`.
    fn parse_argument(&mut self) {
        self.start_node(SyntaxKind::Argument);

        if self.eat_token(SyntaxKind::Word) {
            self.finish_node();
            return;
        }

        self.bump(); // first quoted part
        while self.currently_is(SyntaxKind::Plus) {
            self.bump();
            if self.current().is_quoted_string() {
                self.bump();
            } else {
                self.error(DiagnosticKind::ExpectedString);
                break;
            }
        }

        self.finish_node();
    }

    /// `{ statement* }`
    fn parse_block(&mut self) {
        self.assert_current(SyntaxKind::BraceOpen);
        if !self.open_block() {
            return;
        }

        self.start_node(SyntaxKind::Block);
        self.bump(); // consume '{'

        let mut closed = false;
        while !self.should_stop() && !self.currently_is(SyntaxKind::Error) {
            match self.current() {
                SyntaxKind::BraceClose => {
                    self.bump();
                    closed = true;
                    break;
                }
                SyntaxKind::Word => self.parse_statement(),
                SyntaxKind::DqString | SyntaxKind::SqString => {
                    self.error_and_bump(DiagnosticKind::ExpectedKeyword)
                }
                _ => self.error_and_bump(DiagnosticKind::UnexpectedToken),
            }
        }

        self.close_block(closed);
        self.finish_node();
    }
}
