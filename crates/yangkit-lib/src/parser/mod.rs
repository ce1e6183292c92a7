//! Parser infrastructure for the statement language.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy lexing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Keyword-agnostic grammar: every statement is `keyword argument? (";" | block)`
//!
//! # Recovery Strategy
//!
//! The parser is resilient, it always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. A missing terminator emits a diagnostic but doesn't consume
//! 3. An unclosed block is reported once, spanning from its `{` to end of file
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

pub use ast::{Argument, Block, Root, Statement};
pub use core::{ParseResult, Parser};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use lexer::lex;

use crate::compilation::source_map::SourceId;

/// Parses one source without fuel limits.
pub fn parse(source: &str, source_id: SourceId) -> crate::Result<ParseResult> {
    Parser::new(source, source_id, lex(source)).parse()
}

/// Indented CST dump without trivia, one node or token per line.
pub fn dump_cst(node: &SyntaxNode) -> String {
    let mut out = String::new();
    dump_node(node, 0, &mut out);
    out
}

fn dump_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    out.push_str(&format!("{}{:?}\n", "  ".repeat(depth), node.kind()));
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => dump_node(&n, depth + 1, out),
            rowan::NodeOrToken::Token(t) if !t.kind().is_trivia() => {
                out.push_str(&format!(
                    "{}{:?} {}\n",
                    "  ".repeat(depth + 1),
                    t.kind(),
                    t.text()
                ));
            }
            rowan::NodeOrToken::Token(_) => {}
        }
    }
}
