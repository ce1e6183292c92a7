//! Lexer for the statement language.
//!
//! Tokens carry spans only; text is sliced from the source on demand.
//! Runs of characters no rule accepts (a stray `"` opening a string that
//! never closes, for one) collapse into a single `Garbage` token, which the
//! parser then reports once.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    fn at(kind: SyntaxKind, span: Range<usize>) -> Self {
        let span = TextRange::new((span.start as u32).into(), (span.end as u32).into());
        Self { kind, span }
    }
}

/// Tokenizes a whole source file.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut garbage: Option<Range<usize>> = None;

    for (result, span) in SyntaxKind::lexer(source).spanned() {
        match result {
            Ok(kind) => {
                if let Some(run) = garbage.take() {
                    tokens.push(Token::at(SyntaxKind::Garbage, run));
                }
                tokens.push(Token::at(kind, span));
            }
            Err(()) => {
                garbage = Some(match garbage {
                    Some(run) => run.start..span.end,
                    None => span,
                });
            }
        }
    }
    if let Some(run) = garbage {
        tokens.push(Token::at(SyntaxKind::Garbage, run));
    }

    tokens
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}
