//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Statement, Statement);
ast_node!(Argument, Argument);
ast_node!(Block, Block);

impl Root {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

impl Statement {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Word)
    }

    pub fn argument(&self) -> Option<Argument> {
        self.0.children().find_map(Argument::cast)
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    /// Nested statements, empty for `keyword arg;`.
    pub fn substatements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.block()
            .into_iter()
            .flat_map(|b| b.0.children().filter_map(Statement::cast).collect::<Vec<_>>())
    }

    /// Range of the keyword and argument, without the block.
    pub fn head_range(&self) -> TextRange {
        let start = self
            .keyword()
            .map_or(self.0.text_range().start(), |k| k.text_range().start());
        let end = self
            .argument()
            .map(|a| a.text_range().end())
            .or_else(|| self.keyword().map(|k| k.text_range().end()))
            .unwrap_or(self.0.text_range().end());
        TextRange::new(start, end)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

impl Argument {
    /// String parts in source order: one unquoted word, or quoted pieces joined by `+`.
    pub fn parts(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::Word) || t.kind().is_quoted_string())
    }

    /// Argument text after quote removal, escape processing and concatenation.
    pub fn value(&self) -> String {
        let mut out = String::new();
        for part in self.parts() {
            let text = part.text();
            match part.kind() {
                SyntaxKind::DqString => {
                    let indent = column_of(&part) + 1;
                    out.push_str(&unquote_double(&text[1..text.len() - 1], indent));
                }
                SyntaxKind::SqString => out.push_str(&text[1..text.len() - 1]),
                _ => out.push_str(text),
            }
        }
        out
    }

    pub fn is_quoted(&self) -> bool {
        self.parts().any(|t| t.kind().is_quoted_string())
    }
}

/// Character column (0-based) at which `token` starts on its line.
fn column_of(token: &SyntaxToken) -> usize {
    let mut column = 0;
    let mut cursor = token.prev_token();
    while let Some(t) = cursor {
        let text = t.text();
        if let Some(i) = text.rfind('\n') {
            return column + text[i + 1..].chars().count();
        }
        column += text.chars().count();
        cursor = t.prev_token();
    }
    column
}

/// Body of a double-quoted string.
///
/// Continuation lines lose leading whitespace up to `indent` columns (a tab
/// counts as eight), lines lose trailing whitespace before a break, and the
/// escapes `\n`, `\t`, `\"`, `\\` are replaced. Other backslashes stay.
pub(crate) fn unquote_double(body: &str, indent: usize) -> String {
    let mut lines = Vec::new();
    let raw_lines: Vec<&str> = body.split('\n').collect();
    let last = raw_lines.len() - 1;
    for (i, line) in raw_lines.iter().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let line = if i == 0 { line } else { strip_indent(line, indent) };
        let line = if i < last {
            line.trim_end_matches([' ', '\t'])
        } else {
            line
        };
        lines.push(line);
    }
    unescape(&lines.join("\n"))
}

fn strip_indent(line: &str, indent: usize) -> &str {
    let mut width = 0;
    for (offset, c) in line.char_indices() {
        let w = match c {
            ' ' => 1,
            '\t' => 8,
            _ => return &line[offset..],
        };
        if width + w > indent {
            return &line[offset..];
        }
        width += w;
    }
    ""
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
