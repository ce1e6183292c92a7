//! Statement context handed to handlers.

use rowan::TextRange;
use yangkit_core::Position;

use super::keyword::Keyword;
use crate::compilation::source_map::{SourceId, SourceMap};
use crate::parser::ast;

/// One statement with its argument already unquoted and its position resolved.
#[derive(Debug, Clone)]
pub struct StmtCtx<'a> {
    keyword: Keyword,
    keyword_text: String,
    arg: Option<String>,
    pos: Position,
    range: TextRange,
    children: Vec<ast::Statement>,
    source: SourceId,
    sources: &'a SourceMap,
}

impl<'a> StmtCtx<'a> {
    pub fn new(stmt: &ast::Statement, source: SourceId, sources: &'a SourceMap) -> Self {
        let keyword_text = stmt
            .keyword()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let range = stmt.head_range();
        Self {
            keyword: Keyword::from_text(&keyword_text),
            keyword_text,
            arg: stmt.argument().map(|a| a.value()),
            pos: sources.position(source, range.start()),
            range,
            children: stmt.substatements().collect(),
            source,
            sources,
        }
    }

    pub fn keyword(&self) -> Keyword {
        self.keyword
    }

    pub fn keyword_text(&self) -> &str {
        &self.keyword_text
    }

    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn substatements(&self) -> &[ast::Statement] {
        &self.children
    }

    /// Sub-statements with the given keyword, in source order.
    pub fn find_all(&self, keyword: Keyword) -> impl Iterator<Item = StmtCtx<'a>> + '_ {
        self.children
            .iter()
            .filter(move |s| keyword_of(s) == keyword)
            .map(|s| StmtCtx::new(s, self.source, self.sources))
    }

    pub fn find(&self, keyword: Keyword) -> Option<StmtCtx<'a>> {
        self.find_all(keyword).next()
    }

    pub fn count(&self, keyword: Keyword) -> usize {
        self.children
            .iter()
            .filter(|s| keyword_of(s) == keyword)
            .count()
    }

    pub fn has(&self, keyword: Keyword) -> bool {
        self.count(keyword) > 0
    }

    pub fn child(&self, stmt: &ast::Statement) -> StmtCtx<'a> {
        StmtCtx::new(stmt, self.source, self.sources)
    }
}

pub(crate) fn keyword_of(stmt: &ast::Statement) -> Keyword {
    stmt.keyword()
        .map_or(Keyword::Unknown, |t| Keyword::from_text(t.text()))
}
