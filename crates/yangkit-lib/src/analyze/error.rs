//! Positioned semantic errors.

pub use crate::diagnostics::Phase;

use rowan::TextRange;
use yangkit_core::Position;

use super::stmt::StmtCtx;
use crate::compilation::source_map::SourceId;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// One semantic failure, carrying everything a `file:line:col` message needs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{pos}: {}", self.message())]
pub struct SchemaError {
    pub kind: DiagnosticKind,
    pub keyword: String,
    pub argument: Option<String>,
    pub phase: Phase,
    pub pos: Position,
    pub range: TextRange,
    /// Detail substituted into the kind's message template.
    pub detail: String,
    pub related: Option<(String, TextRange)>,
    pub hint: Option<String>,
}

impl SchemaError {
    pub fn new(kind: DiagnosticKind, stmt: &StmtCtx, phase: Phase, detail: impl Into<String>) -> Self {
        Self {
            kind,
            keyword: stmt.keyword_text().to_string(),
            argument: stmt.arg().map(str::to_owned),
            phase,
            pos: stmt.pos(),
            range: stmt.range(),
            detail: detail.into(),
            related: None,
            hint: None,
        }
    }

    /// An error raised by the linker, positioned at the referencing statement.
    pub fn at(
        kind: DiagnosticKind,
        keyword: &str,
        argument: Option<&str>,
        pos: Position,
        range: TextRange,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            keyword: keyword.to_string(),
            argument: argument.map(str::to_owned),
            phase: Phase::Link,
            pos,
            range,
            detail: detail.into(),
            related: None,
            hint: None,
        }
    }

    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related = Some((message.into(), range));
        self
    }

    pub fn in_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// The kind's message with `detail` filled in.
    pub fn message(&self) -> String {
        let base = self.kind.message(Some(&self.detail));
        let subject = match &self.argument {
            Some(arg) => format!("{} {}", self.keyword, arg),
            None => self.keyword.clone(),
        };
        if self.kind.is_engine_error() {
            return format!("`{subject}` ({}): {base}", self.phase);
        }
        format!("`{subject}`: {base}")
    }

    pub fn report(&self, source: SourceId, diagnostics: &mut Diagnostics) {
        let mut builder = diagnostics
            .report(source, self.kind, self.range)
            .text(self.message())
            .position(self.pos)
            .phase(self.phase);
        if let Some((message, range)) = &self.related {
            builder = builder.related_to(message.clone(), *range);
        }
        if let Some(hint) = &self.hint {
            builder = builder.hint(hint.clone());
        }
        builder.emit();
    }
}
