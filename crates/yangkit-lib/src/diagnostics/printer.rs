//! Builder-pattern printer for rendering diagnostics.

use std::borrow::Cow;
use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};
use crate::compilation::source_map::SourceMap;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: Cow<'d, Diagnostics>,
    sources: &'s SourceMap,
    colored: bool,
    brief: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics, sources: &'s SourceMap) -> Self {
        Self {
            diagnostics: Cow::Borrowed(diagnostics),
            sources,
            colored: false,
            brief: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One `file:line:col: severity: message` line per diagnostic.
    pub fn brief(mut self, value: bool) -> Self {
        self.brief = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.brief {
            return self.format_brief(w);
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let source = self.sources.content(diag.source);
            let range = adjust_range(diag.range, source.len());

            let mut snippet = Snippet::source(source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range.clone())
                    .label(&diag.message),
            );

            if let Some(p) = self.sources.path(diag.source) {
                snippet = snippet.path(p);
            }

            for related in diag.related.iter().filter(|r| r.span.source == diag.source) {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.span.range, source.len()))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity());
            let mut title_group = level.primary_title(&diag.message).element(snippet);
            if let Some(phase) = diag.phase {
                let note = format!("raised at statement {phase}");
                title_group = title_group.element(Level::NOTE.message(note));
            }
            for hint in &diag.hints {
                title_group = title_group.element(Level::HELP.message(hint.as_str()));
            }

            let report: Vec<Group> = vec![title_group];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_brief(&self, w: &mut impl Write) -> std::fmt::Result {
        for diag in self.diagnostics.iter() {
            writeln!(w, "{}", self.brief_line(diag))?;
        }
        Ok(())
    }

    fn brief_line(&self, diag: &DiagnosticMessage) -> String {
        let name = self.sources.kind(diag.source).display_name();
        let pos = diag
            .position
            .unwrap_or_else(|| self.sources.position(diag.source, diag.range.start()));
        format!("{}:{}: {}: {}", name, pos, diag.severity(), diag.message)
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl Diagnostics {
    pub fn printer<'d, 's>(&'d self, sources: &'s SourceMap) -> DiagnosticsPrinter<'d, 's> {
        DiagnosticsPrinter::new(self, sources)
    }

    /// Printer over [`Diagnostics::filtered`]: errors cascading from a
    /// syntax error are left out.
    pub fn filtered_printer<'s>(
        &self,
        sources: &'s SourceMap,
    ) -> DiagnosticsPrinter<'static, 's> {
        DiagnosticsPrinter {
            diagnostics: Cow::Owned(self.filtered()),
            sources,
            colored: false,
            brief: false,
        }
    }

    pub fn render(&self, sources: &SourceMap) -> String {
        self.printer(sources).render()
    }

    pub fn render_colored(&self, sources: &SourceMap, colored: bool) -> String {
        self.printer(sources).colored(colored).render()
    }

    pub fn render_brief(&self, sources: &SourceMap) -> String {
        self.printer(sources).brief(true).render()
    }

    pub fn render_filtered_colored(&self, sources: &SourceMap, colored: bool) -> String {
        self.filtered_printer(sources).colored(colored).render()
    }

    pub fn render_filtered_brief(&self, sources: &SourceMap) -> String {
        self.filtered_printer(sources).brief(true).render()
    }
}
