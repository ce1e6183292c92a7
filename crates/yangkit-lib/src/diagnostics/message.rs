use rowan::TextRange;
use yangkit_core::Position;

use super::{SourceId, Span};

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one. Syntax errors come first because a broken statement
/// tree makes every semantic finding below it unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascades through the rest of the file
    UnclosedBlock,

    // User omitted something required
    ExpectedKeyword,
    ExpectedTerminator,
    ExpectedString,

    // User wrote something that doesn't belong
    UnexpectedToken,
    UnexpectedBlockClose,

    // Statement-level problems
    UnknownStatement,
    UnsupportedStatement,

    // Engine invariants
    StackEmpty,
    HolderMismatch,

    // Grammar-context and cardinality
    InvalidHolder,
    MissingRequiredSubstatement,
    CardinalityViolation,
    InvalidArgument,

    // Naming and linking
    DuplicateIdentifier,
    UnresolvedReference,

    // Structural checks after a construct or the link is complete
    DataModelConstraintViolation,

    // Advisory
    ExtensionSkipped,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ExtensionSkipped => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Lower discriminant wins.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(self, Self::UnclosedBlock)
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedKeyword | Self::ExpectedTerminator | Self::ExpectedString
        )
    }

    pub fn is_syntax_error(&self) -> bool {
        *self <= Self::UnexpectedBlockClose
    }

    /// Engine-internal violations: always a bug in a handler, never user input.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, Self::StackEmpty | Self::HolderMismatch)
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedTerminator => Some("end the statement with `;` or open a block with `{`"),
            Self::ExpectedString => Some("quoted strings are joined with `+`: \"a\" + \"b\""),
            Self::UnresolvedReference => {
                Some("check the prefix against `import`/`include` statements of this module")
            }
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBlock => "missing closing `}`",

            Self::ExpectedKeyword => "expected a statement keyword",
            Self::ExpectedTerminator => "expected `;` or `{`",
            Self::ExpectedString => "expected a quoted string after `+`",

            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedBlockClose => "unexpected `}`",

            Self::UnknownStatement => "unknown statement",
            Self::UnsupportedStatement => "unsupported statement",

            Self::StackEmpty => "context stack is empty",
            Self::HolderMismatch => "context stack holder mismatch",

            Self::InvalidHolder => "statement is not allowed here",
            Self::MissingRequiredSubstatement => "missing required sub-statement",
            Self::CardinalityViolation => "sub-statement cardinality violated",
            Self::InvalidArgument => "invalid argument",

            Self::DuplicateIdentifier => "duplicate identifier",
            Self::UnresolvedReference => "unresolved reference",

            Self::DataModelConstraintViolation => "data model constraint violated",

            Self::ExtensionSkipped => "extension statement ignored",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownStatement => "unknown statement `{}`".to_string(),
            Self::UnsupportedStatement => "`{}` is not supported".to_string(),
            Self::DuplicateIdentifier => "`{}` is already defined".to_string(),
            Self::UnresolvedReference => "`{}` cannot be resolved".to_string(),
            Self::ExtensionSkipped => "extension statement `{}` ignored".to_string(),
            Self::UnclosedBlock => format!("{}; {{}}", self.fallback_message()),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where in a statement's lifecycle an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entry,
    Exit,
    Link,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Entry => "entry",
            Phase::Exit => "exit",
            Phase::Link => "link",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(source: SourceId, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            span: Span::new(source, range),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Which source file this diagnostic belongs to.
    pub(crate) source: SourceId,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    /// Line/column of the offending statement, when the analyzer knows it.
    pub(crate) position: Option<Position>,
    /// Set for semantic errors raised by the analyzer or linker.
    pub(crate) phase: Option<Phase>,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source,
            range,
            position: None,
            phase: None,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
    ) -> Self {
        Self::new(source, kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} at {}: {}", self.severity(), pos, self.message)?,
            None => write!(
                f,
                "{} at {}..{}: {}",
                self.severity(),
                u32::from(self.range.start()),
                u32::from(self.range.end()),
                self.message
            )?,
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.span.range.start()),
                u32::from(related.span.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
