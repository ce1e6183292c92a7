//! yangkit: semantic front end for YANG schema modules.
//!
//! # Example
//!
//! ```
//! use yangkit_lib::{SchemaBuilder, SourceMap};
//!
//! let source = r#"
//!     module demo {
//!       namespace "urn:demo";
//!       prefix d;
//!       container system { leaf host-name { type string; } }
//!     }
//! "#;
//!
//! let schema = SchemaBuilder::new(SourceMap::inline(source))
//!     .parse()
//!     .expect("out of fuel")
//!     .analyze()
//!     .link();
//! assert!(schema.is_valid(), "{}", schema.diagnostics().render(schema.source_map()));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod compilation;
pub mod diagnostics;
pub mod link;
pub mod parser;
pub mod schema;

#[cfg(test)]
pub mod test_utils;

pub use compilation::source_map::{SourceId, SourceKind, SourceMap};
pub use compilation::{SchemaAnalyzed, SchemaBuilder, SchemaLinked, SchemaParsed, Unit};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity, Span};

/// Errors that can occur while compiling a schema set.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("schema parsing failed with {} errors", .0.error_count())]
    SchemaParseError(Diagnostics),

    #[error("schema analysis failed with {} errors", .0.error_count())]
    SchemaAnalyzeError(Diagnostics),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
