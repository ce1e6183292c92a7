#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the yangkit front end.
//!
//! Three layers, none of which know about statements or trees:
//! - **Positions**: 1-based line/column pairs attached to every diagnostic
//! - **Built-in types**: the closed catalogue of YANG base types and their natural bounds
//! - **Intervals**: range/length expressions parsed into ordered, disjoint intervals
//!
//! Lexical validators for identifiers, literals and dates live in [`utils`].

pub mod builtin;
pub mod interval;
pub mod utils;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod utils_tests;

pub use builtin::BuiltinType;
pub use interval::{Bound, Interval, IntervalError, IntervalKind, Intervals};

/// Source position of a statement: 1-based line and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lifecycle state of a status statement value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Current,
    Deprecated,
    Obsolete,
}

impl Status {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "current" => Some(Self::Current),
            "deprecated" => Some(Self::Deprecated),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Deprecated => "deprecated",
            Self::Obsolete => "obsolete",
        }
    }
}

/// Order of list/leaf-list entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderedBy {
    #[default]
    System,
    User,
}

impl OrderedBy {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Upper bound of `max-elements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxElements {
    #[default]
    Unbounded,
    Bounded(u64),
}

impl MaxElements {
    /// Whether `min` does not exceed this bound.
    pub fn admits(self, min: u64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(max) => min <= max,
        }
    }
}
