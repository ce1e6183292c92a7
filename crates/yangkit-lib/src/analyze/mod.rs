//! Semantic analysis of one compilation unit.
//!
//! - Statement context and keyword classification (`stmt`, `keyword`)
//! - Context stack of open holders (`context`)
//! - Sub-statement cardinality and argument validation (`cardinality`, `validate`)
//! - Sibling name collisions (`collision`)
//! - The walk and its statement handlers (`walker`, `handlers`)

pub mod cardinality;
pub mod collision;
pub mod context;
pub mod error;
mod handlers;
pub mod keyword;
pub mod stmt;
mod utils;
pub mod validate;
pub mod walker;

#[cfg(test)]
mod cardinality_tests;
#[cfg(test)]
mod collision_tests;
#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod handlers_tests;
#[cfg(test)]
mod types_tests;
#[cfg(test)]
mod utils_tests;
#[cfg(test)]
mod validate_tests;

pub use context::{ContextStack, Frame, FrameKind};
pub use error::{Phase, SchemaError};
pub use keyword::Keyword;
pub use stmt::StmtCtx;
pub use walker::{Analysis, Descend, analyze_unit};

pub(crate) use utils::suggestion;
