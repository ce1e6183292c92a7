//! `type` statements and their restrictions.

use rowan::TextRange;
use serde::Serialize;
use yangkit_core::{BuiltinType, Intervals, Position, Status};

use super::node::QName;
use super::{NodeId, NodeRef};

/// A `range` or `length` restriction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalRestriction {
    pub intervals: Intervals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_app_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub pos: Position,
    #[serde(skip)]
    pub range: TextRange,
}

impl IntervalRestriction {
    pub fn new(intervals: Intervals, pos: Position, range: TextRange) -> Self {
        Self {
            intervals,
            error_message: None,
            error_app_tag: None,
            description: None,
            reference: None,
            pos,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRestriction {
    pub regex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_app_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl PatternRestriction {
    pub fn new(regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            error_message: None,
            error_app_tag: None,
            description: None,
            reference: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
    #[serde(skip)]
    pub explicit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "is_current")]
    pub status: Status,
    #[serde(skip)]
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitMember {
    pub name: String,
    pub position: u32,
    #[serde(skip)]
    pub explicit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "is_current")]
    pub status: Status,
    #[serde(skip)]
    pub pos: Position,
}

fn is_current(status: &Status) -> bool {
    *status == Status::Current
}

/// Built-in type at the end of a typedef chain, with every layer's
/// restrictions merged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveType {
    pub builtin: BuiltinType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Intervals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Intervals>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u8>,
    /// Typedef whose body declares enum/bit/union members, when derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_from: Option<NodeRef>,
}

/// One `type` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSpec {
    pub name: QName,
    /// Set when `name` is a built-in type; derived types start as `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin: Option<BuiltinType>,
    pub pos: Position,
    #[serde(skip)]
    pub range: TextRange,
    #[serde(rename = "range", skip_serializing_if = "Option::is_none")]
    pub value_range: Option<IntervalRestriction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<IntervalRestriction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PatternRestriction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_instance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<QName>,
    /// Enumeration, bits or union node declaring the members.
    #[serde(skip)]
    pub members: Option<NodeId>,
    /// Typedef a derived type names, bound during linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typedef: Option<NodeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leafref_target: Option<NodeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<NodeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective: Option<EffectiveType>,
}

impl TypeSpec {
    pub fn new(name: QName, pos: Position, range: TextRange) -> Self {
        let builtin = match name.prefix {
            None => BuiltinType::from_name(&name.name),
            Some(_) => None,
        };
        Self {
            name,
            builtin,
            pos,
            range,
            value_range: None,
            length: None,
            patterns: Vec::new(),
            fraction_digits: None,
            path: None,
            require_instance: None,
            base: None,
            members: None,
            typedef: None,
            leafref_target: None,
            identity: None,
            effective: None,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.builtin.is_none()
    }

    /// Built-in type once known: directly, or through the typedef chain.
    pub fn effective_builtin(&self) -> Option<BuiltinType> {
        self.builtin
            .or_else(|| self.effective.as_ref().map(|e| e.builtin))
    }
}
