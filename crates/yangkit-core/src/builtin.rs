//! Catalogue of built-in types.

use crate::interval::{Bound, Interval, Intervals};

/// Every base type a `type` statement may name without a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    String,
    Boolean,
    Enumeration,
    Bits,
    Binary,
    Leafref,
    Identityref,
    Empty,
    Union,
    InstanceIdentifier,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 19] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Decimal64,
        Self::String,
        Self::Boolean,
        Self::Enumeration,
        Self::Bits,
        Self::Binary,
        Self::Leafref,
        Self::Identityref,
        Self::Empty,
        Self::Union,
        Self::InstanceIdentifier,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Decimal64 => "decimal64",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Enumeration => "enumeration",
            Self::Bits => "bits",
            Self::Binary => "binary",
            Self::Leafref => "leafref",
            Self::Identityref => "identityref",
            Self::Empty => "empty",
            Self::Union => "union",
            Self::InstanceIdentifier => "instance-identifier",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    /// `range` applies to integers and decimal64.
    pub fn supports_range(self) -> bool {
        self.is_integer() || self == Self::Decimal64
    }

    /// `length` applies to string and binary.
    pub fn supports_length(self) -> bool {
        matches!(self, Self::String | Self::Binary)
    }

    pub fn supports_pattern(self) -> bool {
        self == Self::String
    }

    /// Types whose body declares members rather than restrictions.
    pub fn is_anonymous_container(self) -> bool {
        matches!(self, Self::Enumeration | Self::Bits | Self::Union)
    }

    /// Value space of a numeric type, or `None` for types without one.
    ///
    /// `fraction_digits` only matters for decimal64 and defaults to 1.
    pub fn natural_range(self, fraction_digits: Option<u8>) -> Option<Intervals> {
        let (min, max) = match self {
            Self::Int8 => (i8::MIN as i128, i8::MAX as i128),
            Self::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Self::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Self::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Self::Uint8 => (0, u8::MAX as i128),
            Self::Uint16 => (0, u16::MAX as i128),
            Self::Uint32 => (0, u32::MAX as i128),
            Self::Uint64 => (0, u64::MAX as i128),
            Self::Decimal64 => {
                let scale = 10f64.powi(i32::from(fraction_digits.unwrap_or(1)));
                return Some(Intervals::single(Interval::new(
                    Bound::Decimal(i64::MIN as f64 / scale),
                    Bound::Decimal(i64::MAX as f64 / scale),
                )));
            }
            _ => return None,
        };
        Some(Intervals::single(Interval::new(Bound::Int(min), Bound::Int(max))))
    }

    /// Value space of `length` for string and binary.
    pub fn natural_length(self) -> Option<Intervals> {
        self.supports_length().then(|| {
            Intervals::single(Interval::new(Bound::Int(0), Bound::Int(u64::MAX as i128)))
        })
    }
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
