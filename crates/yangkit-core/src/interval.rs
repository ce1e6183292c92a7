//! Range and length expressions.
//!
//! `"1..10 | 20 | 100..max"` parses into ascending, disjoint intervals.
//! `min`/`max` stay symbolic until [`Intervals::resolve`] binds them against
//! the value space inherited from a base type.

use std::cmp::Ordering;

/// Which statement an expression belongs to. Lengths only admit
/// non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Range,
    Length,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    #[error("empty expression part")]
    EmptyPart,

    #[error("`{0}` is not a valid bound")]
    InvalidBound(String),

    #[error("lower bound `{min}` exceeds upper bound `{max}`")]
    Inverted { min: String, max: String },

    #[error("`{0}` is not in ascending order or overlaps the previous part")]
    NotAscending(String),
}

/// One endpoint of an interval.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
    Int(i128),
    Decimal(f64),
}

impl Bound {
    fn parse(text: &str, kind: IntervalKind) -> Result<Self, IntervalError> {
        let invalid = || IntervalError::InvalidBound(text.to_string());
        match text {
            "min" => return Ok(Self::Min),
            "max" => return Ok(Self::Max),
            "" => return Err(IntervalError::EmptyPart),
            _ => {}
        }
        if kind == IntervalKind::Length {
            return crate::utils::parse_non_negative(text)
                .map(|v| Self::Int(v as i128))
                .ok_or_else(invalid);
        }
        if let Some(v) = crate::utils::parse_integer(text) {
            return Ok(Self::Int(v));
        }
        if is_decimal_literal(text) {
            return text.parse::<f64>().map(Self::Decimal).map_err(|_| invalid());
        }
        Err(invalid())
    }

    /// Total order with `min` below and `max` above every number.
    pub fn compare(&self, other: &Bound) -> Ordering {
        match (self, other) {
            (Bound::Min, Bound::Min) | (Bound::Max, Bound::Max) => Ordering::Equal,
            (Bound::Min, _) | (_, Bound::Max) => Ordering::Less,
            (_, Bound::Min) | (Bound::Max, _) => Ordering::Greater,
            (Bound::Int(a), Bound::Int(b)) => a.cmp(b),
            (a, b) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
        }
    }

    fn as_f64(&self) -> f64 {
        match *self {
            Bound::Int(v) => v as f64,
            Bound::Decimal(v) => v,
            Bound::Min => f64::NEG_INFINITY,
            Bound::Max => f64::INFINITY,
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Min => f.write_str("min"),
            Bound::Max => f.write_str("max"),
            Bound::Int(v) => write!(f, "{v}"),
            Bound::Decimal(v) => write!(f, "{v}"),
        }
    }
}

fn is_decimal_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let Some((int, frac)) = digits.split_once('.') else {
        return false;
    };
    !int.is_empty()
        && !frac.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Interval {
    pub min: Bound,
    pub max: Bound,
}

impl Interval {
    pub const fn new(min: Bound, max: Bound) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.min.compare(&other.min) != Ordering::Greater
            && self.max.compare(&other.max) != Ordering::Less
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min.compare(&self.max) == Ordering::Equal {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// Ascending, pairwise-disjoint intervals.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Intervals(Vec<Interval>);

impl Intervals {
    pub fn single(interval: Interval) -> Self {
        Self(vec![interval])
    }

    pub fn parse(expr: &str, kind: IntervalKind) -> Result<Self, IntervalError> {
        let mut parts: Vec<Interval> = Vec::new();
        for part in expr.split('|') {
            let part = part.trim();
            if part.is_empty() {
                return Err(IntervalError::EmptyPart);
            }
            let interval = match part.split_once("..") {
                Some((lo, hi)) => Interval::new(
                    Bound::parse(lo.trim(), kind)?,
                    Bound::parse(hi.trim(), kind)?,
                ),
                None => {
                    let value = Bound::parse(part, kind)?;
                    Interval::new(value, value)
                }
            };
            if interval.min.compare(&interval.max) == Ordering::Greater {
                return Err(IntervalError::Inverted {
                    min: interval.min.to_string(),
                    max: interval.max.to_string(),
                });
            }
            if let Some(prev) = parts.last()
                && prev.max.compare(&interval.min) != Ordering::Less
            {
                return Err(IntervalError::NotAscending(part.to_string()));
            }
            parts.push(interval);
        }
        Ok(Self(parts))
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    pub fn lowest(&self) -> Option<Bound> {
        self.0.first().map(|i| i.min)
    }

    pub fn highest(&self) -> Option<Bound> {
        self.0.last().map(|i| i.max)
    }

    /// Replaces symbolic `min`/`max` with the extremes of `base`.
    pub fn resolve(&self, base: &Intervals) -> Intervals {
        let bind = |b: Bound| match b {
            Bound::Min => base.lowest().unwrap_or(b),
            Bound::Max => base.highest().unwrap_or(b),
            other => other,
        };
        Intervals(
            self.0
                .iter()
                .map(|i| Interval::new(bind(i.min), bind(i.max)))
                .collect(),
        )
    }

    /// Whether every interval, once bound against `base`, lies inside one of
    /// `base`'s intervals.
    pub fn is_within(&self, base: &Intervals) -> bool {
        self.resolve(base)
            .0
            .iter()
            .all(|i| base.0.iter().any(|b| b.contains(i)))
    }
}

impl std::fmt::Display for Intervals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, interval) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{interval}")?;
        }
        Ok(())
    }
}
