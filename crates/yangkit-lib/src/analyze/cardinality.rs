//! Declarative sub-statement cardinality.
//!
//! Each statement that opens a holder lists the sub-statements whose count is
//! bounded. Sub-statements absent from a table are unbounded here; whether
//! they may appear at all is decided by their own holder check.

use super::error::{Phase, SchemaError};
use super::keyword::Keyword::{self, *};
use super::stmt::StmtCtx;
use crate::diagnostics::DiagnosticKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    /// Exactly one.
    One,
    /// Zero or one.
    MaxOne,
    /// One or more.
    NonZero,
}

use Card::*;

const META: &[(Keyword, Card)] = &[(Status, MaxOne), (Description, MaxOne), (Reference, MaxOne)];

const RESTRICTION: &[(Keyword, Card)] = &[
    (ErrorMessage, MaxOne),
    (ErrorAppTag, MaxOne),
    (Description, MaxOne),
    (Reference, MaxOne),
];

/// Bounded sub-statements of `keyword`, besides `META` where it applies.
pub fn rules(keyword: Keyword) -> &'static [(Keyword, Card)] {
    match keyword {
        Module => &[
            (YangVersion, MaxOne),
            (Namespace, One),
            (Prefix, One),
            (Organization, MaxOne),
            (Contact, MaxOne),
            (Description, MaxOne),
            (Reference, MaxOne),
        ],
        Submodule => &[
            (YangVersion, MaxOne),
            (BelongsTo, One),
            (Organization, MaxOne),
            (Contact, MaxOne),
            (Description, MaxOne),
            (Reference, MaxOne),
        ],
        Import => &[(Prefix, One), (RevisionDate, MaxOne)],
        Include => &[(RevisionDate, MaxOne)],
        Revision => &[(Description, MaxOne), (Reference, MaxOne)],
        BelongsTo => &[(Prefix, One)],
        ExtensionDef => &[(Argument, MaxOne)],
        Argument => &[(YinElement, MaxOne)],
        Identity => &[(Base, MaxOne)],
        Typedef => &[(Type, One), (Units, MaxOne), (Default, MaxOne)],
        Type => &[
            (FractionDigits, MaxOne),
            (Range, MaxOne),
            (Length, MaxOne),
            (Path, MaxOne),
            (Base, MaxOne),
            (RequireInstance, MaxOne),
        ],
        Range | Length | Pattern | Must => RESTRICTION,
        When => &[(Description, MaxOne), (Reference, MaxOne)],
        Enum => &[(Value, MaxOne)],
        Bit => &[(Position, MaxOne)],
        Container => &[(When, MaxOne), (Presence, MaxOne), (Config, MaxOne)],
        Leaf => &[
            (When, MaxOne),
            (Type, One),
            (Units, MaxOne),
            (Default, MaxOne),
            (Config, MaxOne),
            (Mandatory, MaxOne),
        ],
        LeafList => &[
            (When, MaxOne),
            (Type, One),
            (Units, MaxOne),
            (Config, MaxOne),
            (MinElements, MaxOne),
            (MaxElements, MaxOne),
            (OrderedBy, MaxOne),
        ],
        List => &[
            (When, MaxOne),
            (Key, MaxOne),
            (Config, MaxOne),
            (MinElements, MaxOne),
            (MaxElements, MaxOne),
            (OrderedBy, MaxOne),
        ],
        Choice => &[
            (When, MaxOne),
            (Default, MaxOne),
            (Config, MaxOne),
            (Mandatory, MaxOne),
        ],
        Case | Uses | Augment => &[(When, MaxOne)],
        Anyxml => &[(When, MaxOne), (Config, MaxOne), (Mandatory, MaxOne)],
        Refine => &[
            (Description, MaxOne),
            (Reference, MaxOne),
            (Config, MaxOne),
            (Mandatory, MaxOne),
            (Presence, MaxOne),
            (Default, MaxOne),
            (MinElements, MaxOne),
            (MaxElements, MaxOne),
        ],
        Rpc => &[(Input, MaxOne), (Output, MaxOne)],
        _ => &[],
    }
}

/// Statements that also take `status`, `description` and `reference` once.
fn has_meta(keyword: Keyword) -> bool {
    matches!(
        keyword,
        ExtensionDef
            | Identity
            | Feature
            | Typedef
            | Enum
            | Bit
            | Grouping
            | Container
            | Leaf
            | LeafList
            | List
            | Choice
            | Case
            | Anyxml
            | Uses
            | Augment
            | Rpc
            | Notification
    )
}

/// Families of sub-statements that exclude one another: members of one
/// family combine freely, members of two families never do.
pub fn exclusive(keyword: Keyword) -> &'static [&'static [Keyword]] {
    match keyword {
        Type => &[
            &[Range, FractionDigits],
            &[Length, Pattern],
            &[Path, RequireInstance],
            &[Base],
            &[Enum],
            &[Bit],
            &[Type],
        ],
        _ => &[],
    }
}

/// Check `stmt`'s sub-statement counts against its table.
pub fn check(stmt: &StmtCtx) -> Result<(), SchemaError> {
    let keyword = stmt.keyword();
    let meta = if has_meta(keyword) { META } else { &[] };
    for &(sub, card) in rules(keyword).iter().chain(meta) {
        check_one(stmt, sub, card)?;
    }

    let present: Vec<Keyword> = exclusive(keyword)
        .iter()
        .filter_map(|family| family.iter().copied().find(|k| stmt.has(*k)))
        .collect();
    if present.len() > 1 {
        let second = stmt.find(present[1]).unwrap_or_else(|| stmt.clone());
        return Err(SchemaError::new(
            DiagnosticKind::CardinalityViolation,
            &second,
            Phase::Entry,
            format!(
                "`{}` and `{}` cannot both appear under `{}`",
                present[0], present[1], keyword
            ),
        ));
    }
    Ok(())
}

/// Check one bound, for requirements that only hold in some contexts.
pub fn check_one(stmt: &StmtCtx, sub: Keyword, card: Card) -> Result<(), SchemaError> {
    let count = stmt.count(sub);
    match card {
        One | NonZero if count == 0 => Err(SchemaError::new(
            DiagnosticKind::MissingRequiredSubstatement,
            stmt,
            Phase::Entry,
            format!("`{}`", sub),
        )),
        One | MaxOne if count > 1 => {
            let second = stmt.find_all(sub).nth(1).unwrap_or_else(|| stmt.clone());
            Err(SchemaError::new(
                DiagnosticKind::CardinalityViolation,
                &second,
                Phase::Entry,
                format!("`{}` may appear at most once under `{}`", sub, stmt.keyword()),
            ))
        }
        _ => Ok(()),
    }
}
