//! Positioned argument validators.
//!
//! Thin wrappers over `yangkit_core::utils` that turn a rejected argument into
//! an `InvalidArgument` error at the statement's position.

use yangkit_core::utils::{
    is_date, is_identifier, is_uri, parse_boolean, parse_integer, parse_non_negative,
    split_identifiers,
};
use yangkit_core::{IntervalKind, Intervals, MaxElements, OrderedBy, Status};

use super::error::{Phase, SchemaError};
use super::stmt::StmtCtx;
use crate::diagnostics::DiagnosticKind;
use crate::link::path::{LeafrefPath, SchemaNodeId, parse_leafref_path, parse_schema_node_id};
use crate::schema::QName;

fn invalid(stmt: &StmtCtx, detail: impl Into<String>) -> SchemaError {
    SchemaError::new(DiagnosticKind::InvalidArgument, stmt, Phase::Entry, detail)
}

pub fn argument<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    stmt.arg()
        .ok_or_else(|| invalid(stmt, format!("`{}` requires an argument", stmt.keyword())))
}

pub fn no_argument(stmt: &StmtCtx) -> Result<(), SchemaError> {
    match stmt.arg() {
        None => Ok(()),
        Some(arg) => Err(invalid(
            stmt,
            format!("`{}` takes no argument, found `{}`", stmt.keyword(), arg),
        )),
    }
}

pub fn identifier<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    let arg = argument(stmt)?;
    if is_identifier(arg) {
        Ok(arg)
    } else {
        Err(invalid(stmt, format!("`{arg}` is not a valid identifier")))
    }
}

pub fn identifier_ref(stmt: &StmtCtx) -> Result<QName, SchemaError> {
    let arg = argument(stmt)?;
    QName::parse(arg)
        .ok_or_else(|| invalid(stmt, format!("`{arg}` is not a valid identifier reference")))
}

pub fn boolean(stmt: &StmtCtx) -> Result<bool, SchemaError> {
    let arg = argument(stmt)?;
    parse_boolean(arg).ok_or_else(|| invalid(stmt, format!("`{arg}` is not `true` or `false`")))
}

pub fn non_negative(stmt: &StmtCtx) -> Result<u64, SchemaError> {
    let arg = argument(stmt)?;
    parse_non_negative(arg)
        .ok_or_else(|| invalid(stmt, format!("`{arg}` is not a non-negative integer")))
}

pub fn integer(stmt: &StmtCtx) -> Result<i128, SchemaError> {
    let arg = argument(stmt)?;
    parse_integer(arg).ok_or_else(|| invalid(stmt, format!("`{arg}` is not an integer")))
}

pub fn date<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    let arg = argument(stmt)?;
    if is_date(arg) {
        Ok(arg)
    } else {
        Err(invalid(stmt, format!("`{arg}` is not a valid YYYY-MM-DD date")))
    }
}

pub fn uri<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    let arg = argument(stmt)?;
    if is_uri(arg) {
        Ok(arg)
    } else {
        Err(invalid(stmt, format!("`{arg}` is not a valid URI")))
    }
}

pub fn status(stmt: &StmtCtx) -> Result<Status, SchemaError> {
    let arg = argument(stmt)?;
    Status::from_keyword(arg).ok_or_else(|| {
        invalid(
            stmt,
            format!("`{arg}` is not `current`, `deprecated` or `obsolete`"),
        )
    })
}

pub fn ordered_by(stmt: &StmtCtx) -> Result<OrderedBy, SchemaError> {
    let arg = argument(stmt)?;
    OrderedBy::from_keyword(arg)
        .ok_or_else(|| invalid(stmt, format!("`{arg}` is not `system` or `user`")))
}

/// `unbounded` or a positive integer.
pub fn max_elements(stmt: &StmtCtx) -> Result<MaxElements, SchemaError> {
    let arg = argument(stmt)?;
    if arg == "unbounded" {
        return Ok(MaxElements::Unbounded);
    }
    match parse_non_negative(arg) {
        Some(n) if n > 0 => Ok(MaxElements::Bounded(n)),
        _ => Err(invalid(
            stmt,
            format!("`{arg}` is not `unbounded` or a positive integer"),
        )),
    }
}

pub fn yang_version<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    let arg = argument(stmt)?;
    match arg {
        "1" | "1.1" => Ok(arg),
        _ => Err(invalid(stmt, format!("unsupported YANG version `{arg}`"))),
    }
}

/// 1 to 18 inclusive.
pub fn fraction_digits(stmt: &StmtCtx) -> Result<u8, SchemaError> {
    match non_negative(stmt)? {
        n @ 1..=18 => Ok(n as u8),
        n => Err(invalid(stmt, format!("`{n}` is outside 1..18"))),
    }
}

pub fn intervals(stmt: &StmtCtx, kind: IntervalKind) -> Result<Intervals, SchemaError> {
    let arg = argument(stmt)?;
    Intervals::parse(arg, kind).map_err(|e| invalid(stmt, e.to_string()))
}

pub fn pattern<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    let arg = argument(stmt)?;
    regex_syntax::Parser::new()
        .parse(arg)
        .map(|_| arg)
        .map_err(|e| invalid(stmt, format!("invalid regular expression: {}", first_line(&e))))
}

fn first_line(err: &regex_syntax::Error) -> String {
    let text = err.to_string();
    text.lines()
        .rev()
        .find(|l| l.starts_with("error:"))
        .map_or(text.clone(), |l| l.trim_start_matches("error:").trim().to_string())
}

pub fn leafref_path(stmt: &StmtCtx) -> Result<LeafrefPath, SchemaError> {
    let arg = argument(stmt)?;
    parse_leafref_path(arg).map_err(|e| invalid(stmt, e))
}

pub fn schema_node_id(stmt: &StmtCtx, absolute: bool) -> Result<SchemaNodeId, SchemaError> {
    let arg = argument(stmt)?;
    let id = parse_schema_node_id(arg).map_err(|e| invalid(stmt, e))?;
    if id.absolute != absolute {
        let expected = if absolute { "absolute" } else { "descendant" };
        return Err(invalid(
            stmt,
            format!("`{arg}` must be an {expected} schema node identifier"),
        ));
    }
    Ok(id)
}

/// Space-separated identifiers, each unique.
pub fn key_list(stmt: &StmtCtx) -> Result<Vec<String>, SchemaError> {
    let arg = argument(stmt)?;
    let mut keys: Vec<String> = Vec::new();
    for key in split_identifiers(arg) {
        if QName::parse(key).is_none() {
            return Err(invalid(stmt, format!("`{key}` is not a valid key name")));
        }
        let local = key.rsplit(':').next().unwrap_or(key);
        if keys.iter().any(|k| k == local) {
            return Err(invalid(stmt, format!("key `{local}` is listed twice")));
        }
        keys.push(local.to_string());
    }
    if keys.is_empty() {
        return Err(invalid(stmt, "empty key list"));
    }
    Ok(keys)
}

/// Space-separated descendant schema node identifiers.
pub fn unique_list(stmt: &StmtCtx) -> Result<Vec<String>, SchemaError> {
    let arg = argument(stmt)?;
    let mut out = Vec::new();
    for part in split_identifiers(arg) {
        let id = parse_schema_node_id(part).map_err(|e| invalid(stmt, e))?;
        if id.absolute {
            return Err(invalid(stmt, format!("`{part}` must be a descendant path")));
        }
        out.push(part.to_string());
    }
    if out.is_empty() {
        return Err(invalid(stmt, "empty unique list"));
    }
    Ok(out)
}

/// Enum names are arbitrary strings without surrounding whitespace.
pub fn enum_name<'s>(stmt: &'s StmtCtx) -> Result<&'s str, SchemaError> {
    let arg = argument(stmt)?;
    if arg.is_empty() || arg.trim() != arg {
        return Err(invalid(
            stmt,
            format!("`{arg}` is empty or has surrounding whitespace"),
        ));
    }
    Ok(arg)
}
