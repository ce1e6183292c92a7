//! Leafref paths and schema node identifiers.

use crate::schema::QName;

/// `/p:a/p:b` or `../../a/b`, predicates dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafrefPath {
    pub absolute: bool,
    /// Number of leading `..` steps of a relative path.
    pub up: usize,
    pub steps: Vec<QName>,
}

/// `/p:a/p:b` (absolute) or `a/b` (descendant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNodeId {
    pub absolute: bool,
    pub steps: Vec<QName>,
}

pub fn parse_leafref_path(text: &str) -> Result<LeafrefPath, String> {
    if text.contains("deref(") {
        return Err("`deref()` paths are not supported".to_string());
    }
    let stripped = strip_predicates(text)?;
    let trimmed = stripped.trim();

    if let Some(rest) = trimmed.strip_prefix('/') {
        return Ok(LeafrefPath {
            absolute: true,
            up: 0,
            steps: parse_steps(rest, text)?,
        });
    }

    let mut rest = trimmed;
    let mut up = 0;
    while let Some(r) = rest.strip_prefix("../") {
        up += 1;
        rest = r.trim_start();
    }
    if up == 0 {
        return Err(format!("`{text}` is neither absolute nor starts with `../`"));
    }
    Ok(LeafrefPath {
        absolute: false,
        up,
        steps: parse_steps(rest, text)?,
    })
}

pub fn parse_schema_node_id(text: &str) -> Result<SchemaNodeId, String> {
    let trimmed = text.trim();
    match trimmed.strip_prefix('/') {
        Some(rest) => Ok(SchemaNodeId {
            absolute: true,
            steps: parse_steps(rest, text)?,
        }),
        None => Ok(SchemaNodeId {
            absolute: false,
            steps: parse_steps(trimmed, text)?,
        }),
    }
}

fn parse_steps(rest: &str, whole: &str) -> Result<Vec<QName>, String> {
    rest.split('/')
        .map(|step| {
            QName::parse(step.trim())
                .ok_or_else(|| format!("`{}` is not a valid step in `{}`", step.trim(), whole))
        })
        .collect()
}

/// Removes `[...]` predicates; brackets must balance.
fn strip_predicates(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced `]` in `{text}`"))?;
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced `[` in `{text}`"));
    }
    Ok(out)
}
