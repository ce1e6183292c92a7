//! Indented textual dump of a schema tree.
//!
//! ```text
//! module demo
//!   container system rw
//!     leaf host-name: string rw
//! ```

use std::fmt::Write;

use super::{NodeId, NodeKind, NodeRef, SchemaTree, TypeSpec};

pub struct SchemaPrinter<'t> {
    tree: &'t SchemaTree,
    others: Vec<&'t SchemaTree>,
    with_groupings: bool,
}

impl<'t> SchemaPrinter<'t> {
    pub fn new(tree: &'t SchemaTree) -> Self {
        Self {
            tree,
            others: Vec::new(),
            with_groupings: true,
        }
    }

    /// Trees used to name link targets in other units.
    pub fn with_units(mut self, trees: impl IntoIterator<Item = &'t SchemaTree>) -> Self {
        self.others = trees.into_iter().collect();
        self
    }

    /// Include grouping and typedef bodies (default: true).
    pub fn with_groupings(mut self, value: bool) -> Self {
        self.with_groupings = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        if !self.tree.is_empty() {
            self.format_node(&mut out, self.tree.root(), 0)
                .expect("String write never fails");
        }
        out
    }

    fn format_node(&self, w: &mut String, id: NodeId, depth: usize) -> std::fmt::Result {
        let node = self.tree.node(id);
        let tag = node.tag();
        if !self.with_groupings && matches!(tag, super::NodeTag::Grouping | super::NodeTag::Typedef)
        {
            return Ok(());
        }

        write!(w, "{}{}", "  ".repeat(depth), tag)?;
        if node.name != tag.keyword() {
            write!(w, " {}", node.name)?;
        }

        match &node.kind {
            NodeKind::Leaf(d) => self.format_type(w, d.ty.as_ref())?,
            NodeKind::LeafList(d) => self.format_type(w, d.ty.as_ref())?,
            NodeKind::Typedef(d) => self.format_type(w, d.ty.as_ref())?,
            NodeKind::Enumeration(d) => {
                let members: Vec<String> = d
                    .members
                    .iter()
                    .map(|m| format!("{}={}", m.name, m.value))
                    .collect();
                write!(w, " {{{}}}", members.join(", "))?;
            }
            NodeKind::Bits(d) => {
                let members: Vec<String> = d
                    .members
                    .iter()
                    .map(|m| format!("{}@{}", m.name, m.position))
                    .collect();
                write!(w, " {{{}}}", members.join(", "))?;
            }
            NodeKind::Union(d) => {
                let members: Vec<String> = d.members.iter().map(|t| t.name.to_string()).collect();
                write!(w, " ({})", members.join(" | "))?;
            }
            _ => {}
        }

        if let Some(config) = node.kind.config() {
            w.write_str(if config.value { " rw" } else { " ro" })?;
        }

        match &node.kind {
            NodeKind::List(d) if !d.keys.is_empty() => write!(w, " key={}", d.keys.join(","))?,
            NodeKind::Container(d) if d.presence.is_some() => w.write_str(" presence")?,
            NodeKind::Uses(d) => self.format_target(w, d.target)?,
            NodeKind::Augment(d) => {
                write!(w, " {}", d.target_path)?;
                self.format_target(w, d.target)?;
            }
            NodeKind::Identity(d) => {
                if let Some(base) = &d.base {
                    write!(w, " : {}", base)?;
                    self.format_target(w, d.base_target)?;
                }
            }
            _ => {}
        }

        w.write_char('\n')?;

        for &child in &node.children {
            self.format_node(w, child, depth + 1)?;
        }
        Ok(())
    }

    fn format_type(&self, w: &mut String, ty: Option<&TypeSpec>) -> std::fmt::Result {
        let Some(ty) = ty else {
            return Ok(());
        };
        write!(w, ": {}", ty.name)?;
        if ty.is_derived()
            && let Some(effective) = &ty.effective
        {
            write!(w, " <{}>", effective.builtin)?;
        }
        if ty.path.is_some() || ty.leafref_target.is_some() {
            self.format_target(w, ty.leafref_target)?;
        }
        if ty.base.is_some() || ty.identity.is_some() {
            self.format_target(w, ty.identity)?;
        }
        Ok(())
    }

    fn format_target(&self, w: &mut String, target: Option<NodeRef>) -> std::fmt::Result {
        match target {
            Some(target) => write!(w, " -> {}", self.describe(target)),
            None => w.write_str(" -> ?"),
        }
    }

    /// `module:name` of a link target.
    fn describe(&self, target: NodeRef) -> String {
        let tree = if target.source == self.tree.source() {
            Some(self.tree)
        } else {
            self.others
                .iter()
                .copied()
                .find(|t| t.source() == target.source)
        };
        match tree.and_then(|t| Some((t.get(t.root())?, t.get(target.node)?))) {
            Some((root, node)) => format!("{}:{}", root.name, node.name),
            None => "<unknown>".to_string(),
        }
    }
}

impl SchemaTree {
    pub fn printer(&self) -> SchemaPrinter<'_> {
        SchemaPrinter::new(self)
    }
}
