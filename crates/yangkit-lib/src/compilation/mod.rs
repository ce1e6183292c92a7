//! Compilation pipeline over a set of sources.
//!
//! [`SchemaBuilder::parse`] → [`SchemaParsed::analyze`] → [`SchemaAnalyzed::link`].
//! Each stage owns the previous one and derefs to it, so diagnostics and
//! the source map stay reachable from the final [`SchemaLinked`].

pub mod source_map;

#[cfg(test)]
mod source_map_tests;

use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use tracing::{debug, info};

use self::source_map::{SourceId, SourceMap};
use crate::Diagnostics;
use crate::analyze::analyze_unit;
use crate::link::{self, LinkPhase, LinkUnit, ResolutionQueue};
use crate::parser::{Parser, Root, lex};
use crate::schema::{NodeId, NodeTag, SchemaTree};

const DEFAULT_PARSE_FUEL: u32 = 1_000_000;
const DEFAULT_PARSE_MAX_DEPTH: u32 = 4096;

pub type AstMap = IndexMap<SourceId, Root>;

pub struct CompileConfig {
    pub parse_fuel: u32,
    pub parse_max_depth: u32,
}

pub struct SchemaBuilder {
    source_map: SourceMap,
    config: CompileConfig,
}

impl SchemaBuilder {
    pub fn new(source_map: SourceMap) -> Self {
        let config = CompileConfig {
            parse_fuel: DEFAULT_PARSE_FUEL,
            parse_max_depth: DEFAULT_PARSE_MAX_DEPTH,
        };

        Self { source_map, config }
    }

    pub fn inline(src: &str) -> Self {
        Self::new(SourceMap::inline(src))
    }

    pub fn with_parse_fuel(mut self, fuel: u32) -> Self {
        self.config.parse_fuel = fuel;
        self
    }

    pub fn with_parse_recursion_limit(mut self, limit: u32) -> Self {
        self.config.parse_max_depth = limit;
        self
    }

    /// Parses every source. Syntax errors are collected; only fuel
    /// exhaustion aborts.
    pub fn parse(self) -> crate::Result<SchemaParsed> {
        let mut ast = IndexMap::new();
        let mut diag = Diagnostics::new();
        let mut total_fuel_consumed = 0u32;

        for source in self.source_map.iter() {
            let tokens = lex(source.content);
            let res = Parser::new(source.content, source.id, tokens)
                .with_exec_fuel(Some(self.config.parse_fuel))
                .with_recursion_fuel(Some(self.config.parse_max_depth))
                .parse()?;

            debug!(
                source = source.kind.display_name(),
                errors = res.diagnostics.error_count(),
                "parsed"
            );
            diag.extend(res.diagnostics);
            total_fuel_consumed = total_fuel_consumed.saturating_add(res.exec_fuel_consumed);
            ast.insert(source.id, res.root);
        }

        Ok(SchemaParsed {
            source_map: self.source_map,
            ast_map: ast,
            diag,
            fuel_consumed: total_fuel_consumed,
        })
    }
}

#[derive(Debug)]
pub struct SchemaParsed {
    source_map: SourceMap,
    ast_map: AstMap,
    diag: Diagnostics,
    fuel_consumed: u32,
}

impl SchemaParsed {
    pub fn parse_fuel_consumed(&self) -> u32 {
        self.fuel_consumed
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn asts(&self) -> &AstMap {
        &self.ast_map
    }

    /// Analyzes every source that parsed cleanly, each as its own unit,
    /// and links what each unit can resolve on its own.
    pub fn analyze(mut self) -> SchemaAnalyzed {
        let mut units = IndexMap::new();
        for (&id, root) in &self.ast_map {
            if self.diag.has_errors_in(id) {
                debug!(source = ?id, "skipping analysis: syntax errors");
                continue;
            }
            let analysis = analyze_unit(root, id, &self.source_map);
            self.diag.extend(analysis.diagnostics);
            units.insert(
                id,
                Unit {
                    source: id,
                    tree: analysis.tree,
                    queue: analysis.queue,
                    deferred_keys: analysis.deferred_keys,
                    failed: analysis.failed,
                },
            );
        }

        SchemaAnalyzed {
            parsed: self,
            units,
        }
    }
}

/// One analyzed source: a module or submodule.
#[derive(Debug)]
pub struct Unit {
    pub source: SourceId,
    pub tree: SchemaTree,
    pub queue: ResolutionQueue,
    pub deferred_keys: Vec<NodeId>,
    /// Analysis aborted, or the unit repeats another module's revision.
    pub failed: bool,
}

impl Unit {
    pub fn name(&self) -> Option<&str> {
        self.tree.get(NodeId::ROOT).map(|n| n.name.as_str())
    }

    pub fn revision(&self) -> Option<&str> {
        self.tree.module().and_then(|m| m.revision())
    }

    pub fn is_submodule(&self) -> bool {
        self.tree
            .get(NodeId::ROOT)
            .is_some_and(|n| n.tag() == NodeTag::SubModule)
    }
}

pub struct SchemaAnalyzed {
    parsed: SchemaParsed,
    units: IndexMap<SourceId, Unit>,
}

impl SchemaAnalyzed {
    pub fn is_valid(&self) -> bool {
        !self.diag.has_errors()
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit(&self, id: SourceId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Binds imports and includes across the set, resolves what is still
    /// pending, and reports what never resolved.
    pub fn link(self) -> SchemaLinked {
        let SchemaAnalyzed {
            mut parsed,
            mut units,
        } = self;

        let unusable: Vec<SourceId> = {
            let mut link_units: Vec<LinkUnit<'_>> = units
                .values_mut()
                .map(|u| {
                    LinkUnit::new(&mut u.tree, &mut u.queue)
                        .usable(!u.failed)
                        .with_deferred_keys(&u.deferred_keys)
                })
                .collect();

            link::bind_sources(&mut link_units, &mut parsed.diag);
            link::resolve_units(&mut link_units, LinkPhase::InterFile);
            link::report_unresolved(&link_units, &mut parsed.diag);

            link_units
                .iter()
                .filter(|u| !u.usable)
                .map(|u| u.source)
                .collect()
        };
        for id in unusable {
            if let Some(unit) = units.get_mut(&id) {
                unit.failed = true;
            }
        }

        info!(
            units = units.len(),
            errors = parsed.diag.error_count(),
            warnings = parsed.diag.warning_count(),
            "compiled"
        );
        SchemaLinked {
            analyzed: SchemaAnalyzed { parsed, units },
        }
    }
}

impl Deref for SchemaAnalyzed {
    type Target = SchemaParsed;

    fn deref(&self) -> &Self::Target {
        &self.parsed
    }
}

impl DerefMut for SchemaAnalyzed {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.parsed
    }
}

/// The compiled schema set.
pub struct SchemaLinked {
    analyzed: SchemaAnalyzed,
}

impl SchemaLinked {
    /// Unit by module or submodule name, newest revision first.
    pub fn unit_by_name(&self, name: &str) -> Option<&Unit> {
        self.units()
            .filter(|u| u.name() == Some(name))
            .max_by(|a, b| a.revision().cmp(&b.revision()))
    }

    /// Turns a set with errors into an [`Error`](crate::Error). Warnings
    /// alone keep the set valid.
    pub fn into_result(self) -> crate::Result<Self> {
        let diag = self.diagnostics();
        if diag.kinds().iter().any(|k| k.is_syntax_error()) {
            return Err(crate::Error::SchemaParseError(diag.clone()));
        }
        if diag.has_errors() {
            return Err(crate::Error::SchemaAnalyzeError(diag.clone()));
        }
        Ok(self)
    }
}

impl Deref for SchemaLinked {
    type Target = SchemaAnalyzed;

    fn deref(&self) -> &Self::Target {
        &self.analyzed
    }
}

impl DerefMut for SchemaLinked {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.analyzed
    }
}
