//! Typedef chains and effective types.

use yangkit_core::{BuiltinType, Intervals};

use super::lookup::{Lookup, Miss, Resolver};
use crate::schema::{EffectiveType, NodeRef, NodeTag, TypeSpec};

/// What a derived `type` resolves to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Derivation {
    /// Typedef the `type` statement names.
    pub typedef: NodeRef,
    pub effective: EffectiveType,
    /// Identity named by an identityref `base` at the end of the chain.
    pub identity: Option<NodeRef>,
    /// Leafref path at the end of the chain, evaluated at the consumer.
    pub leafref: Option<String>,
}

impl Resolver<'_> {
    /// Follows the typedef chain of `spec` down to its built-in type and
    /// merges every layer's restrictions into the effective type.
    ///
    /// Each typedef is looked up from where it is defined, so a chain may
    /// cross module boundaries.
    pub(crate) fn derive(&self, consumer: NodeRef, spec: &TypeSpec) -> Lookup<Derivation> {
        let first = self.lexical(consumer, &spec.name, NodeTag::Typedef)?;
        let mut chain = vec![first];
        let mut layers = vec![spec];
        let mut current = first;
        let builtin = loop {
            let Some(ty) = self.node(current).kind.type_spec() else {
                return Err(Miss::NotFound);
            };
            layers.push(ty);
            if let Some(builtin) = ty.builtin {
                break builtin;
            }
            current = self.lexical(current, &ty.name, NodeTag::Typedef)?;
            if chain.contains(&current) {
                let names: Vec<&str> = chain.iter().map(|&t| self.node(t).name.as_str()).collect();
                return Err(Miss::Failed(format!(
                    "typedef chain `{} -> {}` is circular",
                    names.join(" -> "),
                    self.node(current).name
                )));
            }
            chain.push(current);
        };

        let base = layers[layers.len() - 1];
        let mut effective = merge(builtin, &layers)?;
        if builtin.is_anonymous_container() {
            effective.members_from = Some(current);
        }

        let identity = match (&base.base, builtin) {
            (Some(name), BuiltinType::Identityref) => {
                Some(self.top_level(current, name, NodeTag::Identity)?)
            }
            _ => None,
        };
        let leafref = match builtin {
            BuiltinType::Leafref => base.path.clone(),
            _ => None,
        };

        Ok(Derivation {
            typedef: first,
            effective,
            identity,
            leafref,
        })
    }
}

/// Merges restrictions from the built-in end of the chain outward: every
/// layer must stay within what it inherits.
fn merge(builtin: BuiltinType, layers: &[&TypeSpec]) -> Lookup<EffectiveType> {
    let fraction_digits = layers.last().and_then(|l| l.fraction_digits);
    let mut range = builtin.natural_range(fraction_digits);
    let mut length = builtin.natural_length();
    let mut range_restricted = false;
    let mut length_restricted = false;
    let mut patterns = Vec::new();

    for layer in layers.iter().rev() {
        if let Some(r) = &layer.value_range {
            range = Some(narrow("range", builtin, &r.intervals, range.as_ref())?);
            range_restricted = true;
        }
        if let Some(l) = &layer.length {
            length = Some(narrow("length", builtin, &l.intervals, length.as_ref())?);
            length_restricted = true;
        }
        if !layer.patterns.is_empty() {
            if !builtin.supports_pattern() {
                return Err(inapplicable("pattern", builtin));
            }
            patterns.extend(layer.patterns.iter().map(|p| p.regex.clone()));
        }
    }

    Ok(EffectiveType {
        builtin,
        range: range.filter(|_| range_restricted),
        length: length.filter(|_| length_restricted),
        patterns,
        fraction_digits,
        members_from: None,
    })
}

fn narrow(
    keyword: &str,
    builtin: BuiltinType,
    restriction: &Intervals,
    inherited: Option<&Intervals>,
) -> Lookup<Intervals> {
    let Some(inherited) = inherited else {
        return Err(inapplicable(keyword, builtin));
    };
    if !restriction.is_within(inherited) {
        return Err(Miss::Failed(format!(
            "{keyword} `{restriction}` is not within the inherited `{inherited}`"
        )));
    }
    Ok(restriction.resolve(inherited))
}

fn inapplicable(keyword: &str, builtin: BuiltinType) -> Miss {
    Miss::Failed(format!("`{keyword}` does not apply to `{builtin}`"))
}
