//! `typedef`, `type` and everything a type body may hold.
//!
//! `type enumeration`, `type bits` and `type union` open an anonymous node
//! under their holder so members have somewhere to live. The node is named
//! after the enclosing leaf, leaf-list, typedef or union: `speed_enum`,
//! `addr_union`, and inside a union `addr_union_enum2` where the digit is the
//! member's 1-based index.

use yangkit_core::{BuiltinType, IntervalKind};

use super::super::cardinality::{self, Card};
use super::super::collision::{self, Category};
use super::super::context::{Frame, FrameKind};
use super::super::error::{Phase, SchemaError};
use super::super::keyword::Keyword;
use super::super::stmt::StmtCtx;
use super::super::validate;
use super::super::walker::{Descend, Walker};
use crate::diagnostics::DiagnosticKind;
use crate::link::{ResolvableKind, TypeSlot};
use crate::schema::{
    BitMember, BitsData, EnumMember, EnumerationData, IntervalRestriction, NodeId, NodeKind,
    NodeTag, PatternRestriction, SchemaNode, TypeSpec, TypedefData, UnionData,
};

fn violation(ctx: &StmtCtx, detail: impl Into<String>) -> SchemaError {
    SchemaError::new(
        DiagnosticKind::DataModelConstraintViolation,
        ctx,
        Phase::Exit,
        detail,
    )
}

impl Walker<'_> {
    pub(super) fn enter_typedef(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        if BuiltinType::from_name(&name).is_some() {
            return Err(SchemaError::new(
                DiagnosticKind::InvalidArgument,
                ctx,
                Phase::Entry,
                format!("`{name}` is a built-in type name"),
            ));
        }
        cardinality::check(ctx)?;
        let parent = self.node_holder(ctx, |tag| {
            matches!(
                tag,
                NodeTag::Module
                    | NodeTag::SubModule
                    | NodeTag::Container
                    | NodeTag::List
                    | NodeTag::Grouping
                    | NodeTag::Rpc
                    | NodeTag::Input
                    | NodeTag::Output
                    | NodeTag::Notification
            )
        })?;
        collision::check_sibling(&self.tree, parent, ctx, &name, Category::Typedef)?;
        self.open_node(
            ctx,
            parent,
            NodeKind::Typedef(TypedefData {
                ty: None,
                units: None,
                default: None,
            }),
            &name,
        );
        Ok(Descend::Children)
    }

    pub(super) fn exit_typedef(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let id = self.close_node(ctx)?;
        let node = self.tree.node(id);
        let own_prefix = self.tree.own_prefix();
        if let Some(ty) = node.kind.type_spec()
            && ty.name.name == node.name
            && (ty.name.prefix.is_none() || ty.name.prefix.as_deref() == own_prefix)
        {
            return Err(violation(
                ctx,
                format!("typedef `{}` is derived from itself", node.name),
            ));
        }
        Ok(())
    }

    pub(super) fn enter_type(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier_ref(ctx)?;
        cardinality::check(ctx)?;
        let holder = self.node_holder(ctx, |tag| {
            matches!(
                tag,
                NodeTag::Leaf | NodeTag::LeafList | NodeTag::Typedef | NodeTag::Union
            )
        })?;

        let mut spec = TypeSpec::new(name, ctx.pos(), ctx.range());
        let members = match spec.builtin {
            Some(BuiltinType::Enumeration) => Some(NodeKind::Enumeration(EnumerationData::default())),
            Some(BuiltinType::Bits) => Some(NodeKind::Bits(BitsData::default())),
            Some(BuiltinType::Union) => Some(NodeKind::Union(UnionData::default())),
            _ => None,
        };

        match members {
            Some(kind) => {
                let name = self.anonymous_name(holder, kind.tag());
                let node = SchemaNode::new(kind, name, ctx.pos(), ctx.range());
                let id = self.tree.add_child(holder, node);
                spec.members = Some(id);
                self.stack.push(Frame::Type(Box::new(spec)));
                self.stack.push(Frame::Node(id));
            }
            None => self.stack.push(Frame::Type(Box::new(spec))),
        }
        Ok(Descend::Children)
    }

    fn anonymous_name(&self, holder: NodeId, tag: NodeTag) -> String {
        let suffix = match tag {
            NodeTag::Enumeration => "_enum",
            NodeTag::Bits => "_bits",
            _ => "_union",
        };
        let node = self.tree.node(holder);
        match &node.kind {
            NodeKind::Union(u) => format!("{}{}{}", node.name, suffix, u.members.len() + 1),
            _ => format!("{}{}", node.name, suffix),
        }
    }

    pub(super) fn exit_type(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        if let Some(id) = self.stack.peek(ctx, Phase::Exit)?.as_node()
            && self.tree.node(id).tag().is_anonymous_type()
        {
            self.stack.pop_node(ctx, id)?;
        }
        let Frame::Type(spec) = self.stack.pop(ctx, FrameKind::Type)? else {
            unreachable!("pop checked the frame kind");
        };
        let spec = *spec;
        self.check_type_body(ctx, &spec)?;

        let holder = self
            .stack
            .peek(ctx, Phase::Exit)?
            .as_node()
            .ok_or_else(|| self.invalid_holder(ctx))?;
        let slot = match &mut self.tree.node_mut(holder).kind {
            NodeKind::Leaf(d) => {
                d.ty = Some(spec.clone());
                Some(TypeSlot::of(holder))
            }
            NodeKind::LeafList(d) => {
                d.ty = Some(spec.clone());
                Some(TypeSlot::of(holder))
            }
            NodeKind::Typedef(d) => {
                d.ty = Some(spec.clone());
                Some(TypeSlot::of(holder))
            }
            NodeKind::Union(u) => {
                u.members.push(spec.clone());
                Some(TypeSlot::member(holder, u.members.len() - 1))
            }
            _ => None,
        };
        let Some(slot) = slot else {
            return Err(self.invalid_holder(ctx));
        };

        if self.in_template(holder) {
            return Ok(());
        }
        match spec.builtin {
            None => {
                let reference = spec.name.to_string();
                self.enqueue(ctx, ResolvableKind::DerivedType(slot), &reference, holder);
            }
            Some(BuiltinType::Leafref) => {
                let in_grouping = self.tree.is_within(holder, NodeTag::Grouping);
                if let Some(path) = &spec.path
                    && !(in_grouping && !path.trim_start().starts_with('/'))
                {
                    self.enqueue(ctx, ResolvableKind::Leafref(slot), path, holder);
                }
            }
            Some(BuiltinType::Identityref) => {
                if let Some(base) = &spec.base {
                    let reference = base.to_string();
                    self.enqueue(ctx, ResolvableKind::IdentityRef(slot), &reference, holder);
                }
            }
            Some(_) => {}
        }
        Ok(())
    }

    /// Requirements that depend on the built-in type named.
    fn check_type_body(&self, ctx: &StmtCtx, spec: &TypeSpec) -> Result<(), SchemaError> {
        let Some(builtin) = spec.builtin else {
            return Ok(());
        };
        let required = match builtin {
            BuiltinType::Enumeration => Some(Keyword::Enum),
            BuiltinType::Bits => Some(Keyword::Bit),
            BuiltinType::Union => Some(Keyword::Type),
            BuiltinType::Leafref => Some(Keyword::Path),
            BuiltinType::Identityref => Some(Keyword::Base),
            BuiltinType::Decimal64 => Some(Keyword::FractionDigits),
            _ => None,
        };
        if let Some(sub) = required {
            cardinality::check_one(ctx, sub, Card::NonZero)?;
        }

        if let Some(range) = &spec.value_range
            && let Some(natural) = builtin.natural_range(spec.fraction_digits)
            && !range.intervals.is_within(&natural)
        {
            return Err(out_of_bounds("range", range, builtin));
        }
        if let Some(length) = &spec.length
            && let Some(natural) = builtin.natural_length()
            && !length.intervals.is_within(&natural)
        {
            return Err(out_of_bounds("length", length, builtin));
        }
        Ok(())
    }

    /// The type frame under the top, for statements of a type body.
    fn type_holder(&mut self, ctx: &StmtCtx) -> Result<&mut TypeSpec, SchemaError> {
        if !matches!(self.stack.peek(ctx, Phase::Entry)?, Frame::Type(_)) {
            return Err(self.invalid_holder(ctx));
        }
        match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Type(spec) => Ok(spec.as_mut()),
            _ => unreachable!("checked above"),
        }
    }

    /// Rejects a restriction the named built-in type cannot take.
    fn require_builtin(
        &mut self,
        ctx: &StmtCtx,
        applies: impl Fn(BuiltinType) -> bool,
        allow_derived: bool,
    ) -> Result<(), SchemaError> {
        let builtin = self.type_holder(ctx)?.builtin;
        let ok = match builtin {
            Some(b) => applies(b),
            None => allow_derived,
        };
        if ok {
            Ok(())
        } else {
            Err(self.invalid_holder(ctx))
        }
    }

    /// `range` and `length`.
    pub(super) fn enter_interval(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let is_range = ctx.keyword() == Keyword::Range;
        let kind = if is_range {
            IntervalKind::Range
        } else {
            IntervalKind::Length
        };
        let intervals = validate::intervals(ctx, kind)?;
        cardinality::check(ctx)?;
        if is_range {
            self.require_builtin(ctx, BuiltinType::supports_range, true)?;
        } else {
            self.require_builtin(ctx, BuiltinType::supports_length, true)?;
        }

        let restriction = IntervalRestriction::new(intervals, ctx.pos(), ctx.range());
        self.stack.push(if is_range {
            Frame::Range(restriction)
        } else {
            Frame::Length(restriction)
        });
        Ok(Descend::Children)
    }

    pub(super) fn exit_interval(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let frame = match ctx.keyword() {
            Keyword::Range => self.stack.pop(ctx, FrameKind::Range)?,
            _ => self.stack.pop(ctx, FrameKind::Length)?,
        };
        let spec = self.type_holder(ctx)?;
        match frame {
            Frame::Range(r) => spec.value_range = Some(r),
            Frame::Length(r) => spec.length = Some(r),
            _ => unreachable!("pop checked the frame kind"),
        }
        Ok(())
    }

    pub(super) fn enter_pattern(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let regex = validate::pattern(ctx)?.to_string();
        cardinality::check(ctx)?;
        self.require_builtin(ctx, BuiltinType::supports_pattern, true)?;
        self.stack.push(Frame::Pattern(PatternRestriction::new(regex)));
        Ok(Descend::Children)
    }

    pub(super) fn exit_pattern(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Pattern(pattern) = self.stack.pop(ctx, FrameKind::Pattern)? else {
            unreachable!("pop checked the frame kind");
        };
        self.type_holder(ctx)?.patterns.push(pattern);
        Ok(())
    }

    pub(super) fn enter_fraction_digits(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let digits = validate::fraction_digits(ctx)?;
        self.require_builtin(ctx, |b| b == BuiltinType::Decimal64, false)?;
        self.type_holder(ctx)?.fraction_digits = Some(digits);
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_path(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        validate::leafref_path(ctx)?;
        let path = validate::argument(ctx)?.to_string();
        self.require_builtin(ctx, |b| b == BuiltinType::Leafref, false)?;
        self.type_holder(ctx)?.path = Some(path);
        Ok(Descend::Leaf)
    }

    pub(super) fn enter_require_instance(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let value = validate::boolean(ctx)?;
        self.require_builtin(
            ctx,
            |b| matches!(b, BuiltinType::Leafref | BuiltinType::InstanceIdentifier),
            false,
        )?;
        self.type_holder(ctx)?.require_instance = Some(value);
        Ok(Descend::Leaf)
    }

    /// `base` of an identity, or of an identityref type.
    pub(super) fn enter_base(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let base = validate::identifier_ref(ctx)?;
        let identity = match self.stack.peek(ctx, Phase::Entry)? {
            Frame::Node(id) if self.tree.node(*id).tag() == NodeTag::Identity => Some(*id),
            Frame::Type(_) => None,
            _ => return Err(self.invalid_holder(ctx)),
        };

        match identity {
            Some(id) => {
                let reference = base.to_string();
                if let NodeKind::Identity(d) = &mut self.tree.node_mut(id).kind {
                    d.base = Some(base);
                }
                self.enqueue(ctx, ResolvableKind::Base, &reference, id);
            }
            None => {
                self.require_builtin(ctx, |b| b == BuiltinType::Identityref, false)?;
                self.type_holder(ctx)?.base = Some(base);
            }
        }
        Ok(Descend::Leaf)
    }

    fn members_holder(&self, ctx: &StmtCtx, tag: NodeTag) -> Result<NodeId, SchemaError> {
        self.node_holder(ctx, |t| t == tag)
    }

    pub(super) fn enter_enum(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::enum_name(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = self.members_holder(ctx, NodeTag::Enumeration)?;
        collision::check_sibling(&self.tree, parent, ctx, &name, Category::EnumMember)?;
        self.stack.push(Frame::Enum(EnumMember {
            name,
            value: 0,
            explicit: false,
            description: None,
            reference: None,
            status: Default::default(),
            pos: ctx.pos(),
        }));
        Ok(Descend::Children)
    }

    pub(super) fn enter_value(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let value = validate::integer(ctx)?;
        let value = i32::try_from(value).map_err(|_| {
            SchemaError::new(
                DiagnosticKind::DataModelConstraintViolation,
                ctx,
                Phase::Entry,
                format!("enum value {value} is outside the 32-bit signed range"),
            )
        })?;
        match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Enum(member) => {
                member.value = value;
                member.explicit = true;
            }
            _ => return Err(self.invalid_holder(ctx)),
        }
        Ok(Descend::Leaf)
    }

    /// Numbers the member: an explicit value must exceed every value so
    /// far; an implicit one is the current maximum plus one.
    pub(super) fn exit_enum(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Enum(mut member) = self.stack.pop(ctx, FrameKind::Enum)? else {
            unreachable!("pop checked the frame kind");
        };
        let parent = self.members_holder(ctx, NodeTag::Enumeration)?;
        let NodeKind::Enumeration(data) = &mut self.tree.node_mut(parent).kind else {
            return Ok(());
        };

        let max = data.members.iter().map(|m| m.value).max();
        if member.explicit {
            if let Some(other) = data.members.iter().find(|m| m.value == member.value) {
                return Err(violation(
                    ctx,
                    format!("value {} is already used by `{}`", member.value, other.name),
                ));
            }
            if let Some(max) = max
                && member.value <= max
            {
                return Err(violation(
                    ctx,
                    format!(
                        "value {} must be greater than the current maximum {max}",
                        member.value
                    ),
                ));
            }
        } else {
            member.value = match max {
                None => 0,
                Some(max) => max
                    .checked_add(1)
                    .ok_or_else(|| violation(ctx, "no value left after 2147483647"))?,
            };
        }
        data.members.push(member);
        Ok(())
    }

    pub(super) fn enter_bit(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let name = validate::identifier(ctx)?.to_string();
        cardinality::check(ctx)?;
        let parent = self.members_holder(ctx, NodeTag::Bits)?;
        collision::check_sibling(&self.tree, parent, ctx, &name, Category::BitMember)?;
        self.stack.push(Frame::Bit(BitMember {
            name,
            position: 0,
            explicit: false,
            description: None,
            reference: None,
            status: Default::default(),
            pos: ctx.pos(),
        }));
        Ok(Descend::Children)
    }

    pub(super) fn enter_position(&mut self, ctx: &StmtCtx) -> Result<Descend, SchemaError> {
        let position = validate::non_negative(ctx)?;
        let position = u32::try_from(position).map_err(|_| {
            SchemaError::new(
                DiagnosticKind::DataModelConstraintViolation,
                ctx,
                Phase::Entry,
                format!("bit position {position} is outside the 32-bit unsigned range"),
            )
        })?;
        match self.stack.peek_mut(ctx, Phase::Entry)? {
            Frame::Bit(member) => {
                member.position = position;
                member.explicit = true;
            }
            _ => return Err(self.invalid_holder(ctx)),
        }
        Ok(Descend::Leaf)
    }

    pub(super) fn exit_bit(&mut self, ctx: &StmtCtx) -> Result<(), SchemaError> {
        let Frame::Bit(mut member) = self.stack.pop(ctx, FrameKind::Bit)? else {
            unreachable!("pop checked the frame kind");
        };
        let parent = self.members_holder(ctx, NodeTag::Bits)?;
        let NodeKind::Bits(data) = &mut self.tree.node_mut(parent).kind else {
            return Ok(());
        };

        let max = data.members.iter().map(|m| m.position).max();
        if member.explicit {
            if let Some(other) = data.members.iter().find(|m| m.position == member.position) {
                return Err(violation(
                    ctx,
                    format!(
                        "position {} is already used by `{}`",
                        member.position, other.name
                    ),
                ));
            }
            if let Some(max) = max
                && member.position <= max
            {
                return Err(violation(
                    ctx,
                    format!(
                        "position {} must be greater than the current maximum {max}",
                        member.position
                    ),
                ));
            }
        } else {
            member.position = match max {
                None => 0,
                Some(max) => max
                    .checked_add(1)
                    .ok_or_else(|| violation(ctx, "no position left after 4294967295"))?,
            };
        }
        data.members.push(member);
        Ok(())
    }
}

fn out_of_bounds(keyword: &str, restriction: &IntervalRestriction, builtin: BuiltinType) -> SchemaError {
    SchemaError::at(
        DiagnosticKind::InvalidArgument,
        keyword,
        Some(&restriction.intervals.to_string()),
        restriction.pos,
        restriction.range,
        format!("`{}` is outside the value space of `{builtin}`", restriction.intervals),
    )
    .in_phase(Phase::Exit)
}
