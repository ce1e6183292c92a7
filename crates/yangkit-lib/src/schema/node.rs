//! Schema node payloads.

use rowan::TextRange;
use serde::Serialize;
use yangkit_core::utils::parse_identifier_ref;
use yangkit_core::{MaxElements, OrderedBy, Position, Status};

use super::types::{BitMember, EnumMember, TypeSpec};
use super::{NodeId, NodeRef};
use crate::compilation::source_map::SourceId;

/// `prefix:name` as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub name: String,
}

impl QName {
    pub fn parse(text: &str) -> Option<Self> {
        let (prefix, name) = parse_identifier_ref(text)?;
        Some(Self {
            prefix: prefix.map(str::to_owned),
            name: name.to_owned(),
        })
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.prefix {
            Some(p) => write!(f, "{}:{}", p, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Must {
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_app_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct When {
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfFeature {
    pub name: QName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeRef>,
}

/// Statements every definition may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "is_current")]
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub musts: Vec<Must>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub if_features: Vec<IfFeature>,
}

fn is_current(status: &Status) -> bool {
    *status == Status::Current
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self == &Meta::default()
    }
}

/// Effective `config` of a data node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Config {
    pub value: bool,
    /// Declared by a `config` statement rather than inherited.
    pub explicit: bool,
}

impl Config {
    pub fn inherited(value: bool) -> Self {
        Self {
            value,
            explicit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Import {
    pub module: String,
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_date: Option<String>,
    pub pos: Position,
    #[serde(skip)]
    pub range: TextRange,
    /// Source of the imported module, bound during linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<SourceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Include {
    pub submodule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_date: Option<String>,
    pub pos: Position,
    #[serde(skip)]
    pub range: TextRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<SourceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Revision {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BelongsTo {
    pub module: String,
    pub prefix: String,
}

/// Header of a module or submodule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yang_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Own prefix; for a submodule, the `belongs-to` prefix.
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<Include>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub revisions: Vec<Revision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<BelongsTo>,
}

impl ModuleData {
    /// Most recent revision date.
    pub fn revision(&self) -> Option<&str> {
        self.revisions.iter().map(|r| r.date.as_str()).max()
    }

    pub fn import_by_prefix(&self, prefix: &str) -> Option<&Import> {
        self.imports.iter().find(|i| i.prefix == prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<String>,
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uniques: Vec<Vec<String>>,
    pub min_elements: u64,
    pub max_elements: MaxElements,
    pub ordered_by: OrderedBy,
    pub config: Config,
    #[serde(skip)]
    pub key_range: Option<(Position, TextRange)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafData {
    #[serde(rename = "type")]
    pub ty: Option<TypeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub mandatory: bool,
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafListData {
    #[serde(rename = "type")]
    pub ty: Option<TypeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub min_elements: u64,
    pub max_elements: MaxElements,
    pub ordered_by: OrderedBy,
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub mandatory: bool,
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnyxmlData {
    pub mandatory: bool,
    pub config: Config,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Refine {
    pub target: String,
    pub pos: Position,
    #[serde(skip)]
    pub range: TextRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_elements: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_elements: Option<MaxElements>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub musts: Vec<Must>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsesData {
    pub grouping: QName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub refines: Vec<Refine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentData {
    pub target_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedefData {
    #[serde(rename = "type")]
    pub ty: Option<TypeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnumerationData {
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BitsData {
    pub members: Vec<BitMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnionData {
    pub members: Vec<TypeSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentityData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<QName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_target: Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtensionArgument {
    pub name: String,
    pub yin_element: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtensionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<ExtensionArgument>,
}

/// Construct kind with its construct-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NodeKind {
    Module(ModuleData),
    #[serde(rename = "submodule")]
    SubModule(ModuleData),
    Container(ContainerData),
    List(ListData),
    Leaf(LeafData),
    LeafList(LeafListData),
    Choice(ChoiceData),
    Case,
    Anyxml(AnyxmlData),
    Grouping,
    Uses(UsesData),
    Augment(AugmentData),
    Typedef(TypedefData),
    Enumeration(EnumerationData),
    Bits(BitsData),
    Union(UnionData),
    Identity(IdentityData),
    Extension(ExtensionData),
    Feature,
    Rpc,
    Input,
    Output,
    Notification,
}

/// Payload-free discriminant of [`NodeKind`], used in holder whitelists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Module,
    SubModule,
    Container,
    List,
    Leaf,
    LeafList,
    Choice,
    Case,
    Anyxml,
    Grouping,
    Uses,
    Augment,
    Typedef,
    Enumeration,
    Bits,
    Union,
    Identity,
    Extension,
    Feature,
    Rpc,
    Input,
    Output,
    Notification,
}

impl NodeTag {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::SubModule => "submodule",
            Self::Container => "container",
            Self::List => "list",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::Choice => "choice",
            Self::Case => "case",
            Self::Anyxml => "anyxml",
            Self::Grouping => "grouping",
            Self::Uses => "uses",
            Self::Augment => "augment",
            Self::Typedef => "typedef",
            Self::Enumeration => "enumeration",
            Self::Bits => "bits",
            Self::Union => "union",
            Self::Identity => "identity",
            Self::Extension => "extension",
            Self::Feature => "feature",
            Self::Rpc => "rpc",
            Self::Input => "input",
            Self::Output => "output",
            Self::Notification => "notification",
        }
    }

    /// Nodes that instantiate data: `config` applies to them.
    pub fn is_config_bearing(self) -> bool {
        matches!(
            self,
            Self::Container | Self::List | Self::Leaf | Self::LeafList | Self::Choice | Self::Anyxml
        )
    }

    /// `data-def-stmt` of the grammar: what a list or augment must contain.
    pub fn is_data_definition(self) -> bool {
        matches!(
            self,
            Self::Container
                | Self::List
                | Self::Leaf
                | Self::LeafList
                | Self::Choice
                | Self::Anyxml
                | Self::Uses
        )
    }

    pub fn is_anonymous_type(self) -> bool {
        matches!(self, Self::Enumeration | Self::Bits | Self::Union)
    }

    pub fn is_module(self) -> bool {
        matches!(self, Self::Module | Self::SubModule)
    }
}

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Module(_) => NodeTag::Module,
            Self::SubModule(_) => NodeTag::SubModule,
            Self::Container(_) => NodeTag::Container,
            Self::List(_) => NodeTag::List,
            Self::Leaf(_) => NodeTag::Leaf,
            Self::LeafList(_) => NodeTag::LeafList,
            Self::Choice(_) => NodeTag::Choice,
            Self::Case => NodeTag::Case,
            Self::Anyxml(_) => NodeTag::Anyxml,
            Self::Grouping => NodeTag::Grouping,
            Self::Uses(_) => NodeTag::Uses,
            Self::Augment(_) => NodeTag::Augment,
            Self::Typedef(_) => NodeTag::Typedef,
            Self::Enumeration(_) => NodeTag::Enumeration,
            Self::Bits(_) => NodeTag::Bits,
            Self::Union(_) => NodeTag::Union,
            Self::Identity(_) => NodeTag::Identity,
            Self::Extension(_) => NodeTag::Extension,
            Self::Feature => NodeTag::Feature,
            Self::Rpc => NodeTag::Rpc,
            Self::Input => NodeTag::Input,
            Self::Output => NodeTag::Output,
            Self::Notification => NodeTag::Notification,
        }
    }

    pub fn config(&self) -> Option<Config> {
        match self {
            Self::Container(d) => Some(d.config),
            Self::List(d) => Some(d.config),
            Self::Leaf(d) => Some(d.config),
            Self::LeafList(d) => Some(d.config),
            Self::Choice(d) => Some(d.config),
            Self::Anyxml(d) => Some(d.config),
            _ => None,
        }
    }

    pub fn config_mut(&mut self) -> Option<&mut Config> {
        match self {
            Self::Container(d) => Some(&mut d.config),
            Self::List(d) => Some(&mut d.config),
            Self::Leaf(d) => Some(&mut d.config),
            Self::LeafList(d) => Some(&mut d.config),
            Self::Choice(d) => Some(&mut d.config),
            Self::Anyxml(d) => Some(&mut d.config),
            _ => None,
        }
    }

    pub fn module_data(&self) -> Option<&ModuleData> {
        match self {
            Self::Module(d) | Self::SubModule(d) => Some(d),
            _ => None,
        }
    }

    pub fn module_data_mut(&mut self) -> Option<&mut ModuleData> {
        match self {
            Self::Module(d) | Self::SubModule(d) => Some(d),
            _ => None,
        }
    }

    /// The type a leaf, leaf-list or typedef declares.
    pub fn type_spec(&self) -> Option<&TypeSpec> {
        match self {
            Self::Leaf(d) => d.ty.as_ref(),
            Self::LeafList(d) => d.ty.as_ref(),
            Self::Typedef(d) => d.ty.as_ref(),
            _ => None,
        }
    }

    pub fn type_spec_mut(&mut self) -> Option<&mut TypeSpec> {
        match self {
            Self::Leaf(d) => d.ty.as_mut(),
            Self::LeafList(d) => d.ty.as_mut(),
            Self::Typedef(d) => d.ty.as_mut(),
            _ => None,
        }
    }
}

/// One schema construct in the arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip)]
    pub parent: Option<NodeId>,
    #[serde(skip)]
    pub children: Vec<NodeId>,
    pub pos: Position,
    #[serde(skip)]
    pub range: TextRange,
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl SchemaNode {
    pub fn new(kind: NodeKind, name: impl Into<String>, pos: Position, range: TextRange) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            pos,
            range,
            meta: Meta::default(),
        }
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }
}
