//! Statement keywords the analyzer understands.

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Keyword of a statement. Prefixed keywords are extension instances.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
            /// `prefix:name`, an instance of a user-defined extension.
            Extension,
            Unknown,
        }

        impl Keyword {
            /// Every keyword spelling, for suggestions.
            pub const TEXTS: &'static [&'static str] = &[$($text,)*];

            pub fn from_text(text: &str) -> Self {
                match text {
                    $($text => Self::$variant,)*
                    _ if text.contains(':') => Self::Extension,
                    _ => Self::Unknown,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                    Self::Extension => "<extension>",
                    Self::Unknown => "<unknown>",
                }
            }
        }
    };
}

keywords! {
    Module => "module",
    Submodule => "submodule",
    YangVersion => "yang-version",
    Namespace => "namespace",
    Prefix => "prefix",
    Import => "import",
    Include => "include",
    RevisionDate => "revision-date",
    BelongsTo => "belongs-to",
    Organization => "organization",
    Contact => "contact",
    Description => "description",
    Reference => "reference",
    Revision => "revision",
    ExtensionDef => "extension",
    Argument => "argument",
    YinElement => "yin-element",
    Identity => "identity",
    Base => "base",
    Feature => "feature",
    IfFeature => "if-feature",
    Typedef => "typedef",
    Type => "type",
    Units => "units",
    Default => "default",
    Status => "status",
    Config => "config",
    Mandatory => "mandatory",
    Presence => "presence",
    OrderedBy => "ordered-by",
    Must => "must",
    ErrorMessage => "error-message",
    ErrorAppTag => "error-app-tag",
    MinElements => "min-elements",
    MaxElements => "max-elements",
    Value => "value",
    Grouping => "grouping",
    Container => "container",
    Leaf => "leaf",
    LeafList => "leaf-list",
    List => "list",
    Key => "key",
    Unique => "unique",
    Choice => "choice",
    Case => "case",
    Anyxml => "anyxml",
    Uses => "uses",
    Refine => "refine",
    Augment => "augment",
    When => "when",
    Rpc => "rpc",
    Input => "input",
    Output => "output",
    Notification => "notification",
    Range => "range",
    Length => "length",
    Pattern => "pattern",
    Enum => "enum",
    Bit => "bit",
    Position => "position",
    Path => "path",
    RequireInstance => "require-instance",
    FractionDigits => "fraction-digits",
    Deviation => "deviation",
    Deviate => "deviate",
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
