//! Resolved symbols handed to generators

use crate::display::SymbolDisplayFormat;
use sc_syntax::TypeDeclarationKind;
use std::fmt;

/// Kind of a named type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `class` or `record`
    Class,
    /// `struct` or `record struct`
    Struct,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `delegate`
    Delegate,
}

impl From<TypeDeclarationKind> for TypeKind {
    fn from(kind: TypeDeclarationKind) -> Self {
        match kind {
            TypeDeclarationKind::Class | TypeDeclarationKind::Record => Self::Class,
            TypeDeclarationKind::Struct | TypeDeclarationKind::RecordStruct => Self::Struct,
            TypeDeclarationKind::Interface => Self::Interface,
            TypeDeclarationKind::Enum => Self::Enum,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
        };
        formatter.write_str(name)
    }
}

/// Well-known runtime types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    /// Not a special type
    None,
    /// `System.Void`
    Void,
    /// `System.String`
    String,
    /// `System.Boolean`
    Boolean,
    /// `System.Int32`
    Int32,
    /// `System.Int64`
    Int64,
    /// `System.Double`
    Double,
    /// `System.Char`
    Char,
    /// `System.Object`
    Object,
}

impl SpecialType {
    /// Special types addressable by their metadata name
    pub const METADATA_NAMES: &'static [(&'static str, Self)] = &[
        ("System.Void", Self::Void),
        ("System.String", Self::String),
        ("System.Boolean", Self::Boolean),
        ("System.Int32", Self::Int32),
        ("System.Int64", Self::Int64),
        ("System.Double", Self::Double),
        ("System.Char", Self::Char),
        ("System.Object", Self::Object),
    ];

    /// Looks up a fully-qualified metadata name
    #[must_use]
    pub fn from_metadata_name(name: &str) -> Self {
        Self::METADATA_NAMES
            .iter()
            .find(|(metadata_name, _)| *metadata_name == name)
            .map_or(Self::None, |(_, special)| *special)
    }

    /// `string` and `object`, the special types a `?` annotation leaves intact
    #[must_use]
    pub const fn is_reference_type(self) -> bool {
        matches!(self, Self::String | Self::Object)
    }
}

/// A resolved type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSymbol {
    /// Type as written in source
    pub display: String,
    /// Well-known type, if any
    pub special: SpecialType,
}

/// A namespace, possibly the global namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamespaceSymbol {
    segments: Vec<String>,
}

impl NamespaceSymbol {
    /// The global (root) namespace
    #[must_use]
    pub fn global() -> Self {
        Self::default()
    }

    /// Parses a dotted name such as `A.B.C`; empty segments are dropped
    #[must_use]
    pub fn from_dotted(name: &str) -> Self {
        Self {
            segments: name
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Creates a namespace from its segments, outermost first
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Whether this is the global namespace
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments, outermost first
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Innermost namespace name, empty for the global namespace
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Enclosing namespace, `None` for the global namespace
    #[must_use]
    pub fn containing_namespace(&self) -> Option<Self> {
        let (_, outer) = self.segments.split_last()?;
        Some(Self::from_segments(outer.to_vec()))
    }

    /// Renders the namespace in the given display format
    #[must_use]
    pub fn to_display_string(&self, format: SymbolDisplayFormat) -> String {
        format.render_qualified(&self.segments)
    }
}

/// A named type (class, struct, interface, enum, delegate)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedTypeSymbol {
    /// Simple name
    pub name: String,
    /// Type kind
    pub kind: TypeKind,
    /// Namespace that (transitively) contains the type
    pub namespace: NamespaceSymbol,
    /// Enclosing type for nested types
    pub containing_type: Option<Box<NamedTypeSymbol>>,
    /// Generic type parameter names
    pub type_parameters: Vec<String>,
}

/// A formal parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSymbol {
    /// Parameter name
    pub name: String,
    /// Resolved type, `None` when the declaration omits it
    pub ty: Option<TypeSymbol>,
}

/// A resolved method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSymbol {
    /// Method name
    pub name: String,
    /// Generic type parameter names
    pub type_parameters: Vec<String>,
    /// Formal parameters in order
    pub parameters: Vec<ParameterSymbol>,
    /// Resolved return type
    pub return_type: TypeSymbol,
    /// Declared `static`
    pub is_static: bool,
    /// Declared `partial`
    pub is_partial: bool,
    /// Type declaring the method
    pub containing_type: NamedTypeSymbol,
}

impl MethodSymbol {
    /// Whether the method returns `void`
    #[must_use]
    pub fn returns_void(&self) -> bool {
        self.return_type.special == SpecialType::Void
    }
}
