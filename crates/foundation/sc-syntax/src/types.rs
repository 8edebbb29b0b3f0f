//! Type references as written in source

use std::fmt;

/// Built-in type keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedType {
    /// `void`
    Void,
    /// `string`
    String,
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `double`
    Double,
    /// `char`
    Char,
    /// `object`
    Object,
}

impl PredefinedType {
    /// Looks up a keyword
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let predefined = match keyword {
            "void" => Self::Void,
            "string" => Self::String,
            "bool" => Self::Bool,
            "int" => Self::Int,
            "long" => Self::Long,
            "double" => Self::Double,
            "char" => Self::Char,
            "object" => Self::Object,
            _ => return None,
        };
        Some(predefined)
    }

    /// Keyword spelling
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Char => "char",
            Self::Object => "object",
        }
    }
}

/// A type reference in a declaration (return type, parameter type)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    /// A built-in keyword type
    Predefined(PredefinedType),
    /// Any other type, kept as written with whitespace removed
    Named(String),
}

impl TypeSyntax {
    /// Classifies source text as a keyword type or a named type
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let compact: String = text.chars().filter(|character| !character.is_whitespace()).collect();
        PredefinedType::from_keyword(&compact).map_or(Self::Named(compact), Self::Predefined)
    }

    /// The type with a trailing nullable annotation `?` removed, or `None`
    /// when none was written
    #[must_use]
    pub fn without_nullable_annotation(&self) -> Option<Self> {
        match self {
            Self::Named(name) => name.strip_suffix('?').map(Self::parse),
            Self::Predefined(_) => None,
        }
    }

    /// Whether this is the `void` keyword
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Predefined(PredefinedType::Void))
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predefined(predefined) => formatter.write_str(predefined.keyword()),
            Self::Named(name) => formatter.write_str(name),
        }
    }
}
