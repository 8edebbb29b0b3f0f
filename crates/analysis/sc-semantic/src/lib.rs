//! Semantic layer of the host
//!
//! A [`Compilation`] is the immutable snapshot generators run against. The
//! [`SemanticModel`] answers per-tree questions (which namespace encloses a
//! node, what does a type reference resolve to), and
//! [`Compilation::for_attribute_with_metadata_name`] locates annotated
//! declarations for attribute-driven generators.

pub mod attributes;
pub mod compilation;
pub mod display;
pub mod model;
pub mod symbols;

pub use attributes::{AttributeData, AttributeSyntaxContext, TargetSymbol};
pub use compilation::Compilation;
pub use display::{GLOBAL_PREFIX, SymbolDisplayFormat};
pub use model::SemanticModel;
pub use symbols::{
    MethodSymbol, NamedTypeSymbol, NamespaceSymbol, ParameterSymbol, SpecialType, TypeKind,
    TypeSymbol,
};
