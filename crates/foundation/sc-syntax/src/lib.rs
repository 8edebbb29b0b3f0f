//! Declaration syntax trees shared by the host and the generators
//!
//! The host parses source files into [`SyntaxTree`]s; generators only ever
//! read them. Nodes live in an arena and carry parent links so a generator
//! can walk both down (children in declaration order) and up (enclosing
//! type, enclosing namespace).

pub mod modifiers;
pub mod span;
pub mod tree;
pub mod types;
pub mod walk;

pub use modifiers::ModifierSet;
pub use span::{FileId, FileSpan, Span};
pub use tree::{
    AttributeSyntax, NodeId, ParameterSyntax, SyntaxKind, SyntaxNode, SyntaxNodeRef, SyntaxTree,
    TreeBuilder, TypeDeclarationKind,
};
pub use types::{PredefinedType, TypeSyntax};
pub use walk::{descendants, walk};

use anyhow::Result;

/// Trait for language-specific front ends
pub trait Language: Send + Sync + 'static {
    /// Name of the language
    fn name(&self) -> &'static str;

    /// File extensions this language handles
    fn extensions(&self) -> &[&'static str];

    /// tree-sitter language instance
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Parse source code to a concrete syntax tree
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing is aborted
    fn parse(&self, source: &str) -> Result<tree_sitter::Tree>;

    /// Lower a concrete syntax tree into a declaration tree
    fn lower(&self, tree: &tree_sitter::Tree, source: &str, file: FileId) -> SyntaxTree;
}
