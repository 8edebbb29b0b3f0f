//! Declaration Matcher: small pure predicates over declaration nodes
//!
//! Each predicate answers one structural question and never fails. The
//! composed checks short-circuit on the first `false`.

use crate::TARGET_METHOD;
use sc_syntax::modifiers::PARTIAL;
use sc_syntax::{SyntaxKind, SyntaxNode, SyntaxNodeRef, TypeDeclarationKind};

/// Non-empty modifier set containing `partial`
#[must_use]
pub fn has_partial_modifier(node: &SyntaxNode) -> bool {
    !node.modifiers.is_empty() && node.modifiers.contains(PARTIAL)
}

/// A class, struct, interface or record declared `partial`.
///
/// Enums cannot be partial and are never candidates.
#[must_use]
pub fn is_partial_type_declaration(node: &SyntaxNode) -> bool {
    matches!(
        node.type_declaration_kind(),
        Some(kind) if kind != TypeDeclarationKind::Enum
    ) && has_partial_modifier(node)
}

/// A `partial void SayHelloTo(...)` method stub
#[must_use]
pub fn is_deferred_target_method(node: &SyntaxNode) -> bool {
    node.kind == SyntaxKind::MethodDeclaration
        && node.name == TARGET_METHOD
        && node.return_type.as_ref().is_some_and(|ty| ty.is_void())
        && has_partial_modifier(node)
}

/// First direct child of a type declaration that is the target stub
#[must_use]
pub fn find_target_method(type_declaration: &SyntaxNodeRef) -> Option<SyntaxNodeRef> {
    type_declaration
        .children()
        .find(|child| is_deferred_target_method(child.node()))
}

/// Whether `node` is a candidate for the partial-method generator
#[must_use]
pub fn matches(node: &SyntaxNodeRef) -> bool {
    is_partial_type_declaration(node.node()) && find_target_method(node).is_some()
}

/// Syntactic filter for annotated declarations: a partial method whose
/// immediate parent is a type declaration with a `partial` modifier
#[must_use]
pub fn is_annotated_candidate_syntax(node: &SyntaxNodeRef) -> bool {
    let syntax = node.node();
    if syntax.kind != SyntaxKind::MethodDeclaration || !has_partial_modifier(syntax) {
        return false;
    }

    node.parent().is_some_and(|parent| {
        let parent = parent.node();
        parent.kind.is_type_declaration() && has_partial_modifier(parent)
    })
}

/// Nearest enclosing type declaration of a node
#[must_use]
pub fn enclosing_type(node: &SyntaxNodeRef) -> Option<SyntaxNodeRef> {
    node.ancestors()
        .find(|ancestor| ancestor.node().kind.is_type_declaration())
}
