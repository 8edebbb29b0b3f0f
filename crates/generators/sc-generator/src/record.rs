//! Candidate records produced by the projector

use sc_semantic::{NamespaceSymbol, TypeKind};
use sc_syntax::{ModifierSet, SyntaxNodeRef};

/// Everything the emitter needs to complete one annotated method.
///
/// Built once by the projector and never mutated afterwards. Equality is
/// structural except for `node`, which compares by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Method name
    pub member_name: String,
    /// Name of the sole parameter
    pub parameter_name: String,
    /// Simple name of the enclosing type
    pub type_name: String,
    /// Namespace of the enclosing type, not yet stringified
    pub namespace: NamespaceSymbol,
    /// Kind of the enclosing type
    pub type_kind: TypeKind,
    /// The annotated method declaration
    pub node: SyntaxNodeRef,
}

impl CandidateRecord {
    /// Modifiers of the original method, in source order
    #[must_use]
    pub fn modifiers(&self) -> &ModifierSet {
        &self.node.node().modifiers
    }
}
