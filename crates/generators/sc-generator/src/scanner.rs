//! Eager Scanner: first partial `SayHelloTo` stub across the compilation

use crate::host::SyntaxReceiver;
use crate::matcher;
use sc_syntax::SyntaxNodeRef;
use std::ops::ControlFlow;
use tracing::debug;

/// Single-slot receiver; create a fresh one for every pass
#[derive(Debug, Default)]
pub struct PartialMethodReceiver {
    target: Option<SyntaxNodeRef>,
}

impl PartialMethodReceiver {
    /// Creates an empty receiver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded stub, if any
    #[must_use]
    pub const fn target(&self) -> Option<&SyntaxNodeRef> {
        self.target.as_ref()
    }

    /// Consumes the receiver, yielding the recorded stub
    #[must_use]
    pub fn into_target(self) -> Option<SyntaxNodeRef> {
        self.target
    }
}

impl SyntaxReceiver for PartialMethodReceiver {
    fn on_visit_syntax_node(&mut self, node: &SyntaxNodeRef) -> ControlFlow<()> {
        if !matcher::is_partial_type_declaration(node.node()) {
            return ControlFlow::Continue(());
        }
        let Some(method) = matcher::find_target_method(node) else {
            return ControlFlow::Continue(());
        };

        if self.target.is_none() {
            debug!(ty = %node.node().name, "found partial method stub");
            self.target = Some(method);
        }
        ControlFlow::Break(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::visit_compilation;
    use sc_semantic::Compilation;
    use sc_syntax::{FileId, NodeId, SyntaxNode, SyntaxTree, TypeDeclarationKind};
    use std::sync::Arc;

    fn stub() -> SyntaxNode {
        SyntaxNode::method("void", "SayHelloTo").with_modifiers(["static", "partial"])
    }

    fn partial_class(builder: &mut sc_syntax::TreeBuilder, name: &str) -> NodeId {
        let root = builder.root();
        let ty = builder.push(
            root,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, name).with_modifiers(["partial"]),
        );
        builder.push(ty, stub())
    }

    #[test]
    fn test_records_first_match_only() {
        let mut builder = SyntaxTree::builder(FileId(0));
        let first = partial_class(&mut builder, "First");
        partial_class(&mut builder, "Second");
        let tree = Arc::new(builder.finish());
        let compilation = Compilation::new(vec![Arc::clone(&tree)]);

        let mut receiver = PartialMethodReceiver::new();
        visit_compilation(&compilation, &mut receiver);

        assert_eq!(receiver.target().map(SyntaxNodeRef::id), Some(first));
    }

    #[test]
    fn test_slot_is_never_overwritten() {
        let mut builder = SyntaxTree::builder(FileId(0));
        let first = partial_class(&mut builder, "First");
        let second = partial_class(&mut builder, "Second");
        let tree = Arc::new(builder.finish());

        let mut receiver = PartialMethodReceiver::new();
        for ty in [first, second] {
            let parent = tree.parent(ty).expect("type");
            let _ = receiver.on_visit_syntax_node(&SyntaxNodeRef::new(Arc::clone(&tree), parent));
        }

        assert_eq!(receiver.into_target().map(|node| node.id()), Some(first));
    }

    #[test]
    fn test_no_candidate_leaves_slot_empty() {
        let mut builder = SyntaxTree::builder(FileId(0));
        let root = builder.root();
        let ty = builder.push(
            root,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, "Plain"),
        );
        builder.push(ty, stub());
        let compilation = Compilation::new(vec![Arc::new(builder.finish())]);

        let mut receiver = PartialMethodReceiver::new();
        visit_compilation(&compilation, &mut receiver);
        assert!(receiver.target().is_none());
    }
}
