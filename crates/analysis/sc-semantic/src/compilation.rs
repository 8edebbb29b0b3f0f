//! The set of syntax trees a generator pass runs against

use crate::model::SemanticModel;
use crate::symbols::NamespaceSymbol;
use sc_syntax::modifiers::GLOBAL;
use sc_syntax::{NodeId, SyntaxKind, SyntaxNodeRef, SyntaxTree, walk};
use std::ops::ControlFlow;
use std::sync::Arc;

/// Immutable snapshot of every parsed file in a build
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    trees: Vec<Arc<SyntaxTree>>,
    global_usings: Vec<NamespaceSymbol>,
}

impl Compilation {
    /// Creates a compilation over `trees`, kept in the given order
    #[must_use]
    pub fn new(trees: Vec<Arc<SyntaxTree>>) -> Self {
        let global_usings = collect_global_usings(&trees);
        Self {
            trees,
            global_usings,
        }
    }

    /// Syntax trees in file order
    #[must_use]
    pub fn syntax_trees(&self) -> &[Arc<SyntaxTree>] {
        &self.trees
    }

    /// Namespaces imported by `global using` directives in any file
    #[must_use]
    pub fn global_usings(&self) -> &[NamespaceSymbol] {
        &self.global_usings
    }

    /// Semantic model for one of the trees
    #[must_use]
    pub fn semantic_model<'model>(&'model self, tree: &'model SyntaxTree) -> SemanticModel<'model> {
        SemanticModel::with_global_usings(tree, &self.global_usings)
    }

    /// Visits every node of every tree in file order, pre-order within a
    /// tree. A [`ControlFlow::Break`] from the visitor ends the whole walk.
    pub fn walk<F>(&self, visitor: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&SyntaxNodeRef) -> ControlFlow<()>,
    {
        for tree in &self.trees {
            walk(tree, &mut |id: NodeId| {
                visitor(&SyntaxNodeRef::new(Arc::clone(tree), id))
            })?;
        }
        ControlFlow::Continue(())
    }

    /// Total number of nodes across all trees
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.len()).sum()
    }
}

/// `global using` directives may only appear at the top of a file
fn collect_global_usings(trees: &[Arc<SyntaxTree>]) -> Vec<NamespaceSymbol> {
    let mut namespaces = Vec::new();
    for tree in trees {
        for &child in tree.children(tree.root()) {
            let node = tree.node(child);
            if node.kind == SyntaxKind::UsingDirective && node.modifiers.contains(GLOBAL) {
                let namespace = NamespaceSymbol::from_dotted(&node.name);
                if !namespaces.contains(&namespace) {
                    namespaces.push(namespace);
                }
            }
        }
    }
    namespaces
}
