//! Locating declarations annotated with a given attribute class

use crate::compilation::Compilation;
use crate::model::simple_name_matches;
use crate::symbols::{MethodSymbol, NamedTypeSymbol};
use sc_syntax::{AttributeSyntax, SyntaxKind, SyntaxNodeRef};
use std::ops::ControlFlow;
use tracing::trace;

/// Symbol declared by an annotated node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSymbol {
    /// An annotated method
    Method(MethodSymbol),
    /// An annotated type
    NamedType(NamedTypeSymbol),
}

impl TargetSymbol {
    /// The method, if the target is one
    #[must_use]
    pub const fn as_method(&self) -> Option<&MethodSymbol> {
        match self {
            Self::Method(method) => Some(method),
            Self::NamedType(_) => None,
        }
    }
}

/// An attribute application bound to its attribute class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeData {
    /// Fully-qualified metadata name of the attribute class
    pub class_name: String,
    /// The application as written
    pub syntax: AttributeSyntax,
}

/// Everything a transform gets to see about one annotated declaration
#[derive(Debug, Clone)]
pub struct AttributeSyntaxContext {
    /// The annotated declaration
    pub target_node: SyntaxNodeRef,
    /// Its declared symbol
    pub target_symbol: TargetSymbol,
    /// The matching attribute applications, in source order
    pub attributes: Vec<AttributeData>,
}

impl Compilation {
    /// Finds every declaration carrying an attribute that binds to
    /// `metadata_name`, in file order then pre-order.
    ///
    /// `predicate` is a cheap structural filter that runs before any symbol
    /// resolution. `transform` runs once per surviving declaration; its
    /// results are returned in discovery order.
    pub fn for_attribute_with_metadata_name<T, P, F>(
        &self,
        metadata_name: &str,
        predicate: P,
        mut transform: F,
    ) -> Vec<T>
    where
        P: Fn(&SyntaxNodeRef) -> bool,
        F: FnMut(&AttributeSyntaxContext) -> T,
    {
        let mut results = Vec::new();

        let _ = self.walk(&mut |node| {
            if let Some(context) = annotated_context(self, node, metadata_name, &predicate) {
                results.push(transform(&context));
            }
            ControlFlow::Continue(())
        });

        results
    }
}

fn annotated_context<P>(
    compilation: &Compilation,
    node: &SyntaxNodeRef,
    metadata_name: &str,
    predicate: &P,
) -> Option<AttributeSyntaxContext>
where
    P: Fn(&SyntaxNodeRef) -> bool,
{
    let syntax = node.node();
    if !syntax
        .attributes
        .iter()
        .any(|attribute| simple_name_matches(&attribute.name, metadata_name))
    {
        return None;
    }
    if !predicate(node) {
        trace!(name = %syntax.name, "annotated node rejected by predicate");
        return None;
    }

    let model = compilation.semantic_model(node.tree());
    let attributes: Vec<AttributeData> = syntax
        .attributes
        .iter()
        .filter(|attribute| model.attribute_binds_to(attribute, metadata_name, node.id()))
        .map(|attribute| AttributeData {
            class_name: metadata_name.to_string(),
            syntax: attribute.clone(),
        })
        .collect();
    if attributes.is_empty() {
        trace!(name = %syntax.name, "attribute name did not bind to {metadata_name}");
        return None;
    }

    let target_symbol = match syntax.kind {
        SyntaxKind::MethodDeclaration => model.declared_method(node.id()).map(TargetSymbol::Method),
        SyntaxKind::TypeDeclaration(_) => model.declared_type(node.id()).map(TargetSymbol::NamedType),
        _ => None,
    }?;

    Some(AttributeSyntaxContext {
        target_node: node.clone(),
        target_symbol,
        attributes,
    })
}
