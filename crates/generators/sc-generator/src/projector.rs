//! Projector: annotated method plus its symbol to a [`CandidateRecord`]
//!
//! Every shape constraint is its own predicate. A failed constraint yields
//! `None`; the rejection is traced and otherwise silent.

use crate::record::CandidateRecord;
use sc_semantic::{AttributeSyntaxContext, MethodSymbol, SpecialType, TargetSymbol, TypeKind};
use sc_syntax::{SyntaxKind, SyntaxNodeRef};
use tracing::trace;

/// Projects the transform input of the annotation locator
#[must_use]
pub fn project(context: &AttributeSyntaxContext) -> Option<CandidateRecord> {
    let TargetSymbol::Method(method) = &context.target_symbol else {
        trace!("annotated target is not a method");
        return None;
    };
    project_method(method, &context.target_node)
}

/// Projects a resolved method and its declaration node
#[must_use]
pub fn project_method(method: &MethodSymbol, node: &SyntaxNodeRef) -> Option<CandidateRecord> {
    if node.node().kind != SyntaxKind::MethodDeclaration {
        return None;
    }

    let checks: [(fn(&MethodSymbol) -> bool, &str); 5] = [
        (has_no_type_parameters, "generic method"),
        (has_single_string_parameter, "parameter list is not a single string"),
        (MethodSymbol::returns_void, "non-void return type"),
        (is_static, "instance method"),
        (has_supported_containing_kind, "unsupported containing type kind"),
    ];
    if let Some((_, reason)) = checks.iter().find(|(check, _)| !check(method)) {
        trace!(method = %method.name, ty = %method.containing_type.name, reason, "shape rejected");
        return None;
    }

    let parameter = method.parameters.first()?;
    Some(CandidateRecord {
        member_name: method.name.clone(),
        parameter_name: parameter.name.clone(),
        type_name: method.containing_type.name.clone(),
        namespace: method.containing_type.namespace.clone(),
        type_kind: method.containing_type.kind,
        node: node.clone(),
    })
}

fn has_no_type_parameters(method: &MethodSymbol) -> bool {
    method.type_parameters.is_empty()
}

fn has_single_string_parameter(method: &MethodSymbol) -> bool {
    match method.parameters.as_slice() {
        [parameter] => parameter
            .ty
            .as_ref()
            .is_some_and(|ty| ty.special == SpecialType::String),
        _ => false,
    }
}

fn is_static(method: &MethodSymbol) -> bool {
    method.is_static
}

fn has_supported_containing_kind(method: &MethodSymbol) -> bool {
    matches!(
        method.containing_type.kind,
        TypeKind::Class | TypeKind::Struct | TypeKind::Interface
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_semantic::{NamedTypeSymbol, NamespaceSymbol, ParameterSymbol, SemanticModel, TypeSymbol};
    use sc_syntax::{FileId, ParameterSyntax, SyntaxNode, SyntaxTree, TypeDeclarationKind};
    use std::sync::Arc;

    fn string_type() -> TypeSymbol {
        TypeSymbol {
            display: "string".to_string(),
            special: SpecialType::String,
        }
    }

    fn method_symbol() -> MethodSymbol {
        MethodSymbol {
            name: "Speak".to_string(),
            type_parameters: Vec::new(),
            parameters: vec![ParameterSymbol {
                name: "text".to_string(),
                ty: Some(string_type()),
            }],
            return_type: TypeSymbol {
                display: "void".to_string(),
                special: SpecialType::Void,
            },
            is_static: true,
            is_partial: true,
            containing_type: NamedTypeSymbol {
                name: "Robot".to_string(),
                kind: TypeKind::Class,
                namespace: NamespaceSymbol::from_dotted("Robots"),
                containing_type: None,
                type_parameters: Vec::new(),
            },
        }
    }

    fn method_node() -> SyntaxNodeRef {
        let mut builder = SyntaxTree::builder(FileId(0));
        let root = builder.root();
        let ty = builder.push(
            root,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, "Robot"),
        );
        let method = builder.push(ty, SyntaxNode::method("void", "Speak"));
        SyntaxNodeRef::new(Arc::new(builder.finish()), method)
    }

    #[test]
    fn test_projects_valid_method() {
        let node = method_node();
        let record = project_method(&method_symbol(), &node).expect("record");

        assert_eq!(record.member_name, "Speak");
        assert_eq!(record.parameter_name, "text");
        assert_eq!(record.type_name, "Robot");
        assert_eq!(record.namespace, NamespaceSymbol::from_dotted("Robots"));
        assert_eq!(record.type_kind, TypeKind::Class);
        assert_eq!(record.node, node);
    }

    #[test]
    fn test_rejects_each_shape_violation() {
        let node = method_node();
        let reject = |mutate: fn(&mut MethodSymbol)| {
            let mut method = method_symbol();
            mutate(&mut method);
            project_method(&method, &node).is_none()
        };

        assert!(reject(|method| method.type_parameters.push("T".to_string())));
        assert!(reject(|method| method.parameters.clear()));
        assert!(reject(|method| {
            let extra = method.parameters[0].clone();
            method.parameters.push(extra);
        }));
        assert!(reject(|method| {
            method.parameters[0].ty = Some(TypeSymbol {
                display: "int".to_string(),
                special: SpecialType::Int32,
            });
        }));
        assert!(reject(|method| method.parameters[0].ty = None));
        assert!(reject(|method| method.return_type.special = SpecialType::Int32));
        assert!(reject(|method| method.is_static = false));
        assert!(reject(|method| method.containing_type.kind = TypeKind::Enum));
        assert!(reject(|method| method.containing_type.kind = TypeKind::Delegate));
    }

    #[test]
    fn test_struct_and_interface_accepted() {
        let node = method_node();
        for kind in [TypeKind::Struct, TypeKind::Interface] {
            let mut method = method_symbol();
            method.containing_type.kind = kind;
            assert_eq!(project_method(&method, &node).map(|record| record.type_kind), Some(kind));
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let node = method_node();
        let method = method_symbol();
        assert_eq!(project_method(&method, &node), project_method(&method, &node));
    }

    #[test]
    fn test_nullable_string_parameter_accepted() {
        let mut builder = SyntaxTree::builder(FileId(0));
        let root = builder.root();
        let ty = builder.push(
            root,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, "Robot").with_modifiers(["partial"]),
        );
        let speak = builder.push(
            ty,
            SyntaxNode::method("void", "Speak")
                .with_modifiers(["static", "partial"])
                .with_parameter(ParameterSyntax::new("string?", "text")),
        );
        let count = builder.push(
            ty,
            SyntaxNode::method("void", "Count")
                .with_modifiers(["static", "partial"])
                .with_parameter(ParameterSyntax::new("int?", "times")),
        );
        let tree = Arc::new(builder.finish());
        let model = SemanticModel::new(&tree);
        let project_id = |id| {
            let method = model.declared_method(id).expect("method symbol");
            project_method(&method, &SyntaxNodeRef::new(Arc::clone(&tree), id))
        };

        let record = project_id(speak).expect("string? is a string");
        assert_eq!(record.parameter_name, "text");
        assert!(project_id(count).is_none());
    }
}
