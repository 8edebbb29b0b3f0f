//! Per-tree semantic queries
//!
//! Resolution is name based: namespaces come from the enclosing namespace
//! declarations, `using` directives import namespaces, and a handful of
//! `System` types are recognised as special types. Nothing outside the
//! compilation is consulted.

use crate::display::GLOBAL_PREFIX;
use crate::symbols::{
    MethodSymbol, NamedTypeSymbol, NamespaceSymbol, ParameterSymbol, SpecialType, TypeKind,
    TypeSymbol,
};
use sc_syntax::modifiers::{PARTIAL, STATIC};
use sc_syntax::{AttributeSyntax, NodeId, PredefinedType, SyntaxKind, SyntaxTree, TypeSyntax};

/// Suffix the language lets attribute applications omit
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Semantic view over one syntax tree
#[derive(Debug, Clone, Copy)]
pub struct SemanticModel<'tree> {
    tree: &'tree SyntaxTree,
    global_usings: &'tree [NamespaceSymbol],
}

impl<'tree> SemanticModel<'tree> {
    /// Creates a model for `tree` on its own, seeing only its own usings
    #[must_use]
    pub const fn new(tree: &'tree SyntaxTree) -> Self {
        Self {
            tree,
            global_usings: &[],
        }
    }

    /// Creates a model for `tree` that also sees the `global using`
    /// directives of the other files in its compilation
    #[must_use]
    pub const fn with_global_usings(
        tree: &'tree SyntaxTree,
        global_usings: &'tree [NamespaceSymbol],
    ) -> Self {
        Self { tree, global_usings }
    }

    /// Underlying tree
    #[must_use]
    pub const fn tree(&self) -> &'tree SyntaxTree {
        self.tree
    }

    /// Namespace a node is declared in (the global namespace at top level)
    #[must_use]
    pub fn enclosing_namespace(&self, id: NodeId) -> NamespaceSymbol {
        let mut declarations: Vec<&str> = self
            .tree
            .ancestors(id)
            .map(|ancestor| self.tree.node(ancestor))
            .filter(|node| node.kind == SyntaxKind::NamespaceDeclaration)
            .map(|node| node.name.as_str())
            .collect();
        declarations.reverse();

        let segments = declarations
            .iter()
            .flat_map(|dotted| NamespaceSymbol::from_dotted(dotted).segments().to_vec())
            .collect();
        NamespaceSymbol::from_segments(segments)
    }

    /// Namespaces imported by `using` directives visible from a node,
    /// compilation-wide `global using` imports last
    #[must_use]
    pub fn usings_in_scope(&self, id: NodeId) -> Vec<NamespaceSymbol> {
        let mut usings: Vec<NamespaceSymbol> = self
            .tree
            .ancestors(id)
            .flat_map(|scope| self.tree.children(scope).iter().copied())
            .map(|child| self.tree.node(child))
            .filter(|node| node.kind == SyntaxKind::UsingDirective)
            .map(|node| NamespaceSymbol::from_dotted(&node.name))
            .collect();
        for namespace in self.global_usings {
            if !usings.contains(namespace) {
                usings.push(namespace.clone());
            }
        }
        usings
    }

    /// Symbol for a type declaration node
    #[must_use]
    pub fn declared_type(&self, id: NodeId) -> Option<NamedTypeSymbol> {
        let node = self.tree.node(id);
        let kind = node.type_declaration_kind()?;

        let containing_type = self
            .tree
            .parent(id)
            .and_then(|parent| self.declared_type(parent))
            .map(Box::new);

        Some(NamedTypeSymbol {
            name: node.name.clone(),
            kind: TypeKind::from(kind),
            namespace: self.enclosing_namespace(id),
            containing_type,
            type_parameters: node.type_parameters.clone(),
        })
    }

    /// Symbol for a method declaration whose parent is a type declaration
    #[must_use]
    pub fn declared_method(&self, id: NodeId) -> Option<MethodSymbol> {
        let node = self.tree.node(id);
        if node.kind != SyntaxKind::MethodDeclaration {
            return None;
        }
        let containing_type = self.declared_type(self.tree.parent(id)?)?;

        let parameters = node
            .parameters
            .iter()
            .map(|parameter| ParameterSymbol {
                name: parameter.name.clone(),
                ty: parameter.ty.as_ref().map(|ty| self.resolve_type(ty, id)),
            })
            .collect();

        let return_type = node.return_type.as_ref().map_or_else(
            || TypeSymbol {
                display: String::new(),
                special: SpecialType::None,
            },
            |ty| self.resolve_type(ty, id),
        );

        Some(MethodSymbol {
            name: node.name.clone(),
            type_parameters: node.type_parameters.clone(),
            parameters,
            return_type,
            is_static: node.modifiers.contains(STATIC),
            is_partial: node.modifiers.contains(PARTIAL),
            containing_type,
        })
    }

    /// Resolves a type reference as seen from `context`.
    ///
    /// A nullable annotation on a reference type leaves the type unchanged;
    /// on a value type it makes a `Nullable<T>`, which is not special.
    #[must_use]
    pub fn resolve_type(&self, syntax: &TypeSyntax, context: NodeId) -> TypeSymbol {
        let special = match syntax.without_nullable_annotation() {
            Some(underlying) => match self.resolve_special(&underlying, context) {
                special if special.is_reference_type() => special,
                _ => SpecialType::None,
            },
            None => self.resolve_special(syntax, context),
        };
        TypeSymbol {
            display: syntax.to_string(),
            special,
        }
    }

    fn resolve_special(&self, syntax: &TypeSyntax, context: NodeId) -> SpecialType {
        match syntax {
            TypeSyntax::Predefined(predefined) => predefined_special_type(*predefined),
            TypeSyntax::Named(name) => self.resolve_named_special(name, context),
        }
    }

    fn resolve_named_special(&self, name: &str, context: NodeId) -> SpecialType {
        if let Some(rooted) = name.strip_prefix(GLOBAL_PREFIX) {
            return SpecialType::from_metadata_name(rooted);
        }

        self.lookup_scopes(context, true)
            .iter()
            .map(|scope| qualify(scope, name))
            .chain(std::iter::once(name.to_string()))
            .map(|candidate| SpecialType::from_metadata_name(&candidate))
            .find(|special| *special != SpecialType::None)
            .unwrap_or(SpecialType::None)
    }

    /// Whether an attribute application at `context` binds to the attribute
    /// class with the given fully-qualified metadata name
    #[must_use]
    pub fn attribute_binds_to(
        &self,
        attribute: &AttributeSyntax,
        metadata_name: &str,
        context: NodeId,
    ) -> bool {
        if !simple_name_matches(&attribute.name, metadata_name) {
            return false;
        }

        let (target_namespace, _) = split_qualified(metadata_name);
        let (written, rooted) = attribute
            .name
            .strip_prefix(GLOBAL_PREFIX)
            .map_or((attribute.name.as_str(), false), |rest| (rest, true));
        let (qualifier, _) = split_qualified(written);

        if rooted {
            return qualifier == target_namespace;
        }

        // usings import types, never namespaces a qualified name could start from
        self.lookup_scopes(context, qualifier.is_empty())
            .iter()
            .any(|scope| qualify(scope, qualifier) == target_namespace)
    }

    /// Namespaces searched for a name used at `context`, innermost first
    fn lookup_scopes(&self, context: NodeId, include_usings: bool) -> Vec<NamespaceSymbol> {
        let mut scopes = Vec::new();
        let mut current = Some(self.enclosing_namespace(context));
        while let Some(namespace) = current {
            current = namespace.containing_namespace();
            scopes.push(namespace);
        }
        if include_usings {
            scopes.extend(self.usings_in_scope(context));
        }
        scopes
    }
}

/// Cheap syntactic check: does the written attribute name end in the simple
/// name of `metadata_name`, with or without the `Attribute` suffix?
#[must_use]
pub fn simple_name_matches(written: &str, metadata_name: &str) -> bool {
    let (_, target) = split_qualified(metadata_name);
    let (_, simple) = split_qualified(written.strip_prefix(GLOBAL_PREFIX).unwrap_or(written));

    simple == target
        || target
            .strip_suffix(ATTRIBUTE_SUFFIX)
            .is_some_and(|shortened| simple == shortened)
}

fn split_qualified(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or(("", name))
}

fn qualify(scope: &NamespaceSymbol, name: &str) -> String {
    match (scope.is_global(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => scope.segments().join("."),
        (false, false) => format!("{}.{name}", scope.segments().join(".")),
    }
}

const fn predefined_special_type(predefined: PredefinedType) -> SpecialType {
    match predefined {
        PredefinedType::Void => SpecialType::Void,
        PredefinedType::String => SpecialType::String,
        PredefinedType::Bool => SpecialType::Boolean,
        PredefinedType::Int => SpecialType::Int32,
        PredefinedType::Long => SpecialType::Int64,
        PredefinedType::Double => SpecialType::Double,
        PredefinedType::Char => SpecialType::Char,
        PredefinedType::Object => SpecialType::Object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_syntax::{FileId, ParameterSyntax, SyntaxNode, TypeDeclarationKind};

    struct Fixture {
        tree: SyntaxTree,
        class: NodeId,
        nested: NodeId,
        method: NodeId,
    }

    fn fixture() -> Fixture {
        let mut builder = SyntaxTree::builder(FileId(0));
        let root = builder.root();
        builder.push(root, SyntaxNode::using("System"));
        let outer = builder.push(root, SyntaxNode::namespace("Company.Product"));
        let inner = builder.push(outer, SyntaxNode::namespace("Greetings"));
        let class = builder.push(
            inner,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, "Outer")
                .with_modifiers(["partial"]),
        );
        let nested = builder.push(
            class,
            SyntaxNode::type_declaration(TypeDeclarationKind::RecordStruct, "Inner")
                .with_modifiers(["partial"]),
        );
        let method = builder.push(
            nested,
            SyntaxNode::method("void", "Speak")
                .with_modifiers(["public", "static", "partial"])
                .with_parameter(ParameterSyntax::new("String", "name")),
        );
        Fixture {
            tree: builder.finish(),
            class,
            nested,
            method,
        }
    }

    #[test]
    fn test_nested_namespaces_concatenate() {
        let fixture = fixture();
        let model = SemanticModel::new(&fixture.tree);
        assert_eq!(
            model.enclosing_namespace(fixture.method),
            NamespaceSymbol::from_dotted("Company.Product.Greetings")
        );
        assert!(model.enclosing_namespace(fixture.tree.root()).is_global());
    }

    #[test]
    fn test_declared_method() {
        let fixture = fixture();
        let model = SemanticModel::new(&fixture.tree);
        let method = model.declared_method(fixture.method).expect("method symbol");

        assert_eq!(method.name, "Speak");
        assert!(method.is_static);
        assert!(method.is_partial);
        assert!(method.returns_void());
        assert_eq!(method.containing_type.name, "Inner");
        assert_eq!(method.containing_type.kind, TypeKind::Struct);
        assert_eq!(
            method
                .containing_type
                .containing_type
                .as_ref()
                .map(|outer| outer.name.as_str()),
            Some("Outer")
        );
        let parameter_type = method.parameters[0].ty.as_ref().expect("typed parameter");
        assert_eq!(parameter_type.special, SpecialType::String, "String via using System");
    }

    #[test]
    fn test_declared_method_rejects_non_methods() {
        let fixture = fixture();
        let model = SemanticModel::new(&fixture.tree);
        assert!(model.declared_method(fixture.class).is_none());
        assert!(model.declared_type(fixture.nested).is_some());
    }

    #[test]
    fn test_named_special_types() {
        let fixture = fixture();
        let model = SemanticModel::new(&fixture.tree);
        let resolve = |text: &str| model.resolve_type(&TypeSyntax::parse(text), fixture.method).special;

        assert_eq!(resolve("string"), SpecialType::String);
        assert_eq!(resolve("System.String"), SpecialType::String);
        assert_eq!(resolve("global::System.String"), SpecialType::String);
        assert_eq!(resolve("Int32"), SpecialType::Int32);
        assert_eq!(resolve("StringBuilder"), SpecialType::None);
    }

    #[test]
    fn test_nullable_annotation_keeps_reference_types() {
        let fixture = fixture();
        let model = SemanticModel::new(&fixture.tree);
        let resolve = |text: &str| model.resolve_type(&TypeSyntax::parse(text), fixture.method);

        let annotated = resolve("string?");
        assert_eq!(annotated.special, SpecialType::String);
        assert_eq!(annotated.display, "string?");
        assert_eq!(resolve("System.String?").special, SpecialType::String);
        assert_eq!(resolve("String?").special, SpecialType::String, "String via using System");
        assert_eq!(resolve("object?").special, SpecialType::Object);
        assert_eq!(resolve("int?").special, SpecialType::None);
    }

    #[test]
    fn test_string_without_using_is_not_special() {
        let mut builder = SyntaxTree::builder(FileId(0));
        let root = builder.root();
        let class = builder.push(
            root,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, "Plain"),
        );
        let tree = builder.finish();
        let model = SemanticModel::new(&tree);

        assert_eq!(
            model.resolve_type(&TypeSyntax::parse("String"), class).special,
            SpecialType::None
        );
    }

    #[test]
    fn test_simple_name_matches() {
        let metadata = "SourceGeneratorSample.Greetings.SayHello2Attribute";
        assert!(simple_name_matches("SayHello2", metadata));
        assert!(simple_name_matches("SayHello2Attribute", metadata));
        assert!(simple_name_matches("Greetings.SayHello2", metadata));
        assert!(simple_name_matches("global::SourceGeneratorSample.Greetings.SayHello2", metadata));
        assert!(!simple_name_matches("SayHello", metadata));
        assert!(!simple_name_matches("Obsolete", metadata));
    }

    #[test]
    fn test_attribute_binding_through_scopes() {
        let metadata = "Company.Product.Greetings.Loud";
        let fixture = fixture();
        let model = SemanticModel::new(&fixture.tree);
        let binds = |name: &str| {
            model.attribute_binds_to(&AttributeSyntax::new(name), metadata, fixture.method)
        };

        assert!(binds("Loud"), "enclosing namespace");
        assert!(!binds("LoudAttribute"), "suffix is only ever dropped, never added");
        assert!(binds("Greetings.Loud"), "relative to Company.Product");
        assert!(binds("Product.Greetings.Loud"), "relative to Company");
        assert!(binds("global::Company.Product.Greetings.Loud"));
        assert!(!binds("global::Greetings.Loud"));
        assert!(!binds("Other.Loud"));
    }

    #[test]
    fn test_attribute_binding_through_usings() {
        let metadata = "SourceGeneratorSample.Greetings.SayHello2Attribute";
        let mut builder = SyntaxTree::builder(FileId(0));
        let root = builder.root();
        builder.push(root, SyntaxNode::using("SourceGeneratorSample.Greetings"));
        let namespace = builder.push(root, SyntaxNode::namespace("Consumer"));
        let class = builder.push(
            namespace,
            SyntaxNode::type_declaration(TypeDeclarationKind::Class, "Robot"),
        );
        let tree = builder.finish();
        let model = SemanticModel::new(&tree);

        assert!(model.attribute_binds_to(&AttributeSyntax::new("SayHello2"), metadata, class));
        assert!(model.attribute_binds_to(
            &AttributeSyntax::new("SayHello2Attribute"),
            metadata,
            class
        ));
        assert!(
            !model.attribute_binds_to(&AttributeSyntax::new("Greetings.SayHello2"), metadata, class),
            "usings do not import namespaces"
        );
    }
}
