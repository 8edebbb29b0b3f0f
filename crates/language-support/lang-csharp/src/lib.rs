//! C# language adapter
//!
//! Parses C# with tree-sitter and lowers the concrete tree into the
//! declaration tree generators consume. Only declarations are kept;
//! statements and expressions never reach a generator.

use anyhow::Result;
use sc_syntax::{
    AttributeSyntax, FileId, Language, ModifierSet, NodeId, ParameterSyntax, Span, SyntaxKind,
    SyntaxNode, SyntaxTree, TreeBuilder, TypeDeclarationKind, TypeSyntax,
};
use tree_sitter::{Node, Parser, Tree};

/// C# language implementation
pub struct CSharpLanguage;

impl CSharpLanguage {
    /// Creates a new C# language adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for CSharpLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl Language for CSharpLanguage {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn extensions(&self) -> &[&'static str] {
        &["cs"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }

    fn parse(&self, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser.set_language(&self.tree_sitter_language())?;

        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("tree-sitter parse failed"))
    }

    fn lower(&self, tree: &Tree, source: &str, file: FileId) -> SyntaxTree {
        let root_node = tree.root_node();
        let mut lowering = Lowering {
            source,
            builder: SyntaxTree::builder(file),
        };
        let root = lowering.builder.root();
        lowering.builder.node_mut(root).span = span_of(&root_node);
        lowering.lower_members(&root_node, root);
        lowering.builder.finish()
    }
}

/// Lowering state for one file
struct Lowering<'src> {
    source: &'src str,
    builder: TreeBuilder,
}

impl Lowering<'_> {
    /// Lowers the declarations found directly under `container`.
    ///
    /// A file-scoped namespace adopts every member that follows it.
    fn lower_members(&mut self, container: &Node<'_>, parent: NodeId) {
        let mut target = parent;
        let mut cursor = container.walk();
        for child in container.named_children(&mut cursor) {
            match child.kind() {
                "file_scoped_namespace_declaration" => {
                    let namespace = self.lower_namespace(&child, parent);
                    target = namespace;
                }
                "namespace_declaration" => {
                    self.lower_namespace(&child, target);
                }
                "using_directive" => self.lower_using(&child, target),
                "class_declaration"
                | "struct_declaration"
                | "interface_declaration"
                | "record_declaration"
                | "record_struct_declaration"
                | "enum_declaration" => self.lower_type(&child, target),
                "method_declaration" => self.lower_method(&child, target),
                kind if kind.starts_with("preproc_") => self.lower_members(&child, target),
                kind if kind.ends_with("_declaration") => {
                    let node = SyntaxNode::new(SyntaxKind::Other(kind.to_string()))
                        .with_span(span_of(&child))
                        .with_modifier_set(self.modifiers(&child))
                        .with_name(
                            child
                                .child_by_field_name("name")
                                .map(|name| self.compact_text(&name))
                                .unwrap_or_default(),
                        );
                    self.builder.push(target, node);
                }
                _ => {}
            }
        }
    }

    fn lower_namespace(&mut self, node: &Node<'_>, parent: NodeId) -> NodeId {
        let name = node
            .child_by_field_name("name")
            .map(|name| self.compact_text(&name))
            .unwrap_or_default();
        let namespace = self.builder.push(
            parent,
            SyntaxNode::namespace(name).with_span(span_of(node)),
        );

        match node.child_by_field_name("body") {
            Some(body) => self.lower_members(&body, namespace),
            None => self.lower_members(node, namespace),
        }
        namespace
    }

    fn lower_using(&mut self, node: &Node<'_>, parent: NodeId) {
        // Aliases and `using static` do not bring a namespace into scope.
        if node.child_by_field_name("name").is_some() {
            return;
        }
        let mut cursor = node.walk();
        let has_static = node
            .children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == "static");
        if has_static {
            return;
        }

        let mut cursor = node.walk();
        let target = node
            .named_children(&mut cursor)
            .find(|child| {
                matches!(
                    child.kind(),
                    "identifier" | "qualified_name" | "alias_qualified_name"
                )
            })
            .map(|child| self.compact_text(&child));

        if let Some(target) = target {
            let target = strip_global_alias(&target);
            let using = if self.has_keyword(node, "global") {
                SyntaxNode::global_using(target)
            } else {
                SyntaxNode::using(target)
            };
            self.builder.push(parent, using.with_span(span_of(node)));
        }
    }

    fn lower_type(&mut self, node: &Node<'_>, parent: NodeId) {
        let kind = match node.kind() {
            "class_declaration" => TypeDeclarationKind::Class,
            "struct_declaration" => TypeDeclarationKind::Struct,
            "interface_declaration" => TypeDeclarationKind::Interface,
            "enum_declaration" => TypeDeclarationKind::Enum,
            "record_struct_declaration" => TypeDeclarationKind::RecordStruct,
            _ if self.has_keyword(node, "struct") => TypeDeclarationKind::RecordStruct,
            _ => TypeDeclarationKind::Record,
        };

        let mut declaration = SyntaxNode::type_declaration(kind, self.field_text(node, "name"))
            .with_span(span_of(node))
            .with_modifier_set(self.modifiers(node));
        declaration.attributes = self.attributes(node);
        declaration.type_parameters = self.type_parameters(node);
        let type_id = self.builder.push(parent, declaration);

        if kind == TypeDeclarationKind::Enum {
            return;
        }
        let body = node.child_by_field_name("body").or_else(|| {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .find(|child| child.kind() == "declaration_list")
        });
        if let Some(body) = body {
            self.lower_members(&body, type_id);
        }
    }

    fn lower_method(&mut self, node: &Node<'_>, parent: NodeId) {
        let return_type = node
            .child_by_field_name("returns")
            .or_else(|| node.child_by_field_name("type"))
            .map(|ty| TypeSyntax::parse(&self.compact_text(&ty)));

        let mut method = SyntaxNode::new(SyntaxKind::MethodDeclaration)
            .with_name(self.field_text(node, "name"))
            .with_span(span_of(node))
            .with_modifier_set(self.modifiers(node));
        method.return_type = return_type;
        method.attributes = self.attributes(node);
        method.type_parameters = self.type_parameters(node);
        method.parameters = self.parameters(node);
        self.builder.push(parent, method);
    }

    /// Modifier tokens plus the source text from the first to the last
    fn modifiers(&self, node: &Node<'_>) -> ModifierSet {
        let mut cursor = node.walk();
        let tokens: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "modifier")
            .collect();

        let modifiers: ModifierSet = tokens.iter().map(|token| self.compact_text(token)).collect();
        let written = tokens
            .first()
            .zip(tokens.last())
            .and_then(|(first, last)| self.source.get(first.start_byte()..last.end_byte()));
        match written {
            Some(text) => modifiers.with_source_text(text),
            None => modifiers,
        }
    }

    fn attributes(&self, node: &Node<'_>) -> Vec<AttributeSyntax> {
        let mut attributes = Vec::new();
        let mut cursor = node.walk();
        for list in node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "attribute_list")
        {
            let mut list_cursor = list.walk();
            for attribute in list
                .named_children(&mut list_cursor)
                .filter(|child| child.kind() == "attribute")
            {
                let name = attribute
                    .child_by_field_name("name")
                    .or_else(|| attribute.named_child(0))
                    .map(|name| self.compact_text(&name))
                    .unwrap_or_default();
                attributes.push(AttributeSyntax {
                    name,
                    span: span_of(&attribute),
                });
            }
        }
        attributes
    }

    fn type_parameters(&self, node: &Node<'_>) -> Vec<String> {
        let list = node.child_by_field_name("type_parameters").or_else(|| {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .find(|child| child.kind() == "type_parameter_list")
        });
        let Some(list) = list else {
            return Vec::new();
        };

        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|child| child.kind() == "type_parameter")
            .map(|parameter| {
                parameter
                    .child_by_field_name("name")
                    .map_or_else(|| self.compact_text(&parameter), |name| self.compact_text(&name))
            })
            .collect()
    }

    fn parameters(&self, node: &Node<'_>) -> Vec<ParameterSyntax> {
        let list = node.child_by_field_name("parameters").or_else(|| {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .find(|child| child.kind() == "parameter_list")
        });
        let Some(list) = list else {
            return Vec::new();
        };

        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|child| child.kind().contains("parameter"))
            .map(|parameter| {
                let mut modifiers = self.modifiers(&parameter);
                if parameter.kind() != "parameter" && self.has_keyword(&parameter, "params") {
                    modifiers.push("params");
                }
                ParameterSyntax {
                    name: self.field_text(&parameter, "name"),
                    ty: parameter
                        .child_by_field_name("type")
                        .map(|ty| TypeSyntax::parse(&self.compact_text(&ty))),
                    modifiers,
                }
            })
            .collect()
    }

    fn has_keyword(&self, node: &Node<'_>, keyword: &str) -> bool {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == keyword)
    }

    fn field_text(&self, node: &Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|child| self.compact_text(&child))
            .unwrap_or_default()
    }

    /// Node text with all whitespace removed
    fn compact_text(&self, node: &Node<'_>) -> String {
        self.source
            .get(node.byte_range())
            .unwrap_or_default()
            .chars()
            .filter(|character| !character.is_whitespace())
            .collect()
    }
}

fn span_of(node: &Node<'_>) -> Span {
    Span::from_offsets(node.start_byte(), node.end_byte())
}

fn strip_global_alias(name: &str) -> &str {
    name.strip_prefix("global::").unwrap_or(name)
}
