//! Declaration trees handed to generators by the host

use crate::modifiers::{GLOBAL, ModifierSet};
use crate::span::{FileId, FileSpan, Span};
use crate::types::TypeSyntax;
use la_arena::{Arena, Idx};
use std::fmt;
use std::sync::Arc;

/// Handle to a node inside a [`SyntaxTree`]
pub type NodeId = Idx<SyntaxNode>;

/// Flavour of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclarationKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `interface`
    Interface,
    /// `record` / `record class`
    Record,
    /// `record struct`
    RecordStruct,
    /// `enum`
    Enum,
}

impl TypeDeclarationKind {
    /// Keyword as it introduces the declaration
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
            Self::Enum => "enum",
        }
    }
}

/// Node kinds the generators care about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of a file
    CompilationUnit,
    /// `using Some.Namespace;`
    UsingDirective,
    /// `namespace A.B { ... }` or file-scoped `namespace A.B;`
    NamespaceDeclaration,
    /// Class, struct, interface, record or enum
    TypeDeclaration(TypeDeclarationKind),
    /// Method declaration, with or without a body
    MethodDeclaration,
    /// Anything else, tagged with the grammar's node kind
    Other(String),
}

impl SyntaxKind {
    /// Whether the node declares a type
    #[must_use]
    pub const fn is_type_declaration(&self) -> bool {
        matches!(self, Self::TypeDeclaration(_))
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompilationUnit => write!(formatter, "compilation_unit"),
            Self::UsingDirective => write!(formatter, "using_directive"),
            Self::NamespaceDeclaration => write!(formatter, "namespace_declaration"),
            Self::TypeDeclaration(kind) => write!(formatter, "{}_declaration", kind.keyword()),
            Self::MethodDeclaration => write!(formatter, "method_declaration"),
            Self::Other(kind) => write!(formatter, "other({kind})"),
        }
    }
}

/// An attribute application such as `[SayHello2]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSyntax {
    /// Name exactly as written, e.g. `SayHello2`, `Ns.SayHello2Attribute`, `global::Ns.SayHello2`
    pub name: String,
    /// Source location
    pub span: Span,
}

impl AttributeSyntax {
    /// Creates an attribute with an empty span
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

/// A formal parameter of a method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSyntax {
    /// Parameter identifier
    pub name: String,
    /// Declared type (absent for lambda-style untyped parameters)
    pub ty: Option<TypeSyntax>,
    /// `ref`, `out`, `this`, `params`, ...
    pub modifiers: ModifierSet,
}

impl ParameterSyntax {
    /// Creates a typed parameter without modifiers
    #[must_use]
    pub fn new(ty: &str, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(TypeSyntax::parse(ty)),
            modifiers: ModifierSet::new(),
        }
    }
}

/// A single declaration node.
///
/// Only the attributes the generators consume are modelled; everything else
/// the host knows about the node stays on the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Node kind
    pub kind: SyntaxKind,
    /// Source location
    pub span: Span,
    /// Identifier text (type or method name, dotted namespace or using target)
    pub name: String,
    /// Modifier tokens in source order
    pub modifiers: ModifierSet,
    /// Attribute applications in source order
    pub attributes: Vec<AttributeSyntax>,
    /// Return type of a method
    pub return_type: Option<TypeSyntax>,
    /// Names of generic type parameters
    pub type_parameters: Vec<String>,
    /// Method parameters
    pub parameters: Vec<ParameterSyntax>,
    /// Enclosing node
    pub parent: Option<NodeId>,
    /// Direct children in declaration order
    pub children: Vec<NodeId>,
}

impl SyntaxNode {
    /// Creates a detached node of the given kind
    #[must_use]
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            span: Span::default(),
            name: String::new(),
            modifiers: ModifierSet::new(),
            attributes: Vec::new(),
            return_type: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Detached type declaration
    #[must_use]
    pub fn type_declaration(kind: TypeDeclarationKind, name: impl Into<String>) -> Self {
        Self::new(SyntaxKind::TypeDeclaration(kind)).with_name(name)
    }

    /// Detached method declaration
    #[must_use]
    pub fn method(return_type: &str, name: impl Into<String>) -> Self {
        Self::new(SyntaxKind::MethodDeclaration)
            .with_name(name)
            .with_return_type(TypeSyntax::parse(return_type))
    }

    /// Detached namespace declaration
    #[must_use]
    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(SyntaxKind::NamespaceDeclaration).with_name(name)
    }

    /// Detached using directive
    #[must_use]
    pub fn using(target: impl Into<String>) -> Self {
        Self::new(SyntaxKind::UsingDirective).with_name(target)
    }

    /// Detached `global using` directive
    #[must_use]
    pub fn global_using(target: impl Into<String>) -> Self {
        Self::using(target).with_modifiers([GLOBAL])
    }

    /// Sets the identifier text
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the source span
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Replaces the modifier set
    #[must_use]
    pub fn with_modifier_set(mut self, modifiers: ModifierSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the modifiers from tokens in source order
    #[must_use]
    pub fn with_modifiers<S: Into<String>>(mut self, modifiers: impl IntoIterator<Item = S>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Adds an attribute application
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Sets the return type
    #[must_use]
    pub fn with_return_type(mut self, return_type: TypeSyntax) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Adds a generic type parameter
    #[must_use]
    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    /// Adds a formal parameter
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSyntax) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Type declaration flavour, if this node declares a type
    #[must_use]
    pub const fn type_declaration_kind(&self) -> Option<TypeDeclarationKind> {
        match self.kind {
            SyntaxKind::TypeDeclaration(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A parsed file: an arena of nodes rooted at a compilation unit
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    file: FileId,
    nodes: Arena<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    /// Starts building a tree for `file`
    #[must_use]
    pub fn builder(file: FileId) -> TreeBuilder {
        TreeBuilder::new(file)
    }

    /// File this tree was parsed from
    #[must_use]
    pub const fn file(&self) -> FileId {
        self.file
    }

    /// The compilation unit
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Looks up a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id]
    }

    /// Direct children of a node in declaration order
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Parent of a node, `None` for the root
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Strict ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Location of a node including its file
    #[must_use]
    pub fn file_span(&self, id: NodeId) -> FileSpan {
        FileSpan::new(self.file, self.nodes[id].span)
    }

    /// Number of nodes in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

/// Incrementally assembles a [`SyntaxTree`], wiring parent and child links
pub struct TreeBuilder {
    file: FileId,
    nodes: Arena<SyntaxNode>,
    root: NodeId,
}

impl TreeBuilder {
    /// Creates a builder holding an empty compilation unit
    #[must_use]
    pub fn new(file: FileId) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(SyntaxNode::new(SyntaxKind::CompilationUnit));
        Self { file, nodes, root }
    }

    /// The compilation unit being built
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Appends `node` as the last child of `parent` and returns its handle
    pub fn push(&mut self, parent: NodeId, mut node: SyntaxNode) -> NodeId {
        node.parent = Some(parent);
        let id = self.nodes.alloc(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// Mutable access for late fix-ups such as span widening
    pub fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        &mut self.nodes[id]
    }

    /// Finishes the tree
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        SyntaxTree {
            file: self.file,
            nodes: self.nodes,
            root: self.root,
        }
    }
}

/// A node together with the shared tree that owns it.
///
/// Equality is identity: same tree allocation and same node.
#[derive(Debug, Clone)]
pub struct SyntaxNodeRef {
    tree: Arc<SyntaxTree>,
    id: NodeId,
}

impl SyntaxNodeRef {
    /// Pairs a shared tree with one of its nodes
    #[must_use]
    pub const fn new(tree: Arc<SyntaxTree>, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// Owning tree
    #[must_use]
    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    /// Node handle inside the tree
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Node data
    #[must_use]
    pub fn node(&self) -> &SyntaxNode {
        self.tree.node(self.id)
    }

    /// Parent node, if any
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree
            .parent(self.id)
            .map(|parent| Self::new(Arc::clone(&self.tree), parent))
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        self.tree
            .ancestors(self.id)
            .map(|ancestor| Self::new(Arc::clone(&self.tree), ancestor))
    }

    /// Direct children in declaration order
    pub fn children(&self) -> impl Iterator<Item = Self> + '_ {
        self.tree
            .children(self.id)
            .iter()
            .map(|child| Self::new(Arc::clone(&self.tree), *child))
    }
}

impl PartialEq for SyntaxNodeRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNodeRef {}
