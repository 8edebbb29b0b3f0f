//! End-to-end runs of both generators over small C# fixtures

use expect_test::expect_file;
use integration_tests::{TestFixture, fragment, hint_names};
use sc_generator::GreetingAttributeGenerator;
use sc_semantic::{Compilation, TypeKind};
use sc_syntax::{
    AttributeSyntax, FileId, NodeId, ParameterSyntax, SyntaxNode, SyntaxTree, TypeDeclarationKind,
};
use std::sync::Arc;

const GREETER: &str = include_str!("fixtures/greeter.cs");
const ROBOT: &str = include_str!("fixtures/robot.cs");
const TWO_PARAMETERS: &str = include_str!("fixtures/two_parameters.cs");
const ENUM_HOST: &str = include_str!("fixtures/enum_host.cs");

#[test]
fn test_partial_method_stub_is_completed() {
    let mut fixture = TestFixture::from_sources(&[("Greeter.cs", GREETER)]);
    let result = fixture.run();

    assert!(result.syntax_errors.is_empty());
    assert_eq!(hint_names(&result, "partial-method"), vec!["Greeter.g.cs"]);
    assert!(hint_names(&result, "attribute").is_empty());

    let text = fragment(&result, "partial-method", "Greeter.g.cs").expect("Greeter.g.cs emitted");
    expect_file!["golden/Greeter.g.cs"].assert_eq(text);
}

#[test]
fn test_annotated_method_is_completed() {
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", ROBOT)]);
    let result = fixture.run();

    assert!(hint_names(&result, "partial-method").is_empty());
    assert_eq!(
        hint_names(&result, "attribute"),
        vec!["Robot.GreetingGenerator_UseAttribute.g.cs"]
    );

    let text = fragment(&result, "attribute", "Robot.GreetingGenerator_UseAttribute.g.cs")
        .expect("Robot fragment emitted");
    expect_file!["golden/Robot.GreetingGenerator_UseAttribute.g.cs"].assert_eq(text);
}

#[test]
fn test_two_parameters_emit_nothing() {
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", TWO_PARAMETERS)]);
    let result = fixture.run();

    assert_eq!(result.sources().count(), 0);
    assert_eq!(result.errors().count(), 0);
}

#[test]
fn test_method_written_inside_enum_emits_nothing() {
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", ENUM_HOST)]);
    let result = fixture.run();

    assert_eq!(result.sources().count(), 0);
    assert_eq!(result.errors().count(), 0);
}

/// An enum body holding the method cannot come out of the C# grammar, so
/// the host tree is built directly to reach the containing-kind check.
fn annotated_speak(kind: TypeDeclarationKind) -> (Compilation, NodeId) {
    let mut builder = SyntaxTree::builder(FileId(0));
    let root = builder.root();
    let namespace = builder.push(root, SyntaxNode::namespace("SourceGeneratorSample.Greetings"));
    let robot = builder.push(
        namespace,
        SyntaxNode::type_declaration(kind, "Robot").with_modifiers(["public", "partial"]),
    );
    let speak = builder.push(
        robot,
        SyntaxNode::method("void", "Speak")
            .with_modifiers(["public", "static", "partial"])
            .with_parameter(ParameterSyntax::new("string", "text"))
            .with_attribute(AttributeSyntax::new("SayHello2")),
    );
    (Compilation::new(vec![Arc::new(builder.finish())]), speak)
}

#[test]
fn test_enum_host_is_rejected_by_containing_kind() {
    let (compilation, speak) = annotated_speak(TypeDeclarationKind::Enum);
    let tree = &compilation.syntax_trees()[0];
    let method = compilation
        .semantic_model(tree)
        .declared_method(speak)
        .expect("method resolves inside the enum");
    assert_eq!(method.containing_type.kind, TypeKind::Enum);
    assert!(method.is_static);
    assert!(method.returns_void());

    assert!(GreetingAttributeGenerator::collect(&compilation).is_empty());

    let (class_host, _) = annotated_speak(TypeDeclarationKind::Class);
    assert_eq!(GreetingAttributeGenerator::collect(&class_host).len(), 1);
}

#[test]
fn test_both_generators_in_one_project() {
    let mut fixture = TestFixture::from_sources(&[("Greeter.cs", GREETER), ("Robot.cs", ROBOT)]);
    let result = fixture.run();

    let emitted: Vec<_> = result
        .sources()
        .map(|(generator, source)| (generator, source.hint_name.as_str()))
        .collect();
    assert_eq!(
        emitted,
        vec![
            ("partial-method", "Greeter.g.cs"),
            ("attribute", "Robot.GreetingGenerator_UseAttribute.g.cs"),
        ]
    );
}

#[test]
fn test_only_first_partial_method_stub_is_completed() {
    let second = GREETER.replace("Greeter", "Farewell");
    let mut fixture = TestFixture::from_sources(&[("Greeter.cs", GREETER), ("Farewell.cs", second.as_str())]);
    let result = fixture.run();

    assert_eq!(hint_names(&result, "partial-method"), vec!["Greeter.g.cs"]);
}

#[test]
fn test_non_partial_type_is_ignored() {
    let source = GREETER.replace("public static partial class", "public static class");
    let mut fixture = TestFixture::from_sources(&[("Greeter.cs", source.as_str())]);
    let result = fixture.run();

    assert!(hint_names(&result, "partial-method").is_empty());
}
