//! Attribute binding, namespace rendering and file naming across files

use expect_test::expect_file;
use integration_tests::{TestFixture, fragment, hint_names};

const ROBOT: &str = include_str!("fixtures/robot.cs");
const MIXED_SHAPES: &str = include_str!("fixtures/mixed_shapes.cs");
const GLOBAL_NAMESPACE: &str = include_str!("fixtures/global_namespace.cs");
const NULLABLE: &str = include_str!("fixtures/nullable.cs");
const GLOBAL_USINGS: &str = include_str!("fixtures/global_usings.cs");
const ROBOT_WITHOUT_USINGS: &str = include_str!("fixtures/robot_without_usings.cs");

#[test]
fn test_mixed_shapes_keep_only_valid_targets() {
    let mut fixture = TestFixture::from_sources(&[("Welder.cs", MIXED_SHAPES)]);
    let result = fixture.run();

    assert_eq!(
        hint_names(&result, "attribute"),
        vec![
            "Welder.GreetingGenerator_UseAttribute.g.cs",
            "Welder.Warn.GreetingGenerator_UseAttribute.g.cs",
            "IAnnouncer.GreetingGenerator_UseAttribute.g.cs",
        ]
    );

    let welder = fragment(&result, "attribute", "Welder.GreetingGenerator_UseAttribute.g.cs")
        .expect("Welder fragment emitted");
    expect_file!["golden/Welder.GreetingGenerator_UseAttribute.g.cs"].assert_eq(welder);

    let warn = fragment(&result, "attribute", "Welder.Warn.GreetingGenerator_UseAttribute.g.cs")
        .expect("Warn fragment emitted");
    assert!(warn.contains("    private static partial void Warn(string reason)\n"));

    let announcer = fragment(&result, "attribute", "IAnnouncer.GreetingGenerator_UseAttribute.g.cs")
        .expect("IAnnouncer fragment emitted");
    assert!(announcer.contains("namespace Factory.Line;\n"));
    assert!(announcer.contains("partial interface IAnnouncer\n"));
    assert!(announcer.contains("    static partial void Ping(string target)\n"));
}

#[test]
fn test_global_namespace_has_no_namespace_line() {
    let mut fixture = TestFixture::from_sources(&[("Loose.cs", GLOBAL_NAMESPACE)]);
    let result = fixture.run();

    let text = fragment(&result, "attribute", "Loose.GreetingGenerator_UseAttribute.g.cs")
        .expect("Loose fragment emitted");
    expect_file!["golden/Loose.GreetingGenerator_UseAttribute.g.cs"].assert_eq(text);
}

#[test]
fn test_same_type_name_in_two_namespaces_gets_distinct_files() {
    let elsewhere = ROBOT.replace("SourceGeneratorSample.Robots", "Toys.Robots");
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", ROBOT), ("Toys/Robot.cs", elsewhere.as_str())]);
    let result = fixture.run();

    assert_eq!(result.errors().count(), 0);
    assert_eq!(
        hint_names(&result, "attribute"),
        vec![
            "Robot.GreetingGenerator_UseAttribute.g.cs",
            "Robot.Speak.GreetingGenerator_UseAttribute.g.cs",
        ]
    );

    let second = fragment(&result, "attribute", "Robot.Speak.GreetingGenerator_UseAttribute.g.cs")
        .expect("second Robot fragment emitted");
    assert!(second.contains("namespace Toys.Robots;\n"));
}

#[test]
fn test_unrelated_attribute_with_same_simple_name_does_not_bind() {
    let source = ROBOT.replace(
        "using SourceGeneratorSample.Greetings;",
        "using Impostors.Greetings;",
    );
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", source.as_str())]);
    let result = fixture.run();

    assert!(hint_names(&result, "attribute").is_empty());
}

#[test]
fn test_attribute_namespace_in_scope_binds_without_using() {
    let source = ROBOT
        .replace("using SourceGeneratorSample.Greetings;\n", "")
        .replace("namespace SourceGeneratorSample.Robots;", "namespace SourceGeneratorSample.Greetings;");
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", source.as_str())]);
    let result = fixture.run();

    let text = fragment(&result, "attribute", "Robot.GreetingGenerator_UseAttribute.g.cs")
        .expect("Robot fragment emitted");
    assert!(text.contains("namespace SourceGeneratorSample.Greetings;\n"));
}

#[test]
fn test_nullable_string_parameter_is_completed() {
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", NULLABLE)]);
    let result = fixture.run();

    assert_eq!(
        hint_names(&result, "attribute"),
        vec!["Robot.GreetingGenerator_UseAttribute.g.cs"],
        "int? is not a string"
    );
    let text = fragment(&result, "attribute", "Robot.GreetingGenerator_UseAttribute.g.cs")
        .expect("Robot fragment emitted");
    expect_file!["golden/Robot.nullable.GreetingGenerator_UseAttribute.g.cs"].assert_eq(text);
}

#[test]
fn test_global_usings_apply_to_other_files() {
    let mut fixture = TestFixture::from_sources(&[
        ("GlobalUsings.cs", GLOBAL_USINGS),
        ("Robot.cs", ROBOT_WITHOUT_USINGS),
    ]);
    let result = fixture.run();

    let text = fragment(&result, "attribute", "Robot.GreetingGenerator_UseAttribute.g.cs")
        .expect("Robot fragment emitted");
    assert!(text.contains("namespace Robots;\n"));

    let mut alone = TestFixture::from_sources(&[("Robot.cs", ROBOT_WITHOUT_USINGS)]);
    assert!(hint_names(&alone.run(), "attribute").is_empty());
}

#[test]
fn test_modifiers_are_copied_as_written() {
    let source = ROBOT.replace(
        "public static partial void Speak",
        "public   static /* keep */ partial void Speak",
    );
    let mut fixture = TestFixture::from_sources(&[("Robot.cs", source.as_str())]);
    let result = fixture.run();

    let text = fragment(&result, "attribute", "Robot.GreetingGenerator_UseAttribute.g.cs")
        .expect("Robot fragment emitted");
    assert!(text.contains("\n    public   static /* keep */ partial void Speak(string text)\n"));
}
