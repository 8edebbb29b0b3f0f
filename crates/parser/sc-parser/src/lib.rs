//! Parser infrastructure for the host
//!
//! Parsing is error tolerant: a file with syntax errors still yields a
//! declaration tree, and the errors are reported alongside it.

pub mod error;

pub use error::SyntaxError;

use lang_csharp::CSharpLanguage;
use miette::{NamedSource, SourceSpan};
use sc_syntax::{FileId, Language, SyntaxTree};
use tracing::debug;

/// Result of parsing a source file
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Lowered declaration tree
    pub tree: Option<SyntaxTree>,
    /// Syntax errors with detailed diagnostics
    pub errors: Vec<SyntaxError>,
}

impl ParseResult {
    /// Whether the file parsed without any syntax error
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.tree.is_some() && self.errors.is_empty()
    }
}

/// Parse C# source code using the language adapter
pub fn parse_source(file: FileId, source: &str) -> ParseResult {
    let language = CSharpLanguage::new();

    match language.parse(source) {
        Ok(tree) => {
            let mut errors = Vec::new();

            if tree.root_node().has_error() {
                collect_errors(&tree.root_node(), source, &mut errors);
            }
            debug!(%file, errors = errors.len(), "parsed source file");

            ParseResult {
                tree: Some(language.lower(&tree, source, file)),
                errors,
            }
        }
        Err(err) => ParseResult {
            tree: None,
            errors: vec![SyntaxError::ParseFailed {
                reason: format!("{err}"),
            }],
        },
    }
}

fn named_source(source: &str) -> NamedSource<String> {
    NamedSource::new("<input>", source.to_string())
}

/// Helper to create a missing token error
fn missing_token(source: &str, pos: usize, expected: &str) -> SyntaxError {
    let found = source
        .get(pos..)
        .and_then(|rest| rest.split_whitespace().next())
        .map_or_else(|| "end of file".to_string(), ToString::to_string);

    SyntaxError::MissingToken {
        expected: expected.to_string(),
        found,
        span: (pos, 1).into(),
        src: named_source(source),
    }
}

/// Recursively collect error nodes from the tree
fn collect_errors(node: &tree_sitter::Node<'_>, source: &str, errors: &mut Vec<SyntaxError>) {
    if node.is_error() {
        let span: SourceSpan = (node.start_byte(), node.end_byte() - node.start_byte()).into();
        let error = node.parent().map_or_else(
            || unexpected_token(node, source, span),
            |parent| analyze_error_context(&parent, node, source, span),
        );
        errors.push(error);
    } else if node.is_missing() {
        let pos = node.start_byte();
        let expected = node.kind();

        let error = closing_partner(expected)
            .zip(node.parent())
            .and_then(|((opening_char, closing_char), parent)| {
                find_opening_delimiter(&parent, source, opening_char).map(|opening_pos| {
                    SyntaxError::UnclosedDelimiter {
                        opening_char,
                        closing_char,
                        opening: (opening_pos, 1).into(),
                        expected_close: (pos, 1).into(),
                        src: named_source(source),
                    }
                })
            })
            .unwrap_or_else(|| missing_token(source, pos, expected));

        errors.push(error);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(&child, source, errors);
    }
}

fn unexpected_token(node: &tree_sitter::Node<'_>, source: &str, span: SourceSpan) -> SyntaxError {
    let text = source.get(node.byte_range()).unwrap_or_default();
    let token = text.lines().next().unwrap_or(text).trim().to_string();
    SyntaxError::UnexpectedToken {
        token,
        span,
        src: named_source(source),
    }
}

/// Opening delimiter for a missing closing delimiter token
fn closing_partner(expected: &str) -> Option<(char, char)> {
    match expected {
        ")" => Some(('(', ')')),
        "}" => Some(('{', '}')),
        "]" => Some(('[', ']')),
        _ => None,
    }
}

/// Analyze error context to provide more specific error messages
fn analyze_error_context(
    parent: &tree_sitter::Node<'_>,
    error_node: &tree_sitter::Node<'_>,
    source: &str,
    span: SourceSpan,
) -> SyntaxError {
    let unclosed = |opening_char: char, closing_char: char| {
        find_opening_delimiter(parent, source, opening_char).map(|opening_pos| {
            SyntaxError::UnclosedDelimiter {
                opening_char,
                closing_char,
                opening: (opening_pos, 1).into(),
                expected_close: span,
                src: named_source(source),
            }
        })
    };

    match parent.kind() {
        "parameter_list" | "argument_list" => {
            unclosed('(', ')').unwrap_or_else(|| unexpected_token(error_node, source, span))
        }
        "declaration_list" | "block" => unclosed('{', '}').unwrap_or_else(|| {
            SyntaxError::InvalidSyntax {
                construct: "member list".to_string(),
                suggestion: Some("type members must be enclosed in braces `{}`".to_string()),
                span,
                src: named_source(source),
            }
        }),
        "method_declaration" => SyntaxError::InvalidSyntax {
            construct: "method declaration".to_string(),
            suggestion: Some(
                "method declarations have the form: `modifiers return_type Name(parameters) { body }`"
                    .to_string(),
            ),
            span,
            src: named_source(source),
        },
        _ => unexpected_token(error_node, source, span),
    }
}

/// Find the position of an opening delimiter in a node
fn find_opening_delimiter(node: &tree_sitter::Node<'_>, source: &str, delimiter: char) -> Option<usize> {
    let start = node.start_byte();
    source
        .get(start..node.end_byte())?
        .char_indices()
        .find(|(_, character)| *character == delimiter)
        .map(|(idx, _)| start + idx)
}
