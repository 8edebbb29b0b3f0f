//! Rich error reporting for the parser
//!
//! Note: These struct fields are read by miette's `#[derive(Diagnostic)]`
//! expansion when a report is rendered.

#![allow(unused_assignments, reason = "fields are consumed by the miette derive")]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Syntax error with rich diagnostic information
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum SyntaxError {
    /// Input that is not valid at this position
    #[error("unexpected token `{token}`")]
    #[diagnostic(code(parser::unexpected_token), help("this token is not valid here"))]
    UnexpectedToken {
        /// What was found
        token: String,
        /// Source location
        #[label("unexpected token")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// A token the grammar requires is absent
    #[error("expected `{expected}`, found `{found}`")]
    #[diagnostic(code(parser::missing_token), help("try adding `{expected}` here"))]
    MissingToken {
        /// What was expected
        expected: String,
        /// What was actually found
        found: String,
        /// Source location where it should be
        #[label("expected `{expected}` here")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// Opening delimiter without its closing partner
    #[error("this file contains an unclosed delimiter")]
    #[diagnostic(code(parser::unclosed_delimiter))]
    UnclosedDelimiter {
        /// The opening character
        opening_char: char,
        /// The expected closing character
        closing_char: char,
        /// Opening delimiter location
        #[label("unclosed delimiter")]
        opening: SourceSpan,
        /// Location where closing was expected
        #[label("expected `{closing_char}`")]
        expected_close: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// Malformed declaration
    #[error("invalid {construct}")]
    #[diagnostic(code(parser::invalid_syntax))]
    InvalidSyntax {
        /// Type of construct, e.g. "method declaration"
        construct: String,
        /// How the construct should look
        #[help]
        suggestion: Option<String>,
        /// Source location
        #[label("{construct} is invalid")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// The grammar could not produce a tree at all
    #[error("failed to parse source: {reason}")]
    #[diagnostic(code(parser::parse_failed))]
    ParseFailed {
        /// Reason for failure
        reason: String,
    },
}

impl SyntaxError {
    /// Re-attaches the error to a named source, e.g. the real file path
    #[must_use]
    pub fn with_source(self, filename: impl AsRef<str>, source: impl Into<String>) -> Self {
        let named_source = NamedSource::new(filename, source.into());
        match self {
            Self::UnexpectedToken { token, span, .. } => Self::UnexpectedToken {
                token,
                span,
                src: named_source,
            },
            Self::MissingToken {
                expected,
                found,
                span,
                ..
            } => Self::MissingToken {
                expected,
                found,
                span,
                src: named_source,
            },
            Self::UnclosedDelimiter {
                opening_char,
                closing_char,
                opening,
                expected_close,
                ..
            } => Self::UnclosedDelimiter {
                opening_char,
                closing_char,
                opening,
                expected_close,
                src: named_source,
            },
            Self::InvalidSyntax {
                construct,
                suggestion,
                span,
                ..
            } => Self::InvalidSyntax {
                construct,
                suggestion,
                span,
                src: named_source,
            },
            other @ Self::ParseFailed { .. } => other,
        }
    }

    /// Byte offset of the primary location, if the error has one
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::MissingToken { span, .. }
            | Self::InvalidSyntax { span, .. } => Some(span.offset()),
            Self::UnclosedDelimiter { expected_close, .. } => Some(expected_close.offset()),
            Self::ParseFailed { .. } => None,
        }
    }
}
