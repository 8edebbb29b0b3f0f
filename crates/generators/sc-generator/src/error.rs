//! Error types for source generation

use sc_semantic::TypeKind;

/// Hard failures of a generator pass.
///
/// Shape mismatches are not errors: candidates that do not fit are dropped
/// silently and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// A record reached the emitter with a kind that has no partial keyword
    #[error("cannot emit a partial `{kind}` for `{type_name}`")]
    UnsupportedTypeKind {
        /// Enclosing type that carried the kind
        type_name: String,
        /// The offending kind
        kind: TypeKind,
    },

    /// Two fragments of one generator share a logical file name
    #[error("generator `{generator}` added `{hint_name}` more than once")]
    DuplicateHintName {
        /// Generator that produced both fragments
        generator: String,
        /// The repeated file name
        hint_name: String,
    },
}
