//! Symbol display formats

/// Prefix of fully-qualified names
pub const GLOBAL_PREFIX: &str = "global::";

/// How a symbol name is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolDisplayFormat {
    /// `global::A.B`; the global namespace renders as `global::`
    FullyQualified,
    /// `A.B`; the global namespace renders as the empty string
    #[default]
    Minimal,
}

impl SymbolDisplayFormat {
    /// Joins qualified name segments in this format
    #[must_use]
    pub fn render_qualified(self, segments: &[String]) -> String {
        let dotted = segments.join(".");
        match self {
            Self::FullyQualified => format!("{GLOBAL_PREFIX}{dotted}"),
            Self::Minimal => dotted,
        }
    }
}
