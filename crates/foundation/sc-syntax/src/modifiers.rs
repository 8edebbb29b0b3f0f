//! Declaration modifier sets

use std::fmt;

/// The `partial` keyword: on a type it marks the type as open for generated
/// members, on a method it marks the body as supplied elsewhere.
pub const PARTIAL: &str = "partial";
/// The `static` keyword
pub const STATIC: &str = "static";
/// The `public` keyword
pub const PUBLIC: &str = "public";
/// The `global` keyword: on a using directive it imports for every file
pub const GLOBAL: &str = "global";

/// Modifier tokens attached to a declaration.
///
/// Tokens keep their source order so they can be copied verbatim into
/// generated code. Membership tests ignore order and compare exactly.
/// When the set was read from source, the text from the first token to the
/// last (comments and spacing included) is kept and displayed as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    tokens: Vec<String>,
    written: Option<String>,
}

impl ModifierSet {
    /// Creates an empty modifier set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the source text spanning the tokens
    #[must_use]
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.written = Some(text.into());
        self
    }

    /// Source text spanning the tokens, if the set was read from source
    #[must_use]
    pub fn source_text(&self) -> Option<&str> {
        self.written.as_deref()
    }

    /// Appends a token in source order.
    ///
    /// The set no longer matches any source text afterwards.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
        self.written = None;
    }

    /// Case-sensitive exact membership test
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|existing| existing == token)
    }

    /// Whether no modifier was written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Tokens in source order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
            written: None,
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(written) = &self.written {
            return formatter.write_str(written);
        }
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                formatter.write_str(" ")?;
            }
            formatter.write_str(token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_ignores_order() {
        let first: ModifierSet = ["public", "static", "partial"].into_iter().collect();
        let second: ModifierSet = ["partial", "public", "static"].into_iter().collect();

        for token in [PUBLIC, STATIC, PARTIAL] {
            assert!(first.contains(token));
            assert!(second.contains(token));
        }
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let modifiers: ModifierSet = ["Partial", "STATIC"].into_iter().collect();
        assert!(!modifiers.contains(PARTIAL));
        assert!(!modifiers.contains(STATIC));
        assert!(modifiers.contains("Partial"));
    }

    #[test]
    fn test_membership_is_exact() {
        let modifiers: ModifierSet = ["partially"].into_iter().collect();
        assert!(!modifiers.contains(PARTIAL));
    }

    #[test]
    fn test_display_preserves_source_order() {
        let modifiers: ModifierSet = ["internal", "static", "partial"].into_iter().collect();
        assert_eq!(modifiers.to_string(), "internal static partial");
        assert_eq!(ModifierSet::new().to_string(), "");
    }

    #[test]
    fn test_display_prefers_source_text() {
        let modifiers: ModifierSet = ["public", "static", "partial"].into_iter().collect();
        let modifiers = modifiers.with_source_text("public   static /* keep */ partial");

        assert!(modifiers.contains(STATIC));
        assert_eq!(modifiers.to_string(), "public   static /* keep */ partial");

        let mut extended = modifiers;
        extended.push("extern");
        assert_eq!(extended.to_string(), "public static partial extern");
    }
}
