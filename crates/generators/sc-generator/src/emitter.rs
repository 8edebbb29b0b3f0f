//! Emitter: renders fragments and assigns their logical file names
//!
//! All fragment text comes out of [`FragmentTemplate::render`]. Output is
//! bit-exact: four-space indentation, `\n` line endings, no trailing newline.

use crate::error::GeneratorError;
use crate::record::CandidateRecord;
use crate::{GREETINGS_NAMESPACE, TARGET_METHOD};
use rustc_hash::FxHashSet;
use sc_semantic::{GLOBAL_PREFIX, NamespaceSymbol, SymbolDisplayFormat, TypeKind};
use tracing::debug;

const INDENT: &str = "    ";

/// Documentation placed on the partial-method implementation
const PARTIAL_METHOD_DOCS: &[&str] = &[
    "/// <summary>",
    "/// 和固定的人打招呼。",
    "/// </summary>",
    "/// <param name=\"name\">表示对谁打招呼。指定一个字符串，表示其人的名字。</param>",
];

/// A generated source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmittedFragment {
    /// Logical file name, unique within a pass
    pub hint_name: String,
    /// Full source text
    pub source_text: String,
}

/// Named slots of the fragment template
#[derive(Debug, Clone, Copy)]
pub struct FragmentTemplate<'slots> {
    /// File-scoped namespace; the declaration is omitted when empty
    pub namespace: &'slots str,
    /// `class`, `struct` or `interface`
    pub type_keyword: &'slots str,
    /// Simple name of the partial type
    pub type_name: &'slots str,
    /// Documentation lines placed above the method
    pub method_docs: &'slots [&'slots str],
    /// Modifiers exactly as written on the stub
    pub modifiers: &'slots str,
    /// Method name
    pub method_name: &'slots str,
    /// Name of the sole string parameter
    pub parameter_name: &'slots str,
}

impl FragmentTemplate<'_> {
    /// Renders the fragment text
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![
            "// <auto-generated/>".to_string(),
            String::new(),
            "#nullable enable".to_string(),
        ];
        if !self.namespace.is_empty() {
            lines.push(format!("namespace {};", self.namespace));
        }
        lines.push(String::new());
        lines.push(format!("partial {} {}", self.type_keyword, self.type_name));
        lines.push("{".to_string());
        lines.extend(self.method_docs.iter().map(|doc| format!("{INDENT}{doc}")));
        lines.push(format!(
            "{INDENT}{} void {}(string {})",
            self.modifiers, self.method_name, self.parameter_name
        ));
        lines.push(format!(
            "{INDENT}{INDENT}=> global::System.Console.WriteLine($\"Hello, {{{}}}!\");",
            self.parameter_name
        ));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// Renders a namespace fully qualified, without the `global::` root prefix
#[must_use]
pub fn namespace_display(namespace: &NamespaceSymbol) -> String {
    strip_global_prefix(&namespace.to_display_string(SymbolDisplayFormat::FullyQualified)).to_string()
}

/// Removes one leading `global::`, if present
#[must_use]
pub fn strip_global_prefix(name: &str) -> &str {
    name.strip_prefix(GLOBAL_PREFIX).unwrap_or(name)
}

/// Keyword introducing a partial declaration of `kind`
///
/// # Errors
///
/// Returns [`GeneratorError::UnsupportedTypeKind`] for enums and delegates
pub fn type_kind_keyword(kind: TypeKind, type_name: &str) -> Result<&'static str, GeneratorError> {
    match kind {
        TypeKind::Class => Ok("class"),
        TypeKind::Struct => Ok("struct"),
        TypeKind::Interface => Ok("interface"),
        TypeKind::Enum | TypeKind::Delegate => Err(GeneratorError::UnsupportedTypeKind {
            type_name: type_name.to_string(),
            kind,
        }),
    }
}

/// Hands out logical file names that are unique within one pass
#[derive(Debug, Default)]
pub struct FileNameAllocator {
    taken: FxHashSet<String>,
}

impl FileNameAllocator {
    /// Creates an allocator with no name taken
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `<type><suffix>`; on collision `<type>.<member><suffix>`, then a
    /// numeric counter before the suffix
    pub fn allocate(&mut self, type_name: &str, member_name: &str, suffix: &str) -> String {
        let preferred = [
            format!("{type_name}{suffix}"),
            format!("{type_name}.{member_name}{suffix}"),
        ];
        let name = preferred
            .into_iter()
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| {
                (2_usize..)
                    .map(|counter| format!("{type_name}.{member_name}.{counter}{suffix}"))
                    .find(|candidate| !self.taken.contains(candidate))
                    .unwrap_or_default()
            });
        self.taken.insert(name.clone());
        name
    }
}

/// Eager-path fragment completing `SayHelloTo` in `type_name`
#[must_use]
pub fn emit_partial_method(type_name: &str, suffix: &str) -> EmittedFragment {
    let template = FragmentTemplate {
        namespace: GREETINGS_NAMESPACE,
        type_keyword: "class",
        type_name,
        method_docs: PARTIAL_METHOD_DOCS,
        modifiers: "public static partial",
        method_name: TARGET_METHOD,
        parameter_name: "name",
    };
    debug!(type_name, "emitting partial method implementation");

    EmittedFragment {
        hint_name: format!("{type_name}{suffix}"),
        source_text: template.render(),
    }
}

/// Incremental-path fragment for one record
///
/// # Errors
///
/// Returns [`GeneratorError::UnsupportedTypeKind`] if the record's type kind
/// has no partial keyword
pub fn emit_record(
    record: &CandidateRecord,
    hint_name: String,
) -> Result<EmittedFragment, GeneratorError> {
    let type_keyword = type_kind_keyword(record.type_kind, &record.type_name)?;
    let namespace = namespace_display(&record.namespace);
    let modifiers = record.modifiers().to_string();

    let template = FragmentTemplate {
        namespace: &namespace,
        type_keyword,
        type_name: &record.type_name,
        method_docs: &[],
        modifiers: &modifiers,
        method_name: &record.member_name,
        parameter_name: &record.parameter_name,
    };
    debug!(%hint_name, method = %record.member_name, "emitting annotated method implementation");

    Ok(EmittedFragment {
        hint_name,
        source_text: template.render(),
    })
}

/// Renders a whole batch, or nothing if any record fails
///
/// # Errors
///
/// Returns the first [`GeneratorError::UnsupportedTypeKind`] encountered
pub fn emit_batch<'batch>(
    records: impl IntoIterator<Item = &'batch CandidateRecord>,
    suffix: &str,
) -> Result<Vec<EmittedFragment>, GeneratorError> {
    let mut names = FileNameAllocator::new();
    records
        .into_iter()
        .map(|record| {
            let hint_name = names.allocate(&record.type_name, &record.member_name, suffix);
            emit_record(record, hint_name)
        })
        .collect()
}
