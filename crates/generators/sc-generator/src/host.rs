//! Boundary between generators and the host that runs them

use crate::error::GeneratorError;
use sc_semantic::Compilation;
use sc_syntax::SyntaxNodeRef;
use std::ops::ControlFlow;

/// What a generator sees during one pass
pub trait GeneratorContext {
    /// Snapshot of the compilation being generated for
    fn compilation(&self) -> &Compilation;

    /// Hands one generated fragment to the host
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::DuplicateHintName`] if the generator already
    /// added a fragment under `hint_name` during this pass
    fn add_source(&mut self, hint_name: &str, source_text: String) -> Result<(), GeneratorError>;
}

/// A source generator the host runs once per pass
pub trait SourceGenerator: Send + Sync {
    /// Stable identifier, also used as the output directory name
    fn name(&self) -> &'static str;

    /// Runs one pass against `context`
    ///
    /// # Errors
    ///
    /// Returns an error when the pass cannot complete; the host then drops
    /// every fragment this generator produced during the pass
    fn execute(&self, context: &mut dyn GeneratorContext) -> Result<(), GeneratorError>;
}

/// Per-pass visitor over every syntax node of the compilation
pub trait SyntaxReceiver {
    /// Called once per node in traversal order; `Break` ends the walk
    fn on_visit_syntax_node(&mut self, node: &SyntaxNodeRef) -> ControlFlow<()>;
}

/// Drives `receiver` over every tree of `compilation`
pub fn visit_compilation<R: SyntaxReceiver>(compilation: &Compilation, receiver: &mut R) {
    let _ = compilation.walk(&mut |node| receiver.on_visit_syntax_node(node));
}
