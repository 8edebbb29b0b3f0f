//! In-memory host for unit tests

use crate::error::GeneratorError;
use crate::host::GeneratorContext;
use sc_semantic::Compilation;
use sc_syntax::SyntaxTree;
use std::sync::Arc;

/// Records every fragment a generator adds
pub struct RecordingContext {
    compilation: Compilation,
    pub sources: Vec<(String, String)>,
}

impl RecordingContext {
    pub fn from_trees(trees: Vec<SyntaxTree>) -> Self {
        Self {
            compilation: Compilation::new(trees.into_iter().map(Arc::new).collect()),
            sources: Vec::new(),
        }
    }

    pub fn hint_names(&self) -> Vec<&str> {
        self.sources.iter().map(|(hint, _)| hint.as_str()).collect()
    }
}

impl GeneratorContext for RecordingContext {
    fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    fn add_source(&mut self, hint_name: &str, source_text: String) -> Result<(), GeneratorError> {
        if self.sources.iter().any(|(hint, _)| hint == hint_name) {
            return Err(GeneratorError::DuplicateHintName {
                generator: "test".to_string(),
                hint_name: hint_name.to_string(),
            });
        }
        self.sources.push((hint_name.to_string(), source_text));
        Ok(())
    }
}
