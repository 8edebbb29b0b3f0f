//! Generator completing methods annotated with `[SayHello2]`

use crate::collector::CandidateBatch;
use crate::emitter::emit_batch;
use crate::error::GeneratorError;
use crate::host::{GeneratorContext, SourceGenerator};
use crate::matcher::is_annotated_candidate_syntax;
use crate::projector::project;
use crate::{ATTRIBUTE_SUFFIX, SAY_HELLO_ATTRIBUTE};
use sc_semantic::Compilation;
use tracing::debug;

/// Incremental-path generator: one fragment per valid annotated method
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingAttributeGenerator;

impl GreetingAttributeGenerator {
    /// Identifier of this generator
    pub const NAME: &'static str = "attribute";

    /// Locates, filters and projects every annotated method of a pass
    #[must_use]
    pub fn collect(compilation: &Compilation) -> CandidateBatch {
        compilation
            .for_attribute_with_metadata_name(SAY_HELLO_ATTRIBUTE, is_annotated_candidate_syntax, project)
            .into_iter()
            .collect()
    }
}

impl SourceGenerator for GreetingAttributeGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, context: &mut dyn GeneratorContext) -> Result<(), GeneratorError> {
        let batch = Self::collect(context.compilation());
        debug!(records = batch.len(), "collected annotated methods");

        for fragment in emit_batch(&batch, ATTRIBUTE_SUFFIX)? {
            context.add_source(&fragment.hint_name, fragment.source_text)?;
        }
        Ok(())
    }
}
