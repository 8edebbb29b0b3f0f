//! Generator completing the `SayHelloTo` partial method

use crate::emitter::emit_partial_method;
use crate::error::GeneratorError;
use crate::host::{GeneratorContext, SourceGenerator, visit_compilation};
use crate::matcher::enclosing_type;
use crate::scanner::PartialMethodReceiver;
use crate::PARTIAL_METHOD_SUFFIX;

/// Eager-path generator: one fragment per pass at most
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingPartialMethodGenerator;

impl GreetingPartialMethodGenerator {
    /// Identifier of this generator
    pub const NAME: &'static str = "partial-method";
}

impl SourceGenerator for GreetingPartialMethodGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, context: &mut dyn GeneratorContext) -> Result<(), GeneratorError> {
        let mut receiver = PartialMethodReceiver::new();
        visit_compilation(context.compilation(), &mut receiver);

        let Some(type_name) = receiver
            .into_target()
            .and_then(|method| enclosing_type(&method))
            .map(|ty| ty.node().name.clone())
        else {
            return Ok(());
        };

        let fragment = emit_partial_method(&type_name, PARTIAL_METHOD_SUFFIX);
        context.add_source(&fragment.hint_name, fragment.source_text)
    }
}
