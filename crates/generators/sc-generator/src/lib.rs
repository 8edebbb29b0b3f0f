//! Greeting source generators
//!
//! Two generators share one pipeline of small pure stages:
//!
//! - [`GreetingPartialMethodGenerator`] scans every node once and completes
//!   the first `partial void SayHelloTo(...)` stub it finds.
//! - [`GreetingAttributeGenerator`] asks the host for methods annotated with
//!   `SourceGeneratorSample.Greetings.SayHello2Attribute`, projects each one
//!   to a [`CandidateRecord`], collects the pass and emits one fragment per
//!   record.
//!
//! Generators never print and never cache; the host may rerun or memoize
//! any stage.

pub mod collector;
pub mod emitter;
pub mod error;
pub mod host;
pub mod matcher;
pub mod partial_method;
pub mod projector;
pub mod record;
pub mod scanner;
pub mod use_attribute;

#[cfg(test)]
mod test_support;

pub use collector::CandidateBatch;
pub use emitter::{EmittedFragment, FileNameAllocator, FragmentTemplate};
pub use error::GeneratorError;
pub use host::{GeneratorContext, SourceGenerator, SyntaxReceiver};
pub use partial_method::GreetingPartialMethodGenerator;
pub use record::CandidateRecord;
pub use scanner::PartialMethodReceiver;
pub use use_attribute::GreetingAttributeGenerator;

/// Metadata name of the attribute driving [`GreetingAttributeGenerator`]
pub const SAY_HELLO_ATTRIBUTE: &str = "SourceGeneratorSample.Greetings.SayHello2Attribute";

/// Stub completed by [`GreetingPartialMethodGenerator`]
pub const TARGET_METHOD: &str = "SayHelloTo";

/// Namespace of every partial-method fragment
pub const GREETINGS_NAMESPACE: &str = "SourceGeneratorSample.Greetings";

/// File name suffix of partial-method fragments
pub const PARTIAL_METHOD_SUFFIX: &str = ".g.cs";

/// File name suffix of attribute fragments
pub const ATTRIBUTE_SUFFIX: &str = ".GreetingGenerator_UseAttribute.g.cs";

/// Every generator in this crate, in a stable order
#[must_use]
pub fn all_generators() -> Vec<Box<dyn SourceGenerator>> {
    vec![
        Box::new(GreetingPartialMethodGenerator),
        Box::new(GreetingAttributeGenerator),
    ]
}
