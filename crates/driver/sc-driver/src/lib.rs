//! Generator driver and source file registry
//!
//! This crate plays the host's part around the generators: it keeps the
//! source files, parses them, builds the compilation and runs each generator
//! with its own context.

pub mod driver;
pub mod error;
pub mod files;

pub use driver::{FileSyntaxErrors, GeneratorDriver, GeneratorRunResult, RunResult};
pub use error::DriverError;
pub use files::{SourceFile, SourceFiles};
