//! Integration test utilities for Scribe
//!
//! Builds in-memory projects from fixture text or on-disk sample projects and
//! runs the generators over them through the driver.

use anyhow::Result;
use sc_driver::{GeneratorDriver, RunResult, SourceFiles};
use sc_generator::{SourceGenerator, all_generators};
use std::path::Path;
use walkdir::WalkDir;

/// Source files plus a driver that persists across runs
pub struct TestFixture {
    /// Files fed to every run
    pub files: SourceFiles,
    driver: GeneratorDriver,
}

impl TestFixture {
    /// Create an empty fixture running every generator
    pub fn new() -> Self {
        Self::with_generators(all_generators())
    }

    /// Create an empty fixture running only `generators`
    pub fn with_generators(generators: Vec<Box<dyn SourceGenerator>>) -> Self {
        Self {
            files: SourceFiles::new(),
            driver: GeneratorDriver::new(generators),
        }
    }

    /// Create a fixture from `(path, text)` pairs
    pub fn from_sources(sources: &[(&str, &str)]) -> Self {
        let mut fixture = Self::new();
        for (path, text) in sources {
            fixture.files.add_file(path, *text);
        }
        fixture
    }

    /// Load every `.cs` file below `dir`, keyed by its relative path
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked or a file read
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "cs") {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        let mut fixture = Self::new();
        for path in paths {
            let text = std::fs::read_to_string(&path)?;
            let relative = path.strip_prefix(dir).unwrap_or(&path).to_path_buf();
            fixture.files.add_file(relative, text);
        }
        Ok(fixture)
    }

    /// Run the generators over the current files
    pub fn run(&mut self) -> RunResult {
        self.driver.run(&self.files)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Text `generator` emitted under `hint_name`, if any
pub fn fragment<'r>(result: &'r RunResult, generator: &str, hint_name: &str) -> Option<&'r str> {
    result
        .result(generator)?
        .sources
        .iter()
        .find(|source| source.hint_name == hint_name)
        .map(|source| source.source_text.as_str())
}

/// Hint names `generator` emitted, in emission order
pub fn hint_names(result: &RunResult, generator: &str) -> Vec<String> {
    result
        .result(generator)
        .map(|run| run.sources.iter().map(|source| source.hint_name.clone()).collect())
        .unwrap_or_default()
}
