//! Runs generators over the current state of a [`SourceFiles`] registry
//!
//! The driver owns all caching. Parsed trees are kept per file and reused
//! while the file's text hash is unchanged. When the whole compilation is
//! unchanged since the previous run, generator outputs are reused without
//! running the generators again.

use crate::files::SourceFiles;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHasher};
use sc_generator::{EmittedFragment, GeneratorContext, GeneratorError, SourceGenerator};
use sc_parser::{SyntaxError, parse_source};
use sc_semantic::Compilation;
use sc_syntax::{FileId, SyntaxTree};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Outcome of one generator in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRunResult {
    /// Generator identifier
    pub generator: &'static str,
    /// Fragments in the order the generator added them; empty on error
    pub sources: Vec<EmittedFragment>,
    /// Hard failure of the pass, if any
    pub error: Option<GeneratorError>,
    /// Whether the result was carried over from the previous run
    pub reused: bool,
}

/// Syntax errors of one file
#[derive(Debug, Clone)]
pub struct FileSyntaxErrors {
    /// Offending file
    pub file: FileId,
    /// Errors in source order
    pub errors: Vec<SyntaxError>,
}

/// Everything one run produced
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// One entry per registered generator, in registration order
    pub results: Vec<GeneratorRunResult>,
    /// Files that did not parse cleanly
    pub syntax_errors: Vec<FileSyntaxErrors>,
}

impl RunResult {
    /// Every generated fragment, tagged with its generator
    pub fn sources(&self) -> impl Iterator<Item = (&'static str, &EmittedFragment)> {
        self.results
            .iter()
            .flat_map(|result| result.sources.iter().map(move |source| (result.generator, source)))
    }

    /// Every generator failure
    pub fn errors(&self) -> impl Iterator<Item = (&'static str, &GeneratorError)> {
        self.results
            .iter()
            .filter_map(|result| result.error.as_ref().map(|error| (result.generator, error)))
    }

    /// Result of one generator
    #[must_use]
    pub fn result(&self, generator: &str) -> Option<&GeneratorRunResult> {
        self.results.iter().find(|result| result.generator == generator)
    }
}

struct CachedParse {
    text_hash: u64,
    tree: Option<Arc<SyntaxTree>>,
    errors: Vec<SyntaxError>,
}

/// Host-side generator driver
pub struct GeneratorDriver {
    generators: Vec<Box<dyn SourceGenerator>>,
    parses: FxHashMap<FileId, CachedParse>,
    previous: Option<(u64, Vec<GeneratorRunResult>)>,
}

impl GeneratorDriver {
    /// Creates a driver running `generators` in the given order
    #[must_use]
    pub fn new(generators: Vec<Box<dyn SourceGenerator>>) -> Self {
        Self {
            generators,
            parses: FxHashMap::default(),
            previous: None,
        }
    }

    /// Names of the registered generators
    pub fn generator_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.iter().map(|generator| generator.name())
    }

    /// Parses changed files and runs every generator against the result
    pub fn run(&mut self, files: &SourceFiles) -> RunResult {
        let compilation = self.update_compilation(files);
        let fingerprint = compilation_fingerprint(&compilation, files);

        let mut syntax_errors: Vec<_> = self
            .parses
            .iter()
            .filter(|(_, parse)| !parse.errors.is_empty())
            .map(|(file, parse)| FileSyntaxErrors {
                file: *file,
                errors: parse.errors.clone(),
            })
            .collect();
        syntax_errors.sort_by_key(|errors| errors.file);

        if let Some((previous_fingerprint, previous_results)) = &self.previous
            && *previous_fingerprint == fingerprint
        {
            debug!(fingerprint, "compilation unchanged, reusing generator outputs");
            let results = previous_results
                .iter()
                .cloned()
                .map(|result| GeneratorRunResult {
                    reused: true,
                    ..result
                })
                .collect();
            return RunResult {
                results,
                syntax_errors,
            };
        }

        let results: Vec<_> = self
            .generators
            .iter()
            .map(|generator| run_generator(generator.as_ref(), &compilation))
            .collect();
        info!(
            generators = results.len(),
            fragments = results.iter().map(|result| result.sources.len()).sum::<usize>(),
            "generator pass complete"
        );

        self.previous = Some((fingerprint, results.clone()));
        RunResult {
            results,
            syntax_errors,
        }
    }

    /// Re-parses files whose text changed and drops files that are gone
    fn update_compilation(&mut self, files: &SourceFiles) -> Compilation {
        let entries = files.iter();
        self.parses
            .retain(|file, _| entries.iter().any(|(id, _)| id == file));

        let mut trees = Vec::with_capacity(entries.len());
        for (file, source) in entries {
            let text_hash = hash_text(&source.text);
            let cached = self
                .parses
                .get(&file)
                .is_some_and(|parse| parse.text_hash == text_hash);

            if cached {
                trace!(%file, "parse cache hit");
            } else {
                trace!(%file, path = %source.path.display(), "parsing");
                let result = parse_source(file, &source.text);
                if !result.errors.is_empty() {
                    warn!(%file, errors = result.errors.len(), "syntax errors");
                }
                let path = source.path.display().to_string();
                self.parses.insert(
                    file,
                    CachedParse {
                        text_hash,
                        tree: result.tree.map(Arc::new),
                        errors: result
                            .errors
                            .into_iter()
                            .map(|error| error.with_source(&path, source.text.clone()))
                            .collect(),
                    },
                );
            }

            if let Some(tree) = self.parses.get(&file).and_then(|parse| parse.tree.clone()) {
                trees.push(tree);
            }
        }

        Compilation::new(trees)
    }
}

/// One pass of one generator with a fresh context
fn run_generator(generator: &dyn SourceGenerator, compilation: &Compilation) -> GeneratorRunResult {
    let mut context = PassContext::new(generator.name(), compilation);
    let outcome = generator.execute(&mut context);

    match outcome {
        Ok(()) => {
            debug!(generator = generator.name(), fragments = context.sources.len(), "generator finished");
            GeneratorRunResult {
                generator: generator.name(),
                sources: context.into_sources(),
                error: None,
                reused: false,
            }
        }
        Err(error) => {
            warn!(generator = generator.name(), %error, "generator failed, discarding its outputs");
            GeneratorRunResult {
                generator: generator.name(),
                sources: Vec::new(),
                error: Some(error),
                reused: false,
            }
        }
    }
}

/// [`GeneratorContext`] for a single generator pass
struct PassContext<'compilation> {
    generator: &'static str,
    compilation: &'compilation Compilation,
    sources: IndexMap<String, String>,
}

impl<'compilation> PassContext<'compilation> {
    fn new(generator: &'static str, compilation: &'compilation Compilation) -> Self {
        Self {
            generator,
            compilation,
            sources: IndexMap::new(),
        }
    }

    fn into_sources(self) -> Vec<EmittedFragment> {
        self.sources
            .into_iter()
            .map(|(hint_name, source_text)| EmittedFragment {
                hint_name,
                source_text,
            })
            .collect()
    }
}

impl GeneratorContext for PassContext<'_> {
    fn compilation(&self) -> &Compilation {
        self.compilation
    }

    fn add_source(&mut self, hint_name: &str, source_text: String) -> Result<(), GeneratorError> {
        if self.sources.contains_key(hint_name) {
            return Err(GeneratorError::DuplicateHintName {
                generator: self.generator.to_string(),
                hint_name: hint_name.to_string(),
            });
        }
        self.sources.insert(hint_name.to_string(), source_text);
        Ok(())
    }
}

fn hash_text(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Identity of a compilation: file ids and text hashes in file order
fn compilation_fingerprint(compilation: &Compilation, files: &SourceFiles) -> u64 {
    let mut hasher = FxHasher::default();
    compilation.syntax_trees().len().hash(&mut hasher);
    for (file, source) in files.iter() {
        file.hash(&mut hasher);
        hash_text(&source.text).hash(&mut hasher);
    }
    hasher.finish()
}
