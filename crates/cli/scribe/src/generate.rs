//! Generate command implementation

use crate::config::{Config, GeneratorChoice};
use crate::discovery::find_source_files;
use crate::output::{OutputManifest, write_outputs};
use crate::report::render_syntax_errors;
use anyhow::{Result, bail};
use colored::Colorize;
use sc_driver::{GeneratorDriver, SourceFiles};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options of `scribe generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Project directory or single source file
    pub path: PathBuf,
    /// Output directory overriding the configured one
    pub out: Option<PathBuf>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Run only this generator
    pub only: Option<GeneratorChoice>,
}

/// What a successful `generate` produced
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Directory the files were written to
    pub out_dir: PathBuf,
    /// Files written
    pub manifest: OutputManifest,
    /// Number of syntax errors reported (they do not stop generation)
    pub syntax_errors: usize,
}

/// Directory holding the project: `path` itself or the parent of a file
pub(crate) fn project_dir(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    } else {
        path.to_path_buf()
    }
}

/// Loads the explicit config file or the project's `scribe.toml`
pub(crate) fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::from_file(path),
        None => Config::find_in_dir(project_dir),
    }
}

/// Runs every enabled generator over the project and writes the results
///
/// # Errors
///
/// Returns an error if sources or configuration cannot be read, outputs
/// cannot be written, or a generator fails
pub fn generate(options: &GenerateOptions) -> Result<GenerateSummary> {
    let project_dir = project_dir(&options.path);
    let config = load_config(&project_dir, options.config.as_deref())?;
    let out_dir = options
        .out
        .clone()
        .unwrap_or_else(|| project_dir.join(&config.output.dir));

    println!(
        "{} sources in {}",
        "Generating".green().bold(),
        options.path.display()
    );

    let mut files = SourceFiles::new();
    for path in find_source_files(&options.path, Some(&out_dir))? {
        files.load_path(&path)?;
    }
    if files.is_empty() {
        bail!("No source files found in {}", options.path.display());
    }
    println!("  {} {} source files", "Found:".bold(), files.len());

    let mut driver = GeneratorDriver::new(config.generators(options.only));
    debug!(generators = ?driver.generator_names().collect::<Vec<_>>(), "running generators");
    let result = driver.run(&files);

    let syntax_errors = render_syntax_errors(&result.syntax_errors);
    if syntax_errors > 0 {
        eprintln!(
            "{} {} syntax errors, generating from the recovered trees",
            "Warning:".yellow().bold(),
            syntax_errors
        );
    }

    let manifest = write_outputs(&out_dir, &result)?;
    for entry in &manifest.files {
        println!("    {} {}", "✓".green(), entry.path.display());
    }

    let failures: Vec<_> = result.errors().collect();
    for (generator, error) in &failures {
        eprintln!("    {} {generator}: {error}", "✗".red());
    }
    if !failures.is_empty() {
        bail!("{} generators failed", failures.len());
    }

    println!(
        "\n  {} {} files into {}",
        "Finished".green().bold(),
        manifest.files.len(),
        out_dir.display()
    );

    Ok(GenerateSummary {
        out_dir,
        manifest,
        syntax_errors,
    })
}
