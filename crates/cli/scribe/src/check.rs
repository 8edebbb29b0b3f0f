//! Check command implementation

use crate::discovery::find_source_files;
use crate::generate::{load_config, project_dir};
use crate::report::render_syntax_errors;
use anyhow::{Result, bail};
use colored::Colorize;
use sc_driver::{FileSyntaxErrors, SourceFiles};
use sc_generator::host::visit_compilation;
use sc_generator::matcher::enclosing_type;
use sc_generator::{GreetingAttributeGenerator, PartialMethodReceiver};
use sc_parser::parse_source;
use sc_semantic::Compilation;
use std::path::Path;
use std::sync::Arc;

/// Synthesis candidates found in a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of files parsed
    pub files: usize,
    /// Type whose `SayHelloTo` stub the partial-method generator completes
    pub partial_method: Option<String>,
    /// `Type.Method` of every annotated method the attribute generator completes
    pub annotated: Vec<String>,
}

/// Parses the project, reports syntax errors and lists candidates
///
/// # Errors
///
/// Returns an error if sources cannot be read or any file has syntax errors
pub fn check(path: &Path) -> Result<CheckReport> {
    println!("{} project at {}", "Checking".green().bold(), path.display());

    let project_dir = project_dir(path);
    let config = load_config(&project_dir, None)?;
    let mut files = SourceFiles::new();
    for file in find_source_files(path, Some(&project_dir.join(&config.output.dir)))? {
        files.load_path(&file)?;
    }
    if files.is_empty() {
        bail!("No source files found in {}", path.display());
    }

    let mut trees = Vec::new();
    let mut syntax_errors = Vec::new();
    for (file, source) in files.iter() {
        let result = parse_source(file, &source.text);
        let path = source.path.display().to_string();
        if !result.errors.is_empty() {
            syntax_errors.push(FileSyntaxErrors {
                file,
                errors: result
                    .errors
                    .into_iter()
                    .map(|error| error.with_source(&path, source.text.clone()))
                    .collect(),
            });
        }
        trees.extend(result.tree.map(Arc::new));
    }
    let compilation = Compilation::new(trees);

    let mut receiver = PartialMethodReceiver::new();
    visit_compilation(&compilation, &mut receiver);
    let report = CheckReport {
        files: files.len(),
        partial_method: receiver
            .into_target()
            .and_then(|method| enclosing_type(&method))
            .map(|ty| ty.node().name.clone()),
        annotated: GreetingAttributeGenerator::collect(&compilation)
            .iter()
            .map(|record| format!("{}.{}", record.type_name, record.member_name))
            .collect(),
    };

    println!("  {} {} source files", "Found:".bold(), report.files);
    match &report.partial_method {
        Some(type_name) => println!("  {} {type_name}.SayHelloTo", "partial-method:".bold()),
        None => println!("  {} no candidate", "partial-method:".bold()),
    }
    if report.annotated.is_empty() {
        println!("  {} no candidate", "attribute:".bold());
    }
    for candidate in &report.annotated {
        println!("  {} {candidate}", "attribute:".bold());
    }

    let error_count = render_syntax_errors(&syntax_errors);
    if error_count > 0 {
        eprintln!("{} {} syntax errors found", "Failed:".red().bold(), error_count);
        bail!("Check failed with {error_count} errors");
    }

    println!("{} No errors found", "Success:".green().bold());
    Ok(report)
}
