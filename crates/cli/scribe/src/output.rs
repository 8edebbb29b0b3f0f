//! Writing generated fragments to disk

use anyhow::{Context, Result};
use sc_driver::RunResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the manifest written next to the generated files
pub const MANIFEST_FILE: &str = "manifest.json";

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Generator that produced the file
    pub generator: String,
    /// Logical file name
    pub hint_name: String,
    /// Path relative to the output directory
    pub path: PathBuf,
    /// Size of the text in bytes
    pub bytes: usize,
}

/// Contents of `manifest.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputManifest {
    /// Every file written, in generator order
    pub files: Vec<ManifestEntry>,
}

impl OutputManifest {
    /// Load a manifest written by [`write_outputs`]
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }
}

/// Writes `<out>/<generator>/<hint>` for every fragment plus the manifest.
///
/// Each generator's directory is cleared first so files from earlier runs
/// do not linger.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written
pub fn write_outputs(out_dir: &Path, result: &RunResult) -> Result<OutputManifest> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut manifest = OutputManifest::default();
    for run in &result.results {
        let generator_dir = out_dir.join(run.generator);
        if generator_dir.exists() {
            std::fs::remove_dir_all(&generator_dir)
                .with_context(|| format!("Failed to clear {}", generator_dir.display()))?;
        }
        if run.sources.is_empty() {
            continue;
        }
        std::fs::create_dir_all(&generator_dir)
            .with_context(|| format!("Failed to create {}", generator_dir.display()))?;

        for source in &run.sources {
            let path = generator_dir.join(&source.hint_name);
            std::fs::write(&path, &source.source_text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            manifest.files.push(ManifestEntry {
                generator: run.generator.to_string(),
                hint_name: source.hint_name.clone(),
                path: Path::new(run.generator).join(&source.hint_name),
                bytes: source.source_text.len(),
            });
        }
    }

    let manifest_path = out_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    std::fs::write(&manifest_path, json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(manifest)
}
