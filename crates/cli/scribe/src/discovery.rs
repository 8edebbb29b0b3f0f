//! Source file discovery

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of C# source files
pub const SOURCE_EXTENSION: &str = "cs";

/// Build output directories never holding hand-written sources
const SKIPPED_DIRS: &[&str] = &["bin", "obj", ".git"];

/// Recursively find all `.cs` files under `path`, sorted.
///
/// `path` may also name a single file. Anything under `exclude` (the
/// generator output directory) is skipped so generated files are never fed
/// back in.
///
/// # Errors
///
/// Returns an error if `path` does not exist
pub fn find_source_files(path: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("No such file or directory: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            let skipped_name = entry.depth() > 0
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name));
            let excluded = exclude.is_some_and(|excluded| entry.path() == excluded);
            !skipped_name && !excluded
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|file| file.extension().is_some_and(|ext| ext == SOURCE_EXTENSION))
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dirs");
        }
        std::fs::write(path, "").expect("write");
    }

    #[test]
    fn test_finds_nested_sources_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        touch(&dir.path().join("src/Robot.cs"));
        touch(&dir.path().join("Greeter.cs"));
        touch(&dir.path().join("README.md"));
        touch(&dir.path().join("obj/Debug/Stale.cs"));
        touch(&dir.path().join("Generated/attribute/Robot.g.cs"));

        let files = find_source_files(dir.path(), Some(&dir.path().join("Generated"))).expect("discover");
        let relative: Vec<_> = files
            .iter()
            .map(|file| file.strip_prefix(dir.path()).expect("under root").to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![PathBuf::from("Greeter.cs"), PathBuf::from("src/Robot.cs")]
        );
    }

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("Greeter.cs");
        touch(&file);
        assert_eq!(find_source_files(&file, None).expect("file"), vec![file]);
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(find_source_files(&dir.path().join("missing"), None).is_err());
    }
}
