//! Registry of the source files that make up a compilation

use crate::error::DriverError;
use rustc_hash::FxHashMap;
use sc_syntax::FileId;
use std::path::{Path, PathBuf};

/// Data associated with a file
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Path the file was registered under
    pub path: PathBuf,
    /// Current text
    pub text: String,
    /// Bumped on every change of `text`
    pub revision: u32,
}

/// Tracks source files by path and id
#[derive(Debug, Default)]
pub struct SourceFiles {
    files: FxHashMap<FileId, SourceFile>,
    paths: FxHashMap<PathBuf, FileId>,
    next_id: u32,
}

impl SourceFiles {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file path and returns its id; registering twice yields
    /// the same id
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> FileId {
        let path = path.as_ref().to_path_buf();
        if let Some(&file_id) = self.paths.get(&path) {
            return file_id;
        }

        let file_id = FileId::new(self.next_id);
        self.next_id += 1;
        self.files.insert(
            file_id,
            SourceFile {
                path: path.clone(),
                text: String::new(),
                revision: 0,
            },
        );
        self.paths.insert(path, file_id);
        file_id
    }

    /// Registers `path` with in-memory `text`
    pub fn add_file(&mut self, path: impl AsRef<Path>, text: impl Into<String>) -> FileId {
        let file_id = self.register_file(path);
        if let Some(file) = self.files.get_mut(&file_id) {
            Self::replace_text(file, text.into());
        }
        file_id
    }

    /// Replaces the text of a registered file
    ///
    /// # Errors
    ///
    /// Returns an error if the file was never registered
    pub fn set_text(&mut self, file_id: FileId, text: impl Into<String>) -> Result<(), DriverError> {
        let file = self
            .files
            .get_mut(&file_id)
            .ok_or(DriverError::FileNotFound(file_id))?;
        Self::replace_text(file, text.into());
        Ok(())
    }

    /// Reads a registered file from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file was never registered or cannot be read
    pub fn load_file(&mut self, file_id: FileId) -> Result<(), DriverError> {
        let path = self.path(file_id)?.to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|source| DriverError::Io { path, source })?;
        self.set_text(file_id, text)
    }

    /// Registers and reads a file from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<FileId, DriverError> {
        let file_id = self.register_file(path);
        self.load_file(file_id)?;
        Ok(file_id)
    }

    /// Removes a file from the registry
    pub fn remove_file(&mut self, file_id: FileId) -> Option<SourceFile> {
        let file = self.files.remove(&file_id)?;
        self.paths.remove(&file.path);
        Some(file)
    }

    /// Looks up a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file was never registered
    pub fn file(&self, file_id: FileId) -> Result<&SourceFile, DriverError> {
        self.files.get(&file_id).ok_or(DriverError::FileNotFound(file_id))
    }

    /// Path of a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file was never registered
    pub fn path(&self, file_id: FileId) -> Result<&Path, DriverError> {
        Ok(&self.file(file_id)?.path)
    }

    /// Text of a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file was never registered
    pub fn text(&self, file_id: FileId) -> Result<&str, DriverError> {
        Ok(&self.file(file_id)?.text)
    }

    /// Id registered for `path`
    #[must_use]
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.paths.get(path.as_ref()).copied()
    }

    /// Files in registration order
    #[must_use]
    pub fn iter(&self) -> Vec<(FileId, &SourceFile)> {
        let mut files: Vec<_> = self.files.iter().map(|(id, file)| (*id, file)).collect();
        files.sort_by_key(|(id, _)| *id);
        files
    }

    /// Number of registered files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn replace_text(file: &mut SourceFile, text: String) {
        if file.text != text {
            file.text = text;
            file.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_registration() {
        let mut files = SourceFiles::new();
        let first = files.register_file("Greeter.cs");
        let second = files.register_file("Greeter.cs");
        assert_eq!(first, second);
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_revision_only_bumps_on_change() {
        let mut files = SourceFiles::new();
        let id = files.add_file("Greeter.cs", "class A {}");
        files.set_text(id, "class A {}").expect("registered");
        assert_eq!(files.file(id).expect("registered").revision, 1);

        files.set_text(id, "class B {}").expect("registered");
        assert_eq!(files.file(id).expect("registered").revision, 2);
        assert_eq!(files.text(id).expect("registered"), "class B {}");
    }

    #[test]
    fn test_unknown_file() {
        let mut files = SourceFiles::new();
        let error = files.set_text(FileId(7), "").expect_err("unknown");
        assert_eq!(error.to_string(), "file not found: file#7");
    }

    #[test]
    fn test_iter_in_registration_order() {
        let mut files = SourceFiles::new();
        for name in ["b.cs", "a.cs", "c.cs"] {
            files.add_file(name, "");
        }
        let paths: Vec<_> = files.iter().iter().map(|(_, file)| file.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("b.cs"), PathBuf::from("a.cs"), PathBuf::from("c.cs")]);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Robot.cs");
        std::fs::write(&path, "partial class Robot {}").expect("write");

        let mut files = SourceFiles::new();
        let id = files.load_path(&path).expect("load");
        assert_eq!(files.text(id).expect("registered"), "partial class Robot {}");
        assert_eq!(files.file_id(&path), Some(id));

        let missing = files.load_path(dir.path().join("Missing.cs"));
        assert!(matches!(missing, Err(DriverError::Io { .. })));
    }

    #[test]
    fn test_remove_file() {
        let mut files = SourceFiles::new();
        let id = files.add_file("Greeter.cs", "");
        assert!(files.remove_file(id).is_some());
        assert!(files.file_id("Greeter.cs").is_none());
        assert!(files.is_empty());
    }
}
