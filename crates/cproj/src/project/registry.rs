//! In-memory set of project files

use crate::common::{ProjectError, ProjectResult};
use std::fs;
use std::path::Path;

/// Longest file name a record slot can hold
pub const MAX_NAME_LEN: usize = 255;

/// Ordered, duplicate-free list of project files with a capacity limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRegistry {
    files: Vec<String>,
    max_files: usize,
}

impl FileRegistry {
    pub fn new(max_files: usize) -> Self {
        Self {
            files: Vec::new(),
            max_files,
        }
    }

    /// Build a registry from persisted names without re-validating them
    pub fn from_files(files: Vec<String>, max_files: usize) -> Self {
        Self { files, max_files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn is_full(&self) -> bool {
        self.files.len() >= self.max_files
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Append a file.
    ///
    /// The extension check is a substring match on `.c` / `.h`, so `foo.ch`
    /// is accepted.
    pub fn add(&mut self, name: &str) -> ProjectResult<()> {
        if self.is_full() {
            return Err(ProjectError::capacity_exceeded(self.max_files));
        }
        if !name.contains(".c") && !name.contains(".h") {
            return Err(ProjectError::invalid_extension(name));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ProjectError::NameTooLong {
                name: name.to_string(),
                max: MAX_NAME_LEN,
            });
        }
        if self.contains(name) {
            return Err(ProjectError::duplicate_file(name));
        }
        self.files.push(name.to_string());
        Ok(())
    }

    /// Delete `name` from `dir` on disk, then drop it from the list.
    ///
    /// If the unlink fails the registry is left untouched.
    pub fn remove(&mut self, dir: &Path, name: &str) -> ProjectResult<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ProjectError::file_not_found(name))?;
        fs::remove_file(dir.join(name))?;
        self.files.remove(index);
        Ok(())
    }
}
