//! Project model: name, working directory, file registry and its record
//!
//! Every mutation of the registry is followed by a save, so the record on
//! disk always mirrors the last successful operation.

mod name;
mod registry;
mod store;

pub use name::{is_source, object_name, ProjectName, PROJECT_EXTENSION};
pub use registry::{FileRegistry, MAX_NAME_LEN};
pub use store::{ProjectStore, NAME_SLOT_LEN};

use crate::common::ProjectResult;
use std::path::{Path, PathBuf};

/// A loaded project rooted in its directory
#[derive(Debug)]
pub struct Project {
    name: ProjectName,
    dir: PathBuf,
    store: ProjectStore,
    files: FileRegistry,
}

impl Project {
    /// Load `name` from `dir`, starting empty when no record exists
    pub fn open(
        dir: impl Into<PathBuf>,
        name: ProjectName,
        max_files: usize,
    ) -> ProjectResult<Self> {
        let dir = dir.into();
        let store = ProjectStore::new(dir.join(name.as_str()));
        let files = store.load(max_files)?;
        tracing::info!(project = %name, files = files.len(), "opened project");
        Ok(Self {
            name,
            dir,
            store,
            files,
        })
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &FileRegistry {
        &self.files
    }

    /// Name of the linked executable, relative to the project directory
    pub fn executable(&self) -> &str {
        self.name.executable()
    }

    pub fn executable_path(&self) -> PathBuf {
        self.dir.join(self.executable())
    }

    pub fn has_executable(&self) -> bool {
        self.executable_path().exists()
    }

    /// Sources that take part in a build, in project order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.files.files().iter().map(String::as_str).filter(|f| is_source(f))
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.contains(file)
    }

    /// Append `file` and persist the record
    pub fn add_file(&mut self, file: &str) -> ProjectResult<()> {
        self.files.add(file)?;
        tracing::info!(file, "added file");
        self.store.save(&self.files)
    }

    /// Unlink `file`, drop it from the list and persist the record
    pub fn remove_file(&mut self, file: &str) -> ProjectResult<()> {
        self.files.remove(&self.dir, file)?;
        tracing::info!(file, "removed file");
        self.store.save(&self.files)
    }
}
