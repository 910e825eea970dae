//! Project name validation and artifact name derivation

use crate::common::{ProjectError, ProjectResult};
use std::fmt;

/// Extension every project record name carries
pub const PROJECT_EXTENSION: &str = ".proj";

/// Name of a project record, e.g. `calc.proj`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a project name: it must end with `.proj` and have a non-empty stem
    pub fn parse(raw: &str) -> ProjectResult<Self> {
        match raw.strip_suffix(PROJECT_EXTENSION) {
            Some(stem) if !stem.is_empty() => Ok(Self(raw.to_string())),
            _ => Err(ProjectError::InvalidProjectName {
                name: raw.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Executable produced by linking: the name without its `.proj` suffix
    pub fn executable(&self) -> &str {
        &self.0[..self.0.len() - PROJECT_EXTENSION.len()]
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a registry entry is a translation unit to compile
pub fn is_source(name: &str) -> bool {
    name.ends_with(".c")
}

/// Object file for a source: the last character replaced by `o`.
///
/// Purely textual; `a.c` becomes `a.o`.
pub fn object_name(source: &str) -> String {
    let mut object = source.to_string();
    object.pop();
    object.push('o');
    object
}
