//! Binary project record
//!
//! Layout:
//! - count: native-endian `i32`
//! - `count` name slots of [`NAME_SLOT_LEN`] bytes, NUL padded
//!
//! The record has no version or checksum, and the count is stored in native
//! byte order, so a record only reads back on a machine of the same
//! endianness.

use super::registry::{FileRegistry, MAX_NAME_LEN};
use crate::common::{ProjectError, ProjectResult};
use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Width of one name slot: the longest name plus its terminator
pub const NAME_SLOT_LEN: usize = MAX_NAME_LEN + 1;

const COUNT_LEN: usize = size_of::<i32>();

/// Loads and saves the file list of one project
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. A missing record yields an empty registry.
    pub fn load(&self, max_files: usize) -> ProjectResult<FileRegistry> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no project record, starting empty");
                return Ok(FileRegistry::new(max_files));
            }
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);

        let mut count_bytes = [0u8; COUNT_LEN];
        reader.read_exact(&mut count_bytes)?;
        let count = i32::from_ne_bytes(count_bytes);
        let count = usize::try_from(count).map_err(|_| {
            io::Error::new(
                ErrorKind::InvalidData,
                format!("negative file count {count} in {}", self.path.display()),
            )
        })?;
        if count > max_files {
            tracing::warn!(count, max_files, "project record holds more files than allowed");
        }

        // The count is untrusted until its slots have been read
        let mut files = Vec::with_capacity(count.min(max_files));
        let mut slot = [0u8; NAME_SLOT_LEN];
        for _ in 0..count {
            reader.read_exact(&mut slot)?;
            files.push(decode_slot(&slot)?);
        }

        tracing::debug!(path = %self.path.display(), files = files.len(), "loaded project record");
        Ok(FileRegistry::from_files(files, max_files))
    }

    /// Rewrite the record from scratch.
    ///
    /// A failed write leaves the record truncated; there is no rollback.
    pub fn save(&self, registry: &FileRegistry) -> ProjectResult<()> {
        let record = encode_record(registry.files())?;
        fs::write(&self.path, record).map_err(|e| {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "failed to save project record"
            );
            ProjectError::Io(e)
        })?;
        tracing::debug!(
            path = %self.path.display(),
            files = registry.len(),
            "saved project record"
        );
        Ok(())
    }
}

fn encode_record(files: &[String]) -> ProjectResult<Vec<u8>> {
    let count = i32::try_from(files.len())
        .map_err(|_| io::Error::new(ErrorKind::InvalidInput, "too many files for record"))?;

    let mut record = Vec::with_capacity(COUNT_LEN + files.len() * NAME_SLOT_LEN);
    record.extend_from_slice(&count.to_ne_bytes());
    for name in files {
        let bytes = name.as_bytes();
        let len = bytes.len().min(MAX_NAME_LEN);
        record.extend_from_slice(&bytes[..len]);
        record.resize(record.len() + NAME_SLOT_LEN - len, 0);
    }
    Ok(record)
}

fn decode_slot(slot: &[u8]) -> ProjectResult<String> {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8(slot[..end].to_vec())
        .map_err(|e| io::Error::new(ErrorKind::InvalidData, e).into())
}
