//! Error types and fatal diagnostic reporting

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

/// Errors raised by project operations.
///
/// The `Display` text of each variant is the status line shown to the user.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Maximum number of files reached ({max}).")]
    CapacityExceeded { max: usize },

    #[error("File must be .c or .h: {name}")]
    InvalidExtension { name: String },

    #[error("File already exists in project: {name}")]
    DuplicateFile { name: String },

    #[error("File not in project: {name}")]
    FileNotFound { name: String },

    #[error("File name is longer than {max} bytes: {name}")]
    NameTooLong { name: String, max: usize },

    #[error("Project name must end with .proj: {name}")]
    InvalidProjectName { name: String },

    #[error("Failed to start {program}: {message}")]
    SpawnFailure { program: String, message: String },

    #[error("{program} terminated abnormally")]
    AbnormalTermination { program: String },

    #[error("{program} exited with status {code}")]
    ExitStatus { program: String, code: i32 },

    /// `failed` lists the sources whose compile did not exit 0
    #[error("Compilation failed.")]
    CompileFailure { failed: Vec<String> },

    #[error("Linking failed.")]
    LinkFailure,

    #[error("Executable not found. Build first.")]
    ExecutableMissing { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjectError {
    pub fn capacity_exceeded(max: usize) -> Self {
        Self::CapacityExceeded { max }
    }

    pub fn invalid_extension(name: impl Into<String>) -> Self {
        Self::InvalidExtension { name: name.into() }
    }

    pub fn duplicate_file(name: impl Into<String>) -> Self {
        Self::DuplicateFile { name: name.into() }
    }

    pub fn file_not_found(name: impl Into<String>) -> Self {
        Self::FileNotFound { name: name.into() }
    }

    pub fn spawn_failure(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SpawnFailure {
            program: program.into(),
            message: message.into(),
        }
    }

    pub fn executable_missing(name: impl Into<String>) -> Self {
        Self::ExecutableMissing { name: name.into() }
    }
}

pub type ProjectResult<T> = Result<T, ProjectError>;

/// Reporter for errors that end the program before the menu starts
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    /// Emit a fatal error with its chain of causes as notes
    pub fn report_fatal(&self, error: &anyhow::Error) {
        let notes = error
            .chain()
            .skip(1)
            .map(|cause| format!("caused by: {cause}"))
            .collect();
        let diagnostic = Diagnostic::<usize>::error()
            .with_message(error.to_string())
            .with_notes(notes);

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
