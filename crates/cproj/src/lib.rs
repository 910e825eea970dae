//! cproj - text-menu project manager for small C projects
//!
//! Tracks the files of a named project, persists the list to a binary
//! record, and hands every real job to an external program.
//!
//! ## Architecture
//!
//! - **Project** (`project/`): name handling, file registry, binary record
//! - **Process** (`process/`): invocation values and the runner trait
//! - **Driver** (`driver/`): parallel compile and link orchestration
//! - **Menu** (`menu/`): interactive read-eval loop and input tokenizer
//! - **Common** (`common/`): error type and fatal diagnostics

pub mod common;
pub mod config;
pub mod driver;
pub mod logging;
pub mod menu;
pub mod process;
pub mod project;

// Re-exports for convenience
pub use common::{DiagnosticReporter, ProjectError, ProjectResult};
pub use config::{Config, Toolchain};
pub use driver::{BuildOrchestrator, BuildPlan, CleanReport};
pub use menu::{Command, MenuController};
pub use process::{ExitOutcome, Invocation, ProcessRunner, SystemRunner};
pub use project::{FileRegistry, Project, ProjectName, ProjectStore};
