//! Common infrastructure shared by the store, driver and menu

mod error;

pub use error::{DiagnosticReporter, ProjectError, ProjectResult};
