//! Subprocess invocation
//!
//! Every external tool (editor, compiler, linker, debugger, leak checker and
//! the built program) is described by an [`Invocation`] and executed through a
//! [`ProcessRunner`]. Only the exit status of a child is interpreted; its
//! stdio is inherited from the controlling terminal.

use crate::common::{ProjectError, ProjectResult};
use std::fmt;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus};

/// One external program run: what to execute, with which arguments, where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Why a child did not exit normally
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abnormal {
    /// Killed by a signal
    Signal(Option<i32>),
    /// The child could not be created or waited on
    Spawn(String),
}

/// Classified result of a finished child
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    Failure(i32),
    Abnormal(Abnormal),
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Success)
    }

    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(0) => ExitOutcome::Success,
            Some(code) => ExitOutcome::Failure(code),
            None => ExitOutcome::Abnormal(Abnormal::Signal(signal_of(status))),
        }
    }

    /// Turn a non-success outcome of `program` into an error
    pub fn check(self, program: &str) -> ProjectResult<()> {
        match self {
            ExitOutcome::Success => Ok(()),
            ExitOutcome::Failure(code) => Err(ProjectError::ExitStatus {
                program: program.to_string(),
                code,
            }),
            ExitOutcome::Abnormal(Abnormal::Spawn(message)) => {
                Err(ProjectError::spawn_failure(program, message))
            }
            ExitOutcome::Abnormal(Abnormal::Signal(_)) => Err(ProjectError::AbnormalTermination {
                program: program.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Success => write!(f, "exited successfully"),
            ExitOutcome::Failure(code) => write!(f, "exited with status {code}"),
            ExitOutcome::Abnormal(Abnormal::Signal(Some(sig))) => {
                write!(f, "killed by signal {sig}")
            }
            ExitOutcome::Abnormal(Abnormal::Signal(None)) => write!(f, "terminated abnormally"),
            ExitOutcome::Abnormal(Abnormal::Spawn(message)) => {
                write!(f, "could not start: {message}")
            }
        }
    }
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}

/// A launched child that has not been waited on yet
pub trait RunningProcess {
    /// Block until the child terminates
    fn wait(self: Box<Self>) -> ExitOutcome;
}

/// Trait for launching external programs
pub trait ProcessRunner {
    /// Launch without waiting
    fn spawn(&self, invocation: &Invocation) -> std::io::Result<Box<dyn RunningProcess>>;

    /// Launch and block until the child terminates.
    ///
    /// A spawn failure is logged and classified as abnormal termination.
    fn run(&self, invocation: &Invocation) -> ExitOutcome {
        match self.spawn(invocation) {
            Ok(child) => {
                let outcome = child.wait();
                tracing::debug!(command = %invocation, %outcome, "child finished");
                outcome
            }
            Err(e) => spawn_failed(invocation, &e),
        }
    }
}

/// Log a spawn failure and classify it
pub fn spawn_failed(invocation: &Invocation, error: &std::io::Error) -> ExitOutcome {
    tracing::error!(program = %invocation.program, error = %error, "failed to start child");
    ExitOutcome::Abnormal(Abnormal::Spawn(error.to_string()))
}

/// Runs invocations as real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn spawn(&self, invocation: &Invocation) -> std::io::Result<Box<dyn RunningProcess>> {
        tracing::debug!(command = %invocation, cwd = %invocation.cwd.display(), "spawning");
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .spawn()?;
        Ok(Box::new(child))
    }
}

impl RunningProcess for Child {
    fn wait(mut self: Box<Self>) -> ExitOutcome {
        match Child::wait(&mut self) {
            Ok(status) => ExitOutcome::from_status(status),
            Err(e) => {
                tracing::error!(pid = self.id(), error = %e, "failed to wait for child");
                ExitOutcome::Abnormal(Abnormal::Spawn(e.to_string()))
            }
        }
    }
}

/// Name used to launch a program from the working directory instead of `PATH`
pub fn local_program(name: &str) -> String {
    format!("./{name}")
}
