//! Interactive menu loop
//!
//! Each iteration prints the menu, reads one numeric choice and runs the
//! matching [`Command`]. Operation errors become a single status line and
//! the loop continues; only the exit choice (or end of input) stops it.

mod input;

pub use input::{words, Prompt, Word};

use crate::common::{ProjectError, ProjectResult};
use crate::config::{Config, LEAK_CHECK_FLAG};
use crate::driver::BuildOrchestrator;
use crate::process::{local_program, Invocation, ProcessRunner};
use crate::project::Project;
use std::io::{BufRead, Write};

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewFile = 1,
    OpenFile = 2,
    DeleteFile = 3,
    Build = 4,
    Clean = 5,
    Run = 6,
    Debug = 7,
    CheckMemory = 8,
    Exit = 9,
}

/// Dispatch table in display order
pub const MENU: [Command; 9] = [
    Command::NewFile,
    Command::OpenFile,
    Command::DeleteFile,
    Command::Build,
    Command::Clean,
    Command::Run,
    Command::Debug,
    Command::CheckMemory,
    Command::Exit,
];

impl Command {
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::NewFile => "New File",
            Command::OpenFile => "Open File",
            Command::DeleteFile => "Delete File",
            Command::Build => "Build Project",
            Command::Clean => "Clean Project",
            Command::Run => "Run Project",
            Command::Debug => "Debug Project",
            Command::CheckMemory => "Check Memory Leakage",
            Command::Exit => "Exit",
        }
    }

    pub fn from_choice(choice: u32) -> Option<Self> {
        MENU.iter().copied().find(|c| c.number() == choice)
    }

    /// Parse a typed choice; anything but a listed number is `None`
    pub fn from_word(word: &Word) -> Option<Self> {
        match word {
            Word::Number(n) => n.parse().ok().and_then(Self::from_choice),
            Word::Text(_) => None,
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Owns the read-eval loop over one project
pub struct MenuController<'a, R, W> {
    project: Project,
    config: &'a Config,
    runner: &'a dyn ProcessRunner,
    prompt: Prompt<R>,
    out: W,
}

impl<'a, R: BufRead, W: Write> MenuController<'a, R, W> {
    pub fn new(
        project: Project,
        config: &'a Config,
        runner: &'a dyn ProcessRunner,
        input: R,
        out: W,
    ) -> Self {
        Self {
            project,
            config,
            runner,
            prompt: Prompt::new(input),
            out,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Run until the exit choice or end of input.
    ///
    /// Only failures to print the menu or read a choice are returned.
    pub fn run(&mut self) -> ProjectResult<()> {
        loop {
            self.print_menu()?;
            let Some(word) = self.prompt.read_word()? else {
                tracing::info!("input closed, leaving menu");
                return Ok(());
            };
            let Some(command) = Command::from_word(&word) else {
                writeln!(self.out, "Invalid choice.")?;
                continue;
            };

            tracing::debug!(?command, "dispatching");
            match self.dispatch(command) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => {
                    tracing::debug!(?command, error = ?e, "operation failed");
                    writeln!(self.out, "{e}")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> ProjectResult<()> {
        writeln!(self.out, "\nMenu:")?;
        for command in MENU {
            writeln!(self.out, "{}. {}", command.number(), command.label())?;
        }
        write!(self.out, "Enter choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> ProjectResult<Flow> {
        match command {
            Command::NewFile => self.new_file()?,
            Command::OpenFile => self.open_file()?,
            Command::DeleteFile => self.delete_file()?,
            Command::Build => self.build()?,
            Command::Clean => self.clean()?,
            Command::Run => self.run_program()?,
            Command::Debug => self.debug()?,
            Command::CheckMemory => self.check_memory()?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn ask(&mut self, question: &str) -> ProjectResult<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        Ok(self.prompt.read_word()?.map(Word::into_string))
    }

    fn ask_arguments(&mut self) -> ProjectResult<Vec<String>> {
        write!(self.out, "Enter command line arguments: ")?;
        self.out.flush()?;
        Ok(self.prompt.read_words()?)
    }

    fn edit(&self, file: &str) -> ProjectResult<()> {
        let editor = &self.config.toolchain.editor;
        let invocation = Invocation::new(editor, self.project.dir()).arg(file);
        self.runner.run(&invocation).check(editor)
    }

    fn new_file(&mut self) -> ProjectResult<()> {
        if self.project.files().is_full() {
            return Err(ProjectError::capacity_exceeded(self.project.files().max_files()));
        }
        let Some(file) = self.ask("Enter file name (.c or .h): ")? else {
            return Ok(());
        };
        self.project.add_file(&file)?;
        self.edit(&file)
    }

    fn open_file(&mut self) -> ProjectResult<()> {
        let Some(file) = self.ask("Enter file name: ")? else {
            return Ok(());
        };
        if !self.project.contains(&file) {
            return Err(ProjectError::file_not_found(file));
        }
        self.edit(&file)
    }

    fn delete_file(&mut self) -> ProjectResult<()> {
        let Some(file) = self.ask("Enter file name: ")? else {
            return Ok(());
        };
        self.project.remove_file(&file)?;
        writeln!(self.out, "Deleted {file}.")?;
        Ok(())
    }

    fn build(&mut self) -> ProjectResult<()> {
        BuildOrchestrator::new(self.runner, &self.config.toolchain).build(&self.project)?;
        writeln!(self.out, "Build successful.")?;
        Ok(())
    }

    fn clean(&mut self) -> ProjectResult<()> {
        BuildOrchestrator::new(self.runner, &self.config.toolchain).clean(&self.project);
        writeln!(self.out, "Cleaned.")?;
        Ok(())
    }

    fn require_executable(&self) -> ProjectResult<()> {
        if self.project.has_executable() {
            Ok(())
        } else {
            Err(ProjectError::executable_missing(self.project.executable()))
        }
    }

    fn run_program(&mut self) -> ProjectResult<()> {
        self.require_executable()?;
        let args = self.ask_arguments()?;
        let program = local_program(self.project.executable());
        let invocation = Invocation::new(&program, self.project.dir()).args(args);
        self.runner.run(&invocation).check(&program)
    }

    fn debug(&mut self) -> ProjectResult<()> {
        self.require_executable()?;
        let debugger = &self.config.toolchain.debugger;
        let invocation =
            Invocation::new(debugger, self.project.dir()).arg(self.project.executable());
        self.runner.run(&invocation).check(debugger)
    }

    fn check_memory(&mut self) -> ProjectResult<()> {
        self.require_executable()?;
        let args = self.ask_arguments()?;
        let memcheck = &self.config.toolchain.memcheck;
        let invocation = Invocation::new(memcheck, self.project.dir())
            .arg(LEAK_CHECK_FLAG)
            .arg(local_program(self.project.executable()))
            .args(args);
        self.runner.run(&invocation).check(memcheck)
    }
}
