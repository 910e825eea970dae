//! cproj - text-menu project manager for small C projects
//!
//! Usage: cproj [OPTIONS] <PROJECT_DIR> <PROJECT_NAME>

use anyhow::Context;
use clap::{ArgAction, Parser as ClapParser};
use cproj::common::DiagnosticReporter;
use cproj::config::{Config, Toolchain, DEFAULT_MAX_FILES};
use cproj::logging::{init_logging, LogConfig};
use cproj::{MenuController, Project, ProjectName, SystemRunner};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "cproj")]
#[command(version)]
#[command(about = "Text-menu project manager for small C projects", long_about = None)]
struct Args {
    /// Project directory (created if missing)
    project_dir: PathBuf,

    /// Project record name, must end with .proj
    project_name: String,

    /// Editor used to create and open files
    #[arg(long, default_value = "vim")]
    editor: String,

    /// Compiler invoked once per source file
    #[arg(long, default_value = "gcc")]
    cc: String,

    /// Linker driver (defaults to the compiler)
    #[arg(long)]
    ld: Option<String>,

    /// Debugger
    #[arg(long, default_value = "gdb")]
    debugger: String,

    /// Memory leak checker
    #[arg(long, default_value = "valgrind")]
    memcheck: String,

    /// Maximum number of files in the project
    #[arg(long, default_value_t = DEFAULT_MAX_FILES)]
    max_files: usize,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            toolchain: Toolchain {
                editor: self.editor.clone(),
                compiler: self.cc.clone(),
                linker: self.ld.clone().unwrap_or_else(|| self.cc.clone()),
                debugger: self.debugger.clone(),
                memcheck: self.memcheck.clone(),
            },
            max_files: self.max_files,
        }
    }
}

/// Exit status for a rejected command line: help and version output are
/// not failures, every usage error exits with 1
fn exit_code_for(error: &clap::Error) -> i32 {
    i32::from(error.use_stderr())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = exit_code_for(&e);
            let _ = e.print();
            process::exit(code);
        }
    };
    let reporter = DiagnosticReporter::new();

    let log_config = LogConfig::from_verbosity(args.verbose).with_log_file(args.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("warning: could not open log file: {e}");
    }

    if let Err(e) = run(&args) {
        reporter.report_fatal(&e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let name = ProjectName::parse(&args.project_name)?;

    if !args.project_dir.exists() {
        fs::create_dir_all(&args.project_dir).with_context(|| {
            format!("cannot create project directory {}", args.project_dir.display())
        })?;
        tracing::info!(dir = %args.project_dir.display(), "created project directory");
    }
    let dir = args
        .project_dir
        .canonicalize()
        .with_context(|| format!("cannot enter project directory {}", args.project_dir.display()))?;
    anyhow::ensure!(dir.is_dir(), "{} is not a directory", dir.display());

    let config = args.config();
    let project = Project::open(&dir, name, config.max_files)
        .with_context(|| format!("cannot load project {}", args.project_name))?;

    let runner = SystemRunner::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu =
        MenuController::new(project, &config, &runner, stdin.lock(), stdout.lock());
    menu.run()?;
    Ok(())
}
