use cproj::process::RunningProcess;
use cproj::{Config, ExitOutcome, Invocation, MenuController, ProcessRunner, Project, ProjectName};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

/// Records every invocation. Editors create the file they open, compilers
/// and linkers create their `-o` output, and a program named in `failing`
/// exits with status 1.
#[derive(Default)]
struct FakeTools {
    calls: RefCell<Vec<Invocation>>,
    failing: Vec<String>,
}

struct Finished(ExitOutcome);

impl RunningProcess for Finished {
    fn wait(self: Box<Self>) -> ExitOutcome {
        self.0
    }
}

impl ProcessRunner for FakeTools {
    fn spawn(&self, invocation: &Invocation) -> io::Result<Box<dyn RunningProcess>> {
        self.calls.borrow_mut().push(invocation.clone());
        if invocation.program == "missing-tool" {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
        }
        if invocation.args.iter().any(|a| self.failing.contains(a)) {
            return Ok(Box::new(Finished(ExitOutcome::Failure(1))));
        }
        match invocation.program.as_str() {
            "vim" => fs::write(invocation.cwd.join(&invocation.args[0]), "int x;\n")?,
            "gcc" => {
                if let Some(pos) = invocation.args.iter().position(|a| a == "-o") {
                    fs::write(invocation.cwd.join(&invocation.args[pos + 1]), "bin")?;
                }
            }
            _ => {}
        }
        Ok(Box::new(Finished(ExitOutcome::Success)))
    }
}

fn session(dir: &Path, tools: &FakeTools, config: &Config, input: &str) -> String {
    let name = ProjectName::parse("calc.proj").unwrap();
    let project = Project::open(dir, name, config.max_files).unwrap();
    let mut out = Vec::new();
    MenuController::new(project, config, tools, Cursor::new(input.to_string()), &mut out)
        .run()
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn reload(dir: &Path) -> Vec<String> {
    Project::open(dir, ProjectName::parse("calc.proj").unwrap(), 10)
        .unwrap()
        .files()
        .files()
        .to_vec()
}

fn programs(tools: &FakeTools) -> Vec<String> {
    tools.calls.borrow().iter().map(|c| c.program.clone()).collect()
}

#[test]
fn test_new_files_are_saved_and_edited() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let config = Config::default();

    let input = "1\nmain.c\n1\nmain.h\n1\nnotes.txt\n1\nmain.c\n9\n";
    let out = session(dir.path(), &tools, &config, input);

    assert_eq!(reload(dir.path()), ["main.c", "main.h"]);
    assert_eq!(programs(&tools), ["vim", "vim"]);
    assert!(out.contains("File must be .c or .h: notes.txt"));
    assert!(out.contains("File already exists in project: main.c"));
    assert!(out.contains("4. Build Project"));
}

#[test]
fn test_build_run_and_clean() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let config = Config::default();

    let out = session(
        dir.path(),
        &tools,
        &config,
        "1\na.c\n1\nb.c\n4\n6\n--count 3   verbose\n7\n8\n\n5\n9\n",
    );

    assert!(out.contains("Build successful."));
    assert!(out.contains("Cleaned."));
    let calls = tools.calls.borrow();
    let link = calls.iter().find(|c| c.args.first().map(String::as_str) == Some("-o")).unwrap();
    assert_eq!(link.args, ["-o", "calc", "a.o", "b.o"]);

    let run = calls.iter().find(|c| c.program == "./calc").unwrap();
    assert_eq!(run.args, ["--count", "3", "verbose"]);
    let debug = calls.iter().find(|c| c.program == "gdb").unwrap();
    assert_eq!(debug.args, ["calc"]);
    let memcheck = calls.iter().find(|c| c.program == "valgrind").unwrap();
    assert_eq!(memcheck.args, ["--leak-check=full", "./calc"]);

    assert!(!dir.path().join("calc").exists());
    assert!(!dir.path().join("a.o").exists());
    assert!(!dir.path().join("b.o").exists());
    assert!(dir.path().join("a.c").exists());
}

#[test]
fn test_failed_compile_reports_and_skips_link() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools {
        failing: vec!["a.c".to_string()],
        ..FakeTools::default()
    };
    let config = Config::default();
    fs::write(dir.path().join("a.c"), "").unwrap();
    fs::write(dir.path().join("b.c"), "").unwrap();
    let mut project =
        Project::open(dir.path(), ProjectName::parse("calc.proj").unwrap(), 10).unwrap();
    project.add_file("a.c").unwrap();
    project.add_file("b.c").unwrap();

    let out = session(dir.path(), &tools, &config, "4\n6\n9\n");

    assert!(out.contains("Compilation failed.\n"));
    assert!(!out.contains("Build successful."));
    assert!(out.contains("Executable not found. Build first."));
    assert_eq!(programs(&tools), ["gcc", "gcc"]);
    assert!(dir.path().join("b.o").exists());
}

#[test]
fn test_delete_file() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let config = Config::default();

    let out = session(
        dir.path(),
        &tools,
        &config,
        "1\na.c\n1\nb.c\n1\nc.h\n3\nb.c\n3\nnothere.c\n9\n",
    );

    assert_eq!(reload(dir.path()), ["a.c", "c.h"]);
    assert!(!dir.path().join("b.c").exists());
    assert!(out.contains("Deleted b.c."));
    assert!(out.contains("File not in project: nothere.c"));
}

#[test]
fn test_capacity_is_checked_before_prompting() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let config = Config {
        max_files: 2,
        ..Config::default()
    };

    let out = session(dir.path(), &tools, &config, "1\na.c\n1\nb.c\n1\n9\n");

    assert_eq!(reload(dir.path()), ["a.c", "b.c"]);
    assert!(out.contains("Maximum number of files reached (2)."));
}

#[test]
fn test_invalid_choices_reprompt() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let config = Config::default();

    let out = session(dir.path(), &tools, &config, "0\nhello\n42\n9\n");

    assert_eq!(out.matches("Invalid choice.").count(), 3);
    assert_eq!(out.matches("Enter choice: ").count(), 4);
    assert!(tools.calls.borrow().is_empty());
}

#[test]
fn test_end_of_input_leaves_menu() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let config = Config::default();

    let out = session(dir.path(), &tools, &config, "1\nmain.c\n");

    assert_eq!(reload(dir.path()), ["main.c"]);
    assert_eq!(out.matches("Enter choice: ").count(), 2);
}

#[test]
fn test_open_file_with_missing_editor() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools::default();
    let mut config = Config::default();
    config.toolchain.editor = "missing-tool".to_string();
    let mut project =
        Project::open(dir.path(), ProjectName::parse("calc.proj").unwrap(), 10).unwrap();
    project.add_file("a.c").unwrap();

    let out = session(dir.path(), &tools, &config, "2\na.c\n2\nz.c\n9\n");

    assert!(out.contains("Failed to start missing-tool: No such file or directory"));
    assert!(out.contains("File not in project: z.c"));
    assert_eq!(programs(&tools), ["missing-tool"]);
}

#[test]
fn test_program_exit_status_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let tools = FakeTools {
        failing: vec!["boom".to_string()],
        ..FakeTools::default()
    };
    let config = Config::default();
    fs::write(dir.path().join("calc"), "").unwrap();

    let out = session(dir.path(), &tools, &config, "6\nboom\n9\n");

    assert!(out.contains("./calc exited with status 1"));
}
