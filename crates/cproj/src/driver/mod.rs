//! Build orchestration
//!
//! A build compiles every source of the project in parallel, one child per
//! source, waits for all of them, and links only when every compile
//! succeeded. Objects from a failed build are left where they are.

use crate::common::{ProjectError, ProjectResult};
use crate::config::Toolchain;
use crate::process::{spawn_failed, ExitOutcome, Invocation, ProcessRunner, RunningProcess};
use crate::project::{object_name, Project};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// One source file and the object it compiles to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileUnit {
    pub source: String,
    pub object: String,
}

/// Names derived from a project before anything is run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub executable: String,
    pub units: Vec<CompileUnit>,
    pub cwd: PathBuf,
}

impl BuildPlan {
    pub fn for_project(project: &Project) -> Self {
        let units = project
            .sources()
            .map(|source| CompileUnit {
                source: source.to_string(),
                object: object_name(source),
            })
            .collect();
        Self {
            executable: project.executable().to_string(),
            units,
            cwd: project.dir().to_path_buf(),
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.object.as_str())
    }

    pub fn compile_invocation(&self, compiler: &str, unit: &CompileUnit) -> Invocation {
        Invocation::new(compiler, &self.cwd).args([
            "-c",
            unit.source.as_str(),
            "-o",
            unit.object.as_str(),
        ])
    }

    pub fn link_invocation(&self, linker: &str) -> Invocation {
        Invocation::new(linker, &self.cwd)
            .args(["-o", self.executable.as_str()])
            .args(self.objects())
    }
}

/// Files a clean pass looked at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<String>,
    /// Already absent, or could not be removed
    pub skipped: Vec<String>,
}

/// Runs builds and cleans for a project through a [`ProcessRunner`]
pub struct BuildOrchestrator<'a> {
    runner: &'a dyn ProcessRunner,
    toolchain: &'a Toolchain,
}

impl<'a> BuildOrchestrator<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, toolchain: &'a Toolchain) -> Self {
        Self { runner, toolchain }
    }

    /// Compile all sources in parallel, then link.
    ///
    /// Any compile that does not exit 0 fails the whole build and the link
    /// step is skipped.
    pub fn build(&self, project: &Project) -> ProjectResult<BuildPlan> {
        let plan = BuildPlan::for_project(project);
        tracing::info!(executable = %plan.executable, units = plan.units.len(), "building");

        self.compile_all(&plan)?;
        self.link(&plan)?;

        tracing::info!(executable = %plan.executable, "build finished");
        Ok(plan)
    }

    fn compile_all(&self, plan: &BuildPlan) -> ProjectResult<()> {
        // Launch every compile before waiting on any of them
        let launched: Vec<(&CompileUnit, Result<Box<dyn RunningProcess>, ExitOutcome>)> = plan
            .units
            .iter()
            .map(|unit| {
                let invocation = plan.compile_invocation(&self.toolchain.compiler, unit);
                tracing::debug!(command = %invocation, "launching compile");
                let child = self
                    .runner
                    .spawn(&invocation)
                    .map_err(|e| spawn_failed(&invocation, &e));
                (unit, child)
            })
            .collect();

        let mut failed = Vec::new();
        for (unit, child) in launched {
            let outcome = match child {
                Ok(child) => child.wait(),
                Err(outcome) => outcome,
            };
            if !outcome.is_success() {
                tracing::warn!(source = %unit.source, %outcome, "compile failed");
                failed.push(unit.source.clone());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ProjectError::CompileFailure { failed })
        }
    }

    fn link(&self, plan: &BuildPlan) -> ProjectResult<()> {
        let invocation = plan.link_invocation(&self.toolchain.linker);
        let outcome = self.runner.run(&invocation);
        if outcome.is_success() {
            Ok(())
        } else {
            tracing::warn!(command = %invocation, %outcome, "link failed");
            Err(ProjectError::LinkFailure)
        }
    }

    /// Remove the executable and every derived object.
    ///
    /// Missing files are skipped; other removal errors are logged and
    /// skipped as well.
    pub fn clean(&self, project: &Project) -> CleanReport {
        let plan = BuildPlan::for_project(project);
        let mut report = CleanReport::default();

        let targets = std::iter::once(plan.executable.as_str()).chain(plan.objects());
        for target in targets {
            match fs::remove_file(plan.cwd.join(target)) {
                Ok(()) => report.removed.push(target.to_string()),
                Err(e) => {
                    if e.kind() != ErrorKind::NotFound {
                        tracing::warn!(
                            file = target,
                            error = %e,
                            "could not remove build artifact"
                        );
                    }
                    report.skipped.push(target.to_string());
                }
            }
        }

        tracing::info!(removed = report.removed.len(), "cleaned");
        report
    }
}
