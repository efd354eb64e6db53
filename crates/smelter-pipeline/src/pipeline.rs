use std::path::PathBuf;

use tracing::{debug, info, warn};

use smelter_runner::{CommandSpec, NativeRunner, ProcessRunner, Stage, StageOutcome, run_stage};
use smelter_workspace::{RunWorkspace, WorkspaceError};

use crate::request::RunRequest;
use crate::result::RunResult;

/// File name the source text is written to inside the workspace.
pub const SOURCE_FILE_NAME: &str = "program.txt";

/// Extension of the intermediate artifact the translator is expected to
/// produce alongside its input.
///
/// This is the naming contract with the external translator: given
/// `program.txt` it must write `program.s` next to it. The translator
/// offers no output-path flag, so the contract stays extension-based.
pub const ARTIFACT_EXTENSION: &str = "s";

/// File name of the linked binary inside the workspace.
pub const BINARY_FILE_NAME: &str = "program_bin";

/// Orchestrates one translate → link → execute run.
///
/// Stateless between calls: every run takes all inputs from its
/// [`RunRequest`], owns a fresh workspace, and shares nothing with
/// concurrent runs. Generic over [`ProcessRunner`] so tests can substitute
/// scripted runners for the real one.
#[derive(Debug)]
pub struct Pipeline<R: ProcessRunner = NativeRunner> {
    runner: R,
    workspace_root: Option<PathBuf>,
}

impl Pipeline<NativeRunner> {
    /// Pipeline backed by real process execution.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(NativeRunner::new())
    }
}

impl Default for Pipeline<NativeRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> Pipeline<R> {
    /// Pipeline backed by a caller-supplied runner.
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            workspace_root: None,
        }
    }

    /// Root directory for run workspaces.
    ///
    /// Defaults to the system temp directory. Tests point this at a scratch
    /// directory to observe that every run cleans up after itself.
    #[must_use]
    pub fn workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Run the full pipeline for one request.
    ///
    /// Only workspace faults escape as errors; stage failures, timeouts,
    /// launch errors, and artifact problems are all folded into the
    /// returned [`RunResult`]. The workspace is released on every exit
    /// path, including early returns, because it is owned by this frame.
    pub fn execute(&self, request: &RunRequest) -> Result<RunResult, WorkspaceError> {
        let workspace = match &self.workspace_root {
            Some(root) => RunWorkspace::acquire_in(root)?,
            None => RunWorkspace::acquire()?,
        };
        debug!(workspace = %workspace.path().display(), "workspace acquired");

        let source_path = workspace.write_file(SOURCE_FILE_NAME, &request.source_text)?;
        let mut result = RunResult::default();

        // Stage A: translate
        let translate_cmd = CommandSpec::new(&request.translator_path)
            .arg(&source_path)
            .cwd(workspace.path());
        debug!(stage = %Stage::Translate, "stage starting");
        let outcome = run_stage(
            &self.runner,
            Stage::Translate,
            &translate_cmd,
            request.budgets.translate,
        );
        log_outcome(&outcome);
        let translated = outcome.ok();
        if !translated {
            result.error_message = Some(stage_error("translation failed", &outcome));
        }
        result.stages.push(outcome);
        if !translated {
            return Ok(result);
        }

        // The translator writes the artifact next to its input, same stem,
        // `.s` extension.
        let artifact_path = source_path.with_extension(ARTIFACT_EXTENSION);
        if !artifact_path.is_file() {
            warn!(artifact = %artifact_path.display(), "translator exited 0 but produced no artifact");
            result.error_message = Some("no artifact produced".to_string());
            return Ok(result);
        }
        match std::fs::read_to_string(&artifact_path) {
            Ok(text) => result.generated_artifact = Some(text),
            Err(e) => {
                // I/O faults between stages stop the pipeline like a stage
                // failure would.
                result.error_message = Some(format!(
                    "failed to read artifact {}: {e}",
                    artifact_path.display()
                ));
                return Ok(result);
            }
        }

        // Stage B: assemble/link
        let binary_path = workspace.file(BINARY_FILE_NAME)?;
        let link_cmd = CommandSpec::new(&request.toolchain.program)
            .args(&request.toolchain.flags)
            .arg(&artifact_path)
            .arg("-o")
            .arg(&binary_path)
            .cwd(workspace.path());
        debug!(stage = %Stage::Link, "stage starting");
        let outcome = run_stage(&self.runner, Stage::Link, &link_cmd, request.budgets.link);
        log_outcome(&outcome);
        let linked = outcome.ok();
        if !linked {
            result.error_message = Some(stage_error("link failed", &outcome));
        }
        result.stages.push(outcome);
        if !linked {
            return Ok(result);
        }

        // Stage C: execute the produced binary
        let execute_cmd = CommandSpec::new(&binary_path).cwd(workspace.path());
        debug!(stage = %Stage::Execute, "stage starting");
        let outcome = run_stage(
            &self.runner,
            Stage::Execute,
            &execute_cmd,
            request.budgets.execute,
        );
        log_outcome(&outcome);
        if outcome.timed_out {
            // The pipeline could not obtain a completed run.
            result.error_message = Some(stage_error("execution timed out", &outcome));
            result.stages.push(outcome);
            return Ok(result);
        }
        if !outcome.completed() {
            result.error_message = Some(stage_error("execution failed", &outcome));
            result.stages.push(outcome);
            return Ok(result);
        }

        // A completed target run is a pipeline success whatever its exit
        // code; nonzero exit and stderr noise are results to report.
        result.program_output = Some(outcome.stdout.clone());
        result.program_exit_code = outcome.exit_code;
        let stderr = outcome.stderr.trim();
        if !stderr.is_empty() {
            result.error_message = Some(format!("execution stderr:\n{stderr}"));
        }
        result.stages.push(outcome);
        result.success = true;

        Ok(result)
        // workspace drops here (and on every early return above), removing
        // the directory and everything in it
    }
}

fn stage_error(prefix: &str, outcome: &StageOutcome) -> String {
    let diag = outcome.combined_output();
    if diag.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}:\n{diag}")
    }
}

fn log_outcome(outcome: &StageOutcome) {
    if outcome.ok() {
        info!(
            stage = %outcome.stage,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "stage completed"
        );
    } else {
        warn!(
            stage = %outcome.stage,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            exit_code = ?outcome.exit_code,
            timed_out = outcome.timed_out,
            "stage failed"
        );
    }
}
