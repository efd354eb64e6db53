use std::time::{Duration, Instant};

use crate::error::RunnerError;
use crate::outcome::{Stage, StageOutcome};

use super::CommandSpec;

/// Raw output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output from the process
    pub stdout: Vec<u8>,
    /// Standard error from the process
    pub stderr: Vec<u8>,
    /// Exit code from the process (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Create a new `ProcessOutput` with the given values.
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for process execution with a time budget.
///
/// Implementations MUST use argv-style APIs only (no shell string
/// evaluation); [`CommandSpec`] guarantees arguments cross this boundary as
/// discrete elements. The trait is the seam that lets the orchestrator be
/// exercised with scripted runners in tests.
pub trait ProcessRunner {
    /// Execute a command, waiting at most `budget`.
    ///
    /// * `Ok(ProcessOutput)`: the process completed (possibly non-zero exit)
    /// * `Err(RunnerError::Timeout)`: the budget elapsed; the process was
    ///   forcibly terminated
    /// * `Err(RunnerError::Launch | Wait)`: the process could not be
    ///   started or waited on
    fn run(&self, cmd: &CommandSpec, budget: Duration) -> Result<ProcessOutput, RunnerError>;
}

/// Execute one pipeline stage, converting every failure mode into a
/// populated [`StageOutcome`].
///
/// This is the stage boundary: a launch failure, a runtime fault, or a
/// budget expiry all come back as outcome fields. The caller decides how to
/// proceed; nothing propagates as an error.
pub fn run_stage<R: ProcessRunner>(
    runner: &R,
    stage: Stage,
    cmd: &CommandSpec,
    budget: Duration,
) -> StageOutcome {
    let started = Instant::now();
    match runner.run(cmd, budget) {
        Ok(output) => StageOutcome {
            stage,
            exit_code: output.exit_code,
            stdout: output.stdout_string(),
            stderr: output.stderr_string(),
            elapsed: started.elapsed(),
            timed_out: false,
        },
        Err(err @ RunnerError::Timeout { .. }) => StageOutcome {
            stage,
            exit_code: None,
            stdout: String::new(),
            stderr: err.to_string(),
            elapsed: started.elapsed(),
            timed_out: true,
        },
        Err(err) => StageOutcome {
            stage,
            exit_code: None,
            stdout: String::new(),
            stderr: err.to_string(),
            elapsed: started.elapsed(),
            timed_out: false,
        },
    }
}
