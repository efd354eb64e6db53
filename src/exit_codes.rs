//! Exit code constants and result mapping for the smelter CLI

use smelter_pipeline::RunResult;

/// Exit code constants for smelter
pub mod codes {
    /// Success - pipeline obtained a completed run
    pub const SUCCESS: i32 = 0;

    /// CLI arguments or configuration error
    pub const CLI_ARGS: i32 = 2;

    /// A stage exceeded its time budget
    pub const STAGE_TIMEOUT: i32 = 10;

    /// A stage failed (translate/link error, launch failure, missing artifact)
    pub const STAGE_FAILURE: i32 = 70;

    /// Workspace could not be created or written
    pub const WORKSPACE_IO: i32 = 74;
}

/// Type-safe exit code for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    pub const SUCCESS: Self = Self(codes::SUCCESS);
    pub const CLI_ARGS: Self = Self(codes::CLI_ARGS);
    pub const STAGE_TIMEOUT: Self = Self(codes::STAGE_TIMEOUT);
    pub const STAGE_FAILURE: Self = Self(codes::STAGE_FAILURE);
    pub const WORKSPACE_IO: Self = Self(codes::WORKSPACE_IO);

    /// Numeric value for `std::process::exit`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

/// Map a run result to the documented exit code table.
///
/// A successful run exits 0 even when the target program itself exited
/// nonzero; the target's exit code is data in the report, not the CLI's
/// exit status.
#[must_use]
pub fn exit_code_for(result: &RunResult) -> ExitCode {
    if result.success {
        ExitCode::SUCCESS
    } else if result.timed_out() {
        ExitCode::STAGE_TIMEOUT
    } else {
        ExitCode::STAGE_FAILURE
    }
}
