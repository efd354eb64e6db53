//! Error types for the stage runner

use std::time::Duration;
use thiserror::Error;

/// Process execution errors.
///
/// These never escape the stage boundary: [`run_stage`](crate::run_stage)
/// converts each variant into populated [`StageOutcome`](crate::StageOutcome)
/// fields before the orchestrator sees it.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    #[error("failed to wait for process: {reason}")]
    Wait { reason: String },

    #[error("process exceeded the {:.3}s time budget and was terminated", .budget.as_secs_f64())]
    Timeout { budget: Duration },
}
