use serde::Serialize;

use smelter_runner::StageOutcome;

/// The complete structured outcome of one pipeline run.
///
/// Built incrementally by the orchestrator, immutable once returned.
/// `stages` holds one outcome per *attempted* stage in execution order.
///
/// `success == true` means all three stages were attempted, translate and
/// link exited zero, and the target program completed within its budget.
/// A nonzero target exit code or target stderr noise does NOT clear
/// `success`; a misbehaving target program is a result to report, not a
/// pipeline failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    /// Whether the pipeline obtained a completed run of the target program
    pub success: bool,
    /// Outcomes of attempted stages, in execution order
    pub stages: Vec<StageOutcome>,
    /// Text of the intermediate artifact produced by the translate stage
    pub generated_artifact: Option<String>,
    /// Standard output of the target program
    pub program_output: Option<String>,
    /// Exit code of the target program, recorded without interpretation
    pub program_exit_code: Option<i32>,
    /// Diagnostic text: pipeline failure details, or target stderr on an
    /// otherwise successful run
    pub error_message: Option<String>,
}

impl RunResult {
    /// Whether any attempted stage was killed for exceeding its budget.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.stages.iter().any(|s| s.timed_out)
    }
}
