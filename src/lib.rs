//! smelter - compile-and-run pipeline for an external translator
//!
//! smelter takes source text, drives it through an external translation
//! pipeline (custom translator → system linker → native execution) inside a
//! disposable per-run workspace, and reports structured timing, output, and
//! errors. Nothing persists beyond a single run.
//!
//! # Quick start (CLI)
//!
//! ```bash
//! # Compile and run a source file with your translator
//! smelter run program.c --translator ./main
//!
//! # Machine-readable output
//! smelter run program.c --translator ./main --json
//!
//! # Built-in example programs
//! smelter examples
//! smelter examples hello-world | smelter run - --translator ./main
//! ```
//!
//! # Quick start (library)
//!
//! ```rust,no_run
//! use smelter::{Pipeline, RunRequest};
//!
//! let request = RunRequest::new("int main() { return 0; }", "./main");
//! let result = Pipeline::new().execute(&request)?;
//! assert!(result.success);
//! # Ok::<(), smelter::WorkspaceError>(())
//! ```
//!
//! The pipeline is stateless between calls and safe to drive from multiple
//! threads: each run owns its own workspace and shares nothing.

pub use smelter_config::{Config, ConfigBuilder, ConfigError, StageBudgets, Toolchain};
pub use smelter_pipeline::{
    ARTIFACT_EXTENSION, BINARY_FILE_NAME, Pipeline, RunRequest, RunResult, SOURCE_FILE_NAME,
};
pub use smelter_report::{AssemblyStats, render_json, render_text};
pub use smelter_runner::{
    CommandSpec, NativeRunner, ProcessOutput, ProcessRunner, RunnerError, Stage, StageOutcome,
    run_stage,
};
pub use smelter_workspace::{RunWorkspace, WorkspaceError};

pub mod cli;
pub mod exit_codes;
pub mod gallery;

pub use exit_codes::ExitCode;
