//! Pipeline orchestration for smelter
//!
//! Drives the three external-process stages (translate source text into an
//! intermediate artifact, assemble/link it into a native binary, execute
//! the binary) inside one disposable workspace. The pipeline
//! short-circuits on the first translate/link failure, aggregates timing and
//! output per stage, and releases the workspace on every exit path.
//!
//! The only error that escapes [`Pipeline::execute`] is a workspace fault;
//! every stage-level failure is folded into the returned [`RunResult`].

pub mod pipeline;
pub mod request;
pub mod result;

pub use pipeline::{ARTIFACT_EXTENSION, BINARY_FILE_NAME, Pipeline, SOURCE_FILE_NAME};
pub use request::RunRequest;
pub use result::RunResult;

// The request/result vocabulary spans three crates; re-export it so callers
// only need smelter-pipeline.
pub use smelter_config::{StageBudgets, Toolchain};
pub use smelter_runner::{Stage, StageOutcome};
pub use smelter_workspace::WorkspaceError;
