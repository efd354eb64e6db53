//! Stage runner for smelter
//!
//! Executes one external process per pipeline stage with a time budget and
//! captured streams. All process execution goes through [`CommandSpec`] to
//! ensure argv-style invocation; no shell string evaluation occurs anywhere.
//!
//! The stage boundary is [`run_stage`]: every failure mode (launch failure,
//! runtime fault, budget expiry) maps to populated [`StageOutcome`] fields.
//! Nothing crosses this boundary as an unhandled fault.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod outcome;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use outcome::{Stage, StageOutcome};
pub use process::{ProcessOutput, ProcessRunner, run_stage};
