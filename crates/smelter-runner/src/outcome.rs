//! Stage identifiers and structured stage outcomes

use serde::Serialize;
use std::time::Duration;

/// One external-process step in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Translate source text into an intermediate artifact
    Translate,
    /// Assemble/link the artifact into a native binary
    Link,
    /// Run the produced binary
    Execute,
}

impl Stage {
    /// Stage name as used in logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Link => "link",
            Self::Execute => "execute",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured outcome of one attempted stage.
///
/// Exactly one outcome exists per attempted stage; a stage that was never
/// attempted has no outcome. Every failure mode of the underlying process
/// (non-zero exit, launch failure, budget expiry) is expressed through these
/// fields rather than through an error type.
#[derive(Debug, Clone, Serialize)]
pub struct StageOutcome {
    /// Which stage this outcome belongs to
    pub stage: Stage,
    /// Exit code, absent when the process was killed or never launched
    pub exit_code: Option<i32>,
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
    /// Wall time spent on this stage
    pub elapsed: Duration,
    /// Whether the stage was terminated for exceeding its time budget
    pub timed_out: bool,
}

impl StageOutcome {
    /// Whether the process ran to completion, regardless of exit code.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.exit_code.is_some() && !self.timed_out
    }

    /// Whether the stage completed with exit code 0.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }

    /// Combined stdout + stderr, used to assemble diagnostic messages.
    #[must_use]
    pub fn combined_output(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            ("", "") => String::new(),
            (out, "") => out.to_string(),
            ("", err) => err.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }
}
