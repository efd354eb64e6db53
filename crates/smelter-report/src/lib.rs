//! Result reporting for smelter
//!
//! Presentation boundary: consumes a [`RunResult`] and renders it for
//! humans (sectioned text) or machines (pretty JSON). Contains no pipeline
//! logic beyond the data contract it consumes.

use std::fmt::Write as _;

use smelter_pipeline::RunResult;

/// Render a run result as a human-readable report.
#[must_use]
pub fn render_text(result: &RunResult) -> String {
    let mut out = String::new();

    let status = if result.success { "success" } else { "failed" };
    let _ = writeln!(out, "status: {status}");

    if !result.stages.is_empty() {
        let _ = writeln!(out, "\nstages:");
        for stage in &result.stages {
            let code = match (stage.timed_out, stage.exit_code) {
                (true, _) => "timed out".to_string(),
                (false, Some(c)) => format!("exit {c}"),
                (false, None) => "did not start".to_string(),
            };
            let _ = writeln!(
                out,
                "  {:<10} {:>8.3}s   {code}",
                stage.stage.as_str(),
                stage.elapsed.as_secs_f64()
            );
        }
    }

    if let Some(code) = result.program_exit_code {
        let _ = writeln!(out, "\nprogram exit code: {code}");
    }

    if let Some(output) = &result.program_output {
        let _ = writeln!(out, "\nprogram output:");
        if output.is_empty() {
            let _ = writeln!(out, "  (no output)");
        } else {
            for line in output.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
    }

    if let Some(asm) = &result.generated_artifact {
        let stats = AssemblyStats::from_source(asm);
        let _ = writeln!(
            out,
            "\ngenerated assembly ({} lines, {} instructions):",
            stats.total_lines, stats.instructions
        );
        for line in asm.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if let Some(message) = &result.error_message {
        let _ = writeln!(out, "\nerrors:");
        for line in message.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    out
}

/// Render a run result as pretty-printed JSON.
pub fn render_json(result: &RunResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Line statistics over generated assembly text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Total line count, including blanks. A trailing newline terminates
    /// the last line rather than starting an empty one, so
    /// `".text\nret\n"` is two lines, not three.
    pub total_lines: usize,
    /// Lines that look like instructions: non-blank, not a `#` comment,
    /// not a `.` directive, not a label
    pub instructions: usize,
}

impl AssemblyStats {
    /// Count lines and instructions in assembly source.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let total_lines = source.lines().count();
        let instructions = source
            .lines()
            .map(str::trim)
            .filter(|line| {
                !line.is_empty()
                    && !line.starts_with('#')
                    && !line.starts_with('.')
                    && !line.contains(':')
            })
            .count();
        Self {
            total_lines,
            instructions,
        }
    }
}
