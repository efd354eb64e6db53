//! End-to-end pipeline tests against fake external tools
//!
//! The translator, linker, and target program are small shell scripts
//! written into a temp directory, so these tests exercise real process
//! spawning, stream capture, and timeout termination without requiring an
//! actual compiler toolchain.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use smelter::{Pipeline, RunRequest, Stage, StageBudgets, Toolchain};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Translator that fulfills the naming contract: copies its input to the
/// same path with a `.s` extension.
fn working_translator(tools: &Path) -> PathBuf {
    write_script(tools, "translator", "out=\"${1%.txt}.s\"\ncp \"$1\" \"$out\"\n")
}

/// Linker that installs `target_body` as the output binary named by `-o`.
fn working_linker(tools: &Path, target_body: &str) -> Toolchain {
    let template = write_script(tools, "target_template", target_body);
    let linker_body = format!(
        r#"out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
cp "{template}" "$out"
chmod +x "$out"
"#,
        template = template.display()
    );
    let linker = write_script(tools, "linker", &linker_body);
    Toolchain {
        program: linker.display().to_string(),
        flags: vec![],
    }
}

fn request(translator: PathBuf, toolchain: Toolchain) -> RunRequest {
    RunRequest::new("int main() { return 0; }\n", translator).toolchain(toolchain)
}

#[test]
fn hello_world_scenario_succeeds() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = working_translator(tools.path());
    let toolchain = working_linker(tools.path(), "echo \"hello from target\"\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(result.success, "error: {:?}", result.error_message);
    assert_eq!(result.stages.len(), 3);
    let stages: Vec<_> = result.stages.iter().map(|s| s.stage).collect();
    assert_eq!(stages, vec![Stage::Translate, Stage::Link, Stage::Execute]);
    assert!(result.stages.iter().all(|s| s.ok()));
    assert_eq!(result.program_exit_code, Some(0));
    assert!(result.program_output.unwrap().contains("hello from target"));
    // The fake translator copies the source, so the artifact is the source
    assert!(result.generated_artifact.unwrap().contains("int main()"));
    assert!(result.error_message.is_none());
}

#[test]
fn translator_failure_yields_one_stage_and_its_diagnostics() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = write_script(tools.path(), "translator", "echo \"syntax error\" >&2\nexit 1\n");
    let toolchain = working_linker(tools.path(), "exit 0\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 1);
    assert_eq!(result.stages[0].exit_code, Some(1));
    assert!(result.error_message.unwrap().contains("syntax error"));
    assert!(result.program_output.is_none());
}

#[test]
fn missing_translator_is_a_launch_error_outcome() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = tools.path().join("no-such-translator");
    let toolchain = working_linker(tools.path(), "exit 0\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 1);
    assert_eq!(result.stages[0].exit_code, None);
    assert!(!result.stages[0].timed_out);
    assert!(result.stages[0].stderr.contains("failed to launch"));
}

#[test]
fn silent_translator_triggers_artifact_missing_error() {
    let tools = tempfile::TempDir::new().unwrap();
    // Exits 0 without writing program.s
    let translator = write_script(tools.path(), "translator", "exit 0\n");
    let toolchain = working_linker(tools.path(), "exit 0\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 1, "link must not be attempted");
    assert_eq!(result.error_message.as_deref(), Some("no artifact produced"));
}

#[test]
fn unreadable_artifact_is_a_stage_failure() {
    let tools = tempfile::TempDir::new().unwrap();
    // Exits 0 but writes bytes into program.s that cannot be read as text
    let translator = write_script(
        tools.path(),
        "translator",
        "printf '\\377\\376\\001' > \"${1%.txt}.s\"\n",
    );
    let toolchain = working_linker(tools.path(), "exit 0\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 1, "link must not be attempted");
    assert!(result
        .error_message
        .unwrap()
        .contains("failed to read artifact"));
    assert!(result.generated_artifact.is_none());
}

#[test]
fn link_failure_stops_before_execute() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = working_translator(tools.path());
    let linker = write_script(tools.path(), "linker", "echo \"bad assembly\" >&2\nexit 2\n");
    let toolchain = Toolchain {
        program: linker.display().to_string(),
        flags: vec![],
    };

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 2);
    assert_eq!(result.stages[1].stage, Stage::Link);
    let message = result.error_message.unwrap();
    assert!(message.contains("link failed"));
    assert!(message.contains("bad assembly"));
}

#[test]
fn nonzero_target_exit_with_quiet_stderr_is_success() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = working_translator(tools.path());
    let toolchain = working_linker(tools.path(), "exit 1\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(result.success);
    assert_eq!(result.stages.len(), 3);
    assert_eq!(result.program_exit_code, Some(1));
    assert!(result.error_message.is_none());
}

#[test]
fn target_stderr_is_reported_on_a_successful_run() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = working_translator(tools.path());
    let toolchain = working_linker(tools.path(), "echo \"runtime warning\" >&2\nexit 0\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain))
        .unwrap();

    assert!(result.success);
    assert_eq!(result.program_exit_code, Some(0));
    assert!(result.error_message.unwrap().contains("runtime warning"));
}

#[test]
fn translate_timeout_halts_the_pipeline() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = write_script(tools.path(), "translator", "sleep 5\n");
    let toolchain = working_linker(tools.path(), "exit 0\n");

    let started = std::time::Instant::now();
    let result = Pipeline::new()
        .execute(&request(translator, toolchain).budgets(StageBudgets {
            translate: Duration::from_millis(300),
            ..StageBudgets::default()
        }))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 1);
    assert!(result.stages[0].timed_out);
    assert_eq!(result.stages[0].exit_code, None);
    assert!(result.stages[0].stderr.contains("time budget"));
    // Killed at the budget, not after the sleep finished
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn execute_timeout_fails_the_run_after_three_stages() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = working_translator(tools.path());
    let toolchain = working_linker(tools.path(), "sleep 5\n");

    let result = Pipeline::new()
        .execute(&request(translator, toolchain).budgets(StageBudgets {
            execute: Duration::from_millis(300),
            ..StageBudgets::default()
        }))
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.stages.len(), 3);
    assert!(result.stages[2].timed_out);
    assert!(result.program_exit_code.is_none());
    assert!(result.error_message.unwrap().contains("execution timed out"));
}

#[test]
fn concurrent_runs_do_not_interfere() {
    let tools = tempfile::TempDir::new().unwrap();
    let translator = working_translator(tools.path());
    let toolchain = working_linker(tools.path(), "echo \"hello from target\"\n");
    let request = request(translator, toolchain);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let request = request.clone();
            std::thread::spawn(move || Pipeline::new().execute(&request).unwrap())
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.success, "error: {:?}", result.error_message);
        assert!(result.program_output.unwrap().contains("hello from target"));
    }
}
