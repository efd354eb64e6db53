//! Native process execution with thread-based timeout enforcement

use std::process::Stdio;
use std::time::Duration;

use crate::command_spec::CommandSpec;
use crate::error::RunnerError;
use crate::process::{ProcessOutput, ProcessRunner};

/// Native process runner using `std::process::Command`.
///
/// Spawns the process with stdin closed and both output streams piped, then
/// waits on a monitor thread so the budget can be enforced with
/// `mpsc::recv_timeout`. When the budget elapses the process is forcibly
/// terminated before the timeout error is returned.
///
/// Argv-style discipline: the command is built via
/// [`CommandSpec::to_command`], so no shell evaluation occurs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    /// Create a new `NativeRunner`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, budget: Duration) -> Result<ProcessOutput, RunnerError> {
        use std::sync::mpsc;
        use std::thread;

        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn().map_err(|e| RunnerError::Launch {
            program: cmd.program_display(),
            reason: e.to_string(),
        })?;

        let child_id = child.id();
        let (tx, rx) = mpsc::channel();

        // wait_with_output drains both pipes to EOF, so a killed child
        // unblocks this thread as well.
        let handle = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        match rx.recv_timeout(budget) {
            Ok(output_result) => {
                let _ = handle.join();

                let output = output_result.map_err(|e| RunnerError::Wait {
                    reason: e.to_string(),
                })?;

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                ))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                terminate_process(child_id);
                let _ = handle.join();

                Err(RunnerError::Timeout { budget })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::Wait {
                reason: "process monitoring thread terminated unexpectedly".to_string(),
            }),
        }
    }
}

/// Terminate a process by its PID.
///
/// On Unix, sends SIGKILL. On Windows, uses `TerminateProcess`.
fn terminate_process(pid: u32) {
    #[cfg(unix)]
    {
        unsafe {
            libc::kill(pid as i32, libc::SIGKILL);
        }
    }

    #[cfg(windows)]
    {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess};

        unsafe {
            if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                let _ = TerminateProcess(handle, 1);
                let _ = CloseHandle(handle);
            }
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = pid;
    }
}
