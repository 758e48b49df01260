//! Subprocess access for the external layout engine.
//!
//! [`ProcessRunner`] is the seam that lets the Graphviz engine run without a real `dot`
//! installed: tests substitute a runner returning canned output.

use crate::error::ExternalError;
use std::env;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    pub success: bool,
    /// Human readable exit status, e.g. `exit status: 1`.
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            status: "exit status: 0".to_string(),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

pub trait ProcessRunner: Send + Sync {
    /// Whether `program` can be launched.
    fn is_available(&self, program: &str) -> bool;

    /// Runs `program` with `args`, writes `stdin` to it and collects its output.
    ///
    /// A run exceeding `timeout` is killed and reported as [`ExternalError::Timeout`].
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: &str,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ExternalError>;
}

/// Runs real processes found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        command_exists(program)
    }

    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: &str,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ExternalError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExternalError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Pipes are serviced on their own threads: a child stuck on a full pipe never exits.
        let writer = child.stdin.take().map(|mut pipe| {
            let input = stdin.to_string();
            thread::spawn(move || {
                // Dropping the pipe afterwards closes the child's stdin.
                let _ = pipe.write_all(input.as_bytes());
            })
        });
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let status = match wait_with_timeout(&mut child, timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                reap(&mut child);
                let timeout_ms = timeout.map(|t| t.as_millis() as u64).unwrap_or(0);
                return Err(ExternalError::Timeout {
                    program: program.to_string(),
                    timeout_ms,
                });
            }
            Err(source) => {
                reap(&mut child);
                return Err(ExternalError::Spawn {
                    program: program.to_string(),
                    source,
                });
            }
        };

        if let Some(writer) = writer {
            let _ = writer.join();
        }
        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);

        Ok(ProcessOutput {
            success: status.success(),
            status: status.to_string(),
            stdout,
            stderr,
        })
    }
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kills `child` and waits for it so no zombie is left behind.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(reader: Option<JoinHandle<Vec<u8>>>) -> String {
    reader
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Looks `command` up on `PATH`; paths containing a separator are checked directly.
pub fn command_exists(command: &str) -> bool {
    if command.is_empty() {
        return false;
    }
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(command).is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    for dir in env::split_paths(&path_var) {
        if dir.join(command).is_file() {
            return true;
        }
        if cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file() {
            return true;
        }
    }
    false
}
