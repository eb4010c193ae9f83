// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External tool execution with bounded timeouts.
//!
//! Checks shell out to linters and test runners. A missing tool or a
//! timeout is reported as an outcome, not an error, so callers can turn it
//! into a skip.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of a finished process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// How a tool invocation ended.
#[derive(Debug)]
pub enum ToolOutcome {
    Completed(ToolOutput),
    /// Executable not found or not runnable.
    NotFound,
    /// Killed after exceeding the timeout.
    TimedOut(Duration),
}

/// Locate a tool, preferring the project's `.venv/bin`.
pub fn resolve_tool(root: &Path, name: &str) -> Option<PathBuf> {
    let venv = venv_bin(root, name);
    if venv.is_file() {
        return Some(venv);
    }
    which::which(name).ok()
}

/// Path of a tool inside the project's virtualenv (may not exist).
pub fn venv_bin(root: &Path, name: &str) -> PathBuf {
    root.join(".venv").join("bin").join(name)
}

/// Spawn `cmd` and wait at most `timeout` for it and its output.
///
/// stdout/stderr are drained on background threads so a chatty tool cannot
/// block on a full pipe. The deadline also covers the drain: a background
/// grandchild that keeps a pipe open counts as a timeout. On unix the tool
/// runs in its own process group and the whole group is killed.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> io::Result<ToolOutcome> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    std::os::unix::process::CommandExt::process_group(&mut cmd, 0);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ) =>
        {
            return Ok(ToolOutcome::NotFound);
        }
        Err(e) => return Err(e),
    };

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let deadline = Instant::now() + timeout;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            kill(&mut child);
            tracing::debug!("process timed out after {:?}", timeout);
            return Ok(ToolOutcome::TimedOut(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    };

    match (collect(stdout, deadline), collect(stderr, deadline)) {
        (Some(stdout), Some(stderr)) => Ok(ToolOutcome::Completed(ToolOutput {
            status,
            stdout,
            stderr,
        })),
        _ => {
            kill_group(child.id());
            tracing::debug!("output still open after {:?}, treating as timeout", timeout);
            Ok(ToolOutcome::TimedOut(timeout))
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            tx.send(buf).ok();
        });
        rx
    })
}

/// Wait for a drained pipe until `deadline`; `None` if it is still open.
fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<String> {
    let Some(rx) = rx else {
        return Some(String::new());
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    let bytes = match rx.recv_timeout(remaining) {
        Ok(bytes) => bytes,
        Err(mpsc::RecvTimeoutError::Disconnected) => Vec::new(),
        Err(mpsc::RecvTimeoutError::Timeout) => return None,
    };
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

fn kill(child: &mut Child) {
    kill_group(child.id());
    child.kill().ok();
    child.wait().ok();
}

/// Kill the process group led by `pid`, reaching background grandchildren.
#[cfg(unix)]
fn kill_group(pid: u32) {
    Command::new("kill")
        .args(["-KILL", "--", &format!("-{pid}")])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .ok();
}

#[cfg(not(unix))]
fn kill_group(_pid: u32) {}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
