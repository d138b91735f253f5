//! External command-line tools: locating them and running them with a time limit.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tracing::trace;

/// Why an external tool run failed.
#[derive(Debug)]
pub(crate) enum ToolFailure {
    /// The binary is not installed or not on PATH.
    NotFound,
    /// The tool ran and exited unsuccessfully.
    Exit { status: String, stderr: String },
    /// The tool was killed after exceeding its time limit.
    Timeout(Duration),
    /// Spawning or waiting failed.
    Io(std::io::Error),
}

/// Run a prepared command and return its stdout.
///
/// The child is killed when the time limit elapses.
pub(crate) async fn run_with_timeout(
    mut command: Command,
    timeout: Duration,
) -> Result<Vec<u8>, ToolFailure> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    trace!("Running {:?}", command.as_std());

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Err(_) => return Err(ToolFailure::Timeout(timeout)),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ToolFailure::NotFound);
        }
        Ok(Err(e)) => return Err(ToolFailure::Io(e)),
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        return Err(ToolFailure::Exit {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Availability of one external tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    /// Configured program name or path.
    pub program: PathBuf,
    /// Resolved location, if found.
    pub resolved: Option<PathBuf>,
    /// Install hint shown when missing.
    pub hint: &'static str,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Resolve a program name against PATH (or check an explicit path).
pub fn locate(program: &Path) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Probe a program, attaching an install hint.
pub fn probe(program: &Path, hint: &'static str) -> ToolStatus {
    ToolStatus {
        program: program.to_path_buf(),
        resolved: locate(program),
        hint,
    }
}
