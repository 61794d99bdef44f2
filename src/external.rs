//! Subprocess plumbing: tool lookup, dependency checks, and the two ways we
//! run external commands (quiet with captured stderr, or live for verbose).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::progress;

/// Find a tool, checking the current directory first, then PATH.
pub fn find_tool(tool_name: &str) -> Option<PathBuf> {
    let local_path = Path::new(".").join(tool_name);
    if local_path.exists() {
        return Some(local_path);
    }

    if Command::new("which")
        .arg(tool_name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
    {
        return Some(PathBuf::from(tool_name));
    }

    // Windows fallback
    if cfg!(target_os = "windows")
        && Command::new("where")
            .arg(tool_name)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    {
        return Some(PathBuf::from(tool_name));
    }

    None
}

/// Verify the external engine is reachable. ffprobe is checked lazily by the
/// prober since only geometry-dependent effects and the overlay pass need it.
pub fn check_dependencies() -> Result<()> {
    if find_tool("ffmpeg").is_none() {
        anyhow::bail!("required command 'ffmpeg' not found in PATH");
    }
    Ok(())
}

/// Run a command and capture its stdout as a string, silencing stderr.
pub fn capture_output(cmd: &mut Command) -> Result<String> {
    log_command(cmd);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());

    let output = cmd.output().context("failed to execute command")?;
    if output.status.success() {
        String::from_utf8(output.stdout).context("command output is not valid UTF-8")
    } else {
        anyhow::bail!("command failed with status: {}", output.status)
    }
}

/// Run a command to completion. In verbose mode the child inherits our
/// stdio; otherwise stderr is captured so a failure diagnostic can be
/// reported. Returns `Ok(None)` on success, `Ok(Some(diagnostic))` on a
/// non-zero exit.
pub fn run_engine_command(cmd: &mut Command) -> Result<Option<String>> {
    log_command(cmd);

    if progress::is_verbose() {
        let status = cmd.status().context("failed to spawn command")?;
        if status.success() {
            return Ok(None);
        }
        return Ok(Some(format!("exited with {}", status)));
    }

    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    let output = cmd.output().context("failed to spawn command")?;
    if output.status.success() {
        return Ok(None);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Last few lines are where ffmpeg puts the actual reason.
    let tail: Vec<&str> = stderr.lines().rev().take(4).collect();
    let tail: Vec<&str> = tail.into_iter().rev().collect();
    let diag = if tail.is_empty() {
        format!("exited with {}", output.status)
    } else {
        tail.join(" | ")
    };
    Ok(Some(diag))
}

fn log_command(cmd: &Command) {
    if progress::is_verbose() {
        eprintln!("+ {:?}", cmd);
    }
}
