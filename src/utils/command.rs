//! Captured one-shot command probes.
//!
//! The pipeline itself never reads child output; these helpers exist for
//! doctor-style probing where a command's stdout is the answer.

use std::process::Command;

/// Run a command and capture stdout, returning None on any failure.
///
/// Useful when command failure is expected/acceptable (e.g., probing an
/// optional tool for its version).
pub fn run_optional(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        None
    } else {
        Some(stdout)
    }
}
