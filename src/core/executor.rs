//! Command execution seam for the pipeline runner.
//!
//! Commands are described by [`CommandSpec`] and run through the
//! [`CommandExecutor`] trait so orchestration can be tested without
//! spawning real processes. Failure is an ordinary value ([`ExecStatus`]),
//! never a propagated error.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Serialize;

/// One external invocation: program, argument vector, working directory.
///
/// The working directory travels with the command; the runner never
/// changes the process-global current directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(
        program: impl Into<String>,
        args: &[&str],
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.into(),
        }
    }

    /// Full argument vector including the program, as invoked.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Outcome of one command: exit status only, no captured output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecStatus {
    pub success: bool,
    pub exit_code: i32,
    /// Spawn failure text (program missing, permission denied). Empty
    /// when the command actually ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            exit_code: 0,
            error: None,
        }
    }

    pub fn failed(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
            error: None,
        }
    }
}

pub trait CommandExecutor {
    fn run(&self, spec: &CommandSpec) -> ExecStatus;
}

/// Real executor. Children inherit stdout/stderr so toolchain output
/// streams straight to the terminal.
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn run(&self, spec: &CommandSpec) -> ExecStatus {
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(s) => ExecStatus {
                success: s.success(),
                exit_code: s.code().unwrap_or(-1),
                error: None,
            },
            Err(e) => ExecStatus {
                success: false,
                exit_code: -1,
                error: Some(format!("Command error: {}", e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_executor_reports_success() {
        let spec = CommandSpec::new("true", &[], ".");
        let status = ProcessExecutor.run(&spec);
        assert!(status.success);
        assert_eq!(status.exit_code, 0);
        assert!(status.error.is_none());
    }

    #[test]
    fn process_executor_reports_failure_exit_code() {
        let spec = CommandSpec::new("false", &[], ".");
        let status = ProcessExecutor.run(&spec);
        assert!(!status.success);
        assert_eq!(status.exit_code, 1);
    }

    #[test]
    fn process_executor_turns_spawn_failure_into_value() {
        let spec = CommandSpec::new("flaunch_no_such_program_xyz", &[], ".");
        let status = ProcessExecutor.run(&spec);
        assert!(!status.success);
        assert_eq!(status.exit_code, -1);
        assert!(status.error.is_some());
    }

    #[test]
    fn argv_includes_program_first() {
        let spec = CommandSpec::new("flutter", &["pub", "get"], "app");
        assert_eq!(spec.argv(), vec!["flutter", "pub", "get"]);
        assert_eq!(spec.to_string(), "flutter pub get");
    }
}
