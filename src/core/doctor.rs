//! Environment checks for the assumptions the pipeline makes: the
//! toolchain is reachable on PATH and the application directory exists.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::flutter;
use crate::utils::command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorCheck {
    pub id: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DoctorCheck {
    fn pass(id: &str, detail: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            status: CheckStatus::Pass,
            detail,
        }
    }

    fn fail(id: &str, detail: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            status: CheckStatus::Fail,
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    pub command: String,
    pub checks: Vec<DoctorCheck>,
    pub ok: bool,
}

/// Find a program by scanning PATH-style entries.
fn resolve_in(path_var: &OsStr, program: &str) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Find a program on the current PATH.
pub fn resolve_on_path(program: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    resolve_in(&path_var, program)
}

/// Run the environment checks.
///
/// A toolchain that is not even on PATH is a hard error; everything else
/// is reported check-by-check with exit code 1 when any check fails.
pub fn run(app_dir: &Path) -> Result<(DoctorReport, i32)> {
    let resolved = resolve_on_path(flutter::FLUTTER_BIN)
        .ok_or_else(|| Error::toolchain_not_found(flutter::FLUTTER_BIN))?;

    let mut checks = vec![DoctorCheck::pass(
        "flutter-on-path",
        Some(resolved.to_string_lossy().to_string()),
    )];

    match command::run_optional(flutter::FLUTTER_BIN, &["--version"]) {
        Some(output) => {
            let first_line = output.lines().next().unwrap_or_default().to_string();
            checks.push(DoctorCheck::pass("flutter-version", Some(first_line)));
        }
        None => {
            checks.push(DoctorCheck::fail(
                "flutter-version",
                "flutter --version did not complete successfully",
            ));
        }
    }

    if app_dir.is_dir() {
        checks.push(DoctorCheck::pass(
            "app-dir",
            Some(app_dir.to_string_lossy().to_string()),
        ));
    } else {
        checks.push(DoctorCheck::fail(
            "app-dir",
            format!("'{}' is not a directory", app_dir.display()),
        ));
    }

    let ok = checks.iter().all(|c| c.status == CheckStatus::Pass);
    let exit_code = if ok { 0 } else { 1 };

    Ok((
        DoctorReport {
            command: "doctor.scan".to_string(),
            checks,
            ok,
        },
        exit_code,
    ))
}
