//! Launch orchestration: compose the setup and run steps against a
//! validated application directory and hand them to the pipeline runner.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::executor::CommandExecutor;
use crate::flutter;
use crate::pipeline::{self, RunReport, Step};

/// Notice printed to stdout before the desktop fallback is attempted.
pub const FALLBACK_NOTICE: &str = "Web not available, running on desktop...";

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub app_dir: PathBuf,
    pub web_port: u16,
    pub web_hostname: String,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            app_dir: PathBuf::from(flutter::DEFAULT_APP_DIR),
            web_port: flutter::DEFAULT_WEB_PORT,
            web_hostname: flutter::DEFAULT_WEB_HOSTNAME.to_string(),
        }
    }
}

/// Validate options and the application directory.
///
/// Runs once, before any command is issued; every command in the run
/// receives the directory returned here.
fn resolve_app_dir(opts: &LaunchOptions) -> Result<PathBuf> {
    if opts.web_port == 0 {
        return Err(Error::validation_invalid_argument(
            "web_port",
            "Port must be between 1 and 65535",
        ));
    }
    if opts.web_hostname.trim().is_empty() {
        return Err(Error::validation_invalid_argument(
            "web_hostname",
            "Hostname must not be empty",
        ));
    }
    if !opts.app_dir.is_dir() {
        return Err(Error::app_dir_not_found(opts.app_dir.to_string_lossy()));
    }
    Ok(opts.app_dir.clone())
}

/// The three preparatory steps; each aborts the run on failure.
pub fn setup_steps(app_dir: &Path) -> Vec<Step> {
    vec![
        Step::abort_on_failure("enable-web", flutter::config_enable_web(app_dir)),
        Step::abort_on_failure("clean", flutter::clean(app_dir)),
        Step::abort_on_failure("pub-get", flutter::pub_get(app_dir)),
    ]
}

/// The long-lived run step: web device first, Linux desktop on failure.
pub fn run_step(app_dir: &Path, web_port: u16, web_hostname: &str) -> Step {
    Step::with_fallback(
        "run",
        flutter::run_web(app_dir, web_port, web_hostname),
        flutter::run_linux_release(app_dir),
        FALLBACK_NOTICE,
    )
}

fn pipeline_steps(opts: &LaunchOptions, app_dir: &Path) -> Vec<Step> {
    let mut steps = setup_steps(app_dir);
    steps.push(run_step(app_dir, opts.web_port, &opts.web_hostname));
    steps
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPlan {
    pub app_dir: PathBuf,
    pub steps: Vec<Step>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReport {
    pub command: String,
    pub app_dir: PathBuf,
    #[serde(flatten)]
    pub report: RunReport,
}

/// Describe the full pipeline without executing anything.
pub fn plan(opts: &LaunchOptions) -> Result<(LaunchPlan, i32)> {
    let app_dir = resolve_app_dir(opts)?;
    let steps = pipeline_steps(opts, &app_dir);
    Ok((LaunchPlan { app_dir, steps }, 0))
}

/// Run the full pipeline: setup, then launch with fallback.
///
/// Command failures are data in the report, not errors; the returned
/// exit code is 0 or the code of whichever command last failed.
pub fn run(opts: &LaunchOptions, executor: &dyn CommandExecutor) -> Result<(LaunchReport, i32)> {
    let app_dir = resolve_app_dir(opts)?;
    let steps = pipeline_steps(opts, &app_dir);
    let report = pipeline::run(&steps, executor);
    let exit_code = report.exit_code();

    Ok((
        LaunchReport {
            command: "launch.run".to_string(),
            app_dir,
            report,
        },
        exit_code,
    ))
}

/// Run only the setup phase.
pub fn setup(opts: &LaunchOptions, executor: &dyn CommandExecutor) -> Result<(LaunchReport, i32)> {
    let app_dir = resolve_app_dir(opts)?;
    let steps = setup_steps(&app_dir);
    let report = pipeline::run(&steps, executor);
    let exit_code = report.exit_code();

    Ok((
        LaunchReport {
            command: "launch.setup".to_string(),
            app_dir,
            report,
        },
        exit_code,
    ))
}
