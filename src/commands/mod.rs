use std::path::PathBuf;

use flaunch::launch::LaunchOptions;

pub type CmdResult<T> = flaunch::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod doctor;
pub mod plan;
pub mod run;
pub mod setup;

/// Build launch options from CLI flags. `--app-dir` supports `~`.
pub(crate) fn resolve_options(
    app_dir: Option<&str>,
    web_port: u16,
    web_hostname: &str,
) -> LaunchOptions {
    let mut opts = LaunchOptions::default();
    if let Some(dir) = app_dir {
        opts.app_dir = expand_path(dir);
    }
    opts.web_port = web_port;
    opts.web_hostname = web_hostname.to_string();
    opts
}

pub(crate) fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (flaunch::Result<serde_json::Value>, i32) {
    crate::tty::status("flaunch is working...");

    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Setup(args) => dispatch!(args, global, setup),
        crate::Commands::Plan(args) => dispatch!(args, global, plan),
        crate::Commands::Doctor(args) => dispatch!(args, global, doctor),
    }
}
