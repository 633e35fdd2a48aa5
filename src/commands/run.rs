use clap::Args;
use flaunch::executor::ProcessExecutor;
use flaunch::flutter;
use flaunch::launch;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Application directory (supports ~)
    #[arg(long, value_name = "DIR")]
    pub app_dir: Option<String>,

    /// Port for the web device server
    #[arg(long, default_value_t = flutter::DEFAULT_WEB_PORT)]
    pub web_port: u16,

    /// Bind address for the web device server
    #[arg(long, default_value = flutter::DEFAULT_WEB_HOSTNAME)]
    pub web_hostname: String,
}

pub fn run(
    args: RunArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<launch::LaunchReport> {
    let opts = crate::commands::resolve_options(
        args.app_dir.as_deref(),
        args.web_port,
        &args.web_hostname,
    );
    launch::run(&opts, &ProcessExecutor)
}
