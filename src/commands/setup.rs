use clap::Args;
use flaunch::executor::ProcessExecutor;
use flaunch::launch::{self, LaunchOptions};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct SetupArgs {
    /// Application directory (supports ~)
    #[arg(long, value_name = "DIR")]
    pub app_dir: Option<String>,
}

pub fn run(
    args: SetupArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<launch::LaunchReport> {
    let mut opts = LaunchOptions::default();
    if let Some(ref dir) = args.app_dir {
        opts.app_dir = crate::commands::expand_path(dir);
    }
    launch::setup(&opts, &ProcessExecutor)
}
