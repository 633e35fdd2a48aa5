use clap::Args;
use flaunch::doctor;
use flaunch::launch::LaunchOptions;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct DoctorArgs {
    /// Application directory to check (supports ~)
    #[arg(long, value_name = "DIR")]
    pub app_dir: Option<String>,
}

pub fn run(
    args: DoctorArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<doctor::DoctorReport> {
    let app_dir = match args.app_dir {
        Some(ref dir) => crate::commands::expand_path(dir),
        None => LaunchOptions::default().app_dir,
    };
    doctor::run(&app_dir)
}
