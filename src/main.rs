use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{doctor, plan, run, setup, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "flaunch")]
#[command(version = VERSION)]
#[command(about = "CLI for Flutter web/desktop launch automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the workspace and launch the app (web device, desktop fallback)
    Run(run::RunArgs),
    /// Run only the setup phase (enable web, clean, fetch dependencies)
    Setup(setup::SetupArgs),
    /// Show the pipeline that `run` would execute, without executing it
    Plan(plan::PlanArgs),
    /// Check toolchain and workspace assumptions
    Doctor(doctor::DoctorArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

/// Clamp an exit code into the u8 range the process can report.
/// Negative codes mean the child was killed or never spawned; those must
/// still exit nonzero.
fn exit_code_to_u8(code: i32) -> u8 {
    if code == 0 {
        0
    } else if !(1..255).contains(&code) {
        255
    } else {
        code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::exit_code_to_u8;

    #[test]
    fn clamps_exit_codes() {
        assert_eq!(exit_code_to_u8(0), 0);
        assert_eq!(exit_code_to_u8(1), 1);
        assert_eq!(exit_code_to_u8(20), 20);
        assert_eq!(exit_code_to_u8(-1), 255);
        assert_eq!(exit_code_to_u8(300), 255);
    }
}
