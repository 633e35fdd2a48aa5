//! Fixed command table for the Flutter toolchain.
//!
//! These are the literal invocations the tool exists to issue. Ports and
//! hostnames are formatted into the web run argv; everything else is
//! constant.

use std::path::Path;

use crate::executor::CommandSpec;

pub const FLUTTER_BIN: &str = "flutter";

/// Application directory, relative to the invocation location.
pub const DEFAULT_APP_DIR: &str = "autoauction_flutter";
pub const DEFAULT_WEB_PORT: u16 = 5002;
pub const DEFAULT_WEB_HOSTNAME: &str = "0.0.0.0";

pub fn config_enable_web(app_dir: &Path) -> CommandSpec {
    CommandSpec::new(FLUTTER_BIN, &["config", "--enable-web"], app_dir)
}

pub fn clean(app_dir: &Path) -> CommandSpec {
    CommandSpec::new(FLUTTER_BIN, &["clean"], app_dir)
}

pub fn pub_get(app_dir: &Path) -> CommandSpec {
    CommandSpec::new(FLUTTER_BIN, &["pub", "get"], app_dir)
}

pub fn run_web(app_dir: &Path, port: u16, hostname: &str) -> CommandSpec {
    CommandSpec::new(
        FLUTTER_BIN,
        &[
            "run",
            "-d",
            "web",
            &format!("--web-port={}", port),
            &format!("--web-hostname={}", hostname),
        ],
        app_dir,
    )
}

pub fn run_linux_release(app_dir: &Path) -> CommandSpec {
    CommandSpec::new(FLUTTER_BIN, &["run", "-d", "linux", "--release"], app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app() -> PathBuf {
        PathBuf::from(DEFAULT_APP_DIR)
    }

    #[test]
    fn setup_command_literals() {
        assert_eq!(
            config_enable_web(&app()).argv(),
            vec!["flutter", "config", "--enable-web"]
        );
        assert_eq!(clean(&app()).argv(), vec!["flutter", "clean"]);
        assert_eq!(pub_get(&app()).argv(), vec!["flutter", "pub", "get"]);
    }

    #[test]
    fn web_run_literal_with_defaults() {
        let spec = run_web(&app(), DEFAULT_WEB_PORT, DEFAULT_WEB_HOSTNAME);
        assert_eq!(
            spec.argv(),
            vec![
                "flutter",
                "run",
                "-d",
                "web",
                "--web-port=5002",
                "--web-hostname=0.0.0.0"
            ]
        );
    }

    #[test]
    fn web_run_formats_overrides() {
        let spec = run_web(&app(), 8080, "127.0.0.1");
        assert_eq!(spec.args[3], "--web-port=8080");
        assert_eq!(spec.args[4], "--web-hostname=127.0.0.1");
    }

    #[test]
    fn desktop_fallback_literal() {
        assert_eq!(
            run_linux_release(&app()).argv(),
            vec!["flutter", "run", "-d", "linux", "--release"]
        );
    }

    #[test]
    fn commands_carry_the_app_dir() {
        for spec in [
            config_enable_web(&app()),
            clean(&app()),
            pub_get(&app()),
            run_web(&app(), DEFAULT_WEB_PORT, DEFAULT_WEB_HOSTNAME),
            run_linux_release(&app()),
        ] {
            assert_eq!(spec.cwd, app());
        }
    }
}
