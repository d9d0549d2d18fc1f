//! OpenVPN process control via `pkexec` and `pgrep`.
//!
//! OpenVPN needs root to open the tun device. Each operation elevates
//! through `pkexec` on its own, so surfmenu itself never runs as root.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::logger::{self, LogLevel};
use crate::system::ProcessLauncher;

/// Production launcher shelling out to `pkexec`, `bash` and `pgrep`.
#[derive(Debug, Default)]
pub struct PkexecLauncher;

impl ProcessLauncher for PkexecLauncher {
    fn launch(&self, binary: &Path, config: &Path, credentials: &Path) -> Result<(), String> {
        // The daemon must be backgrounded inside the elevated shell so
        // the pkexec call returns while OpenVPN keeps running.
        let command_line = format!(
            "{} --config {} --auth-user-pass {} &",
            binary.display(),
            config.display(),
            credentials.display()
        );
        logger::log(LogLevel::Debug, "PROCESS", format!("launch: {command_line}"));

        Command::new("pkexec")
            .args(["bash", "-lc", &command_line])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| format!("Failed to run pkexec: {e}"))?;
        Ok(())
    }

    fn kill(&self, pattern: &str) -> Result<(), String> {
        logger::log(LogLevel::Debug, "PROCESS", format!("kill pattern: {pattern}"));

        // pgrep -f <pattern> | pkexec xargs kill
        let mut pgrep = Command::new("pgrep")
            .args(["-f", pattern])
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| format!("Failed to run pgrep: {e}"))?;

        let pids = pgrep
            .stdout
            .take()
            .ok_or_else(|| "Failed to capture pgrep output".to_string())?;

        let status = Command::new("pkexec")
            .args(["xargs", "kill"])
            .stdin(Stdio::from(pids))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| format!("Failed to run pkexec xargs kill: {e}"))?;
        let _ = pgrep.wait();

        if status.success() {
            Ok(())
        } else {
            // No PIDs matched, or the user dismissed the auth dialog.
            // Reconciliation after the settle delay decides the outcome.
            logger::log(
                LogLevel::Warning,
                "PROCESS",
                format!("kill exited with {status}"),
            );
            Ok(())
        }
    }

    fn list_matching(&self, pattern: &str) -> Vec<String> {
        let Ok(output) = Command::new("pgrep")
            .args(["-af", pattern])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
        else {
            return Vec::new();
        };

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
