//! Profile archive download and unpack.
//!
//! Uses curl and unzip commands for the fetch to avoid heavy
//! dependencies; the archive endpoint serves a zip of every current
//! `.ovpn` profile.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::constants;
use crate::logger::{self, LogLevel};
use crate::system::ArchiveFetcher;

/// Production fetcher shelling out to `curl` and `unzip`.
#[derive(Debug)]
pub struct CurlFetcher {
    url: String,
    timeout_secs: u64,
}

impl CurlFetcher {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: constants::HTTP_TIMEOUT_SECS,
        }
    }
}

impl ArchiveFetcher for CurlFetcher {
    fn refresh_profiles(&self, target_dir: &Path) -> Result<(), String> {
        logger::log(
            LogLevel::Info,
            "FETCH",
            format!("Refreshing profiles from {}", self.url),
        );

        std::fs::create_dir_all(target_dir)
            .map_err(|e| format!("Failed to create {}: {e}", target_dir.display()))?;

        // Drop the old profile set first so stale servers disappear
        remove_existing_profiles(target_dir);

        let archive_path = target_dir.join(constants::ARCHIVE_FILE_NAME);

        // -f: fail on HTTP errors  -L: follow redirects
        // -s -S: silent but still report errors
        let output = Command::new("curl")
            .args([
                "-f",
                "-L",
                "-s",
                "-S",
                "--max-time",
                &self.timeout_secs.to_string(),
                "-A",
                &format!("{}/{}", constants::APP_NAME, constants::APP_VERSION),
                "-o",
                archive_path.to_str().unwrap_or(""),
                &self.url,
            ])
            .stdout(Stdio::null())
            .output()
            .map_err(|e| format!("Failed to execute curl: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Clean up partial download if it exists
            if archive_path.exists() {
                let _ = std::fs::remove_file(&archive_path);
            }
            logger::log(LogLevel::Error, "FETCH", format!("curl failed: {stderr}"));
            return Err(format!("Download failed: {}", stderr.trim()));
        }

        let unzip = Command::new("unzip")
            .args([
                "-o",
                archive_path.to_str().unwrap_or(""),
                "-d",
                target_dir.to_str().unwrap_or(""),
            ])
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| format!("Failed to execute unzip: {e}"))?;

        let _ = std::fs::remove_file(&archive_path);

        if !unzip.status.success() {
            let stderr = String::from_utf8_lossy(&unzip.stderr);
            logger::log(LogLevel::Error, "FETCH", format!("unzip failed: {stderr}"));
            return Err(format!("Unpack failed: {}", stderr.trim()));
        }

        logger::log(LogLevel::Info, "FETCH", "Profile archive unpacked");
        Ok(())
    }
}

/// Removes `.ovpn` files and a stale archive from the profiles dir.
/// Unreadable entries are skipped, not fatal.
fn remove_existing_profiles(target_dir: &Path) {
    let Ok(entries) = std::fs::read_dir(target_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_profile = path.extension().is_some_and(|ext| ext == "ovpn");
        let is_archive = path
            .file_name()
            .is_some_and(|n| n == constants::ARCHIVE_FILE_NAME);
        if path.is_file() && (is_profile || is_archive) {
            let _ = std::fs::remove_file(&path);
        }
    }
}
