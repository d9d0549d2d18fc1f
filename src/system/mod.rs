//! External collaborator seams.
//!
//! The core never talks to the system directly; it goes through these
//! traits so tests can substitute deterministic fakes:
//! - `process`: elevated launch/kill and process-table queries
//! - `notify`: desktop notifications (best effort)
//! - `fetcher`: profile archive download and unpack
//! - `credentials`: the two-line OpenVPN auth file

pub mod credentials;
pub mod fetcher;
pub mod notify;
pub mod process;

pub use credentials::FileCredentialStore;
pub use fetcher::CurlFetcher;
pub use notify::{LogNotifier, NotifySend};
pub use process::PkexecLauncher;

use std::path::Path;

/// Launches, kills and lists VPN client processes.
pub trait ProcessLauncher {
    /// Fire-and-forget elevated launch of the VPN client.
    ///
    /// # Errors
    ///
    /// Returns an error if the launch command itself cannot be issued;
    /// whether the client actually came up is decided later by
    /// reconciliation, not here.
    fn launch(&self, binary: &Path, config: &Path, credentials: &Path) -> Result<(), String>;

    /// Elevated termination of all processes matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the kill command cannot be issued.
    fn kill(&self, pattern: &str) -> Result<(), String>;

    /// Full command lines of running processes matching `pattern`.
    fn list_matching(&self, pattern: &str) -> Vec<String>;
}

/// Shows desktop notifications. Best effort; failures are swallowed.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Replaces the profile files in a directory with a fresh set.
pub trait ArchiveFetcher {
    /// Deletes existing profiles, downloads the archive and unpacks it
    /// into `target_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first failing step; the caller
    /// treats the refresh as best effort.
    fn refresh_profiles(&self, target_dir: &Path) -> Result<(), String>;
}
