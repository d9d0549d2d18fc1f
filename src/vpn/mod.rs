//! Connection lifecycle: reconciliation and the connect/disconnect
//! controller.
//!
//! Connection status is never cached. The reconciler derives it from
//! the host process table on every query, so surfmenu cannot drift from
//! external reality (another tool killing OpenVPN, a crashed daemon, a
//! connection started by hand). The controller issues fire-and-forget
//! commands and then trusts a fresh reconcile after a settle delay.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;
use crate::core::{self, ServerDirectory};
use crate::logger::{self, LogLevel};
use crate::state::{ConnectionState, ControllerPhase};
use crate::system::{Notifier, ProcessLauncher};

/// Locates the OpenVPN binary, probing the known paths in order.
#[must_use]
pub fn openvpn_path() -> Option<PathBuf> {
    constants::OPENVPN_BIN_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// The pgrep pattern matching our OpenVPN invocations: the binary path
/// followed by the `--config` flag.
#[must_use]
pub fn process_pattern(binary: &Path) -> String {
    format!("{} --config", binary.display())
}

/// Derives the current connection state from the process table.
pub struct ConnectionReconciler<'a, L: ProcessLauncher> {
    launcher: &'a L,
    directory: &'a ServerDirectory,
    pattern: String,
}

impl<'a, L: ProcessLauncher> ConnectionReconciler<'a, L> {
    #[must_use]
    pub const fn new(launcher: &'a L, directory: &'a ServerDirectory, pattern: String) -> Self {
        Self {
            launcher,
            directory,
            pattern,
        }
    }

    /// Queries the process table and maps any matching OpenVPN
    /// invocation back to its server record.
    ///
    /// Pure read: issues no mutating commands. No matching process →
    /// `Disconnected`; a match without a readable `--config` argument
    /// also counts as disconnected rather than failing.
    #[must_use]
    pub fn current_state(&self) -> ConnectionState {
        let lines = self.launcher.list_matching(&self.pattern);
        let Some(profile_id) = lines.iter().find_map(|l| extract_profile_id(l)) else {
            return ConnectionState::Disconnected;
        };

        logger::log(
            LogLevel::Debug,
            "RECONCILE",
            format!("Active profile: {profile_id}"),
        );
        ConnectionState::Connected(core::resolve_record(self.directory, &profile_id))
    }
}

/// Extracts the profile identifier from a process command line: the
/// base name of the path following the `--config` flag.
fn extract_profile_id(command_line: &str) -> Option<String> {
    let mut tokens = command_line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "--config" {
            let config_path = tokens.next()?;
            return config_path.rsplit('/').next().map(ToString::to_string);
        }
    }
    None
}

/// Orchestrates connect and disconnect requests.
///
/// Single attempt per call, no retry, no interlock: connecting while
/// already connected is not prevented here; the launcher frontend hides
/// the connect affordance when a connection is live.
pub struct ConnectionController<'a, L: ProcessLauncher, N: Notifier> {
    launcher: &'a L,
    notifier: &'a N,
    directory: &'a ServerDirectory,
    openvpn: Option<PathBuf>,
    profiles_dir: PathBuf,
    credentials_path: PathBuf,
    settle_delay: Duration,
    phase: ControllerPhase,
}

/// Result of a connect or disconnect request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// OpenVPN binary missing; nothing was attempted.
    NotInstalled,
    /// Post-action reconciliation confirmed the intended state.
    Confirmed,
    /// Post-action reconciliation disagreed with the intended state.
    Mismatch,
}

impl<'a, L: ProcessLauncher, N: Notifier> ConnectionController<'a, L, N> {
    #[must_use]
    pub fn new(
        launcher: &'a L,
        notifier: &'a N,
        directory: &'a ServerDirectory,
        openvpn: Option<PathBuf>,
        profiles_dir: PathBuf,
        credentials_path: PathBuf,
        settle_delay: Duration,
    ) -> Self {
        Self {
            launcher,
            notifier,
            directory,
            openvpn,
            profiles_dir,
            credentials_path,
            settle_delay,
            phase: ControllerPhase::Idle,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// Current derived connection state. Missing binary → disconnected.
    #[must_use]
    pub fn current_state(&self) -> ConnectionState {
        match &self.openvpn {
            Some(bin) => self.reconciler(bin).current_state(),
            None => ConnectionState::Disconnected,
        }
    }

    fn reconciler(&self, binary: &Path) -> ConnectionReconciler<'a, L> {
        ConnectionReconciler::new(self.launcher, self.directory, process_pattern(binary))
    }

    /// Connects to the given profile: notify, launch, settle, reconcile.
    pub fn connect(&mut self, profile_id: &str) -> ActionOutcome {
        let Some(binary) = self.openvpn.clone() else {
            logger::log(LogLevel::Warning, "CONNECT", "OpenVPN is not installed");
            return ActionOutcome::NotInstalled;
        };

        self.phase = ControllerPhase::Connecting;
        let record = core::resolve_record(self.directory, profile_id);
        let place = format!("{} - {}", record.country, record.city);

        self.notifier.notify(
            &format!("Connecting to {place}..."),
            constants::NOTIFY_CONNECTING_BODY,
        );
        logger::log(
            LogLevel::Info,
            "CONNECT",
            format!("Launching {profile_id} ({place})"),
        );

        let config_path = self.profiles_dir.join(profile_id);
        if let Err(e) = self
            .launcher
            .launch(&binary, &config_path, &self.credentials_path)
        {
            // Still settle and reconcile: the command result does not
            // tell us whether the daemon came up.
            logger::log(LogLevel::Error, "CONNECT", format!("Launch failed: {e}"));
        }

        std::thread::sleep(self.settle_delay);
        let outcome = if self.reconciler(&binary).current_state().is_connected() {
            self.notifier.notify(
                &format!("Connected to {place}."),
                constants::NOTIFY_CONNECTED_BODY,
            );
            ActionOutcome::Confirmed
        } else {
            self.notifier.notify(
                &format!("Error connecting to {place}."),
                constants::NOTIFY_CONNECT_FAILED_BODY,
            );
            logger::log(
                LogLevel::Error,
                "CONNECT",
                format!("State check after launch: not connected ({profile_id})"),
            );
            ActionOutcome::Mismatch
        };
        self.phase = ControllerPhase::Idle;
        outcome
    }

    /// Disconnects any running connection: notify, kill, settle, reconcile.
    pub fn disconnect(&mut self) -> ActionOutcome {
        let Some(binary) = self.openvpn.clone() else {
            logger::log(LogLevel::Warning, "DISCONNECT", "OpenVPN is not installed");
            return ActionOutcome::NotInstalled;
        };

        self.phase = ControllerPhase::Disconnecting;
        self.notifier.notify(
            constants::NOTIFY_DISCONNECTING_TITLE,
            constants::NOTIFY_DISCONNECTING_BODY,
        );

        let pattern = process_pattern(&binary);
        if let Err(e) = self.launcher.kill(&pattern) {
            logger::log(LogLevel::Error, "DISCONNECT", format!("Kill failed: {e}"));
        }

        std::thread::sleep(self.settle_delay);
        let outcome = if self.reconciler(&binary).current_state().is_connected() {
            self.notifier.notify(
                constants::NOTIFY_DISCONNECT_FAILED_TITLE,
                constants::NOTIFY_DISCONNECT_FAILED_BODY,
            );
            logger::log(
                LogLevel::Error,
                "DISCONNECT",
                "State check after kill: still connected",
            );
            ActionOutcome::Mismatch
        } else {
            self.notifier.notify(
                constants::NOTIFY_DISCONNECTED_TITLE,
                constants::NOTIFY_DISCONNECTED_BODY,
            );
            ActionOutcome::Confirmed
        };
        self.phase = ControllerPhase::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Fake launcher with a scripted process table.
    struct FakeLauncher {
        table: RefCell<Vec<String>>,
        launched: RefCell<Vec<String>>,
        killed: RefCell<Vec<String>>,
        /// Lines the table switches to after a launch/kill.
        after_launch: Vec<String>,
    }

    impl FakeLauncher {
        fn new(table: Vec<&str>, after_launch: Vec<&str>) -> Self {
            Self {
                table: RefCell::new(table.iter().map(ToString::to_string).collect()),
                launched: RefCell::new(Vec::new()),
                killed: RefCell::new(Vec::new()),
                after_launch: after_launch.iter().map(ToString::to_string).collect(),
            }
        }
    }

    impl ProcessLauncher for FakeLauncher {
        fn launch(&self, _binary: &Path, config: &Path, _credentials: &Path) -> Result<(), String> {
            self.launched.borrow_mut().push(config.display().to_string());
            *self.table.borrow_mut() = self.after_launch.clone();
            Ok(())
        }

        fn kill(&self, pattern: &str) -> Result<(), String> {
            self.killed.borrow_mut().push(pattern.to_string());
            *self.table.borrow_mut() = self.after_launch.clone();
            Ok(())
        }

        fn list_matching(&self, _pattern: &str) -> Vec<String> {
            self.table.borrow().clone()
        }
    }

    /// Notifier recording every (title, body) pair.
    #[derive(Default)]
    struct FakeNotifier {
        sent: RefCell<Vec<(String, String)>>,
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, title: &str, body: &str) {
            self.sent
                .borrow_mut()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn directory() -> ServerDirectory {
        let dir = std::env::temp_dir().join(format!(
            "surfmenu-vpn-dir-{:?}",
            std::thread::current().id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("map.json");
        std::fs::write(
            &path,
            r#"[{"code":"de-fra","country":"Germany","city":"Frankfurt","altSearch":"Deutschland"}]"#,
        )
        .unwrap();
        let loaded = ServerDirectory::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        loaded
    }

    fn controller<'a>(
        launcher: &'a FakeLauncher,
        notifier: &'a FakeNotifier,
        dir: &'a ServerDirectory,
        installed: bool,
    ) -> ConnectionController<'a, FakeLauncher, FakeNotifier> {
        ConnectionController::new(
            launcher,
            notifier,
            dir,
            installed.then(|| PathBuf::from("/usr/sbin/openvpn")),
            PathBuf::from("/tmp/profiles"),
            PathBuf::from("/tmp/creds.conf"),
            Duration::ZERO, // no settle wait in tests
        )
    }

    const ACTIVE_LINE: &str =
        "4242 /usr/sbin/openvpn --config /tmp/profiles/de-fra.prod.surfshark.com_udp.ovpn --auth-user-pass /tmp/creds.conf";

    #[test]
    fn test_extract_profile_id() {
        assert_eq!(
            extract_profile_id(ACTIVE_LINE).as_deref(),
            Some("de-fra.prod.surfshark.com_udp.ovpn")
        );
        assert_eq!(extract_profile_id("4242 /usr/sbin/openvpn --daemon"), None);
        assert_eq!(extract_profile_id("4242 /usr/sbin/openvpn --config"), None);
    }

    #[test]
    fn test_reconciler_disconnected_when_no_processes() {
        let launcher = FakeLauncher::new(vec![], vec![]);
        let dir = directory();
        let reconciler =
            ConnectionReconciler::new(&launcher, &dir, "openvpn --config".to_string());
        assert_eq!(reconciler.current_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_reconciler_connected_resolves_record() {
        let launcher = FakeLauncher::new(vec![ACTIVE_LINE], vec![]);
        let dir = directory();
        let reconciler =
            ConnectionReconciler::new(&launcher, &dir, "openvpn --config".to_string());
        match reconciler.current_state() {
            ConnectionState::Connected(record) => {
                assert_eq!(record.country, "Germany");
                assert_eq!(record.city, "Frankfurt");
                assert_eq!(record.profile_id, "de-fra.prod.surfshark.com_udp.ovpn");
            }
            ConnectionState::Disconnected => panic!("expected Connected"),
        }
    }

    #[test]
    fn test_connect_confirmed() {
        let launcher = FakeLauncher::new(vec![], vec![ACTIVE_LINE]);
        let notifier = FakeNotifier::default();
        let dir = directory();
        let mut ctl = controller(&launcher, &notifier, &dir, true);

        let outcome = ctl.connect("de-fra.prod.surfshark.com_udp.ovpn");

        assert_eq!(outcome, ActionOutcome::Confirmed);
        assert_eq!(ctl.phase(), ControllerPhase::Idle);
        // Launch used the profile's config path
        assert_eq!(
            launcher.launched.borrow().as_slice(),
            &["/tmp/profiles/de-fra.prod.surfshark.com_udp.ovpn".to_string()]
        );
        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "Connecting to Germany - Frankfurt...");
        assert_eq!(sent[1].0, "Connected to Germany - Frankfurt.");
    }

    #[test]
    fn test_connect_mismatch_notifies_failure() {
        // Process table stays empty after the launch
        let launcher = FakeLauncher::new(vec![], vec![]);
        let notifier = FakeNotifier::default();
        let dir = directory();
        let mut ctl = controller(&launcher, &notifier, &dir, true);

        let outcome = ctl.connect("de-fra.prod.surfshark.com_udp.ovpn");

        assert_eq!(outcome, ActionOutcome::Mismatch);
        let sent = notifier.sent.borrow();
        assert_eq!(sent[1].0, "Error connecting to Germany - Frankfurt.");
    }

    #[test]
    fn test_connect_not_installed_is_noop() {
        let launcher = FakeLauncher::new(vec![], vec![ACTIVE_LINE]);
        let notifier = FakeNotifier::default();
        let dir = directory();
        let mut ctl = controller(&launcher, &notifier, &dir, false);

        let outcome = ctl.connect("de-fra.prod.surfshark.com_udp.ovpn");

        assert_eq!(outcome, ActionOutcome::NotInstalled);
        assert!(launcher.launched.borrow().is_empty());
        assert!(notifier.sent.borrow().is_empty());
    }

    #[test]
    fn test_disconnect_confirmed() {
        let launcher = FakeLauncher::new(vec![ACTIVE_LINE], vec![]);
        let notifier = FakeNotifier::default();
        let dir = directory();
        let mut ctl = controller(&launcher, &notifier, &dir, true);

        let outcome = ctl.disconnect();

        assert_eq!(outcome, ActionOutcome::Confirmed);
        assert_eq!(
            launcher.killed.borrow().as_slice(),
            &["/usr/sbin/openvpn --config".to_string()]
        );
        let sent = notifier.sent.borrow();
        assert_eq!(sent[0].0, constants::NOTIFY_DISCONNECTING_TITLE);
        assert_eq!(sent[1].0, constants::NOTIFY_DISCONNECTED_TITLE);
    }

    #[test]
    fn test_disconnect_mismatch_when_process_survives() {
        // Table still shows the process after the kill
        let launcher = FakeLauncher::new(vec![ACTIVE_LINE], vec![ACTIVE_LINE]);
        let notifier = FakeNotifier::default();
        let dir = directory();
        let mut ctl = controller(&launcher, &notifier, &dir, true);

        let outcome = ctl.disconnect();

        assert_eq!(outcome, ActionOutcome::Mismatch);
        let sent = notifier.sent.borrow();
        assert_eq!(sent[1].0, constants::NOTIFY_DISCONNECT_FAILED_TITLE);
    }

    #[test]
    fn test_current_state_without_binary_is_disconnected() {
        let launcher = FakeLauncher::new(vec![ACTIVE_LINE], vec![]);
        let notifier = FakeNotifier::default();
        let dir = directory();
        let ctl = controller(&launcher, &notifier, &dir, false);
        assert_eq!(ctl.current_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_process_pattern() {
        assert_eq!(
            process_pattern(Path::new("/usr/bin/openvpn")),
            "/usr/bin/openvpn --config"
        );
    }
}
