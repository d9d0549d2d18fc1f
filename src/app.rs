//! Application wiring.
//!
//! `App` owns the loaded configuration, the server directory, and the
//! classified catalogs, and hands out the per-operation collaborators
//! (controller, menu context). Connection state is never stored here;
//! every query derives it fresh from the process table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::AppConfig;
use crate::constants;
use crate::core::{self, CatalogBuilder, Catalogs, ServerDirectory};
use crate::logger::{self, LogLevel};
use crate::menu::{self, MenuContext, MenuItem};
use crate::state::ConnectionState;
use crate::system::{ArchiveFetcher, Notifier, ProcessLauncher};
use crate::vpn::{self, ActionOutcome, ConnectionController, ConnectionReconciler};

pub struct App {
    pub config: AppConfig,
    directory: ServerDirectory,
    catalogs: Catalogs,
    openvpn: Option<PathBuf>,
    profiles_dir: PathBuf,
    credentials_path: PathBuf,
}

impl App {
    /// Builds the application state from a resolved config directory:
    /// loads the server directory, scans the profile files, and
    /// classifies them into catalogs.
    ///
    /// A missing mapping file degrades to an empty directory (profiles
    /// fall back to code-derived identities); a missing profiles
    /// directory is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the profiles directory cannot be created or
    /// the mapping file exists but cannot be parsed.
    pub fn new(config: AppConfig, config_dir: &Path) -> Result<Self, String> {
        let profiles_dir = config_dir.join(constants::PROFILES_DIR_NAME);
        std::fs::create_dir_all(&profiles_dir)
            .map_err(|e| format!("Failed to create {}: {e}", profiles_dir.display()))?;

        let mapping_path = config_dir.join(constants::MAPPING_FILE_NAME);
        let directory = if mapping_path.exists() {
            ServerDirectory::load(&mapping_path)?
        } else {
            logger::log(
                LogLevel::Warning,
                "APP",
                format!(
                    "Mapping file {} not found, using code-derived names",
                    mapping_path.display()
                ),
            );
            ServerDirectory::empty()
        };

        let mut app = Self {
            config,
            directory,
            catalogs: Catalogs::default(),
            openvpn: vpn::openvpn_path(),
            profiles_dir,
            credentials_path: config_dir.join(constants::CREDENTIALS_FILE_NAME),
        };
        app.rebuild_catalogs();
        Ok(app)
    }

    /// Re-scans the profiles directory and rebuilds the three catalogs.
    pub fn rebuild_catalogs(&mut self) {
        let profile_ids = core::catalog::scan_profiles(&self.profiles_dir);
        let builder = CatalogBuilder::new(&self.directory);
        self.catalogs = builder.rebuild(&profile_ids);
        logger::log(
            LogLevel::Info,
            "APP",
            format!(
                "Catalogs rebuilt: {} regular, {} static, {} multipoint",
                self.catalogs.regular.len(),
                self.catalogs.static_ip.len(),
                self.catalogs.multipoint.len()
            ),
        );
    }

    #[must_use]
    pub const fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    #[must_use]
    pub const fn directory(&self) -> &ServerDirectory {
        &self.directory
    }

    #[must_use]
    pub const fn credentials_path(&self) -> &PathBuf {
        &self.credentials_path
    }

    #[must_use]
    pub fn installed(&self) -> bool {
        self.openvpn.is_some()
    }

    /// Current derived connection state.
    #[must_use]
    pub fn status<L: ProcessLauncher>(&self, launcher: &L) -> ConnectionState {
        match &self.openvpn {
            Some(bin) => {
                ConnectionReconciler::new(launcher, &self.directory, vpn::process_pattern(bin))
                    .current_state()
            }
            None => ConnectionState::Disconnected,
        }
    }

    /// Answers a launcher query with result rows.
    #[must_use]
    pub fn query<L: ProcessLauncher>(&self, argument: &str, launcher: &L) -> Vec<MenuItem> {
        let state = self.status(launcher);
        let ctx = MenuContext {
            installed: self.installed(),
            state: &state,
            catalogs: &self.catalogs,
            keyword: &self.config.keyword,
            max_entries: self.config.max_server_entries,
        };
        menu::build_menu(argument, &ctx)
    }

    /// Connects to a profile and reports the reconciled outcome.
    pub fn connect<L: ProcessLauncher, N: Notifier>(
        &self,
        profile_id: &str,
        launcher: &L,
        notifier: &N,
    ) -> ActionOutcome {
        self.controller(launcher, notifier).connect(profile_id)
    }

    /// Disconnects any running connection and reports the outcome.
    pub fn disconnect<L: ProcessLauncher, N: Notifier>(
        &self,
        launcher: &L,
        notifier: &N,
    ) -> ActionOutcome {
        self.controller(launcher, notifier).disconnect()
    }

    /// Re-downloads the profile archive and rebuilds the catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or unpack step fails; the
    /// catalogs are still rebuilt from whatever files remain.
    pub fn refresh<F: ArchiveFetcher, N: Notifier>(
        &mut self,
        fetcher: &F,
        notifier: &N,
    ) -> Result<(), String> {
        notifier.notify(
            constants::NOTIFY_REFRESHING_TITLE,
            constants::NOTIFY_REFRESHING_BODY,
        );
        let result = fetcher.refresh_profiles(&self.profiles_dir);
        self.rebuild_catalogs();
        result?;
        notifier.notify(
            constants::NOTIFY_REFRESHED_TITLE,
            constants::NOTIFY_REFRESHED_BODY,
        );
        Ok(())
    }

    fn controller<'a, L: ProcessLauncher, N: Notifier>(
        &'a self,
        launcher: &'a L,
        notifier: &'a N,
    ) -> ConnectionController<'a, L, N> {
        ConnectionController::new(
            launcher,
            notifier,
            &self.directory,
            self.openvpn.clone(),
            self.profiles_dir.clone(),
            self.credentials_path.clone(),
            Duration::from_secs(self.config.settle_delay_secs),
        )
    }
}
