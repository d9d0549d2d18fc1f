//! Desktop notifications via `notify-send`.
//!
//! Shelling out keeps the dependency tree small; a missing notify-send
//! degrades to a log line, never an error.

use std::process::{Command, Stdio};

use crate::constants;
use crate::logger::{self, LogLevel};
use crate::system::Notifier;

/// Production notifier shelling out to `notify-send`.
#[derive(Debug, Default)]
pub struct NotifySend;

impl Notifier for NotifySend {
    fn notify(&self, title: &str, body: &str) {
        let result = Command::new("notify-send")
            .args(["-a", constants::APP_NAME, "-t", "1000", title, body])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        if let Err(e) = result {
            logger::log(
                LogLevel::Debug,
                "NOTIFY",
                format!("notify-send unavailable ({e}); {title} {body}"),
            );
        }
    }
}

/// Notifier that only logs, for headless use (`--quiet` CLI runs).
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        logger::log(LogLevel::Info, "NOTIFY", format!("{title} {body}"));
    }
}
