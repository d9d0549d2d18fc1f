//! The two-line OpenVPN credential file.
//!
//! Line 1 is the username, line 2 the password; this is the format
//! OpenVPN's `--auth-user-pass` expects. The file is created with mode
//! 600 and each field can be updated independently.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use crate::logger::{self, LogLevel};

/// Persists service credentials to a fixed-permission two-line file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Updates line 1 (username), creating the file if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn set_username(&self, value: &str) -> Result<(), String> {
        self.update_line(0, value)
    }

    /// Updates line 2 (password), creating the file if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn set_password(&self, value: &str) -> Result<(), String> {
        self.update_line(1, value)
    }

    fn update_line(&self, index: usize, value: &str) -> Result<(), String> {
        let mut lines: Vec<String> = if self.path.exists() {
            fs::read_to_string(&self.path)
                .map_err(|e| format!("Failed to read {}: {e}", self.path.display()))?
                .lines()
                .map(ToString::to_string)
                .collect()
        } else {
            Vec::new()
        };

        while lines.len() < 2 {
            lines.push(String::new());
        }
        lines[index] = value.to_string();

        fs::write(&self.path, format!("{}\n{}\n", lines[0], lines[1]))
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()))?;

        // Credentials must not be world-readable
        let mut perms = fs::metadata(&self.path)
            .map_err(|e| format!("Failed to read metadata: {e}"))?
            .permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&self.path, perms)
            .map_err(|e| format!("Failed to set permissions: {e}"))?;

        logger::log(
            LogLevel::Info,
            "CREDENTIALS",
            format!(
                "Updated {} in {}",
                if index == 0 { "username" } else { "password" },
                self.path.display()
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> (FileCredentialStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("surfmenu-cred-test-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("service_credentials.conf");
        (FileCredentialStore::new(path), dir)
    }

    #[test]
    fn test_creates_file_with_username() {
        let (store, dir) = store("create");
        store.set_username("alice").unwrap();

        let content = fs::read_to_string(dir.join("service_credentials.conf")).unwrap();
        assert_eq!(content, "alice\n\n");

        let mode = fs::metadata(dir.join("service_credentials.conf"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_password_preserves_username() {
        let (store, dir) = store("preserve");
        store.set_username("alice").unwrap();
        store.set_password("hunter2").unwrap();

        let content = fs::read_to_string(dir.join("service_credentials.conf")).unwrap();
        assert_eq!(content, "alice\nhunter2\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_username_update_preserves_password() {
        let (store, dir) = store("update");
        store.set_password("hunter2").unwrap();
        store.set_username("bob").unwrap();
        store.set_username("carol").unwrap();

        let content = fs::read_to_string(dir.join("service_credentials.conf")).unwrap();
        assert_eq!(content, "carol\nhunter2\n");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
