//! Application configuration management.
//!
//! Handles config directory resolution (CLI flag > `XDG_CONFIG_HOME` > default)
//! and loading `config.toml`. The resolved directory is passed down from
//! `main()`; every path the application touches lives under it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// User-configurable application settings.
///
/// All fields have sensible defaults. Users can override any subset via
/// `config.toml` in the config directory -- missing fields use defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Launcher keyword echoed in follow-up query actions.
    pub keyword: String,
    /// Maximum number of server rows shown per query.
    pub max_server_entries: usize,
    /// Seconds to wait after a launch/kill command before re-checking state.
    pub settle_delay_secs: u64,
    /// URL of the profile archive fetched by `refresh`.
    pub profiles_url: String,
    /// Minimum log level (`"debug"`, `"info"`, `"warning"`, `"error"`).
    pub log_level: String,
    /// Maximum number of log entries kept in memory.
    pub max_log_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keyword: constants::DEFAULT_KEYWORD.to_string(),
            max_server_entries: constants::DEFAULT_MAX_SERVER_ENTRIES,
            settle_delay_secs: constants::DEFAULT_SETTLE_DELAY_SECS,
            profiles_url: constants::DEFAULT_PROFILES_URL.to_string(),
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
            max_log_entries: constants::DEFAULT_MAX_LOG_ENTRIES,
        }
    }
}

/// Resolves the config directory path.
///
/// Precedence: CLI flag / `SURFMENU_CONFIG_DIR` > `XDG_CONFIG_HOME` > `~/.config/surfmenu`.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined or created.
pub fn resolve_config_dir(cli_override: Option<&PathBuf>) -> std::io::Result<PathBuf> {
    let path = if let Some(dir) = cli_override {
        // Resolve relative paths to absolute so the config dir is stable
        // regardless of the working directory.
        if dir.is_relative() {
            std::env::current_dir()?.join(dir)
        } else {
            dir.clone()
        }
    } else {
        default_config_dir()?
    };

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }

    // Canonicalize to resolve symlinks and ".." components
    std::fs::canonicalize(&path)
}

/// Computes the default config directory (no CLI override).
fn default_config_dir() -> std::io::Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let xdg_path = PathBuf::from(xdg);
        if xdg_path.is_absolute() {
            return Ok(xdg_path.join(constants::APP_NAME));
        }
    }

    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home.join(".config").join(constants::APP_NAME))
}

/// Loads `AppConfig` from `config.toml` in the given directory.
///
/// Returns defaults if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(config_dir: &Path) -> Result<AppConfig, String> {
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {e}", config_path.display()))?;

    toml::from_str(&content)
        .map_err(|e| format!("Invalid config at {}: {e}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("surfmenu-config-test-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.max_server_entries, constants::DEFAULT_MAX_SERVER_ENTRIES);
        assert_eq!(cfg.settle_delay_secs, constants::DEFAULT_SETTLE_DELAY_SECS);
        assert_eq!(cfg.keyword, constants::DEFAULT_KEYWORD);
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = temp_dir("missing");
        let cfg = load_config(&dir).unwrap();
        assert_eq!(cfg.max_server_entries, constants::DEFAULT_MAX_SERVER_ENTRIES);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_partial_toml() {
        let dir = temp_dir("partial");
        std::fs::write(dir.join("config.toml"), "max_server_entries = 5\n").unwrap();
        let cfg = load_config(&dir).unwrap();
        assert_eq!(cfg.max_server_entries, 5);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.settle_delay_secs, constants::DEFAULT_SETTLE_DELAY_SECS);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_rejects_unknown_fields() {
        let dir = temp_dir("unknown");
        std::fs::write(dir.join("config.toml"), "no_such_setting = true\n").unwrap();
        assert!(load_config(&dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = temp_dir("invalid");
        std::fs::write(dir.join("config.toml"), "keyword = [broken").unwrap();
        assert!(load_config(&dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_resolve_config_dir_with_override() {
        let dir = temp_dir("override");
        let resolved = resolve_config_dir(Some(&dir)).unwrap();
        assert!(resolved.ends_with("surfmenu-config-test-override"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
