//! Static server directory: code → geographic identity.
//!
//! Loaded once at startup from `server_country_map.json` and read-only
//! for the lifetime of the process. Lookups never fail; unknown codes
//! get a synthetic fallback identity so an out-of-date mapping file can
//! never break the catalog.

use std::path::Path;

use serde::Deserialize;

use crate::constants;
use crate::logger::{self, LogLevel};

/// Geographic identity of one server code, as stored in the mapping file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ServerIdentity {
    pub code: String,
    pub country: String,
    pub city: String,
    /// Alternate search term (e.g. "USA" for United States). A single
    /// space in fallback identities so prefix search never matches the
    /// empty string.
    #[serde(rename = "altSearch")]
    pub alt_search: String,
}

/// In-memory catalog of server identities keyed by server code.
#[derive(Debug, Default)]
pub struct ServerDirectory {
    entries: Vec<ServerIdentity>,
}

impl ServerDirectory {
    /// An empty directory; every lookup degrades to the fallback identity.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the directory from the JSON mapping file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let entries: Vec<ServerIdentity> = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid mapping file {}: {e}", path.display()))?;

        logger::log(
            LogLevel::Info,
            "DIRECTORY",
            format!("Loaded {} server identities", entries.len()),
        );
        Ok(Self { entries })
    }

    /// Number of identities in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the identity for a server code.
    ///
    /// On a miss (or an indeterminate code) a fallback identity is
    /// returned: country = code (or the raw profile identifier), empty
    /// city, single-space alternate search term. Never fails.
    #[must_use]
    pub fn lookup(&self, server_code: Option<&str>, profile_id: &str) -> ServerIdentity {
        if let Some(code) = server_code {
            if let Some(identity) = self.entries.iter().find(|e| e.code == code) {
                return identity.clone();
            }
        }

        let key = server_code.unwrap_or(profile_id).to_string();
        ServerIdentity {
            code: key.clone(),
            country: key,
            city: String::new(),
            alt_search: " ".to_string(),
        }
    }

    /// Flag asset key for a country: lowercased, spaces replaced with
    /// hyphens, fixed `-flag.svg` suffix. Empty country → empty key.
    #[must_use]
    pub fn flag_asset_key(country: &str) -> String {
        if country.is_empty() {
            return String::new();
        }
        format!(
            "{}{}",
            country.to_lowercase().replace(' ', "-"),
            constants::FLAG_SUFFIX
        )
    }
}
