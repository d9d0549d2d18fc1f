//! Catalog construction: profile identifiers → classified server records.
//!
//! The three catalogs (regular, static-IP, multipoint) are rebuilt
//! wholesale on startup and on explicit refresh. Queries only ever see
//! a fully built set; the owner replaces the whole [`Catalogs`] value
//! in one assignment, never mutating records in place.

use std::path::Path;

use crate::constants;
use crate::core::directory::ServerDirectory;
use crate::core::parser::{self, ConnectionVariant};
use crate::logger::{self, LogLevel};

/// One enriched, display-ready server entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerRecord {
    pub country: String,
    /// City, with the numeric index appended for multipoint / static-IP
    /// profiles (e.g. "Frankfurt 001").
    pub city: String,
    /// Alternate search term from the directory.
    pub alt_word: String,
    /// Flag asset key derived from the country name.
    pub flag_asset_key: String,
    pub variant: ConnectionVariant,
    /// The raw profile identifier this record was built from.
    pub profile_id: String,
}

/// The three mutually exclusive catalogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub regular: Vec<ServerRecord>,
    pub static_ip: Vec<ServerRecord>,
    pub multipoint: Vec<ServerRecord>,
}

impl Catalogs {
    /// Total number of records across the three catalogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regular.len() + self.static_ip.len() + self.multipoint.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves a single profile identifier into a server record.
///
/// Total function: unparseable identifiers degrade to the directory's
/// fallback identity and still produce a record.
#[must_use]
pub fn resolve_record(directory: &ServerDirectory, profile_id: &str) -> ServerRecord {
    let parsed = parser::parse(profile_id);
    let identity = directory.lookup(parsed.server_code.as_deref(), profile_id);

    ServerRecord {
        flag_asset_key: ServerDirectory::flag_asset_key(&identity.country),
        country: identity.country,
        city: format!("{}{}", identity.city, parser::variant_suffix(profile_id)),
        alt_word: identity.alt_search,
        variant: parsed.variant,
        profile_id: profile_id.to_string(),
    }
}

/// Builds the three catalogs from the available profile identifiers.
pub struct CatalogBuilder<'a> {
    directory: &'a ServerDirectory,
}

impl<'a> CatalogBuilder<'a> {
    #[must_use]
    pub const fn new(directory: &'a ServerDirectory) -> Self {
        Self { directory }
    }

    /// Classifies every identifier into exactly one catalog and builds
    /// its record. Precedence: special allow-list → multipoint, static
    /// marker → static-IP, multipoint marker → multipoint, else regular.
    #[must_use]
    pub fn rebuild(&self, profile_ids: &[String]) -> Catalogs {
        let mut catalogs = Catalogs::default();

        for profile_id in profile_ids {
            let record = resolve_record(self.directory, profile_id);
            if parser::is_special_profile(profile_id) {
                catalogs.multipoint.push(record);
            } else if profile_id.contains(constants::STATIC_MARKER) {
                catalogs.static_ip.push(record);
            } else if profile_id.contains(constants::MULTIPOINT_MARKER) {
                catalogs.multipoint.push(record);
            } else {
                catalogs.regular.push(record);
            }
        }

        logger::log(
            LogLevel::Info,
            "CATALOG",
            format!(
                "Rebuilt catalogs: {} regular, {} static-IP, {} multipoint",
                catalogs.regular.len(),
                catalogs.static_ip.len(),
                catalogs.multipoint.len()
            ),
        );
        catalogs
    }
}

/// Lists the profile identifiers available in the profiles directory.
///
/// Plain files only, sorted by name so rebuilds are deterministic. A
/// missing or unreadable directory yields an empty list.
#[must_use]
pub fn scan_profiles(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        logger::log(
            LogLevel::Warning,
            "CATALOG",
            format!("Could not read profiles directory {}", dir.display()),
        );
        return Vec::new();
    };

    let mut ids: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(ToString::to_string))
        .collect();
    ids.sort();
    ids
}
