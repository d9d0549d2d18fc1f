//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout surfmenu:
//! profile naming markers, external binary paths, timing defaults, and
//! user-facing message strings.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Profile Naming Convention ===
// Surfshark names its OpenVPN profiles
// `<code>[-mp0<n>|-st0<n>].prod.surfshark.com_<proto>.ovpn`, plus a
// handful of IP-named exceptions like `45.83.91.133_tcp.ovpn`.

/// Domain suffix separating the server code from the transport marker.
pub const DOMAIN_SUFFIX: &str = ".prod.surfshark.com";
/// Substring marking a multipoint (multi-hop) profile.
pub const MULTIPOINT_MARKER: &str = "mp0";
/// Separator preceding the multipoint index in a server code.
pub const MULTIPOINT_SEP: &str = "-mp0";
/// Substring marking a static-IP profile.
pub const STATIC_MARKER: &str = "st0";
/// Separator preceding the static-IP index in a server code.
pub const STATIC_SEP: &str = "-st0";
/// Substring identifying a TCP profile; anything else defaults to UDP.
pub const TCP_MARKER: &str = "tcp.ovpn";
/// Suffix appended to a lowercased, hyphenated country name to form the
/// flag asset key.
pub const FLAG_SUFFIX: &str = "-flag.svg";

/// Multipoint profiles that do not follow the naming convention and are
/// force-classified as multipoint regardless of filename shape.
pub const SPECIAL_SERVER_PROFILES: [&str; 4] = [
    "sg-in.prod.surfshark.com_tcp.ovpn",
    "sg-in.prod.surfshark.com_udp.ovpn",
    "45.83.91.133_tcp.ovpn",
    "45.83.91.133_udp.ovpn",
];

// === External Binaries ===

/// Candidate OpenVPN binary locations, probed in order.
pub const OPENVPN_BIN_PATHS: [&str; 3] = ["/usr/bin/openvpn", "/bin/openvpn", "/usr/sbin/openvpn"];

/// Archive of all current Surfshark OpenVPN profiles.
pub const DEFAULT_PROFILES_URL: &str = "https://my.surfshark.com/vpn/api/v1/server/configurations";

// === Timing Defaults ===
// These are the compiled-in defaults. Users can override them via config.toml.
// AppConfig::default() references these so there is exactly one source of truth.

/// Seconds to wait after issuing a launch/kill command before trusting
/// the reconciled process state.
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 2;
/// Timeout for the profile archive download in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// === Catalog / Menu Defaults ===

/// Default maximum number of server rows shown per query.
pub const DEFAULT_MAX_SERVER_ENTRIES: usize = 10;
/// Default launcher keyword echoed in follow-up query actions.
pub const DEFAULT_KEYWORD: &str = "surf";

// === Logging Defaults ===

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;

// === Path Configuration ===

/// Name of the profiles subdirectory inside the config dir.
pub const PROFILES_DIR_NAME: &str = "server_profiles";
/// Name of the server code → country/city mapping file.
pub const MAPPING_FILE_NAME: &str = "server_country_map.json";
/// Name of the two-line OpenVPN credential file.
pub const CREDENTIALS_FILE_NAME: &str = "service_credentials.conf";
/// Name of the downloaded (pre-unzip) profile archive.
pub const ARCHIVE_FILE_NAME: &str = "configurations";

// === Icon Asset Keys ===

/// Asset key for the application icon.
pub const ICON_APP: &str = "images/icon.svg";
/// Directory prefix for flag asset keys.
pub const ICON_FLAG_DIR: &str = "images/flags";

// === Notification Messages ===

pub const NOTIFY_CONNECTING_BODY: &str = "Connecting you to Surfshark.";
pub const NOTIFY_CONNECTED_BODY: &str = "Connected to Surfshark VPN.";
pub const NOTIFY_CONNECT_FAILED_BODY: &str = "There was an error connecting to Surfshark VPN.";
pub const NOTIFY_DISCONNECTING_TITLE: &str = "Disconnecting...";
pub const NOTIFY_DISCONNECTING_BODY: &str = "Disconnecting you from Surfshark.";
pub const NOTIFY_DISCONNECTED_TITLE: &str = "Disconnected.";
pub const NOTIFY_DISCONNECTED_BODY: &str = "Disconnected from Surfshark VPN.";
pub const NOTIFY_DISCONNECT_FAILED_TITLE: &str = "Error while disconnecting.";
pub const NOTIFY_DISCONNECT_FAILED_BODY: &str =
    "There was an error while disconnecting from Surfshark VPN.";
pub const NOTIFY_REFRESHING_TITLE: &str = "Refreshing...";
pub const NOTIFY_REFRESHING_BODY: &str = "Refreshing Surfshark VPN connection profiles.";
pub const NOTIFY_REFRESHED_TITLE: &str = "Refreshed.";
pub const NOTIFY_REFRESHED_BODY: &str = "Surfshark VPN connection profiles refreshed.";

// === Menu Messages ===

pub const MSG_NOT_INSTALLED_TITLE: &str = "Extension failed to load :/";
pub const MSG_NOT_INSTALLED_BODY: &str =
    "Make sure to have openvpn, curl, and unzip installed on system.";
pub const MSG_NO_SERVERS_TITLE: &str = "No servers found with this criteria. :/";
pub const MSG_NO_SERVERS_BODY: &str = "Try refreshing the server list.";
pub const MSG_INVALID_TITLE: &str = "Invalid selection.";
pub const MSG_INVALID_BODY: &str = "Try again.";
pub const MSG_CONNECT_TITLE: &str = "Connect";
pub const MSG_CONNECT_BODY: &str = "Connect to Surfshark: choose from a list of servers";
pub const MSG_DISCONNECT_TITLE: &str = "Disconnect";
pub const MSG_DISCONNECT_BODY: &str = "Disconnect from Surfshark VPN";
pub const MSG_REFRESHDB_TITLE: &str = "Refresh DB";
pub const MSG_REFRESHDB_BODY: &str = "Refresh Surfshark VPN connection database";
