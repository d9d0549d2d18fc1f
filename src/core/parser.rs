//! Profile filename parsing.
//!
//! Surfshark profile names are the only structured data we get from the
//! provider, and they are only loosely structured:
//!
//! - `us-nyc.prod.surfshark.com_udp.ovpn` (regular)
//! - `us-nyc-mp001.prod.surfshark.com_tcp.ovpn` (multipoint, indexed)
//! - `de-fra-st001.prod.surfshark.com_udp.ovpn` (static IP, indexed)
//! - `45.83.91.133_tcp.ovpn` (IP-named)
//!
//! Everything that interprets these markers lives here so a naming
//! convention change touches exactly one module.

use crate::constants;

/// Connection variant of a single profile: transport protocol crossed
/// with the regular / static-IP / multipoint server class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionVariant {
    Udp,
    Tcp,
    StaticUdp,
    StaticTcp,
    MultipointUdp,
    MultipointTcp,
}

impl ConnectionVariant {
    /// User-facing label, also the target of the variant substring filter.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Udp => "UDP",
            Self::Tcp => "TCP",
            Self::StaticUdp => "Static-IP UDP",
            Self::StaticTcp => "Static-IP TCP",
            Self::MultipointUdp => "Multi-Point UDP",
            Self::MultipointTcp => "Multi-Point TCP",
        }
    }
}

impl std::fmt::Display for ConnectionVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of parsing a profile identifier.
///
/// `server_code` is `None` when the name matches no known convention;
/// that signals "unresolved", not an error -- the directory lookup then
/// falls back to the raw profile name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedProfile {
    pub server_code: Option<String>,
    pub variant: ConnectionVariant,
}

/// Whether this profile is on the fixed allow-list of multipoint
/// profiles that do not follow the naming convention.
#[must_use]
pub fn is_special_profile(profile_id: &str) -> bool {
    constants::SPECIAL_SERVER_PROFILES.contains(&profile_id)
}

/// Parses a profile identifier into a server code and connection variant.
///
/// Code extraction:
/// 1. Name contains the domain suffix: the code is everything before it,
///    truncated at the multipoint / static-IP index separator if present.
/// 2. Name starts with a digit (IP-named profile): the code is
///    everything before the first underscore.
/// 3. Otherwise the code is indeterminate.
#[must_use]
pub fn parse(profile_id: &str) -> ParsedProfile {
    ParsedProfile {
        server_code: extract_server_code(profile_id),
        variant: extract_variant(profile_id),
    }
}

fn extract_server_code(profile_id: &str) -> Option<String> {
    if profile_id.contains(constants::DOMAIN_SUFFIX) {
        let mut code = profile_id
            .split(constants::DOMAIN_SUFFIX)
            .next()
            .unwrap_or(profile_id);
        if code.contains(constants::MULTIPOINT_MARKER) {
            code = code.split(constants::MULTIPOINT_SEP).next().unwrap_or(code);
        }
        if code.contains(constants::STATIC_MARKER) {
            code = code.split(constants::STATIC_SEP).next().unwrap_or(code);
        }
        Some(code.to_string())
    } else if profile_id.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        // IP-named profiles: `45.83.91.133_tcp.ovpn` → `45.83.91.133`
        profile_id.split('_').next().map(ToString::to_string)
    } else {
        None
    }
}

/// Derives the variant purely from filename substrings.
///
/// Allow-listed profiles count as multipoint even without the marker;
/// a missing transport marker defaults to the UDP flavor.
fn extract_variant(profile_id: &str) -> ConnectionVariant {
    let tcp = profile_id.contains(constants::TCP_MARKER);
    if is_special_profile(profile_id) || profile_id.contains(constants::MULTIPOINT_MARKER) {
        if tcp {
            ConnectionVariant::MultipointTcp
        } else {
            ConnectionVariant::MultipointUdp
        }
    } else if profile_id.contains(constants::STATIC_MARKER) {
        if tcp {
            ConnectionVariant::StaticTcp
        } else {
            ConnectionVariant::StaticUdp
        }
    } else if tcp {
        ConnectionVariant::Tcp
    } else {
        ConnectionVariant::Udp
    }
}

/// Extracts the numeric index of a multipoint / static-IP profile for
/// display, prefixed with a space (e.g. `" 001"`).
///
/// Returns an empty string for regular profiles and for malformed names
/// (marker present but no domain suffix to bound the index).
#[must_use]
pub fn variant_suffix(profile_id: &str) -> String {
    if !profile_id.contains(constants::MULTIPOINT_MARKER)
        && !profile_id.contains(constants::STATIC_MARKER)
    {
        return String::new();
    }

    // Index sits between the marker letters and the domain suffix:
    // `us-nyc-mp001.prod...` → "001".
    let bytes = profile_id.as_bytes();
    let marker_pos = bytes.windows(2).position(|w| {
        matches!(w[0], b'm' | b's') && matches!(w[1], b'p' | b't')
    });
    let Some(start) = marker_pos.map(|p| p + 2) else {
        return String::new();
    };
    match profile_id[start..].find(".prod") {
        Some(end) => format!(" {}", &profile_id[start..start + end]),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regular_profile() {
        let parsed = parse("us-nyc.prod.surfshark.com_tcp.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("us-nyc"));
        assert_eq!(parsed.variant, ConnectionVariant::Tcp);

        let parsed = parse("de-fra.prod.surfshark.com_udp.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("de-fra"));
        assert_eq!(parsed.variant, ConnectionVariant::Udp);
    }

    #[test]
    fn test_parse_multipoint_profile() {
        let parsed = parse("us-nyc-mp01.prod.surfshark.com_udp.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("us-nyc"));
        assert_eq!(parsed.variant, ConnectionVariant::MultipointUdp);
    }

    #[test]
    fn test_parse_static_profile() {
        let parsed = parse("de-fra-st001.prod.surfshark.com_tcp.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("de-fra"));
        assert_eq!(parsed.variant, ConnectionVariant::StaticTcp);
    }

    #[test]
    fn test_parse_ip_named_profile() {
        let parsed = parse("45.83.91.133_tcp.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("45.83.91.133"));
        // IP-named specials are on the allow-list → multipoint
        assert_eq!(parsed.variant, ConnectionVariant::MultipointTcp);
    }

    #[test]
    fn test_parse_special_profile_overrides_variant() {
        let parsed = parse("sg-in.prod.surfshark.com_tcp.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("sg-in"));
        assert_eq!(parsed.variant, ConnectionVariant::MultipointTcp);
    }

    #[test]
    fn test_parse_unresolved_profile() {
        let parsed = parse("something-else.ovpn");
        assert_eq!(parsed.server_code, None);
        assert_eq!(parsed.variant, ConnectionVariant::Udp);
    }

    #[test]
    fn test_missing_transport_marker_defaults_to_udp() {
        let parsed = parse("us-nyc.prod.surfshark.com.ovpn");
        assert_eq!(parsed.server_code.as_deref(), Some("us-nyc"));
        assert_eq!(parsed.variant, ConnectionVariant::Udp);
    }

    #[test]
    fn test_variant_suffix_multipoint() {
        assert_eq!(
            variant_suffix("us-nyc-mp001.prod.surfshark.com_udp.ovpn"),
            " 001"
        );
    }

    #[test]
    fn test_variant_suffix_static() {
        assert_eq!(
            variant_suffix("de-fra-st001.prod.surfshark.com_tcp.ovpn"),
            " 001"
        );
    }

    #[test]
    fn test_variant_suffix_regular_is_empty() {
        assert_eq!(variant_suffix("de-fra.prod.surfshark.com_tcp.ovpn"), "");
        assert_eq!(variant_suffix("45.83.91.133_tcp.ovpn"), "");
    }

    #[test]
    fn test_variant_suffix_malformed_degrades_to_empty() {
        // Marker present but no domain suffix to bound the index
        assert_eq!(variant_suffix("de-fra-st001_tcp.ovpn"), "");
    }

    #[test]
    fn test_variant_labels() {
        assert_eq!(ConnectionVariant::MultipointTcp.label(), "Multi-Point TCP");
        assert_eq!(ConnectionVariant::StaticUdp.label(), "Static-IP UDP");
        assert_eq!(ConnectionVariant::Udp.to_string(), "UDP");
    }
}
