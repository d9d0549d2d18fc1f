//! VPN connection state types.

use crate::core::ServerRecord;

/// Derived connection state.
///
/// Never stored: the reconciler recomputes this from the host process
/// table on every query, so it always reflects external reality.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No matching OpenVPN process on the system.
    #[default]
    Disconnected,
    /// An OpenVPN process is running with this profile's config.
    Connected(ServerRecord),
}

impl ConnectionState {
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// Controller phase during a connect/disconnect request.
///
/// Transitions only on explicit requests; the controller always returns
/// to `Idle` after the settle delay and the post-action reconcile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    #[default]
    Idle,
    Connecting,
    Disconnecting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConnectionVariant;

    fn record() -> ServerRecord {
        ServerRecord {
            country: "Germany".to_string(),
            city: "Frankfurt".to_string(),
            alt_word: "Deutschland".to_string(),
            flag_asset_key: "germany-flag.svg".to_string(),
            variant: ConnectionVariant::Udp,
            profile_id: "de-fra.prod.surfshark.com_udp.ovpn".to_string(),
        }
    }

    #[test]
    fn test_default_state_is_disconnected() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
        assert!(!ConnectionState::Disconnected.is_connected());
    }

    #[test]
    fn test_connected_state_carries_record() {
        let state = ConnectionState::Connected(record());
        assert!(state.is_connected());
        if let ConnectionState::Connected(r) = state {
            assert_eq!(r.country, "Germany");
        }
    }

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(ControllerPhase::default(), ControllerPhase::Idle);
    }
}
