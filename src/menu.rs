//! Launcher query surface.
//!
//! The launcher frontend sends us a free-text argument of the form
//! `<command> <connection-variant> <server-query>` and renders whatever
//! rows we return. Each row carries an action: either narrow the query
//! (the frontend replaces the search string) or trigger an operation.
//! `surfmenu query --json` emits these rows for the frontend to consume.

use serde::Serialize;

use crate::constants;
use crate::core::{filter_servers, Catalogs, ServerRecord};
use crate::state::ConnectionState;

/// What happens when a row is selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MenuAction {
    /// Replace the launcher search string.
    SetQuery(String),
    /// Connect to this profile.
    ConnectToServer(String),
    /// Disconnect the running connection.
    Disconnect,
    /// Re-download the profile archive and rebuild the catalogs.
    RefreshDb,
    /// Close the launcher window.
    Hide,
}

/// One result row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Asset key of the row icon (app icon or a country flag).
    pub icon: String,
    pub name: String,
    pub description: String,
    pub action: MenuAction,
}

/// A launcher argument decomposed into its three positional parts.
/// Empty parts are normalized to `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryParts<'a> {
    pub command: Option<&'a str>,
    pub connection_type: Option<&'a str>,
    pub server_query: Option<&'a str>,
}

/// Splits the free-text argument on the first two spaces.
#[must_use]
pub fn split_query(argument: &str) -> QueryParts<'_> {
    let mut parts = argument.splitn(3, ' ');
    QueryParts {
        command: non_empty(parts.next()),
        connection_type: non_empty(parts.next()),
        server_query: non_empty(parts.next()),
    }
}

fn non_empty(part: Option<&str>) -> Option<&str> {
    part.filter(|s| !s.is_empty())
}

/// Everything the menu needs to answer a query.
pub struct MenuContext<'a> {
    /// Whether the OpenVPN binary was found.
    pub installed: bool,
    /// Current derived connection state.
    pub state: &'a ConnectionState,
    pub catalogs: &'a Catalogs,
    /// Launcher keyword echoed in `SetQuery` actions.
    pub keyword: &'a str,
    /// Maximum number of server rows per query.
    pub max_entries: usize,
}

/// Builds the result rows for a launcher argument.
#[must_use]
pub fn build_menu(argument: &str, ctx: &MenuContext<'_>) -> Vec<MenuItem> {
    if !ctx.installed {
        return vec![MenuItem {
            icon: constants::ICON_APP.to_string(),
            name: constants::MSG_NOT_INSTALLED_TITLE.to_string(),
            description: constants::MSG_NOT_INSTALLED_BODY.to_string(),
            action: MenuAction::Hide,
        }];
    }

    let parts = split_query(argument);
    match parts.command {
        None => home_items(ctx),
        // Any substring of "connect" opens the connect flow ("c",
        // "conn", even "onn")
        Some(command) if "connect".contains(command) => match parts.connection_type {
            None => connection_type_items(ctx.keyword),
            Some(connection_type) => {
                let items = server_items(ctx, connection_type, parts.server_query.unwrap_or(""));
                if items.is_empty() {
                    vec![no_servers_item(ctx.keyword)]
                } else {
                    items
                }
            }
        },
        Some(_) => vec![invalid_item(ctx.keyword)],
    }
}

/// Home menu: connection status (or a connect entry), disconnect, refresh.
fn home_items(ctx: &MenuContext<'_>) -> Vec<MenuItem> {
    let mut items = Vec::new();

    match ctx.state {
        ConnectionState::Connected(record) => items.push(MenuItem {
            icon: flag_icon(record),
            name: "Connected".to_string(),
            description: format!(
                "{} - {} : {}",
                record.country,
                record.city,
                record.variant.label()
            ),
            action: MenuAction::SetQuery(format!("{} ", ctx.keyword)),
        }),
        ConnectionState::Disconnected => items.push(MenuItem {
            icon: constants::ICON_APP.to_string(),
            name: constants::MSG_CONNECT_TITLE.to_string(),
            description: constants::MSG_CONNECT_BODY.to_string(),
            action: MenuAction::SetQuery(format!("{} connect ", ctx.keyword)),
        }),
    }

    items.push(MenuItem {
        icon: constants::ICON_APP.to_string(),
        name: constants::MSG_DISCONNECT_TITLE.to_string(),
        description: constants::MSG_DISCONNECT_BODY.to_string(),
        action: MenuAction::Disconnect,
    });
    items.push(MenuItem {
        icon: constants::ICON_APP.to_string(),
        name: constants::MSG_REFRESHDB_TITLE.to_string(),
        description: constants::MSG_REFRESHDB_BODY.to_string(),
        action: MenuAction::RefreshDb,
    });
    items
}

/// The six connection-variant rows with their action keywords.
const CONNECTION_TYPES: [(&str, &str, &str); 6] = [
    ("UDP", "Connect to VPN using UDP", "udp"),
    ("TCP", "Connect to VPN using TCP", "tcp"),
    ("Static UDP", "Connect to VPN with Static IP - UDP", "st_udp"),
    ("Static TCP", "Connect to VPN with Static IP - TCP", "st_tcp"),
    ("Multipoint UDP", "Connect to VPN with Multipoint UDP", "mp_udp"),
    ("Multipoint TCP", "Connect to VPN with Multipoint TCP", "mp_tcp"),
];

fn connection_type_items(keyword: &str) -> Vec<MenuItem> {
    CONNECTION_TYPES
        .iter()
        .map(|(name, description, action)| MenuItem {
            icon: constants::ICON_APP.to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
            action: MenuAction::SetQuery(format!("{keyword} connect {action} ")),
        })
        .collect()
}

/// Server rows for a variant keyword and free-text query, truncated to
/// the configured maximum.
fn server_items(ctx: &MenuContext<'_>, connection_type: &str, query: &str) -> Vec<MenuItem> {
    let connection_type = connection_type.to_lowercase();

    // The catalog is chosen by the keyword prefix; the remainder is the
    // transport substring fed to the filter.
    let (catalog, variant) = if let Some(rest) = connection_type.strip_prefix("mp_") {
        (&ctx.catalogs.multipoint, rest.to_string())
    } else if let Some(rest) = connection_type.strip_prefix("st_") {
        (&ctx.catalogs.static_ip, rest.to_string())
    } else {
        (&ctx.catalogs.regular, connection_type)
    };

    filter_servers(catalog, query, &variant)
        .into_iter()
        .take(ctx.max_entries)
        .map(|record| MenuItem {
            icon: flag_icon(record),
            name: format!("{} - {}", record.country, record.city),
            description: record.variant.label().to_string(),
            action: MenuAction::ConnectToServer(record.profile_id.clone()),
        })
        .collect()
}

fn no_servers_item(keyword: &str) -> MenuItem {
    MenuItem {
        icon: constants::ICON_APP.to_string(),
        name: constants::MSG_NO_SERVERS_TITLE.to_string(),
        description: constants::MSG_NO_SERVERS_BODY.to_string(),
        action: MenuAction::SetQuery(format!("{keyword} ")),
    }
}

fn invalid_item(keyword: &str) -> MenuItem {
    MenuItem {
        icon: constants::ICON_APP.to_string(),
        name: constants::MSG_INVALID_TITLE.to_string(),
        description: constants::MSG_INVALID_BODY.to_string(),
        action: MenuAction::SetQuery(format!("{keyword} ")),
    }
}

fn flag_icon(record: &ServerRecord) -> String {
    format!("{}/{}", constants::ICON_FLAG_DIR, record.flag_asset_key)
}
