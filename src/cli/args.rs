//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Launcher backend for Surfshark `OpenVPN` profiles: classify, search,
/// connect
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Override config directory (default: `$XDG_CONFIG_HOME/surfmenu`)
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        env = "SURFMENU_CONFIG_DIR",
        global = true
    )]
    pub config_dir: Option<PathBuf>,

    /// Log everything to stderr, including debug entries
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress desktop notifications (log them instead)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute (default: query with an empty argument)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a launcher query with result rows
    Query {
        /// Free-text argument: `<command> <connection-type> <server-query>`
        #[arg(default_value = "")]
        argument: String,

        /// Emit the rows as JSON for a launcher frontend
        #[arg(long)]
        json: bool,
    },
    /// Connect to a profile by its file name
    Connect {
        /// Profile identifier, e.g. `de-fra.prod.surfshark.com_udp.ovpn`
        profile: String,
    },
    /// Disconnect any running connection
    Disconnect,
    /// Show the current connection state
    Status,
    /// Re-download the profile archive and rebuild the catalogs
    Refresh,
    /// Store the service username (line 1 of the credential file)
    SetUsername {
        username: String,
    },
    /// Store the service password (line 2 of the credential file)
    SetPassword {
        password: String,
    },
    /// Show config directory, catalog sizes, and runtime info
    Info,
}
