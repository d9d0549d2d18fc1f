//! # surfmenu
//!
//! Launcher backend for Surfshark `OpenVPN` profiles: classifies the
//! downloaded profile files into catalogs, answers free-text launcher
//! queries, and drives connect/disconnect through `pkexec`.
//!
//! ## Modules
//! - [`app`]: Application wiring and catalog state.
//! - [`cli`]: Command-line argument parsing and handlers.
//! - [`config`]: Config directory resolution and `config.toml`.
//! - [`core`]: Profile parsing, classification, and search.
//! - [`menu`]: Launcher query surface.
//! - [`state`]: Derived connection state types.
//! - [`system`]: Process, notification, download, and credential seams.
//! - [`vpn`]: Connection reconciliation and the connect controller.

mod app;
mod cli;
mod config;
mod constants;
mod core;
mod logger;
mod menu;
mod state;
mod system;
mod vpn;

use app::App;
use clap::Parser;
use cli::args::{Args, Commands};
use color_eyre::Result;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Resolve config directory (CLI flag / env > XDG > default)
    let config_dir = config::resolve_config_dir(args.config_dir.as_ref())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config directory: {e}"))?;

    // Load config.toml (or use defaults)
    let app_config = match config::load_config(&config_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Fix the file or remove it to use defaults:");
            eprintln!("  nano {}/config.toml", config_dir.display());
            eprintln!("  rm {}/config.toml", config_dir.display());
            std::process::exit(1);
        }
    };

    let log_level = if args.verbose {
        "debug"
    } else {
        app_config.log_level.as_str()
    };
    logger::configure(log_level, app_config.max_log_entries, args.verbose);

    let mut app = match App::new(app_config, &config_dir) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // No subcommand behaves like an empty query: the home menu
    let command = args.command.unwrap_or(Commands::Query {
        argument: String::new(),
        json: false,
    });
    cli::commands::handle_command(&command, &mut app, &config_dir, args.quiet)
}
