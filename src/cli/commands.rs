//! CLI command handlers.

use std::path::Path;

use color_eyre::Result;

use crate::app::App;
use crate::cli::args::Commands;
use crate::menu::{MenuAction, MenuItem};
use crate::state::ConnectionState;
use crate::system::{
    CurlFetcher, FileCredentialStore, LogNotifier, Notifier, NotifySend, PkexecLauncher,
};
use crate::vpn::ActionOutcome;

/// Dispatches a parsed CLI command.
///
/// With `quiet` set, desktop notifications are replaced by log lines.
pub fn handle_command(
    command: &Commands,
    app: &mut App,
    config_dir: &Path,
    quiet: bool,
) -> Result<()> {
    if quiet {
        dispatch(command, app, config_dir, &LogNotifier)
    } else {
        dispatch(command, app, config_dir, &NotifySend)
    }
}

fn dispatch<N: Notifier>(
    command: &Commands,
    app: &mut App,
    config_dir: &Path,
    notifier: &N,
) -> Result<()> {
    let launcher = PkexecLauncher;
    match command {
        Commands::Query { argument, json } => {
            let items = app.query(argument, &launcher);
            if *json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in &items {
                    print_item(item);
                }
            }
        }
        Commands::Connect { profile } => {
            exit_on_failure(app.connect(profile, &launcher, notifier));
        }
        Commands::Disconnect => {
            exit_on_failure(app.disconnect(&launcher, notifier));
        }
        Commands::Status => match app.status(&launcher) {
            ConnectionState::Connected(record) => {
                println!(
                    "Connected: {} - {} ({})",
                    record.country,
                    record.city,
                    record.variant.label()
                );
                println!("Profile: {}", record.profile_id);
            }
            ConnectionState::Disconnected => println!("Disconnected"),
        },
        Commands::Refresh => {
            let fetcher = CurlFetcher::new(app.config.profiles_url.clone());
            if let Err(e) = app.refresh(&fetcher, notifier) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            println!("Profiles refreshed.");
        }
        Commands::SetUsername { username } => {
            let store = FileCredentialStore::new(app.credentials_path().clone());
            if let Err(e) = store.set_username(username) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            println!("Username stored.");
        }
        Commands::SetPassword { password } => {
            let store = FileCredentialStore::new(app.credentials_path().clone());
            if let Err(e) = store.set_password(password) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            println!("Password stored.");
        }
        Commands::Info => print_info(app, config_dir),
    }
    Ok(())
}

/// One row per line: name, description, and the action it triggers.
fn print_item(item: &MenuItem) {
    let action = match &item.action {
        MenuAction::SetQuery(query) => format!("set-query \"{query}\""),
        MenuAction::ConnectToServer(profile) => format!("connect {profile}"),
        MenuAction::Disconnect => "disconnect".to_string(),
        MenuAction::RefreshDb => "refresh".to_string(),
        MenuAction::Hide => "hide".to_string(),
    };
    println!("{}  --  {}  [{action}]", item.name, item.description);
}

fn exit_on_failure(outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Confirmed => {}
        ActionOutcome::NotInstalled => {
            eprintln!("Error: OpenVPN is not installed.");
            std::process::exit(1);
        }
        ActionOutcome::Mismatch => {
            eprintln!("Error: state check after the command did not confirm it.");
            std::process::exit(1);
        }
    }
}

fn print_info(app: &App, config_dir: &Path) {
    println!("surfmenu {}", crate::constants::APP_VERSION);
    println!("Config dir: {}", config_dir.display());
    println!(
        "OpenVPN: {}",
        if app.installed() { "found" } else { "not found" }
    );
    println!("Directory entries: {}", app.directory().len());
    let catalogs = app.catalogs();
    println!(
        "Catalogs: {} regular, {} static, {} multipoint",
        catalogs.regular.len(),
        catalogs.static_ip.len(),
        catalogs.multipoint.len()
    );

    let logs = crate::logger::get_logs();
    if !logs.is_empty() {
        println!();
        println!("Log entries:");
        for entry in &logs {
            println!("  {}", entry.format());
        }
    }
}
