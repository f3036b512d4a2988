use std::thread;

use clap::Parser;

use crate::{
    append_launcher_log, append_launcher_warning,
    cli::{Cli, Commands},
    external_open,
    launch_settings::LaunchSettings,
    launcher_session::LauncherSession,
    logging,
    preferences_store::FavoriteToggle,
    runtime_paths,
    server_catalog::{self, ServerOrigin},
    ProcessStatus, ServerRecord, GAME_POLL_INTERVAL,
};

pub(crate) fn run() -> i32 {
    let cli = Cli::parse();
    let data_root = runtime_paths::resolve_data_root(cli.data_dir);
    logging::init(&data_root, cli.verbose);
    append_launcher_log(&format!(
        "launcher {} starting, data root {}",
        env!("CARGO_PKG_VERSION"),
        data_root.display()
    ));

    let mut session = LauncherSession::open(data_root);
    match dispatch(&mut session, cli.command) {
        Ok(()) => 0,
        Err(message) => {
            append_launcher_warning(&format!("command failed: {message}"));
            eprintln!("error: {message}");
            1
        }
    }
}

fn display_or_not_found(path: Option<&std::path::Path>) -> String {
    path.map(|path| path.display().to_string())
        .unwrap_or_else(|| "not found".to_string())
}

fn print_status(session: &LauncherSession) {
    println!("Data directory:  {}", session.data_root().display());
    println!(
        "Steam directory: {}",
        display_or_not_found(session.paths.distribution_root.as_deref())
    );
    println!(
        "Game executable: {}",
        display_or_not_found(session.paths.executable_path.as_deref())
    );
    if let Some(saved) = &session.settings.executable_override {
        println!("Manual override: {}", saved.display());
    }
}

fn print_settings(session: &LauncherSession) {
    println!("Launch options:  {}", session.settings.launch_options);
    println!(
        "Console:         {}",
        if session.settings.console { "on" } else { "off" }
    );
    print_status(session);
}

fn print_server_row(record: &ServerRecord, origin: ServerOrigin) {
    println!(
        "{:<9} {:<40} {:>7} {:<22} {:>4}  {}",
        origin.tag(),
        record.display_name,
        record.player_count,
        record.map_name,
        record.ping_ms,
        record.address
    );
}

/// Caller-owned poll loop: one liveness check per tick until the game exits.
fn wait_for_game(session: &mut LauncherSession) {
    if let Some(handle) = session.tracked_game() {
        println!("Waiting for the game to exit ({})", handle.command());
    }
    loop {
        match session.poll_game() {
            Some(ProcessStatus::Running) => thread::sleep(GAME_POLL_INTERVAL),
            Some(ProcessStatus::ExitedWithCode(Some(code))) => {
                println!("Game exited with code {code}");
                return;
            }
            Some(ProcessStatus::ExitedWithCode(None)) => {
                println!("Game exited");
                return;
            }
            None => return,
        }
    }
}

/// Saved launch options fill in missing ones. The saved console preference only applies
/// to `launch`; `connect` starts without `-console`.
fn launch_flags(
    settings: &LaunchSettings,
    options: Option<String>,
    console: bool,
    use_saved_console: bool,
) -> (Option<String>, bool) {
    let extra_args = options.or_else(|| Some(settings.launch_options.clone()));
    let console = console || (use_saved_console && settings.console);
    (extra_args, console)
}

fn start_game(
    session: &mut LauncherSession,
    target: Option<ServerRecord>,
    (extra_args, console): (Option<String>, bool),
    detach: bool,
) -> Result<(), String> {
    let pid = session
        .launch_game(target.as_ref(), extra_args, console)
        .map_err(|error| error.to_string())?;
    match &target {
        Some(record) => println!("Started the game (pid {pid}), joining {}", record.address),
        None => println!("Started the game (pid {pid})"),
    }

    if !detach && session.is_game_tracked() {
        wait_for_game(session);
    }
    Ok(())
}

fn dispatch(session: &mut LauncherSession, command: Commands) -> Result<(), String> {
    match command {
        Commands::Status => print_status(session),
        Commands::Refresh => {
            session.refresh_paths();
            print_status(session);
        }
        Commands::Servers { filter } => {
            let entries =
                server_catalog::filter_listing(session.listing(), filter.as_deref().unwrap_or(""));
            if entries.is_empty() {
                println!("No servers match.");
            }
            for entry in &entries {
                print_server_row(&entry.record, entry.origin);
            }
        }
        Commands::Launch {
            connect,
            options,
            console,
            detach,
        } => {
            let target = connect.map(|address| session.server_for_address(&address));
            let flags = launch_flags(&session.settings, options, console, true);
            start_game(session, target, flags, detach)?;
        }
        Commands::Connect { address, detach } => {
            let target = session.server_for_address(&address);
            let flags = launch_flags(&session.settings, None, false, false);
            start_game(session, Some(target), flags, detach)?;
        }
        Commands::Favorite { address } => {
            let record = session.server_for_address(&address);
            match session.toggle_favorite(&record) {
                FavoriteToggle::Added => println!("Added {} to favorites", record.address),
                FavoriteToggle::Removed => println!("Removed {} from favorites", record.address),
            }
        }
        Commands::AddServer { host, port } => {
            let record = session
                .add_custom_server(&host, port)
                .map_err(|error| error.to_string())?;
            println!("Added {} ({})", record.display_name, record.address);
        }
        Commands::RemoveServer { address } => {
            if !session.remove_custom_server(address.trim()) {
                return Err(format!("no custom server with address {}", address.trim()));
            }
            println!("Removed {}", address.trim());
        }
        Commands::SelectExe { path } => {
            session
                .set_manual_executable(&path)
                .map_err(|error| error.to_string())?;
            println!(
                "Game executable set to {}",
                display_or_not_found(session.paths.executable_path.as_deref())
            );
        }
        Commands::Addons { open } => {
            let Some((dir, names)) = session.installed_addons() else {
                return Err("Steam directory not found".to_string());
            };
            if names.is_empty() {
                println!("No addons found in {}", dir.display());
            }
            for name in &names {
                println!("{name}");
            }
            if open {
                external_open::open_folder(&dir)?;
            }
        }
        Commands::InstallItem { id } => {
            let pid = session
                .install_workshop_item(&id)
                .map_err(|error| error.to_string())?;
            println!("steamcmd started (pid {pid}) for workshop item {}", id.trim());
        }
        Commands::Workshop => external_open::open_workshop_page()?,
        Commands::Settings {
            options,
            console,
            clear_exe,
        } => {
            let changed = options.is_some() || console.is_some() || clear_exe;
            if let Some(options) = options {
                session.settings.launch_options = options.trim().to_string();
            }
            if let Some(console) = console {
                session.settings.console = console.enabled();
            }
            if clear_exe {
                session.settings.executable_override = None;
            }
            if changed {
                session.save_settings().map_err(|error| error.to_string())?;
                if clear_exe {
                    session.refresh_paths();
                }
            }
            print_settings(session);
        }
    }
    Ok(())
}
