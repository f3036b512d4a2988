use std::path::{Path, PathBuf};

use crate::{LaunchRequest, LauncherError, GAME_APP_ID};

const CONNECT_FLAG: &str = "-connect";
const CONSOLE_FLAG: &str = "-console";

/// Argument vector for the game: executable, `-connect <addr>`, extra flags, `-console`.
///
/// The order is fixed; the address is passed through unvalidated.
pub fn build_launch_args(request: &LaunchRequest) -> Result<Vec<String>, LauncherError> {
    if request.executable_path.as_os_str().is_empty() {
        return Err(LauncherError::InvalidRequest(
            "executable path is empty".to_string(),
        ));
    }

    let mut args = vec![request.executable_path.to_string_lossy().to_string()];

    if let Some(address) = &request.target_address {
        args.push(CONNECT_FLAG.to_string());
        args.push(address.clone());
    }

    if let Some(extra) = &request.extra_args {
        args.extend(extra.split_whitespace().map(str::to_string));
    }

    if request.console_mode {
        args.push(CONSOLE_FLAG.to_string());
    }

    Ok(args)
}

pub fn installer_executable(distribution_root: &Path) -> PathBuf {
    let name = if cfg!(windows) {
        "steamcmd.exe"
    } else {
        "steamcmd.sh"
    };
    distribution_root.join(name)
}

/// Argument vector asking steamcmd to download one workshop item anonymously.
pub fn build_installer_args(
    distribution_root: &Path,
    item_id: &str,
) -> Result<Vec<String>, LauncherError> {
    let item_id = item_id.trim();
    if item_id.is_empty() || !item_id.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(LauncherError::ValidationFailed(format!(
            "workshop item id must be numeric, got '{item_id}'"
        )));
    }

    Ok(vec![
        installer_executable(distribution_root)
            .to_string_lossy()
            .to_string(),
        "+login".to_string(),
        "anonymous".to_string(),
        "+workshop_download_item".to_string(),
        GAME_APP_ID.to_string(),
        item_id.to_string(),
        "+quit".to_string(),
    ])
}

/// Single-line rendering of an argument vector for logs.
pub fn build_debug_command(args: &[String]) -> String {
    shlex::try_join(args.iter().map(String::as_str)).unwrap_or_else(|_| args.join(" "))
}
