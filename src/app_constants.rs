use std::time::Duration;

pub const GAME_EXECUTABLE_NAME: &str = "gmod.exe";
pub const GAME_DIR_NAME: &str = "GarrysMod";
pub const GAME_APP_ID: &str = "4000";
pub const DEFAULT_SERVER_PORT: u16 = 27015;

pub const STEAM_REGISTRY_KEY: &str = r"SOFTWARE\WOW6432Node\Valve\Steam";
pub const STEAM_REGISTRY_VALUE: &str = "InstallPath";
pub const STEAM_USER_REGISTRY_KEY: &str = r"Software\Valve\Steam";
pub const STEAM_USER_REGISTRY_VALUE: &str = "SteamPath";

pub const PREFERENCES_FILE: &str = "launcher_data.json";
pub const SETTINGS_FILE: &str = "launcher_settings.json";
pub const LAUNCHER_LOG_FILE: &str = "launcher.log";
pub const DEFAULT_DATA_DIR_NAME: &str = ".gmod-launcher";

pub const DATA_ROOT_ENV: &str = "GMOD_LAUNCHER_ROOT";
pub const STEAM_DIR_ENV: &str = "GMOD_LAUNCHER_STEAM_DIR";

pub const GAME_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const HISTORY_LIMIT: usize = 100;

pub const DEFAULT_LAUNCH_OPTIONS: &str = "-windowed -w 1920 -h 1080";
pub const WORKSHOP_BROWSE_URL: &str = "https://steamcommunity.com/workshop/browse/?appid=4000";
