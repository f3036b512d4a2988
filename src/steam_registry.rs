use std::path::PathBuf;

/// Steam install directory as recorded in the Windows registry, if any.
#[cfg(windows)]
pub fn query_steam_install_path<F>(log: F) -> Option<PathBuf>
where
    F: Fn(&str),
{
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
    use winreg::RegKey;

    use crate::{
        STEAM_REGISTRY_KEY, STEAM_REGISTRY_VALUE, STEAM_USER_REGISTRY_KEY,
        STEAM_USER_REGISTRY_VALUE,
    };

    let lookups = [
        (HKEY_LOCAL_MACHINE, STEAM_REGISTRY_KEY, STEAM_REGISTRY_VALUE),
        (
            HKEY_CURRENT_USER,
            STEAM_USER_REGISTRY_KEY,
            STEAM_USER_REGISTRY_VALUE,
        ),
    ];
    for (hkey, subkey, value_name) in lookups {
        let key = match RegKey::predef(hkey).open_subkey(subkey) {
            Ok(key) => key,
            Err(error) => {
                log(&format!("steam registry key {subkey} unavailable: {error}"));
                continue;
            }
        };
        match key.get_value::<String, _>(value_name) {
            Ok(value) if !value.trim().is_empty() => return Some(PathBuf::from(value.trim())),
            Ok(_) => {}
            Err(error) => log(&format!(
                "steam registry value {subkey}\\{value_name} unavailable: {error}"
            )),
        }
    }
    None
}

#[cfg(not(windows))]
pub fn query_steam_install_path<F>(_log: F) -> Option<PathBuf>
where
    F: Fn(&str),
{
    None
}
