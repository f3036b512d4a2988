use std::{
    ffi::OsStr,
    path::Path,
    process::{Command, Stdio},
};

use url::Url;

use crate::WORKSHOP_BROWSE_URL;

/// Workshop and browser targets must be plain web pages.
fn web_page_url(raw_url: &str) -> Result<Url, String> {
    let candidate = raw_url.trim();
    if candidate.is_empty() {
        return Err("no web page address given".to_string());
    }

    let url = Url::parse(candidate)
        .map_err(|error| format!("'{candidate}' is not a web page address: {error}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "refusing to open '{candidate}': only web pages can be opened in the browser"
        ));
    }
    Ok(url)
}

fn run_opener(program: &str, leading_args: &[&str], target: &OsStr) -> Result<(), String> {
    Command::new(program)
        .args(leading_args)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run '{program}': {error}"))
}

#[cfg(target_os = "macos")]
fn open_with_system_handler(target: &OsStr, _is_url: bool) -> Result<(), String> {
    run_opener("open", &[], target)
}

#[cfg(target_os = "windows")]
fn open_with_system_handler(target: &OsStr, is_url: bool) -> Result<(), String> {
    if is_url {
        run_opener("rundll32", &["url.dll,FileProtocolHandler"], target)
    } else {
        run_opener("explorer", &[], target)
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_with_system_handler(target: &OsStr, _is_url: bool) -> Result<(), String> {
    run_opener("xdg-open", &[], target)
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_with_system_handler(_target: &OsStr, _is_url: bool) -> Result<(), String> {
    Err("Opening external targets is not supported on this platform.".to_string())
}

pub fn open_external_url(raw_url: &str) -> Result<(), String> {
    let url = web_page_url(raw_url)?;
    open_with_system_handler(OsStr::new(url.as_str()), true)
}

pub fn open_workshop_page() -> Result<(), String> {
    open_external_url(WORKSHOP_BROWSE_URL)
}

pub fn open_folder(path: &Path) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Folder does not exist: {}", path.display()));
    }
    open_with_system_handler(path.as_os_str(), false)
}
