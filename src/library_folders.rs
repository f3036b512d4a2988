//! Reader for Steam's `libraryfolders.vdf`, the manifest listing extra library roots.

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Manifest locations relative to the Steam directory, newest layout last.
pub fn manifest_candidates(steam_root: &Path) -> [PathBuf; 2] {
    [
        steam_root.join("steamapps").join("libraryfolders.vdf"),
        steam_root.join("config").join("libraryfolders.vdf"),
    ]
}

fn quoted_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    if line.trim_start().starts_with("//") {
        return tokens;
    }
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch != '"' {
            continue;
        }
        let mut token = String::new();
        let mut closed = false;
        while let Some(inner) = chars.next() {
            match inner {
                '\\' => match chars.next() {
                    Some(escaped @ ('\\' | '"')) => token.push(escaped),
                    Some('n') => token.push('\n'),
                    Some('t') => token.push('\t'),
                    Some(other) => {
                        token.push('\\');
                        token.push(other);
                    }
                    None => token.push('\\'),
                },
                '"' => {
                    closed = true;
                    break;
                }
                other => token.push(other),
            }
        }
        if !closed {
            break;
        }
        tokens.push(token);
    }
    tokens
}

fn is_legacy_library_entry(key: &str, value: &str) -> bool {
    !key.is_empty()
        && key.chars().all(|ch| ch.is_ascii_digit())
        && (value.contains('/') || value.contains('\\'))
}

/// Library roots named by a manifest, in file order and without duplicates.
///
/// Understands both the current `"path" "<dir>"` entries and the older form where
/// numbered keys map straight to a directory.
pub fn parse_library_folders(content: &str) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    for line in content.lines() {
        let tokens = quoted_tokens(line);
        let [key, value] = tokens.as_slice() else {
            continue;
        };
        let is_library =
            key.eq_ignore_ascii_case("path") || is_legacy_library_entry(key, value);
        if !is_library || value.trim().is_empty() {
            continue;
        }
        let root = PathBuf::from(value.trim());
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    roots
}

/// Library roots listed by the first readable manifest under `steam_root`.
pub fn read_library_folders<L>(steam_root: &Path, log: L) -> Vec<PathBuf>
where
    L: Fn(&str),
{
    for manifest in manifest_candidates(steam_root) {
        if !manifest.is_file() {
            continue;
        }
        match fs::read_to_string(&manifest) {
            Ok(content) => {
                let roots = parse_library_folders(&content);
                log(&format!(
                    "read {} library folder(s) from {}",
                    roots.len(),
                    manifest.display()
                ));
                return roots;
            }
            Err(error) => log(&format!(
                "failed to read library folders manifest {}: {}",
                manifest.display(),
                error
            )),
        }
    }
    Vec::new()
}
