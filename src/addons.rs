use std::{fs, path::Path};

/// Names of installed addon folders, sorted. Hidden entries and plain files are skipped.
pub fn list_installed_addons<L>(addons_dir: &Path, log: L) -> Vec<String>
where
    L: Fn(&str),
{
    let entries = match fs::read_dir(addons_dir) {
        Ok(entries) => entries,
        Err(error) => {
            if error.kind() != std::io::ErrorKind::NotFound {
                log(&format!(
                    "failed to list addons in {}: {}",
                    addons_dir.display(),
                    error
                ));
            }
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_visible_directories_sorted() {
        let temp = tempfile::tempdir().expect("create temp dir");
        for dir in ["wiremod", "advdupe2", ".git"] {
            fs::create_dir_all(temp.path().join(dir)).expect("create addon dir");
        }
        fs::write(temp.path().join("readme.txt"), "not an addon").expect("write file");

        assert_eq!(
            list_installed_addons(temp.path(), |_| {}),
            vec!["advdupe2".to_string(), "wiremod".to_string()]
        );
    }

    #[test]
    fn missing_directory_yields_empty_list() {
        let temp = tempfile::tempdir().expect("create temp dir");
        assert!(list_installed_addons(&temp.path().join("addons"), |_| {}).is_empty());
    }
}
