//! Header enumeration

use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Headers under `root` whose file name ends with one of `extensions`
///
/// Directories are walked in file-name order so repeated runs see the same
/// sequence.
pub fn discover_headers(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut headers = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| extensions.iter().any(|ext| name.ends_with(ext.as_str())));
        if matches {
            headers.push(entry.into_path());
        }
    }

    headers
}
