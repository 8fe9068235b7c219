//! Where the app keeps its files.
//!
//! Resolved through `directories`, so XDG rules apply on Linux.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to `latest.log`.
const KEEP_LOGS: usize = 25;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("tr", "panunet", "admin-tui")
}

/// Log directory, e.g. `~/.cache/admin-tui` on Linux.
pub fn cache_dir() -> Option<PathBuf> {
    Some(dirs()?.cache_dir().to_owned())
}

/// Fallback location of the `.env` file.
pub fn config_dir() -> Option<PathBuf> {
    Some(dirs()?.config_dir().to_owned())
}

pub fn log_file() -> Option<PathBuf> {
    Some(cache_dir()?.join(LATEST_LOG))
}

/// Move the previous run's log aside and prune the archive.
///
/// Must run before the logger opens a fresh `latest.log`.
pub fn rotate_logs() {
    let Some(dir) = cache_dir() else { return };
    let previous = dir.join(LATEST_LOG);
    if previous.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        if let Err(e) = fs::rename(&previous, dir.join(format!("{stamp}.log"))) {
            eprintln!("could not archive {}: {}", previous.display(), e);
        }
    }
    prune_archived_logs(&dir, KEEP_LOGS);
}

/// Delete all but the `keep` newest archived logs in `dir`.
fn prune_archived_logs(dir: &Path, keep: usize) {
    let Ok(read) = fs::read_dir(dir) else { return };

    let mut archived: Vec<(std::time::SystemTime, PathBuf)> = read
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(std::time::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    // Newest first; the timestamped names settle equal mtimes.
    archived.sort_by(|a, b| b.cmp(a));
    for (_, path) in archived.into_iter().skip(keep) {
        let _ = fs::remove_file(path);
    }
}
