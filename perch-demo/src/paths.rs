//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "perch";
const APPLICATION: &str = "perch-demo";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/perch-demo` or `~/.cache/perch-demo`
/// - macOS: `~/Library/Caches/dev.perch.perch-demo`
/// - Windows: `C:\Users\<User>\AppData\Local\perch\perch-demo\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous `latest.log` under a timestamp and prune old logs.
///
/// Call at startup, before the new log file is created.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_in(&cache, &chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
}

fn rotate_in(dir: &Path, timestamp: &str) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let archived = dir.join(format!("{}.log", timestamp));
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("could not archive {}: {}", latest.display(), e);
        }
    }
    prune_old_logs(dir, MAX_OLD_LOGS);
}

/// Remove archived logs, oldest first, until at most `keep` remain.
fn prune_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Timestamped names sort chronologically.
    logs.sort_by_key(|e| e.file_name());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
