//! Log directory management
//!
//! Logs are stored under the state directory from [`DirectoryContext`]
//! (typically `~/.local/state/moodnote/logs/`). Each run writes a PID-based
//! log file; files older than a day from other runs are removed on startup.

use crate::config_io::DirectoryContext;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

/// Minimum age for log files to be cleaned up (24 hours)
const CLEANUP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached log directory path
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the log directory, creating it if necessary.
///
/// Falls back to the system temp directory if the state directory is
/// unknown or cannot be created.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let fallback = std::env::temp_dir().join("moodnote-logs");
        let dir = DirectoryContext::from_system()
            .map(|ctx| ctx.log_dir())
            .unwrap_or_else(|_| fallback.clone());

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            let _ = fs::create_dir_all(&fallback);
            return fallback;
        }

        dir
    })
}

/// Get the path for the log file of this process.
///
/// Returns `{log_dir}/moodnote-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(log_file_name(std::process::id()))
}

fn log_file_name(pid: u32) -> String {
    format!("moodnote-{}.log", pid)
}

/// Remove log files of earlier runs that are older than a day.
pub fn cleanup_stale_logs() {
    cleanup_stale_logs_in_dir(log_dir(), std::process::id(), CLEANUP_AGE);
}

fn cleanup_stale_logs_in_dir(dir: &Path, current_pid: u32, age: Duration) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let Some(pid) = extract_pid_from_filename(&name) else {
            continue;
        };
        if pid == current_pid {
            continue;
        }

        if is_file_older_than(&entry.path(), age)
            && entry.file_type().map(|t| t.is_file()).unwrap_or(false)
        {
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::debug!("Failed to clean up stale log {:?}: {}", entry.path(), e);
            } else {
                tracing::debug!("Cleaned up stale log file: {:?}", entry.path());
            }
        }
    }
}

fn is_file_older_than(path: &Path, age: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed > age)
        .unwrap_or(false)
}

/// Extract the PID from a filename like "moodnote-12345.log"
fn extract_pid_from_filename(name: &str) -> Option<u32> {
    let without_ext = name.strip_suffix(".log")?;
    let pid_str = without_ext.strip_prefix("moodnote-")?;
    pid_str.parse().ok()
}

/// Print every path moodnote reads or writes.
pub fn print_all_paths(dir_context: &DirectoryContext, vault_settings: &Path) {
    println!("Log directory: {}", log_dir().display());
    println!("  Log file: {}", main_log_path().display());
    println!(
        "User settings: {}",
        dir_context.user_settings_path().display()
    );
    println!("Vault settings: {}", vault_settings.display());
}
