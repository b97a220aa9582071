//! Monthly note path resolution

use chrono::{Datelike, NaiveDate};

/// Folder used when the configured folder path is blank.
pub const DEFAULT_FOLDER_PATH: &str = "moodnote/";

/// Extension of monthly note files.
pub const NOTE_EXTENSION: &str = "md";

/// `YYYY-MM` for the month containing `date`.
pub fn month_file_name(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// Trimmed folder path with `\` separators turned into `/`, or the default
/// folder when nothing is left.
pub fn effective_folder(folder_path: &str) -> String {
    let trimmed = folder_path.trim();
    if trimmed.is_empty() {
        return DEFAULT_FOLDER_PATH.to_string();
    }
    trimmed.replace('\\', "/")
}

/// Every prefix of `folder` that must exist, shortest first.
///
/// `"a/b/c/"` yields `["a", "a/b", "a/b/c"]`. The vault root (`""` or `"/"`)
/// yields nothing.
pub fn folder_prefixes(folder: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut accum = String::new();
    for part in folder.split('/').filter(|part| !part.is_empty()) {
        if !accum.is_empty() {
            accum.push('/');
        }
        accum.push_str(part);
        prefixes.push(accum.clone());
    }
    prefixes
}

/// Location of the monthly note for a given date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePath {
    /// Folder as configured (normalized, may end in `/`).
    pub folder: String,
    /// `YYYY-MM`
    pub file_name: String,
}

impl NotePath {
    pub fn resolve(folder_path: &str, date: NaiveDate) -> Self {
        Self {
            folder: effective_folder(folder_path),
            file_name: month_file_name(date),
        }
    }

    /// Vault path of the note file.
    ///
    /// Built from the same segments `folder_prefixes` creates, so leading,
    /// trailing and doubled `/` never reach the vault. A folder of `/` puts
    /// the note at the vault root.
    pub fn path(&self) -> String {
        let file = format!("{}.{}", self.file_name, NOTE_EXTENSION);
        match folder_prefixes(&self.folder).pop() {
            Some(dir) => format!("{}/{}", dir, file),
            None => file,
        }
    }
}
