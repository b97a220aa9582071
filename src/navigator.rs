//! Monthly-note navigator
//!
//! Opens (creating if needed) this month's note and puts the cursor at the
//! end of today's section, adding today's heading first if it is missing:
//!
//! 1. resolve `<folder>/<YYYY-MM>.md` from the settings and the clock
//! 2. create each missing folder segment
//! 3. create the note if absent
//! 4. open it in the most recently active pane
//! 5. append today's heading when no heading for today exists
//! 6. move the cursor to the end of today's section and scroll down
//!
//! The routine is not transactional. A failure after step 2 or 3 leaves the
//! created folders and file in place.

use crate::config::MoodnoteConfig;
use crate::model::cursor::CursorPosition;
use crate::model::vault::{Vault, VaultOp};
use crate::model::workspace::Workspace;
use crate::note::heading::DayHeading;
use crate::note::path::{folder_prefixes, NotePath};
use crate::note::section::{self, SectionCursor};
use crate::services::time_source::TimeSource;
use std::fmt;
use std::io;

/// Failure of a storage or pane operation.
#[derive(Debug)]
pub enum NavigatorError {
    Io {
        op: VaultOp,
        path: String,
        source: io::Error,
    },
    Open {
        path: String,
        source: io::Error,
    },
}

impl NavigatorError {
    fn io(op: VaultOp, path: &str) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| NavigatorError::Io {
            op,
            path: path.to_string(),
            source,
        }
    }
}

impl fmt::Display for NavigatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigatorError::Io { op, path, source } => {
                write!(f, "failed to {op} {path}: {source}")
            }
            NavigatorError::Open { path, source } => {
                write!(f, "failed to open {path}: {source}")
            }
        }
    }
}

impl std::error::Error for NavigatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigatorError::Io { source, .. } | NavigatorError::Open { source, .. } => {
                Some(source)
            }
        }
    }
}

/// What a navigation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationReport {
    /// Vault path of this month's note.
    pub path: String,
    /// Folder segments created by this run, shortest first.
    pub created_folders: Vec<String>,
    pub created_file: bool,
    pub heading_inserted: bool,
    /// Final cursor, or `None` when no editor was available.
    pub cursor: Option<CursorPosition>,
    /// True when today's heading could not be found verbatim and the cursor
    /// went to the document end instead.
    pub fell_back: bool,
}

/// Create every missing prefix of `folder`, shortest first.
///
/// Safe to repeat: existing segments are skipped. The vault root itself is
/// never created. Returns the segments that were created.
pub fn ensure_folder(vault: &dyn Vault, folder: &str) -> Result<Vec<String>, NavigatorError> {
    let mut created = Vec::new();
    for prefix in folder_prefixes(folder) {
        if vault.exists(&prefix) {
            continue;
        }
        vault
            .mkdir(&prefix)
            .map_err(NavigatorError::io(VaultOp::Mkdir, &prefix))?;
        tracing::debug!("Created folder {}", prefix);
        created.push(prefix);
    }
    Ok(created)
}

/// Create `path` with empty content unless it exists. Returns whether it was created.
pub fn ensure_file(vault: &dyn Vault, path: &str) -> Result<bool, NavigatorError> {
    if vault.exists(path) {
        return Ok(false);
    }
    vault
        .create(path, "")
        .map_err(NavigatorError::io(VaultOp::Create, path))?;
    tracing::info!("Created monthly note {}", path);
    Ok(true)
}

/// Runs the open-today routine against a vault and a clock.
pub struct MonthlyNoteNavigator<'a> {
    vault: &'a dyn Vault,
    time: &'a dyn TimeSource,
}

impl<'a> MonthlyNoteNavigator<'a> {
    pub fn new(vault: &'a dyn Vault, time: &'a dyn TimeSource) -> Self {
        Self { vault, time }
    }

    /// Open this month's note and jump to the end of today's entry.
    ///
    /// Having no pane, or a pane without an editor, is not an error: the
    /// folder and file are still ensured and the report carries no cursor.
    pub fn open_today_entry(
        &self,
        workspace: &mut dyn Workspace,
        settings: &MoodnoteConfig,
    ) -> Result<NavigationReport, NavigatorError> {
        let today = self.time.today();
        let note = NotePath::resolve(&settings.folder_path, today);
        let path = note.path();
        tracing::debug!("Opening monthly note {} for {}", path, today);

        let created_folders = ensure_folder(self.vault, &note.folder)?;
        let created_file = ensure_file(self.vault, &path)?;

        let mut report = NavigationReport {
            path,
            created_folders,
            created_file,
            heading_inserted: false,
            cursor: None,
            fell_back: false,
        };

        let Some(pane) = workspace.get_leaf(false) else {
            tracing::debug!("No pane available, leaving {} unopened", report.path);
            return Ok(report);
        };
        workspace
            .open_file(pane, &report.path)
            .map_err(|source| NavigatorError::Open {
                path: report.path.clone(),
                source,
            })?;
        workspace.set_active_leaf(pane);

        let Some(editor) = workspace.editor(pane) else {
            tracing::debug!("Pane {:?} has no editor, skipping cursor placement", pane);
            return Ok(report);
        };

        let heading = DayHeading::for_date(today, &settings.locale);
        let heading_text = heading.text();

        if let Some(updated) = heading.ensure_in(&editor.value()) {
            editor.set_value(&updated);
            self.vault
                .modify(&report.path, &updated)
                .map_err(NavigatorError::io(VaultOp::Modify, &report.path))?;
            report.heading_inserted = true;
            tracing::info!("Added heading {:?} to {}", heading_text, report.path);
        }

        let text = editor.value();
        editor.focus();
        let cursor = match section::locate(&text, &heading_text) {
            SectionCursor::Section { cursor, .. } => {
                editor.set_cursor(cursor);
                if !editor.scroll_to_bottom() {
                    tracing::debug!("Editor has no scroll element");
                }
                cursor
            }
            SectionCursor::DocumentEnd => {
                // A heading for today exists under a different spelling.
                tracing::warn!(
                    "Heading {:?} not found verbatim in {}, moving to document end",
                    heading_text,
                    report.path
                );
                report.fell_back = true;
                let cursor = CursorPosition::new(editor.line_count().saturating_sub(1), 0);
                editor.set_cursor(cursor);
                cursor
            }
        };
        tracing::debug!("Cursor placed at {:?}", cursor);
        report.cursor = Some(cursor);
        Ok(report)
    }
}
