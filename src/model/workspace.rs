//! Workspace and editor capabilities
//!
//! The host exposes panes (reusable view regions) and, for panes showing an
//! editable Markdown file, an editor over the full document text. These are
//! traits so the navigator can run against a real host or against
//! `BufferWorkspace`, an in-memory model of panes and text buffers.

use crate::model::cursor::CursorPosition;
use crate::model::vault::SharedVault;
use std::io;

/// Identifier of a pane within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub usize);

/// Editing capabilities of a pane's live buffer.
pub trait Editor {
    /// Full document text.
    fn value(&self) -> String;

    /// Replace the full document text.
    fn set_value(&mut self, text: &str);

    /// Number of lines. A trailing newline opens one more (empty) line.
    fn line_count(&self) -> usize;

    fn cursor(&self) -> CursorPosition;

    fn set_cursor(&mut self, pos: CursorPosition);

    fn focus(&mut self);

    /// Scroll the view to its maximum vertical offset.
    ///
    /// Returns false when the view has no scrollable element.
    fn scroll_to_bottom(&mut self) -> bool;
}

/// Pane management capabilities.
pub trait Workspace {
    /// Get a pane to open a file in.
    ///
    /// With `new_leaf == false` the most recently active pane is reused;
    /// `None` means there is no pane to reuse.
    fn get_leaf(&mut self, new_leaf: bool) -> Option<PaneId>;

    /// Load the file at `path` into `pane`.
    fn open_file(&mut self, pane: PaneId, path: &str) -> io::Result<()>;

    /// Make `pane` the active one.
    fn set_active_leaf(&mut self, pane: PaneId);

    /// Editor of `pane`, if the pane shows an editable document.
    fn editor(&mut self, pane: PaneId) -> Option<&mut dyn Editor>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// Default number of visible lines for in-memory panes.
pub const DEFAULT_VIEWPORT_HEIGHT: usize = 24;

/// In-memory editor buffer.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    cursor: CursorPosition,
    focused: bool,
    /// First visible line.
    scroll_top: usize,
    viewport_height: usize,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>, viewport_height: usize) -> Self {
        Self {
            text: text.into(),
            cursor: CursorPosition::default(),
            focused: false,
            scroll_top: 0,
            viewport_height: viewport_height.max(1),
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn line(&self, line: usize) -> &str {
        self.text.split('\n').nth(line).unwrap_or("")
    }
}

impl Editor for TextBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
        // Replacing the document keeps the cursor only where it is still valid.
        let cursor = self.cursor;
        self.set_cursor(cursor);
    }

    fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn set_cursor(&mut self, pos: CursorPosition) {
        let line = pos.line.min(self.line_count() - 1);
        let max_ch = self.line(line).chars().count();
        self.cursor = CursorPosition::new(line, pos.ch.min(max_ch));
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_top = self.line_count().saturating_sub(self.viewport_height);
        true
    }
}

/// A pane in a `BufferWorkspace`.
#[derive(Debug, Clone)]
pub struct Pane {
    pub id: PaneId,
    /// Vault path of the file shown in the pane.
    pub file: Option<String>,
    /// Reading-mode panes show the file without an editor.
    pub editable: bool,
    buffer: Option<TextBuffer>,
}

impl Pane {
    pub fn buffer(&self) -> Option<&TextBuffer> {
        self.buffer.as_ref()
    }
}

/// In-memory workspace reading files from a vault.
pub struct BufferWorkspace {
    vault: SharedVault,
    panes: Vec<Pane>,
    /// Pane ids ordered from least to most recently active.
    recent: Vec<PaneId>,
    next_id: usize,
    viewport_height: usize,
}

impl BufferWorkspace {
    /// Workspace without any pane (headless host).
    pub fn new(vault: SharedVault) -> Self {
        Self {
            vault,
            panes: Vec::new(),
            recent: Vec::new(),
            next_id: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }

    /// Workspace with one empty, editable, active pane.
    pub fn with_pane(vault: SharedVault) -> Self {
        let mut workspace = Self::new(vault);
        workspace.add_pane(true);
        workspace
    }

    /// Add a pane and make it the active one.
    pub fn add_pane(&mut self, editable: bool) -> PaneId {
        let id = PaneId(self.next_id);
        self.next_id += 1;
        self.panes.push(Pane {
            id,
            file: None,
            editable,
            buffer: None,
        });
        self.set_active_leaf(id);
        id
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == id)
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        self.recent.last().and_then(|id| self.pane(*id))
    }

    fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.panes.iter_mut().find(|p| p.id == id)
    }
}

impl Workspace for BufferWorkspace {
    fn get_leaf(&mut self, new_leaf: bool) -> Option<PaneId> {
        if new_leaf {
            return Some(self.add_pane(true));
        }
        self.recent.last().copied()
    }

    fn open_file(&mut self, pane: PaneId, path: &str) -> io::Result<()> {
        let content = self.vault.read(path)?;
        let viewport_height = self.viewport_height;
        let target = self.pane_mut(pane).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no pane {}", pane.0))
        })?;
        target.file = Some(path.to_string());
        target.buffer = target
            .editable
            .then(|| TextBuffer::new(content, viewport_height));
        tracing::debug!("Opened {} in pane {}", path, pane.0);
        Ok(())
    }

    fn set_active_leaf(&mut self, pane: PaneId) {
        if self.pane(pane).is_none() {
            return;
        }
        self.recent.retain(|id| *id != pane);
        self.recent.push(pane);
    }

    fn editor(&mut self, pane: PaneId) -> Option<&mut dyn Editor> {
        self.pane_mut(pane)?
            .buffer
            .as_mut()
            .map(|buffer| buffer as &mut dyn Editor)
    }
}
