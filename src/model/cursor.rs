use std::fmt;

/// Cursor location as (zero-based line, character offset within the line).
///
/// `ch` counts Unicode scalar values, not bytes, so a position computed from
/// Korean or Japanese heading text lines up with what an editor displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct CursorPosition {
    pub line: usize,
    pub ch: usize,
}

impl CursorPosition {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }

    /// Position at the end of `line_text` on line `line`.
    pub fn end_of(line: usize, line_text: &str) -> Self {
        Self {
            line,
            ch: line_text.chars().count(),
        }
    }
}

/// Formats as one-based `line:column`, the form editors accept after a file name.
impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.ch + 1)
    }
}
