//! Locating the end of a day's section
//!
//! A section runs from the line after its heading up to (not including) the
//! next line starting with `### `, or to the end of the document. The cursor
//! goes to the end of the section's last non-blank line so the user can keep
//! writing where they left off.
//!
//! Lines follow `str::lines`: a trailing newline terminates the last line
//! rather than opening an empty one, and `\r\n` endings are stripped.

use crate::model::cursor::CursorPosition;
use crate::note::heading::HEADING_PREFIX;

/// Where the cursor should land for today's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionCursor {
    /// Heading found; cursor at the end of the section's content.
    Section {
        heading_line: usize,
        cursor: CursorPosition,
    },
    /// Heading text not found verbatim; go to the start of the last line.
    DocumentEnd,
}

/// Zero-based line containing byte offset `offset`.
fn line_of_offset(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count()
}

/// Compute the cursor target for the literal heading `heading` in `text`.
pub fn locate(text: &str, heading: &str) -> SectionCursor {
    let Some(offset) = text.find(heading) else {
        return SectionCursor::DocumentEnd;
    };
    let heading_line = line_of_offset(text, offset);
    let lines: Vec<&str> = text.lines().collect();
    let last_line = lines.len().saturating_sub(1);

    let first_body_line = heading_line + 1;
    let next_heading = lines
        .iter()
        .enumerate()
        .skip(first_body_line)
        .find(|(_, line)| line.starts_with(HEADING_PREFIX))
        .map(|(idx, _)| idx);
    let section_end = match next_heading {
        Some(idx) => idx.saturating_sub(1),
        None => last_line,
    };

    let target = (first_body_line..=section_end)
        .rev()
        .find(|&idx| lines.get(idx).is_some_and(|line| !line.trim().is_empty()))
        .unwrap_or_else(|| first_body_line.min(last_line));

    let cursor = CursorPosition::end_of(target, lines.get(target).copied().unwrap_or(""));
    SectionCursor::Section {
        heading_line,
        cursor,
    }
}
