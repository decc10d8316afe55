//! Text buffer for the open document
//!
//! The buffer owns the document text together with the cursor and selection
//! last reported by the editor widget. Offsets are character indices, the same
//! unit egui's `CCursor` uses, so selections map across without conversion.

use crate::error::{Error, Result};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// The single document being edited.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// Document content
    content: String,
    /// Content at the last open/save (for detecting modifications)
    saved_content: String,
    /// File the document was last opened from or saved to
    path: Option<PathBuf>,
    /// Cursor position as a character index
    cursor: usize,
    /// Highlighted range (start, end) in characters, start < end
    selection: Option<(usize, usize)>,
    /// Whether interactive and command-driven edits are blocked
    read_only: bool,
    /// Bumped on programmatic edits so the widget re-reads its state
    content_version: u64,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding the given text, with the cursor at the end.
    #[cfg(test)]
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.set_all(text);
        buffer.mark_saved();
        buffer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reading
    // ─────────────────────────────────────────────────────────────────────────

    /// The whole document.
    pub fn get_all(&self) -> &str {
        &self.content
    }

    /// The highlighted text.
    ///
    /// Fails with [`Error::NoSelection`] when nothing, or an empty range, is
    /// highlighted.
    pub fn get_selection(&self) -> Result<&str> {
        let (start, end) = self.selection.ok_or(Error::NoSelection)?;
        let range = self.byte_range(start, end);
        if range.is_empty() {
            return Err(Error::NoSelection);
        }
        Ok(&self.content[range])
    }

    /// Selection as character offsets.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Cursor as a character offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the document.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the characters in `start..end` with `text`.
    ///
    /// Offsets are clamped to the buffer and a reversed range is normalized.
    /// The selection is cleared and the cursor lands after the new text.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        let range = self.byte_range(start, end);
        let start_char = self.content[..range.start].chars().count();
        self.content.replace_range(range, text);
        self.cursor = start_char + text.chars().count();
        self.selection = None;
        self.bump_version();
    }

    /// Insert `text` at character offset `pos` (clamped).
    pub fn insert_at(&mut self, pos: usize, text: &str) {
        self.replace_range(pos, pos, text);
    }

    /// Append `text` to the end of the document.
    pub fn append(&mut self, text: &str) {
        let end = self.char_count();
        self.insert_at(end, text);
    }

    /// Replace the selection with `text`, or insert at the cursor if nothing
    /// is highlighted.
    pub fn replace_selection(&mut self, text: &str) {
        match self.selection {
            Some((start, end)) => self.replace_range(start, end, text),
            None => self.insert_at(self.cursor, text),
        }
    }

    /// Remove the highlighted text and return it.
    pub fn take_selection(&mut self) -> Result<String> {
        let removed = self.get_selection()?.to_string();
        if let Some((start, end)) = self.selection {
            self.replace_range(start, end, "");
        }
        Ok(removed)
    }

    /// Replace the whole document.
    pub fn set_all(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor = self.char_count();
        self.selection = None;
        self.bump_version();
    }

    /// Empty the document.
    pub fn clear(&mut self) {
        self.set_all(String::new());
    }

    /// Mutable access for the editor widget, which edits the string in place.
    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.content
    }

    /// Record the cursor and selection reported by the editor widget.
    ///
    /// `primary` is where the cursor sits, `secondary` the other end of the
    /// highlight; equal values mean no selection.
    pub fn set_cursor_range(&mut self, primary: usize, secondary: usize) {
        let len = self.char_count();
        let primary = primary.min(len);
        let secondary = secondary.min(len);
        self.cursor = primary;
        self.selection = if primary == secondary {
            None
        } else {
            Some((primary.min(secondary), primary.max(secondary)))
        };
    }

    /// Highlight `start..end` (clamped). An empty range clears the selection.
    #[cfg(test)]
    pub fn select(&mut self, start: usize, end: usize) {
        self.set_cursor_range(end, start);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document identity
    // ─────────────────────────────────────────────────────────────────────────

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn clear_path(&mut self) {
        self.path = None;
    }

    /// Check if the document changed since it was last opened or saved.
    pub fn is_modified(&self) -> bool {
        self.content != self.saved_content
    }

    /// Mark the current content as saved.
    pub fn mark_saved(&mut self) {
        self.saved_content = self.content.clone();
    }

    /// Display name for the window title.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read-only flag
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Flip the read-only flag and return the new value.
    pub fn toggle_read_only(&mut self) -> bool {
        self.read_only = !self.read_only;
        self.read_only
    }

    /// Fail with [`Error::ReadOnly`] if the document is locked.
    pub fn ensure_writable(&self) -> Result<()> {
        if self.read_only {
            Err(Error::ReadOnly)
        } else {
            Ok(())
        }
    }

    /// Version counter for programmatic edits.
    pub fn content_version(&self) -> u64 {
        self.content_version
    }

    fn bump_version(&mut self) {
        self.content_version = self.content_version.wrapping_add(1);
    }

    /// Convert a clamped character range to a byte range.
    fn byte_range(&self, start: usize, end: usize) -> Range<usize> {
        let start = self.byte_offset(start);
        let end = self.byte_offset(end).max(start);
        start..end
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.content.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
