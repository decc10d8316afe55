//! Clipboard access for Cut, Copy and Paste
//!
//! The menu commands go through [`TextClipboard`] so the system clipboard
//! (arboard) can be replaced by an in-memory one in tests. Keyboard shortcuts
//! inside the editor are handled by egui itself.

use crate::error::{Error, Result};
use arboard::Clipboard;

/// Plain-text clipboard.
pub trait TextClipboard {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard.
///
/// A fresh arboard handle is opened per call; some platforms drop ownership
/// of the selection when a long-lived handle goes stale.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn open() -> Result<Clipboard> {
        Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))
    }
}

impl TextClipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        Self::open()?
            .get_text()
            .map_err(|e| Error::Clipboard(e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        Self::open()?
            .set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

#[cfg(test)]
impl TextClipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        self.contents
            .clone()
            .ok_or_else(|| Error::Clipboard("clipboard is empty".to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
