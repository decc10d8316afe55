//! Application state management for Quillpad
//!
//! This module defines the central `AppState` struct that owns the document,
//! the session font, the API credential and the feedback surface (modal and
//! toast). Command handlers live here as methods so they can run against a
//! mock AI service and an in-memory clipboard in tests.

use crate::ai::{AiService, Credential};
use crate::clipboard::TextClipboard;
use crate::config::{FontSetting, Settings};
use crate::editor::{FindReplace, TextBuffer, TextStats};
use crate::error::{Error, Result};
use crate::export::export_pdf;
use crate::files::{read_document, write_document};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// How long a toast stays visible, in seconds.
pub const TOAST_DURATION: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// A blocking message dismissed with OK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// A non-blocking status bar message.
///
/// The expiry is stamped the first frame the toast is seen, so handlers do
/// not need the frame clock.
#[derive(Debug, Clone, PartialEq)]
struct Toast {
    message: String,
    expires_at: Option<f64>,
}

/// Feedback surface state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Modal waiting for OK
    modal: Option<Notice>,
    /// Toast shown in the status bar
    toast: Option<Toast>,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// The complete state of a Quillpad session.
#[derive(Debug, Default)]
pub struct AppState {
    pub settings: Settings,
    pub buffer: TextBuffer,
    /// Font applied to the editor
    pub font: FontSetting,
    pub credential: Credential,
    pub ui: UiState,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let font = settings.font.clone();
        Self {
            settings,
            buffer: TextBuffer::new(),
            font,
            credential: Credential::new(),
            ui: UiState::default(),
        }
    }

    /// Window title: document name plus the modified marker.
    pub fn window_title(&self) -> String {
        format!("{} - Quillpad", self.buffer.title())
    }

    /// Line, column and word counts for the status bar.
    pub fn stats(&self) -> TextStats {
        TextStats::from_text(self.buffer.get_all(), self.buffer.cursor())
    }

    /// Whether AI commands may run.
    pub fn ai_available(&self) -> bool {
        self.credential.is_verified()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Discard the document and start an empty, untitled one.
    pub fn new_document(&mut self) -> Result<()> {
        self.buffer.ensure_writable()?;
        self.buffer.clear();
        self.buffer.clear_path();
        self.buffer.mark_saved();
        debug!("Started new document");
        Ok(())
    }

    /// Replace the document with the contents of `path`.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        self.buffer.ensure_writable()?;
        let content = read_document(path)?;
        self.buffer.set_all(content);
        self.buffer.set_path(path.to_path_buf());
        self.buffer.mark_saved();
        Ok(())
    }

    /// Write the document to `path` and make it the current file.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        write_document(path, self.buffer.get_all())?;
        self.buffer.set_path(path.to_path_buf());
        self.buffer.mark_saved();
        self.show_toast(format!("Saved {}", display_name(path)));
        Ok(())
    }

    /// Export the document as a PDF at `path`.
    pub fn export_pdf_to(&mut self, path: &Path) -> Result<()> {
        export_pdf(self.buffer.get_all(), path, &self.settings.pdf)?;
        self.show_toast(format!("Exported {}", display_name(path)));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edit commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy the selection to the clipboard and remove it.
    pub fn cut(&mut self, clipboard: &mut dyn TextClipboard) -> Result<()> {
        self.buffer.ensure_writable()?;
        let text = match self.buffer.get_selection() {
            Ok(text) => text.to_string(),
            Err(Error::NoSelection) => return Ok(()),
            Err(e) => return Err(e),
        };
        clipboard.set_text(&text)?;
        self.buffer.take_selection()?;
        Ok(())
    }

    /// Copy the selection to the clipboard. No-op without a selection.
    pub fn copy(&mut self, clipboard: &mut dyn TextClipboard) -> Result<()> {
        match self.buffer.get_selection() {
            Ok(text) => clipboard.set_text(text),
            Err(Error::NoSelection) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Replace the selection (or insert at the cursor) with the clipboard text.
    pub fn paste(&mut self, clipboard: &mut dyn TextClipboard) -> Result<()> {
        self.buffer.ensure_writable()?;
        let text = clipboard.get_text()?;
        if !text.is_empty() {
            self.buffer.replace_selection(&text);
        }
        Ok(())
    }

    /// Replace every literal occurrence across the document.
    ///
    /// Returns the number of replacements made.
    pub fn find_and_replace(&mut self, find_replace: &FindReplace) -> Result<usize> {
        self.buffer.ensure_writable()?;
        if !find_replace.is_actionable() {
            return Ok(0);
        }
        let count = find_replace.find_matches(self.buffer.get_all()).len();
        if let Some(replaced) = find_replace.apply(self.buffer.get_all()) {
            self.buffer.set_all(replaced);
            info!("Replaced {} occurrence(s)", count);
        }
        Ok(count)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Options
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a font from prompt input. Invalid input leaves the font as is.
    pub fn change_font(&mut self, family: &str, size_text: &str) -> bool {
        let font = size_text
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|size| FontSetting::new(family, size));

        match font {
            Some(font) => {
                debug!("Font changed to {} {}", font.family, font.size);
                self.font = font;
                true
            }
            None => {
                debug!("Ignoring font input {:?} {:?}", family, size_text);
                false
            }
        }
    }

    /// Flip the document lock.
    pub fn toggle_read_only(&mut self) -> bool {
        let read_only = self.buffer.toggle_read_only();
        self.show_toast(if read_only {
            "Document is now read-only"
        } else {
            "Document is now editable"
        });
        read_only
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Store `key` and verify it with one listing call.
    ///
    /// Any failure leaves the key stored but unverified and raises the
    /// invalid-key modal once.
    pub fn add_key(&mut self, key: &str, ai: &dyn AiService) -> bool {
        self.credential.set_key(key);

        match ai.list_models() {
            Ok(()) => {
                self.credential.set_verified(true);
                info!("API key verified");
                self.show_toast("API key accepted");
                true
            }
            Err(e) => {
                self.credential.set_verified(false);
                warn!("API key verification failed: {}", e);
                let detail = match e {
                    Error::InvalidCredential(detail) => detail,
                    other => other.to_string(),
                };
                self.report(Error::InvalidCredential(detail));
                false
            }
        }
    }

    fn ensure_ai(&self) -> Result<()> {
        if self.credential.is_verified() {
            Ok(())
        } else {
            Err(Error::MissingCredential)
        }
    }

    /// Append a continuation of the whole document.
    pub fn complete(&mut self, ai: &dyn AiService) -> Result<()> {
        self.ensure_ai()?;
        self.buffer.ensure_writable()?;
        if self.buffer.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let continuation = ai.complete(self.buffer.get_all())?;
        info!("Completion returned {} chars", continuation.chars().count());
        self.buffer.append(&continuation);
        Ok(())
    }

    /// Rewrite the selection in place.
    pub fn improve(&mut self, ai: &dyn AiService) -> Result<()> {
        self.ensure_ai()?;
        let selection = self.buffer.get_selection()?.to_string();
        self.buffer.ensure_writable()?;
        let (start, end) = self.buffer.selection().ok_or(Error::NoSelection)?;

        let improved = ai.improve(&selection)?;
        self.buffer.replace_range(start, end, &improved);
        Ok(())
    }

    /// Generate an image from the document and save it under `dir`.
    ///
    /// Returns the path of the written `<created>.png`.
    pub fn illustrate(&mut self, ai: &dyn AiService, dir: &Path) -> Result<PathBuf> {
        self.ensure_ai()?;
        if self.buffer.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let image = ai.generate_image(self.buffer.get_all())?;
        let bytes = ai.download(&image.url)?;
        let path = dir.join(image.file_name());
        std::fs::write(&path, &bytes).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })?;

        info!("Saved image: {} ({} bytes)", path.display(), bytes.len());
        self.show_toast(format!("Saved {}", image.file_name()));
        Ok(path)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Feedback
    // ─────────────────────────────────────────────────────────────────────────

    /// Present a failed command to the user.
    pub fn report(&mut self, err: Error) {
        if err.is_modal() {
            warn!("{}: {}", err.title(), err);
            self.show_modal(err.title(), err.to_string());
        } else {
            warn!("{}", err);
            self.show_toast(err.to_string());
        }
    }

    pub fn show_modal(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.ui.modal = Some(Notice {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn modal(&self) -> Option<&Notice> {
        self.ui.modal.as_ref()
    }

    pub fn dismiss_modal(&mut self) {
        self.ui.modal = None;
    }

    /// Show a temporary toast message.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.ui.toast = Some(Toast {
            message: message.into(),
            expires_at: None,
        });
    }

    /// Update toast state - stamps new toasts and clears expired ones.
    pub fn update_toast(&mut self, current_time: f64) {
        let expired = match &mut self.ui.toast {
            Some(toast) => match toast.expires_at {
                Some(expires_at) => current_time >= expires_at,
                None => {
                    toast.expires_at = Some(current_time + TOAST_DURATION);
                    false
                }
            },
            None => false,
        };
        if expired {
            self.ui.toast = None;
        }
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.ui.toast.as_ref().map(|t| t.message.as_str())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
