//! Text editor widget for Quillpad
//!
//! This module wraps egui's multiline `TextEdit` around the [`TextBuffer`],
//! applying the user's font and the read-only flag, and feeding the cursor
//! and selection back into the buffer after every frame.

use super::TextBuffer;
use crate::config::FontSetting;
use eframe::egui::{self, FontId, ScrollArea, TextEdit, Ui};
use log::debug;

/// A text editor widget bound to the document buffer.
///
/// # Example
///
/// ```ignore
/// EditorWidget::new(&mut state.buffer, &state.font).show(ui);
/// ```
pub struct EditorWidget<'a> {
    buffer: &'a mut TextBuffer,
    font: &'a FontSetting,
    id: Option<egui::Id>,
}

impl<'a> EditorWidget<'a> {
    /// Create a new editor widget for the given buffer.
    pub fn new(buffer: &'a mut TextBuffer, font: &'a FontSetting) -> Self {
        Self {
            buffer,
            font,
            id: None,
        }
    }

    /// Set a custom ID for the editor.
    #[must_use]
    pub fn id(mut self, id: egui::Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Show the editor widget.
    pub fn show(self, ui: &mut Ui) {
        // Programmatic edits bump the version; a new ID makes egui drop the
        // stale cursor state of the previous TextEdit.
        let base_id = self.id.unwrap_or_else(|| ui.id().with("editor"));
        let id = base_id.with(self.buffer.content_version());

        let font_id = FontId::new(self.font.points(), self.font.egui_family());
        let read_only = self.buffer.is_read_only();

        let text_output = ScrollArea::vertical()
            .id_source(base_id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let content = self.buffer.text_mut();
                if read_only {
                    // A &str buffer still allows selecting and copying.
                    let mut view = content.as_str();
                    configure(TextEdit::multiline(&mut view), id, font_id).show(ui)
                } else {
                    configure(TextEdit::multiline(content), id, font_id).show(ui)
                }
            })
            .inner;

        if text_output.response.changed() {
            debug!("Editor content changed by typing");
        }

        if let Some(cursor_range) = text_output.cursor_range {
            self.buffer.set_cursor_range(
                cursor_range.primary.ccursor.index,
                cursor_range.secondary.ccursor.index,
            );
        }
    }
}

fn configure(edit: TextEdit<'_>, id: egui::Id, font_id: FontId) -> TextEdit<'_> {
    edit.id(id)
        .frame(false)
        .font(font_id)
        .desired_width(f32::INFINITY)
        .lock_focus(true)
}
