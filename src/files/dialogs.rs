//! Native file dialog integration using the rfd crate
//!
//! These calls block until the user picks a path or cancels.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "log"];
const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Apply the directory and file name of the current document, if any.
fn seeded(mut dialog: FileDialog, current: Option<&Path>) -> FileDialog {
    if let Some(path) = current {
        if let Some(dir) = path.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            dialog = dialog.set_file_name(name);
        }
    }
    dialog
}

/// Opens a native file dialog for picking a text file to open.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn open_file_dialog(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open")
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = current.and_then(|p| p.parent()) {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog for the document text.
pub fn save_file_dialog(current: Option<&Path>) -> Option<PathBuf> {
    let dialog = FileDialog::new()
        .set_title("Save")
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    seeded(dialog, current).save_file()
}

/// Opens a native save dialog for a PDF export.
pub fn save_pdf_dialog(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save as PDF")
        .add_filter("PDF files", PDF_EXTENSIONS);

    if let Some(path) = current {
        if let Some(dir) = path.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            dialog = dialog.set_file_name(format!("{}.pdf", stem));
        }
    }

    dialog.save_file()
}
