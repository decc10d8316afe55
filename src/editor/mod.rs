//! Editor module for Quillpad
//!
//! This module contains the document buffer, the text editor widget and the
//! pure helpers behind Find and Replace and the status bar.

mod buffer;
mod find_replace;
mod stats;
mod widget;

pub use buffer::TextBuffer;
pub use find_replace::FindReplace;
pub use stats::TextStats;
pub use widget::EditorWidget;
