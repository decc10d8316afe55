//! File operations module for Quillpad
//!
//! This module provides native open/save dialogs and the plain read/write
//! helpers behind "Open" and "Save".

pub mod dialogs;
mod io;

pub use io::{read_document, write_document};
