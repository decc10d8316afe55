//! Document Export Module for Quillpad
//!
//! Exports the buffer as a paginated, single-font PDF.

mod helvetica;
pub mod pdf;

pub use pdf::export_pdf;
