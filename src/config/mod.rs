//! Configuration module for Quillpad
//!
//! This module holds the session settings: window geometry, the default
//! document font, AI endpoint constants and PDF page geometry. Settings are
//! built from defaults at startup and are never persisted.

mod settings;

pub use settings::*;
