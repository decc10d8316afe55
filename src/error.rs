//! Centralized error handling for Quillpad
//!
//! This module provides a unified error type that covers all error scenarios
//! in the application: file I/O, PDF export, clipboard access and the
//! generative-AI adapter.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read file contents
    FileRead { path: PathBuf, source: io::Error },

    /// Failed to write file contents
    FileWrite { path: PathBuf, source: io::Error },

    /// Failed to build or write a PDF document
    PdfExport { path: PathBuf, message: String },

    /// System clipboard unavailable or rejected the operation
    Clipboard(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Editing Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A command needed highlighted text but nothing was selected
    NoSelection,

    /// The document is locked against mutation
    ReadOnly,

    /// A command needed document text but the buffer is empty
    EmptyDocument,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Service Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// An AI command ran before a key was verified
    MissingCredential,

    /// The key listing call failed
    InvalidCredential(String),

    /// The provider refused an image prompt on content policy grounds
    SafetyRejection,

    /// Transport-level failure talking to the provider
    Network(String),

    /// The provider answered with an error or a response we could not read
    Provider(String),
}

impl Error {
    /// Whether this error deserves a blocking modal rather than a toast.
    pub fn is_modal(&self) -> bool {
        !matches!(
            self,
            Error::Network(_)
                | Error::Provider(_)
                | Error::ReadOnly
                | Error::EmptyDocument
                | Error::MissingCredential
        )
    }

    /// Title to use when presenting the error in a modal.
    pub fn title(&self) -> &'static str {
        match self {
            Error::InvalidCredential(_) => "Can't communicate with API",
            Error::SafetyRejection => "Rejected!",
            Error::NoSelection => "Nothing selected",
            _ => "Error",
        }
    }
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Provider(format!("unreadable response: {}", err))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Error::PdfExport { path, message } => {
                write!(f, "Failed to export PDF '{}': {}", path.display(), message)
            }
            Error::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),

            // Editing Errors
            Error::NoSelection => write!(f, "Highlight some text first."),
            Error::ReadOnly => write!(f, "The document is read-only"),
            Error::EmptyDocument => write!(f, "The document is empty"),

            // AI Service Errors
            Error::MissingCredential => write!(f, "Add an API key first"),
            Error::InvalidCredential(_) => {
                write!(f, "That API key does not seem to be valid.")
            }
            Error::SafetyRejection => write!(
                f,
                "Your request was rejected as a result of our safety system"
            ),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Provider(msg) => write!(f, "AI service error: {}", msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } | Error::FileWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
