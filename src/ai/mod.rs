//! Generative-AI adapters for Quillpad
//!
//! The editor talks to the provider only through the [`AiService`] trait so
//! the blocking HTTP client can be swapped for another transport (or a mock
//! in tests) without touching command semantics.
//!
//! # Architecture
//!
//! - `credential.rs` - In-memory API key and its verification state
//! - `openai.rs` - Blocking REST client for the OpenAI API
//! - `mock.rs` - Scripted service used by the command tests

mod credential;
#[cfg(test)]
pub mod mock;
mod openai;

pub use credential::Credential;
pub use openai::OpenAiClient;

use crate::error::Result;

/// An image produced by the provider, not yet downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Creation timestamp reported by the provider, used as the file name
    pub created: u64,
    /// Where the image can be fetched from
    pub url: String,
}

impl GeneratedImage {
    /// File name the image is saved under.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.created)
    }
}

/// Synchronous requests against the generative-AI endpoint.
///
/// Every call blocks until the provider answers. Implementations must fail
/// with an [`Error`](crate::error::Error) rather than panic when the response
/// does not have the expected shape.
pub trait AiService {
    /// Cheap authenticated call used to check the key.
    fn list_models(&self) -> Result<()>;

    /// Continue `document`; returns only the new text.
    fn complete(&self, document: &str) -> Result<String>;

    /// Rewrite `selection`; returns the replacement text.
    fn improve(&self, selection: &str) -> Result<String>;

    /// Generate an image from `prompt`.
    fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;

    /// Fetch the bytes behind an image URL.
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}
