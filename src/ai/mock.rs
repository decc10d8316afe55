//! Scripted [`AiService`] for tests.

use super::{AiService, GeneratedImage};
use crate::error::{Error, Result};
use std::cell::{Cell, RefCell};

/// What the mock should answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Image(GeneratedImage),
    Fail(FailKind),
}

/// Failure modes the mock can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailKind {
    Network,
    Provider,
    Safety,
}

impl FailKind {
    fn to_error(self) -> Error {
        match self {
            FailKind::Network => Error::Network("connection reset".to_string()),
            FailKind::Provider => Error::Provider("HTTP 500: boom".to_string()),
            FailKind::Safety => Error::SafetyRejection,
        }
    }
}

/// Records every call and answers from a fixed script.
pub struct MockAiService {
    pub accept_key: bool,
    pub reply: Reply,
    pub image_bytes: Vec<u8>,
    calls: Cell<usize>,
    prompts: RefCell<Vec<String>>,
}

impl MockAiService {
    pub fn new(reply: Reply) -> Self {
        Self {
            accept_key: true,
            reply,
            image_bytes: b"\x89PNG fake".to_vec(),
            calls: Cell::new(0),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn text(reply: &str) -> Self {
        Self::new(Reply::Text(reply.to_string()))
    }

    pub fn rejecting_key() -> Self {
        let mut mock = Self::text("");
        mock.accept_key = false;
        mock
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Prompts sent to `complete`, `improve` and `generate_image`.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    fn record(&self, prompt: Option<&str>) {
        self.calls.set(self.calls.get() + 1);
        if let Some(prompt) = prompt {
            self.prompts.borrow_mut().push(prompt.to_string());
        }
    }

    fn text_reply(&self) -> Result<String> {
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Image(_) => Err(Error::Provider("unexpected image reply".to_string())),
            Reply::Fail(kind) => Err(kind.to_error()),
        }
    }
}

impl AiService for MockAiService {
    fn list_models(&self) -> Result<()> {
        self.record(None);
        if self.accept_key {
            Ok(())
        } else {
            Err(Error::InvalidCredential("HTTP 401: Incorrect API key".to_string()))
        }
    }

    fn complete(&self, document: &str) -> Result<String> {
        self.record(Some(document));
        self.text_reply()
    }

    fn improve(&self, selection: &str) -> Result<String> {
        self.record(Some(selection));
        self.text_reply()
    }

    fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        self.record(Some(prompt));
        match &self.reply {
            Reply::Image(image) => Ok(image.clone()),
            Reply::Text(_) => Err(Error::Provider("unexpected text reply".to_string())),
            Reply::Fail(kind) => Err(kind.to_error()),
        }
    }

    fn download(&self, _url: &str) -> Result<Vec<u8>> {
        self.record(None);
        Ok(self.image_bytes.clone())
    }
}
