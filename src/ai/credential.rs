//! API key held in memory for the session.

use std::fmt;

/// The user's API key and whether the provider accepted it.
///
/// AI commands are available only while [`Credential::is_verified`] holds.
/// The key is never written to disk or to the log.
#[derive(Clone, Default)]
pub struct Credential {
    key: Option<String>,
    verified: bool,
}

impl Credential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new key. It starts out unverified.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into().trim().to_string());
        self.verified = false;
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Record the outcome of the verification round-trip.
    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified && self.key.is_some();
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("verified", &self.verified)
            .finish()
    }
}
