//! Blocking REST client for the OpenAI API
//!
//! Only the handful of fields the editor needs are modelled. Anything missing
//! from a response is reported as [`Error::Provider`].

use super::{AiService, GeneratedImage};
use crate::config::AiSettings;
use crate::error::{Error, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Refuse to buffer images larger than this.
const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Error code the provider attaches to content-policy refusals.
const CONTENT_POLICY_CODE: &str = "content_policy_violation";

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    created: u64,
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    code: Option<String>,
}

/// A non-2xx answer from the provider.
#[derive(Debug, Clone, PartialEq)]
struct ProviderFailure {
    status: u16,
    message: String,
    code: Option<String>,
}

impl ProviderFailure {
    /// Pull the message and code out of an error body, falling back to the
    /// raw text when it is not the usual JSON envelope.
    fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                status,
                message: envelope.error.message,
                code: envelope.error.code,
            },
            Err(_) => Self {
                status,
                message: body.trim().to_string(),
                code: None,
            },
        }
    }

    fn is_safety_rejection(&self, marker: &str) -> bool {
        self.code.as_deref() == Some(CONTENT_POLICY_CODE)
            || (!marker.is_empty() && self.message.contains(marker))
    }
}

enum CallError {
    Status(ProviderFailure),
    Transport(String),
}

impl From<CallError> for Error {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Status(failure) => {
                Error::Provider(format!("HTTP {}: {}", failure.status, failure.message))
            }
            CallError::Transport(msg) => Error::Network(msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// OpenAI client bound to one API key.
pub struct OpenAiClient {
    agent: ureq::Agent,
    api_key: String,
    settings: AiSettings,
}

impl OpenAiClient {
    /// Create a client. No request is made until a method is called.
    pub fn new(api_key: impl Into<String>, settings: AiSettings) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            api_key: api_key.into(),
            settings,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    fn get(&self, path: &str) -> std::result::Result<String, CallError> {
        let response = self
            .agent
            .get(&self.url(path))
            .set("Authorization", &self.authorization())
            .call()
            .map_err(call_error)?;
        read_body(response)
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> std::result::Result<String, CallError> {
        let response = self
            .agent
            .post(&self.url(path))
            .set("Authorization", &self.authorization())
            .send_json(body)
            .map_err(call_error)?;
        read_body(response)
    }

    fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: &self.settings.chat_model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            top_p: self.settings.top_p,
            frequency_penalty: self.settings.frequency_penalty,
            presence_penalty: self.settings.presence_penalty,
        };
        let body = self.post("chat/completions", &request)?;
        parse_chat_reply(&body)
    }
}

impl AiService for OpenAiClient {
    fn list_models(&self) -> Result<()> {
        let body = self.get("models").map_err(|err| match err {
            CallError::Status(failure) => Error::InvalidCredential(failure.message),
            CallError::Transport(msg) => Error::InvalidCredential(msg),
        })?;
        let models: ModelList = serde_json::from_str(&body)
            .map_err(|e| Error::InvalidCredential(e.to_string()))?;
        info!("API key accepted ({} models listed)", models.data.len());
        Ok(())
    }

    fn complete(&self, document: &str) -> Result<String> {
        debug!("Requesting completion for {} chars", document.len());
        self.chat(complete_messages(&self.settings, document))
    }

    fn improve(&self, selection: &str) -> Result<String> {
        debug!("Requesting improvement for {} chars", selection.len());
        self.chat(improve_messages(&self.settings, selection))
    }

    fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = ImageRequest {
            model: &self.settings.image_model,
            prompt,
        };
        let body = match self.post("images/generations", &request) {
            Ok(body) => body,
            Err(CallError::Status(failure))
                if failure.is_safety_rejection(&self.settings.safety_rejection_marker) =>
            {
                warn!("Image prompt rejected by provider safety system");
                return Err(Error::SafetyRejection);
            }
            Err(err) => return Err(err.into()),
        };
        parse_image_response(&body)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.agent.get(url).call().map_err(call_error)?;
        let bytes = read_capped(response.into_reader(), MAX_IMAGE_BYTES)?;
        debug!("Downloaded {} bytes from image URL", bytes.len());
        Ok(bytes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Read the whole body, failing instead of truncating when it exceeds `limit`.
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| Error::Network(e.to_string()))?;
    if bytes.len() as u64 > limit {
        return Err(Error::Provider(format!(
            "Image is larger than {} bytes",
            limit
        )));
    }
    Ok(bytes)
}

fn call_error(err: ureq::Error) -> CallError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            CallError::Status(ProviderFailure::from_body(status, &body))
        }
        ureq::Error::Transport(transport) => CallError::Transport(transport.to_string()),
    }
}

fn read_body(response: ureq::Response) -> std::result::Result<String, CallError> {
    response
        .into_string()
        .map_err(|e| CallError::Transport(e.to_string()))
}

/// The document rides in the system message; the user turn stays empty.
fn complete_messages(settings: &AiSettings, document: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system",
            content: format!("{}{}", settings.complete_instruction, document),
        },
        ChatMessage {
            role: "user",
            content: String::new(),
        },
    ]
}

fn improve_messages(settings: &AiSettings, selection: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system",
            content: settings.improve_instruction.clone(),
        },
        ChatMessage {
            role: "user",
            content: selection.to_string(),
        },
    ]
}

fn parse_chat_reply(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Provider("response contained no text".to_string()))
}

fn parse_image_response(body: &str) -> Result<GeneratedImage> {
    let response: ImageResponse = serde_json::from_str(body)?;
    let url = response
        .data
        .into_iter()
        .next()
        .and_then(|data| data.url)
        .ok_or_else(|| Error::Provider("response contained no image URL".to_string()))?;
    Ok(GeneratedImage {
        created: response.created,
        url,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_messages_embed_document() {
        let settings = AiSettings::default();
        let messages = complete_messages(&settings, "It was a dark");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "Complete this text: It was a dark");
        assert_eq!(messages[1].content, "");
    }

    #[test]
    fn test_improve_messages_send_only_selection() {
        let settings = AiSettings::default();
        let messages = improve_messages(&settings, "teh text");
        assert_eq!(messages[0].content, settings.improve_instruction);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "teh text");
    }

    #[test]
    fn test_chat_request_carries_sampling_constants() {
        let settings = AiSettings::default();
        let request = ChatRequest {
            model: &settings.chat_model,
            messages: improve_messages(&settings, "x"),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
            frequency_penalty: settings.frequency_penalty,
            presence_penalty: settings.presence_penalty,
        };
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["temperature"], 1.0);
        assert_eq!(json["top_p"], 1.0);
        assert_eq!(json["presence_penalty"], 0.0);
    }

    #[test]
    fn test_parse_chat_reply() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Hello there"}}]}"#;
        assert_eq!(parse_chat_reply(body).unwrap(), "Hello there");
    }

    #[test]
    fn test_parse_chat_reply_fails_closed() {
        assert!(matches!(
            parse_chat_reply(r#"{"choices":[]}"#),
            Err(Error::Provider(_))
        ));
        assert!(matches!(
            parse_chat_reply(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(Error::Provider(_))
        ));
        assert!(matches!(parse_chat_reply("<html>"), Err(Error::Provider(_))));
    }

    #[test]
    fn test_parse_image_response() {
        let body = r#"{"created":1700000000,"data":[{"url":"https://img.example/a.png","revised_prompt":"p"}]}"#;
        let image = parse_image_response(body).unwrap();
        assert_eq!(image.created, 1_700_000_000);
        assert_eq!(image.url, "https://img.example/a.png");
    }

    #[test]
    fn test_parse_image_response_without_url() {
        let body = r#"{"created":1,"data":[{"b64_json":"AAAA"}]}"#;
        assert!(matches!(parse_image_response(body), Err(Error::Provider(_))));
    }

    #[test]
    fn test_provider_failure_from_envelope() {
        let body = r#"{"error":{"message":"Your request was rejected as a result of our safety system.","type":"invalid_request_error","code":null}}"#;
        let failure = ProviderFailure::from_body(400, body);
        assert_eq!(failure.status, 400);
        assert!(failure.is_safety_rejection(&AiSettings::default().safety_rejection_marker));
    }

    #[test]
    fn test_provider_failure_by_code() {
        let body = r#"{"error":{"message":"blocked","code":"content_policy_violation"}}"#;
        let failure = ProviderFailure::from_body(400, body);
        assert!(failure.is_safety_rejection(""));
    }

    #[test]
    fn test_provider_failure_plain_body() {
        let failure = ProviderFailure::from_body(502, "  Bad Gateway \n");
        assert_eq!(failure.message, "Bad Gateway");
        assert!(!failure.is_safety_rejection(&AiSettings::default().safety_rejection_marker));
        let err: Error = CallError::Status(failure).into();
        assert!(matches!(err, Error::Provider(msg) if msg.contains("502")));
    }

    #[test]
    fn test_read_capped_accepts_body_at_limit() {
        let body = vec![7u8; 64];
        let bytes = read_capped(std::io::Cursor::new(body.clone()), 64).unwrap();
        assert_eq!(bytes, body);
    }

    #[test]
    fn test_read_capped_rejects_oversized_body() {
        let body = vec![7u8; 65];
        let err = read_capped(std::io::Cursor::new(body), 64).unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn test_url_join() {
        let mut settings = AiSettings::default();
        settings.base_url = "http://localhost:9000/v1/".to_string();
        let client = OpenAiClient::new("sk-test", settings);
        assert_eq!(client.url("models"), "http://localhost:9000/v1/models");
        assert_eq!(client.authorization(), "Bearer sk-test");
    }
}
