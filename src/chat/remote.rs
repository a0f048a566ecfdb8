//! Remote text generation for chat turns.
//!
//! One POST per turn to a Generative Language style `generateContent`
//! endpoint:
//!
//! ```text
//! POST {endpoint}[?key={credential}]
//! Content-Type: application/json
//! Authorization: Bearer {credential}
//!
//! {"contents": [{"parts": [{"text": "<utterance>"}]}]}
//! ```
//!
//! The public Generative Language API authenticates API keys through the
//! `key` query parameter, so for that host the credential is sent both ways.
//! The reply text is read from `candidates[0].content.parts[0].text`.
//! Anything else (transport error, timeout, non-2xx, bad JSON, missing or
//! blank text) is an error; the resolver turns it into the offline answer.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::utilities::errors::ChatError;

/// Default `generateContent` endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Host that expects the API key as a `key` query parameter.
const GENERATIVE_LANGUAGE_HOST: &str = "generativelanguage.googleapis.com";

/// Upper bound on a single remote call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// RemoteCallConfig
// ---------------------------------------------------------------------------

/// Settings for the optional remote call.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteCallConfig {
    /// Full URL of the generation endpoint.
    pub endpoint: String,
    /// Bearer credential. The remote path is disabled without one.
    pub credential: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteCallConfig {
    pub fn new(endpoint: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// A configuration with no credential.
    pub fn disabled() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True only when a non-blank credential is present.
    pub fn enabled(&self) -> bool {
        self.credential
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

impl Default for RemoteCallConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

// Keep the credential out of logs.
impl fmt::Debug for RemoteCallConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCallConfig")
            .field("endpoint", &self.endpoint)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RemoteGenerator trait
// ---------------------------------------------------------------------------

/// A single-shot remote text generator.
///
/// Implementations return the generated text, or a
/// [`ChatError::RemoteUnavailable`] / [`ChatError::RemoteMalformed`].
#[async_trait]
pub trait RemoteGenerator: Send + Sync + fmt::Debug {
    async fn generate(&self, utterance: &str) -> Result<String, ChatError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// reqwest-backed [`RemoteGenerator`].
#[derive(Debug, Clone)]
pub struct GenerativeTextClient {
    http: reqwest::Client,
    endpoint: String,
    credential: String,
    /// Also send the credential as `?key=`.
    key_in_query: bool,
}

impl GenerativeTextClient {
    /// Build a client from `config`.
    ///
    /// Fails with [`ChatError::RemoteMisconfigured`] when no credential is
    /// set.
    pub fn new(config: &RemoteCallConfig) -> Result<Self, ChatError> {
        let credential = match config.credential.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(ChatError::RemoteMisconfigured),
        };

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::unavailable(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            key_in_query: expects_query_key(&config.endpoint),
            endpoint: config.endpoint.clone(),
            credential,
        })
    }
}

/// True when `endpoint` is the public Generative Language API.
fn expects_query_key(endpoint: &str) -> bool {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.eq_ignore_ascii_case(GENERATIVE_LANGUAGE_HOST)))
        .unwrap_or(false)
}

#[async_trait]
impl RemoteGenerator for GenerativeTextClient {
    async fn generate(&self, utterance: &str) -> Result<String, ChatError> {
        let body = build_request_body(utterance);

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.credential))
            .header("Content-Type", "application/json");
        if self.key_in_query {
            request = request.query(&[("key", self.credential.as_str())]);
        }

        let resp = request
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::unavailable("request timed out")
                } else {
                    ChatError::unavailable(format!("HTTP error: {}", e))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::unavailable(format!(
                "endpoint returned {}",
                status
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| ChatError::malformed(format!("JSON parse error: {}", e)))?;

        extract_generated_text(&json)
    }
}

/// Request payload carrying the utterance as the only content part.
pub fn build_request_body(utterance: &str) -> Value {
    serde_json::json!({
        "contents": [
            { "parts": [ { "text": utterance } ] }
        ]
    })
}

/// Read `candidates[0].content.parts[0].text`, rejecting blank text.
pub fn extract_generated_text(json: &Value) -> Result<String, ChatError> {
    let text = json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| ChatError::malformed("no generated text in response"))?;

    if text.trim().is_empty() {
        return Err(ChatError::malformed("generated text is empty"));
    }
    Ok(text.to_string())
}
