//! A single user message, trimmed and guaranteed non-empty.

use std::fmt;

use crate::utilities::errors::ChatError;

/// User text as it enters the resolver.
///
/// Construction trims surrounding whitespace and rejects blank input, so the
/// resolver never sees an empty message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance(String);

impl Utterance {
    /// Trim `raw` and wrap it, or fail with [`ChatError::EmptyInput`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ChatError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The trimmed text with its original casing.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased copy used only for keyword matching.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Utterance {
    type Error = ChatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Utterance {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
