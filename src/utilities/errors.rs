//! Error types for the chat resolver, the demo calculators and startup
//! configuration.

use thiserror::Error;

/// Errors raised around a chat turn.
///
/// Only [`ChatError::EmptyInput`] ever reaches a caller. The remote variants
/// are produced by [`crate::chat::remote::RemoteGenerator`] implementations
/// and recovered inside the resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The utterance was blank after trimming.
    #[error("Message must not be empty")]
    EmptyInput,

    /// Transport failure, timeout or non-success status from the remote call.
    #[error("Remote generator unavailable: {message}")]
    RemoteUnavailable { message: String },

    /// The response body lacked a non-empty generated-text field.
    #[error("Remote generator returned a malformed response: {message}")]
    RemoteMalformed { message: String },

    /// No credential is configured, so the remote path is disabled.
    #[error("Remote generator is not configured")]
    RemoteMisconfigured,
}

impl ChatError {
    /// Build a [`ChatError::RemoteUnavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            message: message.into(),
        }
    }

    /// Build a [`ChatError::RemoteMalformed`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::RemoteMalformed {
            message: message.into(),
        }
    }
}

/// Input errors from the demo calculators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DemoError {
    /// No valid number could be parsed from the input.
    #[error("Please enter valid numbers separated by commas.")]
    NoNumbers,

    /// The result overflowed to a non-finite value.
    #[error("The result is too large to display.")]
    OutOfRange,

    /// The requested spreadsheet function is not one of SUM/AVERAGE/MAX/MIN.
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },
}

/// Errors while loading service configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a configuration file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A YAML document could not be parsed.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// A keyword table entry was unusable.
    #[error("Invalid keyword table: {message}")]
    InvalidKeywordTable { message: String },

    /// An environment variable held an unparsable value.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
