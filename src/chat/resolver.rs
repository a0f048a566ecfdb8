//! Chat response resolution.
//!
//! ```text
//! Utterance
//!   → lower-case, first keyword match in table order  (sync)
//!   → offline candidate (match or DEFAULT_RESPONSE)
//!   → remote disabled?  return offline
//!   → remote call        success → generated text
//!                        failure → offline candidate
//! ```
//!
//! The offline candidate is always computed before the first `.await`, so
//! callers can show it (or a "thinking" indicator) while the remote call is
//! in flight. Every path yields a non-empty response.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::keyword_table::{KeywordTable, DEFAULT_RESPONSE};
use super::remote::{GenerativeTextClient, RemoteCallConfig, RemoteGenerator};
use super::utterance::Utterance;
use crate::utilities::errors::ChatError;

// ============================================================================
// ChatTurn
// ============================================================================

/// How a turn's response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnSource {
    /// A keyword matched; remote disabled.
    OfflineMatch,
    /// Nothing matched; remote disabled.
    OfflineDefault,
    /// The remote generator answered.
    RemoteSuccess,
    /// The remote call failed and the offline candidate was used.
    RemoteFailureFallback,
}

/// One resolved exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub utterance: String,
    pub response: String,
    pub source: TurnSource,
    pub resolved_at: DateTime<Utc>,
}

// ============================================================================
// Offline candidate
// ============================================================================

/// Response derived purely from the keyword table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineCandidate {
    pub response: String,
    /// The keyword that matched, if any.
    pub keyword: Option<String>,
}

impl OfflineCandidate {
    pub fn matched(&self) -> bool {
        self.keyword.is_some()
    }

    fn source(&self) -> TurnSource {
        if self.matched() {
            TurnSource::OfflineMatch
        } else {
            TurnSource::OfflineDefault
        }
    }
}

/// First-match scan of `table` against the lower-cased utterance.
pub fn offline_candidate(utterance: &Utterance, table: &KeywordTable) -> OfflineCandidate {
    match table.first_match(&utterance.normalized()) {
        Some(entry) => OfflineCandidate {
            response: entry.answer.clone(),
            keyword: Some(entry.keyword.clone()),
        },
        None => OfflineCandidate {
            response: DEFAULT_RESPONSE.to_string(),
            keyword: None,
        },
    }
}

// ============================================================================
// ChatResolver
// ============================================================================

/// Resolves utterances against a fixed keyword table and an optional
/// remote generator.
///
/// Cheap to clone; the table and generator are shared read-only.
#[derive(Debug, Clone)]
pub struct ChatResolver {
    table: Arc<KeywordTable>,
    remote: Option<Arc<dyn RemoteGenerator>>,
}

impl ChatResolver {
    /// Offline-only resolver.
    pub fn new(table: KeywordTable) -> Self {
        Self {
            table: Arc::new(table),
            remote: None,
        }
    }

    /// Resolver with the HTTP generator when `config` carries a credential.
    ///
    /// A missing credential disables the remote path. Client construction
    /// failures do the same, with a warning.
    pub fn from_config(table: KeywordTable, config: &RemoteCallConfig) -> Self {
        let remote: Option<Arc<dyn RemoteGenerator>> = match GenerativeTextClient::new(config) {
            Ok(client) => Some(Arc::new(client)),
            Err(ChatError::RemoteMisconfigured) => None,
            Err(e) => {
                log::warn!("Remote generator disabled: {}", e);
                None
            }
        };
        Self {
            table: Arc::new(table),
            remote,
        }
    }

    /// Attach (or replace) the remote generator.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteGenerator>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Compute the offline candidate and return a turn awaiting completion.
    pub fn prepare(&self, utterance: Utterance) -> PendingTurn {
        let offline = offline_candidate(&utterance, &self.table);
        PendingTurn {
            id: Uuid::new_v4(),
            utterance,
            offline,
            remote: self.remote.clone(),
        }
    }

    /// Resolve one utterance end to end.
    pub async fn resolve(&self, utterance: Utterance) -> ChatTurn {
        self.prepare(utterance).finish().await
    }
}

// ============================================================================
// PendingTurn
// ============================================================================

/// A turn whose offline candidate is known and whose remote upgrade, if
/// any, has not run yet.
#[derive(Debug)]
pub struct PendingTurn {
    id: Uuid,
    utterance: Utterance,
    offline: OfflineCandidate,
    remote: Option<Arc<dyn RemoteGenerator>>,
}

impl PendingTurn {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The response available right now, before any remote call.
    pub fn provisional(&self) -> &OfflineCandidate {
        &self.offline
    }

    /// True when `finish` will suspend on a remote call.
    pub fn awaits_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Run the remote call (if configured) and produce the final turn.
    pub async fn finish(self) -> ChatTurn {
        let PendingTurn {
            id,
            utterance,
            offline,
            remote,
        } = self;

        let (response, source) = match remote {
            None => {
                let source = offline.source();
                (offline.response, source)
            }
            Some(remote) => match remote.generate(utterance.as_str()).await {
                Ok(text) if !text.trim().is_empty() => (text, TurnSource::RemoteSuccess),
                Ok(_) => {
                    log::warn!("Turn {}: remote returned empty text, using offline answer", id);
                    (offline.response, TurnSource::RemoteFailureFallback)
                }
                Err(e) => {
                    log::warn!("Turn {}: {}, using offline answer", id, e);
                    (offline.response, TurnSource::RemoteFailureFallback)
                }
            },
        };

        log::debug!("Turn {} resolved via {:?}", id, source);

        ChatTurn {
            id,
            utterance: utterance.into_inner(),
            response,
            source,
            resolved_at: Utc::now(),
        }
    }
}

/// Resolve `utterance` against `table`, calling the endpoint in `config`
/// when it is enabled.
///
/// Convenience wrapper that builds a fresh [`ChatResolver`]; long-lived
/// callers should keep one resolver and reuse it.
pub async fn resolve(
    utterance: Utterance,
    table: &KeywordTable,
    config: &RemoteCallConfig,
) -> ChatTurn {
    ChatResolver::from_config(table.clone(), config)
        .resolve(utterance)
        .await
}

// ============================================================================
// Tests
// ============================================================================
