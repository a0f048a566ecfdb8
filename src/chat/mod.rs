//! Chat module - keyword answers with an optional remote upgrade.
//!
//! ```text
//! User message
//!   → Utterance (trim, reject blank)
//!   → KeywordTable first match → offline candidate
//!   → RemoteGenerator (if a credential is configured)
//!   → ChatTurn { response, source }
//! ```

pub mod handler;
pub mod keyword_table;
pub mod remote;
pub mod resolver;
pub mod utterance;

pub use keyword_table::{KeywordEntry, KeywordTable, DEFAULT_RESPONSE};
pub use remote::{GenerativeTextClient, RemoteCallConfig, RemoteGenerator};
pub use resolver::{resolve, ChatResolver, ChatTurn, OfflineCandidate, PendingTurn, TurnSource};
pub use utterance::Utterance;
