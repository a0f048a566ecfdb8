//! # learnhub
//!
//! Backend for the LearnHub data-analytics course site.
//!
//! The chat widget answers from an ordered keyword table and, when a
//! credential is configured, upgrades the answer through a remote
//! text-generation endpoint, falling back to the keyword answer on any
//! failure. The demo calculators (mean, SUM/AVERAGE/MAX/MIN, random sample
//! data) back the "try it" widgets on the course pages.

pub mod chat;
pub mod demos;
pub mod server;
pub mod utilities;

pub use chat::{ChatResolver, ChatTurn, KeywordTable, RemoteCallConfig, TurnSource, Utterance};
pub use server::{app_router, AppState};

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
