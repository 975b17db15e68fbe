// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialogue core for the Mesa assistant.
//!
//! - [`prompt`] builds the system instruction (persona plus the dated
//!   reservation protocol).
//! - [`history`] keeps a bounded window of past exchanges.
//! - [`session`] runs retrieval-augmented completion for one conversation.
//! - [`turn`] chains a session with reservation extraction.

pub mod history;
pub mod prompt;
pub mod session;
pub mod turn;

pub use history::{ConversationHistory, DEFAULT_HISTORY_MAX_PAIRS};
pub use prompt::{MARKER_GRAMMAR, SystemPrompt, grounding_message, load_persona};
pub use session::{DialogueSession, Reply, SessionDeps, SessionSettings};
pub use turn::{Assistant, TurnOutput, TurnProcessor};
