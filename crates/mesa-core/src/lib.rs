// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mesa restaurant assistant.
//!
//! Provides the error type, the capability traits that network clients and
//! side-effect collaborators implement, and the small set of types that flow
//! between the retrieval, dialogue, and reservation crates.

pub mod clock;
pub mod error;
pub mod traits;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ArtifactKind, MesaError};
pub use types::{
    AdapterType, CompletionRequest, CompletionResponse, ConversationTurn, HealthStatus, Role,
    TokenUsage,
};

pub use traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter, ReservationNotifier};
