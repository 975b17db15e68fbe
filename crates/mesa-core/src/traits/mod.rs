// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits consumed by the dialogue and reservation core.
//!
//! Network clients and side-effect collaborators implement these traits;
//! the core only ever holds them as `Arc<dyn ...>`.

pub mod adapter;
pub mod embedding;
pub mod notifier;
pub mod provider;

pub use adapter::PluginAdapter;
pub use embedding::EmbeddingAdapter;
pub use notifier::ReservationNotifier;
pub use provider::ProviderAdapter;
