// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Mesa integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without network access.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock chat model with pre-configured replies
//! - [`MockEmbedder`] - Mock embedding model with queued vectors
//! - [`MockNotifier`] - Mock calendar notifier with event capture
//! - [`TestHarness`] - Full turn pipeline over temp artifacts and a CSV ledger

pub mod harness;
pub mod mock_notifier;
pub mod mock_provider;

pub use harness::{FaqFixture, TestHarness, TestHarnessBuilder, default_faqs, harness_now};
pub use mock_notifier::MockNotifier;
pub use mock_provider::{MockEmbedder, MockProvider};
