// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for chat completion backends.

use async_trait::async_trait;

use crate::error::MesaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for LLM chat completion.
///
/// Retry policy, if any, belongs to the implementation; callers treat one
/// call as one attempt.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, MesaError>;
}
