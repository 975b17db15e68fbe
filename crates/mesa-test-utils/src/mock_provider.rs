// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion and embedding adapters for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies
//! and records every request it receives. `MockEmbedder` implements
//! `EmbeddingAdapter` with queued vectors.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mesa_core::types::{EmbeddingInput, EmbeddingOutput};
use mesa_core::{
    AdapterType, CompletionRequest, CompletionResponse, EmbeddingAdapter, HealthStatus,
    MesaError, PluginAdapter, ProviderAdapter, TokenUsage,
};

/// Queued result: a value, or the message of a provider failure.
type Scripted<T> = Result<T, String>;

fn scripted_failure(message: String) -> MesaError {
    MesaError::Provider {
        message,
        source: None,
    }
}

/// A mock chat model that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<Scripted<String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(Ok(text));
    }

    /// Queue a failure.
    pub async fn fail_next(&self, message: &str) {
        self.responses
            .lock()
            .await
            .push_back(Err(message.to_string()));
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MesaError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, MesaError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        let next = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()));
        let content = next.map_err(scripted_failure)?;

        Ok(CompletionResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            content,
            model,
            usage: Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            }),
        })
    }
}

/// A mock embedding model.
///
/// Queued vectors are returned first; afterwards every text embeds to a
/// vector of ones.
pub struct MockEmbedder {
    dimensions: usize,
    vectors: Arc<Mutex<VecDeque<Scripted<Vec<f32>>>>>,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Queue the vector for the next embedded text.
    pub async fn push_vector(&self, vector: Vec<f32>) {
        self.vectors.lock().await.push_back(Ok(vector));
    }

    /// Queue a failure.
    pub async fn fail_next(&self, message: &str) {
        self.vectors
            .lock()
            .await
            .push_back(Err(message.to_string()));
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, MesaError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MesaError> {
        let mut queue = self.vectors.lock().await;
        let mut embeddings = Vec::with_capacity(input.texts.len());
        for _ in &input.texts {
            let vector = queue
                .pop_front()
                .unwrap_or_else(|| Ok(vec![1.0; self.dimensions]))
                .map_err(scripted_failure)?;
            embeddings.push(vector);
        }

        Ok(EmbeddingOutput {
            dimensions: embeddings.first().map_or(self.dimensions, Vec::len),
            embeddings,
        })
    }
}
