// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter adapter for the Mesa assistant.
//!
//! One [`OpenRouterProvider`] implements both [`ProviderAdapter`] (chat
//! completions) and [`EmbeddingAdapter`] (text embeddings) over the
//! OpenAI-compatible OpenRouter API.

pub mod client;
pub mod types;

use async_trait::async_trait;
use mesa_config::model::OpenRouterConfig;
use mesa_core::types::{EmbeddingInput, EmbeddingOutput};
use mesa_core::{
    AdapterType, CompletionRequest, CompletionResponse, EmbeddingAdapter, HealthStatus, MesaError,
    PluginAdapter, ProviderAdapter, TokenUsage,
};
use tracing::debug;

use crate::client::OpenRouterClient;
use crate::types::{ChatMessage, ChatRequest, EmbeddingRequest};

/// OpenRouter-backed completion and embedding provider.
pub struct OpenRouterProvider {
    client: OpenRouterClient,
    chat_model: String,
    embedding_model: String,
}

impl OpenRouterProvider {
    /// Creates the provider from `[openrouter]`.
    ///
    /// Fails with a configuration error when no API key is available.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, MesaError> {
        Ok(Self::with_client(
            OpenRouterClient::new(config)?,
            config.chat_model.clone(),
            config.embedding_model.clone(),
        ))
    }

    pub fn with_client(
        client: OpenRouterClient,
        chat_model: String,
        embedding_model: String,
    ) -> Self {
        Self {
            client,
            chat_model,
            embedding_model,
        }
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let model = if request.model.is_empty() {
            self.chat_model.clone()
        } else {
            request.model.clone()
        };
        ChatRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|turn| ChatMessage {
                    role: turn.role.to_string(),
                    content: turn.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MesaError> {
        // No health request: OpenRouter bills every call.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for OpenRouterProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, MesaError> {
        let api_request = self.to_chat_request(&request);
        let response = self.client.chat(&api_request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MesaError::Provider {
                message: "completion response contained no choices".into(),
                source: None,
            })?
            .message
            .content
            .unwrap_or_default();

        let usage = response.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });
        debug!(
            model = %response.model,
            input_tokens = usage.as_ref().map(|u| u.input_tokens),
            output_tokens = usage.as_ref().map(|u| u.output_tokens),
            "completion received"
        );

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenRouterProvider {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MesaError> {
        let expected = input.texts.len();
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: input.texts,
        };
        let mut response = self.client.embeddings(&request).await?;

        if response.data.len() != expected {
            return Err(MesaError::Provider {
                message: format!(
                    "expected {expected} embeddings, received {}",
                    response.data.len()
                ),
                source: None,
            });
        }

        response.data.sort_by_key(|d| d.index);
        let embeddings: Vec<Vec<f32>> = response.data.into_iter().map(|d| d.embedding).collect();
        let dimensions = embeddings.first().map_or(0, Vec::len);
        debug!(count = embeddings.len(), dimensions, "embeddings received");

        Ok(EmbeddingOutput {
            embeddings,
            dimensions,
        })
    }
}
