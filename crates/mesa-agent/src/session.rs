// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval-augmented dialogue session.
//!
//! One [`DialogueSession`] per conversation. Each call to
//! [`respond`](DialogueSession::respond) embeds the user text, retrieves the
//! closest FAQ entries, grounds the completion on them and records the
//! exchange in the session history once the model has answered.

use std::sync::Arc;

use mesa_config::model::MesaConfig;
use mesa_core::types::EmbeddingInput;
use mesa_core::{
    Clock, CompletionRequest, ConversationTurn, EmbeddingAdapter, MesaError, ProviderAdapter,
};
use mesa_knowledge::{ImageRefs, VectorIndex, compose_context};
use tracing::{debug, info};

use crate::history::{ConversationHistory, DEFAULT_HISTORY_MAX_PAIRS};
use crate::prompt::{SystemPrompt, grounding_message};

/// Per-request model parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Chat model id. Empty lets the provider pick its configured default.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_k: usize,
    pub history_max_pairs: usize,
}

impl SessionSettings {
    pub fn from_config(config: &MesaConfig) -> Self {
        Self {
            model: config.openrouter.chat_model.clone(),
            temperature: config.assistant.temperature,
            max_tokens: config.openrouter.max_tokens,
            top_k: config.knowledge.top_k,
            history_max_pairs: config.assistant.history_max_pairs,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.2,
            max_tokens: 1024,
            top_k: mesa_knowledge::DEFAULT_TOP_K,
            history_max_pairs: DEFAULT_HISTORY_MAX_PAIRS,
        }
    }
}

/// The model's answer to one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Completion text, verbatim.
    pub text: String,
    /// Images of the best-ranked FAQ entry.
    pub images: ImageRefs,
}

/// Read-only collaborators shared by every session.
#[derive(Clone)]
pub struct SessionDeps {
    pub embedder: Arc<dyn EmbeddingAdapter>,
    pub provider: Arc<dyn ProviderAdapter>,
    pub index: Arc<VectorIndex>,
    pub prompt: Arc<SystemPrompt>,
    pub clock: Arc<dyn Clock>,
}

/// One conversation with the assistant.
pub struct DialogueSession {
    deps: SessionDeps,
    settings: SessionSettings,
    history: ConversationHistory,
}

impl DialogueSession {
    pub fn new(deps: SessionDeps, settings: SessionSettings) -> Self {
        let history = ConversationHistory::new(settings.history_max_pairs);
        Self {
            deps,
            settings,
            history,
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Forget every exchange so far.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Answer `user_text`.
    ///
    /// History is only extended when the completion succeeds, so a failed
    /// turn leaves the session exactly as it was.
    pub async fn respond(&mut self, user_text: &str) -> Result<Reply, MesaError> {
        let query = self.embed_query(user_text).await?;

        let retrieved = self.deps.index.query(&query, self.settings.top_k)?;
        let images = retrieved
            .first()
            .map(|record| record.image_refs.clone())
            .unwrap_or_default();
        let context = compose_context(retrieved.iter().copied());
        debug!(
            retrieved = retrieved.len(),
            context_len = context.len(),
            "grounding context composed"
        );

        let request = self.build_request(user_text, &context);
        let message_count = request.messages.len();
        let response = self.deps.provider.complete(request).await.map_err(|e| {
            MesaError::Completion {
                message: format!("completion failed: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        info!(
            model = %response.model,
            messages = message_count,
            reply_len = response.content.len(),
            "assistant replied"
        );
        self.history
            .push_exchange(user_text, response.content.as_str());

        Ok(Reply {
            text: response.content,
            images,
        })
    }

    async fn embed_query(&self, user_text: &str) -> Result<Vec<f32>, MesaError> {
        let output = self
            .deps
            .embedder
            .embed(EmbeddingInput {
                texts: vec![user_text.to_string()],
            })
            .await
            .map_err(|e| MesaError::Retrieval {
                message: format!("failed to embed query: {e}"),
                source: Some(Box::new(e)),
            })?;

        output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MesaError::Retrieval {
                message: "embedding response was empty".to_string(),
                source: None,
            })
    }

    /// System instruction, grounding, retained history, then the new turn.
    fn build_request(&self, user_text: &str, context: &str) -> CompletionRequest {
        let today = self.deps.clock.now().date();

        let mut messages = Vec::with_capacity(3 + self.history.len() * 2);
        messages.push(ConversationTurn::system(self.deps.prompt.render(today)));
        messages.push(ConversationTurn::system(grounding_message(context)));
        messages.extend(self.history.turns());
        messages.push(ConversationTurn::user(user_text));

        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mesa_core::{FixedClock, Role};
    use mesa_knowledge::EmbeddingRecord;
    use mesa_test_utils::{MockEmbedder, MockProvider};

    fn record(vector: Vec<f32>, question: &str, images: &str) -> EmbeddingRecord {
        EmbeddingRecord {
            vector,
            question: question.to_string(),
            answer: format!("{question}: sim"),
            category: "geral".to_string(),
            image_refs: ImageRefs::parse(images),
        }
    }

    fn deps(embedder: Arc<MockEmbedder>, provider: Arc<MockProvider>) -> SessionDeps {
        let index = VectorIndex::new(
            vec![
                record(vec![1.0, 0.0], "Têm estacionamento?", "parque.jpg"),
                record(vec![0.0, 1.0], "Abrem ao domingo?", "nan"),
            ],
            2,
        )
        .unwrap();
        let at = NaiveDate::from_ymd_opt(2024, 5, 20)
            .and_then(|d| d.and_hms_opt(18, 45, 0))
            .unwrap();
        SessionDeps {
            embedder,
            provider,
            index: Arc::new(index),
            prompt: Arc::new(SystemPrompt::default()),
            clock: Arc::new(FixedClock(at)),
        }
    }

    fn settings(top_k: usize, history_max_pairs: usize) -> SessionSettings {
        SessionSettings {
            top_k,
            history_max_pairs,
            ..SessionSettings::default()
        }
    }

    #[tokio::test]
    async fn respond_grounds_on_retrieved_entries() {
        let embedder = Arc::new(MockEmbedder::new(2));
        embedder.push_vector(vec![0.1, 0.9]).await;
        let provider = Arc::new(MockProvider::with_responses(vec!["Sim, abrimos.".into()]));
        let mut session = DialogueSession::new(deps(embedder, provider.clone()), settings(1, 10));

        let reply = session.respond("Estão abertos ao domingo?").await.unwrap();
        assert_eq!(reply.text, "Sim, abrimos.");
        assert!(reply.images.is_empty());

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Hoje é 2024-05-20."));
        assert_eq!(
            messages[1].content,
            "Informação do restaurante (FAQs):\n\n\
             PERGUNTA EXEMPLO (geral): Abrem ao domingo?\n\
             RESPOSTA OFICIAL: Abrem ao domingo?: sim"
        );
        assert_eq!(messages[2], ConversationTurn::user("Estão abertos ao domingo?"));
        assert!((requests[0].temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn images_come_from_top_record() {
        let embedder = Arc::new(MockEmbedder::new(2));
        embedder.push_vector(vec![1.0, 0.0]).await;
        let provider = Arc::new(MockProvider::new());
        let mut session = DialogueSession::new(deps(embedder, provider), settings(3, 10));

        let reply = session.respond("estacionamento").await.unwrap();
        assert_eq!(reply.images.names(), ["parque.jpg".to_string()]);
    }

    #[tokio::test]
    async fn history_is_replayed_in_order() {
        let embedder = Arc::new(MockEmbedder::new(2));
        let provider = Arc::new(MockProvider::with_responses(vec![
            "Olá!".into(),
            "Para quantas pessoas?".into(),
        ]));
        let mut session = DialogueSession::new(deps(embedder, provider.clone()), settings(3, 10));

        session.respond("Bom dia").await.unwrap();
        session.respond("Quero reservar").await.unwrap();

        let requests = provider.requests().await;
        let second = &requests[1].messages;
        assert_eq!(second.len(), 5);
        assert_eq!(second[2], ConversationTurn::user("Bom dia"));
        assert_eq!(second[3], ConversationTurn::assistant("Olá!"));
        assert_eq!(second[4], ConversationTurn::user("Quero reservar"));
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn embedding_failure_is_retrieval_error() {
        let embedder = Arc::new(MockEmbedder::new(2));
        embedder.fail_next("quota exceeded").await;
        let provider = Arc::new(MockProvider::new());
        let mut session = DialogueSession::new(deps(embedder, provider.clone()), settings(3, 10));

        let err = session.respond("olá").await.unwrap_err();
        assert!(matches!(err, MesaError::Retrieval { .. }), "got: {err}");
        assert!(provider.requests().await.is_empty());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn completion_failure_leaves_history_untouched() {
        let embedder = Arc::new(MockEmbedder::new(2));
        let provider = Arc::new(MockProvider::new());
        provider.fail_next("upstream timeout").await;
        let mut session = DialogueSession::new(deps(embedder, provider), settings(3, 10));

        let err = session.respond("olá").await.unwrap_err();
        assert!(matches!(err, MesaError::Completion { .. }), "got: {err}");
        assert!(session.history().is_empty());

        session.respond("olá outra vez").await.unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_retrieval_error() {
        let embedder = Arc::new(MockEmbedder::new(3));
        let provider = Arc::new(MockProvider::new());
        let mut session = DialogueSession::new(deps(embedder, provider), settings(3, 10));

        let err = session.respond("olá").await.unwrap_err();
        assert!(matches!(err, MesaError::Retrieval { .. }));
    }
}
