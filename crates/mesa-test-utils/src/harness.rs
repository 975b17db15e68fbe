// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` writes FAQ artifacts into a temp directory, loads them
//! through the real artifact loader, points a CSV ledger at the same
//! directory and wires everything to mock adapters. `send_message()` drives
//! one full turn.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use mesa_agent::{
    Assistant, SessionDeps, SessionSettings, SystemPrompt, TurnOutput, TurnProcessor,
};
use mesa_config::model::{KnowledgeConfig, MesaConfig, ReservationsConfig};
use mesa_core::{FixedClock, MesaError};
use mesa_knowledge::artifacts::encode_npy;
use mesa_reservation::{CapacityLedger, ReservationExtractor};
use ndarray::Array2;
use tokio::sync::Mutex;

use crate::mock_notifier::MockNotifier;
use crate::mock_provider::{MockEmbedder, MockProvider};

/// One FAQ entry written into the harness artifacts.
#[derive(Debug, Clone)]
pub struct FaqFixture {
    pub vector: Vec<f32>,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub image: String,
}

impl FaqFixture {
    pub fn new(vector: Vec<f32>, question: &str, answer: &str, category: &str) -> Self {
        Self {
            vector,
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
            image: "nan".to_string(),
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }
}

/// A small restaurant FAQ over three orthogonal axes.
pub fn default_faqs() -> Vec<FaqFixture> {
    vec![
        FaqFixture::new(
            vec![1.0, 0.0, 0.0],
            "Qual é o horário?",
            "Abrimos de terça a domingo, das 12h às 23h.",
            "horario",
        ),
        FaqFixture::new(
            vec![0.0, 1.0, 0.0],
            "Têm pratos vegetarianos?",
            "Sim, temos várias opções vegetarianas.",
            "menu",
        )
        .with_image("risotto.jpg, salada.jpg"),
        FaqFixture::new(
            vec![0.0, 0.0, 1.0],
            "Fazem reservas?",
            "Sim, aceitamos reservas por este chat.",
            "reservas",
        ),
    ]
}

/// The instant the harness clock is pinned to.
pub fn harness_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 20)
        .and_then(|d| d.and_hms_opt(18, 45, 0))
        .unwrap_or_default()
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    faqs: Vec<FaqFixture>,
    table_limit: u32,
    notifications: bool,
    now: NaiveDateTime,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            faqs: default_faqs(),
            table_limit: mesa_reservation::DEFAULT_TABLE_LIMIT,
            notifications: false,
            now: harness_now(),
        }
    }

    /// Set mock model replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_faqs(mut self, faqs: Vec<FaqFixture>) -> Self {
        self.faqs = faqs;
        self
    }

    pub fn with_table_limit(mut self, limit: u32) -> Self {
        self.table_limit = limit;
        self
    }

    /// Wire a [`MockNotifier`] into the extractor.
    pub fn with_notifications(mut self) -> Self {
        self.notifications = true;
        self
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, MesaError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| MesaError::storage("failed to create temp dir", e))?;
        let knowledge = write_artifacts(temp_dir.path(), &self.faqs)?;
        let reservations = ReservationsConfig {
            store_path: path_string(&temp_dir.path().join("reservas.csv")),
            table_limit: self.table_limit,
        };
        let config = MesaConfig {
            knowledge,
            reservations,
            ..MesaConfig::default()
        };

        let index = mesa_knowledge::load_index(&config.knowledge)?;
        let clock = Arc::new(FixedClock(self.now));

        let ledger = Arc::new(
            CapacityLedger::from_config(&config.reservations).with_clock(clock.clone()),
        );
        let mock_notifier = self.notifications.then(|| Arc::new(MockNotifier::new()));
        let mut extractor = ReservationExtractor::new(Arc::clone(&ledger));
        if let Some(ref notifier) = mock_notifier {
            extractor = extractor.with_notifier(notifier.clone());
        }

        let mock_provider = Arc::new(MockProvider::with_responses(self.responses));
        let mock_embedder = Arc::new(MockEmbedder::new(index.dimension()));
        let deps = SessionDeps {
            embedder: mock_embedder.clone(),
            provider: mock_provider.clone(),
            index: Arc::new(index),
            prompt: Arc::new(SystemPrompt::default()),
            clock,
        };
        let assistant = Assistant::new(deps, SessionSettings::from_config(&config), extractor);
        let turn = Mutex::new(assistant.start_session());

        Ok(TestHarness {
            mock_provider,
            mock_embedder,
            mock_notifier,
            ledger,
            assistant,
            config,
            turn,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    pub mock_provider: Arc<MockProvider>,
    pub mock_embedder: Arc<MockEmbedder>,
    /// Present when built `with_notifications()`.
    pub mock_notifier: Option<Arc<MockNotifier>>,
    /// CSV-backed ledger inside the temp directory.
    pub ledger: Arc<CapacityLedger>,
    pub assistant: Assistant,
    /// Configuration with every path pointing into the temp directory.
    pub config: MesaConfig,
    turn: Mutex<TurnProcessor>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run one turn of the harness's own conversation.
    pub async fn send_message(&self, text: &str) -> Result<TurnOutput, MesaError> {
        self.turn.lock().await.process(text).await
    }

    /// Path of the reservation CSV.
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.config.reservations.store_path)
    }

    /// Raw CSV contents, or an empty string before the first commit.
    pub fn store_contents(&self) -> String {
        std::fs::read_to_string(self.store_path()).unwrap_or_default()
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Writes `models/faq_embeddings.npy` and `models/faq_metadata.json`.
fn write_artifacts(root: &Path, faqs: &[FaqFixture]) -> Result<KnowledgeConfig, MesaError> {
    let models = root.join("models");
    std::fs::create_dir_all(&models)
        .map_err(|e| MesaError::storage("failed to create models dir", e))?;

    let cols = faqs.first().map_or(0, |f| f.vector.len());
    let flat: Vec<f32> = faqs.iter().flat_map(|f| f.vector.iter().copied()).collect();
    let matrix = Array2::from_shape_vec((faqs.len(), cols), flat)
        .map_err(|e| MesaError::Internal(format!("fixture vectors are ragged: {e}")))?;

    let metadata: Vec<serde_json::Value> = faqs
        .iter()
        .map(|f| {
            serde_json::json!({
                "pergunta": f.question,
                "resposta": f.answer,
                "categoria": f.category,
                "imagem": f.image,
            })
        })
        .collect();
    let metadata = serde_json::to_vec_pretty(&metadata)
        .map_err(|e| MesaError::Internal(format!("failed to encode metadata: {e}")))?;

    let embeddings_path = models.join("faq_embeddings.npy");
    let metadata_path = models.join("faq_metadata.json");
    let embeddings = encode_npy(&matrix)
        .map_err(|e| MesaError::Internal(format!("failed to encode embeddings: {e}")))?;
    std::fs::write(&embeddings_path, embeddings)
        .map_err(|e| MesaError::storage("failed to write embeddings", e))?;
    std::fs::write(&metadata_path, metadata)
        .map_err(|e| MesaError::storage("failed to write metadata", e))?;

    Ok(KnowledgeConfig {
        embeddings_path: path_string(&embeddings_path),
        metadata_path: path_string(&metadata_path),
        images_dir: path_string(&root.join("imagens")),
        ..KnowledgeConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_loads_artifacts_through_real_loader() {
        let harness = TestHarness::builder()
            .with_mock_responses(vec!["Abrimos às 12h.".into()])
            .build()
            .await
            .unwrap();

        harness.mock_embedder.push_vector(vec![1.0, 0.0, 0.0]).await;
        let output = harness.send_message("A que horas abrem?").await.unwrap();
        assert_eq!(output.visible, "Abrimos às 12h.");

        let request = &harness.mock_provider.requests().await[0];
        assert!(request.messages[1].content.contains("PERGUNTA EXEMPLO (horario)"));
        assert!(harness.store_contents().is_empty());
    }
}
