// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory cosine-similarity index over the FAQ embeddings.

use std::path::Path;

use mesa_core::MesaError;
use tracing::debug;

use crate::artifacts;
use crate::types::{EmbeddingRecord, ScoredRecord, cosine_similarity};

/// Number of records returned when the caller does not ask otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// Immutable collection of FAQ records searchable by cosine similarity.
///
/// Built once at startup and shared read-only; queries never mutate it.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    records: Vec<EmbeddingRecord>,
    dimension: usize,
}

impl VectorIndex {
    /// Build an index from records that all share `dimension`.
    pub fn new(records: Vec<EmbeddingRecord>, dimension: usize) -> Result<Self, MesaError> {
        if let Some((row, bad)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.vector.len() != dimension)
        {
            return Err(MesaError::Internal(format!(
                "record {row} has dimension {}, index expects {dimension}",
                bad.vector.len()
            )));
        }
        Ok(Self { records, dimension })
    }

    /// Load the `.npy` matrix and JSON metadata written by the offline job.
    pub fn load(embeddings_path: &Path, metadata_path: &Path) -> Result<Self, MesaError> {
        let (records, dimension) = artifacts::load_records(embeddings_path, metadata_path)?;
        Self::new(records, dimension)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn records(&self) -> &[EmbeddingRecord] {
        &self.records
    }

    /// The `min(k, len)` records most similar to `vector`, best first.
    ///
    /// Ties keep their load order.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<&EmbeddingRecord>, MesaError> {
        Ok(self
            .query_scored(vector, k)?
            .into_iter()
            .map(|scored| scored.record)
            .collect())
    }

    /// Like [`query`](Self::query) but keeps the similarity scores.
    pub fn query_scored(
        &self,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredRecord<'_>>, MesaError> {
        if vector.len() != self.dimension {
            return Err(MesaError::Retrieval {
                message: format!(
                    "query vector has dimension {}, index expects {}",
                    vector.len(),
                    self.dimension
                ),
                source: None,
            });
        }

        let mut scored: Vec<ScoredRecord<'_>> = self
            .records
            .iter()
            .map(|record| ScoredRecord {
                record,
                score: cosine_similarity(vector, &record.vector),
            })
            .collect();

        // Stable sort so equal scores stay in load order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        debug!(
            candidates = self.records.len(),
            returned = scored.len(),
            top_score = scored.first().map(|s| s.score),
            "vector index queried"
        );
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageRefs;

    fn record(vector: Vec<f32>, question: &str) -> EmbeddingRecord {
        EmbeddingRecord {
            vector,
            question: question.to_string(),
            answer: format!("resposta para {question}"),
            category: "geral".to_string(),
            image_refs: ImageRefs::default(),
        }
    }

    fn sample_index() -> VectorIndex {
        VectorIndex::new(
            vec![
                record(vec![1.0, 0.0, 0.0], "horario"),
                record(vec![0.0, 1.0, 0.0], "menu"),
                record(vec![0.7, 0.7, 0.0], "misto"),
                record(vec![0.0, 0.0, 1.0], "estacionamento"),
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn query_ranks_by_cosine_similarity() {
        let index = sample_index();
        let hits = index.query(&[1.0, 0.1, 0.0], 3).unwrap();
        let questions: Vec<&str> = hits.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["horario", "misto", "menu"]);
    }

    #[test]
    fn query_returns_min_of_k_and_len() {
        let index = sample_index();
        assert_eq!(index.query(&[1.0, 0.0, 0.0], 10).unwrap().len(), 4);
        assert_eq!(index.query(&[1.0, 0.0, 0.0], 0).unwrap().len(), 0);
        assert_eq!(
            index.query(&[1.0, 0.0, 0.0], DEFAULT_TOP_K).unwrap().len(),
            3
        );
    }

    #[test]
    fn ties_keep_load_order() {
        let index = VectorIndex::new(
            vec![
                record(vec![0.0, 1.0], "first"),
                record(vec![0.0, 2.0], "second"),
                record(vec![0.0, 3.0], "third"),
            ],
            2,
        )
        .unwrap();
        let hits = index.query(&[0.0, 1.0], 3).unwrap();
        let questions: Vec<&str> = hits.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["first", "second", "third"]);
    }

    #[test]
    fn zero_query_vector_scores_zero_everywhere() {
        let index = sample_index();
        let scored = index.query_scored(&[0.0, 0.0, 0.0], 4).unwrap();
        assert!(scored.iter().all(|s| s.score == 0.0));
        assert_eq!(scored[0].record.question, "horario");
    }

    #[test]
    fn dimension_mismatch_is_a_retrieval_error() {
        let index = sample_index();
        let err = index.query(&[1.0, 0.0], 3).unwrap_err();
        assert!(matches!(err, MesaError::Retrieval { .. }));
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = VectorIndex::new(Vec::new(), 3).unwrap();
        assert!(index.is_empty());
        assert!(index.query(&[1.0, 0.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn inconsistent_records_are_rejected() {
        let err = VectorIndex::new(vec![record(vec![1.0], "a")], 2).unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }
}
