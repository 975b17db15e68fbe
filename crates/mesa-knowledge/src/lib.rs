// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base for the Mesa assistant.
//!
//! Loads the FAQ embedding artifacts produced offline, answers top-k
//! cosine-similarity queries over them, and renders the retrieved entries
//! into the grounding context handed to the language model.

pub mod artifacts;
pub mod compose;
pub mod index;
pub mod types;

use std::path::Path;

use mesa_config::model::KnowledgeConfig;
use mesa_core::MesaError;

pub use compose::compose_context;
pub use index::{DEFAULT_TOP_K, VectorIndex};
pub use types::{EmbeddingRecord, FaqMetadata, ImageRefs, ScoredRecord, cosine_similarity};

/// Load the vector index from the paths in `[knowledge]`.
pub fn load_index(config: &KnowledgeConfig) -> Result<VectorIndex, MesaError> {
    VectorIndex::load(
        Path::new(&config.embeddings_path),
        Path::new(&config.metadata_path),
    )
}
