// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base domain types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One FAQ entry as written by the offline embedding job.
///
/// Every field was stringified by the job, so absent values may arrive as
/// `""`, `"nan"`, or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqMetadata {
    #[serde(default)]
    pub pergunta: Option<String>,
    #[serde(default)]
    pub resposta: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub imagem: Option<String>,
}

/// Image names attached to an FAQ entry.
///
/// Resolved once when metadata is loaded: blank values and the literal
/// `nan` become an empty list, so nothing downstream re-checks them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRefs(Vec<String>);

impl ImageRefs {
    /// Parse the comma-separated `imagem` column.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return Self::default();
        }
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Each name as-is when it already points at a file, otherwise joined
    /// onto `images_dir`.
    pub fn resolve(&self, images_dir: &Path) -> Vec<PathBuf> {
        self.0
            .iter()
            .map(|name| {
                let direct = PathBuf::from(name);
                if direct.exists() {
                    direct
                } else {
                    images_dir.join(name)
                }
            })
            .collect()
    }
}

impl fmt::Display for ImageRefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// An FAQ entry paired with its embedding vector. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    pub vector: Vec<f32>,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub image_refs: ImageRefs,
}

impl EmbeddingRecord {
    pub fn from_metadata(vector: Vec<f32>, meta: FaqMetadata) -> Self {
        Self {
            vector,
            question: meta.pergunta.unwrap_or_default(),
            answer: meta.resposta.unwrap_or_default(),
            category: meta.categoria.unwrap_or_default(),
            image_refs: ImageRefs::parse(meta.imagem.as_deref().unwrap_or_default()),
        }
    }
}

/// A record together with its similarity to the query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredRecord<'a> {
    pub record: &'a EmbeddingRecord,
    pub score: f32,
}

/// Cosine similarity of two equal-length vectors.
///
/// Defined as `0.0` when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (dot / denom) as f32
}
