// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for similarity and ranking.

use mesa_knowledge::{EmbeddingRecord, ImageRefs, VectorIndex, cosine_similarity};
use proptest::prelude::*;

const DIM: usize = 4;

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0_f32..10.0, DIM)
}

fn index_of(vectors: Vec<Vec<f32>>) -> VectorIndex {
    let records = vectors
        .into_iter()
        .enumerate()
        .map(|(i, vector)| EmbeddingRecord {
            vector,
            question: format!("q{i}"),
            answer: format!("a{i}"),
            category: "geral".to_string(),
            image_refs: ImageRefs::default(),
        })
        .collect();
    VectorIndex::new(records, DIM).unwrap()
}

proptest! {
    #[test]
    fn similarity_is_symmetric_and_bounded(a in vector(), b in vector()) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-5);
        prop_assert!((-1.0001..=1.0001).contains(&ab));
    }

    #[test]
    fn smaller_k_is_a_prefix(
        vectors in prop::collection::vec(vector(), 0..20),
        query in vector(),
        k in 0usize..25,
        extra in 0usize..5,
    ) {
        let index = index_of(vectors);
        let small: Vec<String> = index
            .query(&query, k)
            .unwrap()
            .iter()
            .map(|r| r.question.clone())
            .collect();
        let large: Vec<String> = index
            .query(&query, k + extra)
            .unwrap()
            .iter()
            .map(|r| r.question.clone())
            .collect();

        prop_assert_eq!(small.len(), k.min(index.len()));
        prop_assert_eq!(&large[..small.len()], &small[..]);
    }

    #[test]
    fn scores_are_non_increasing(
        vectors in prop::collection::vec(vector(), 1..20),
        query in vector(),
    ) {
        let index = index_of(vectors);
        let scored = index.query_scored(&query, index.len()).unwrap();
        for pair in scored.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
