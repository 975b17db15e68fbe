// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grounding text built from retrieved FAQ records.

use crate::types::EmbeddingRecord;

/// Separator between consecutive record blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Render one record as a question/answer block.
pub fn render_block(record: &EmbeddingRecord) -> String {
    format!(
        "PERGUNTA EXEMPLO ({}): {}\nRESPOSTA OFICIAL: {}",
        record.category, record.question, record.answer
    )
}

/// Join the retrieved records into the grounding context, in rank order.
///
/// An empty input produces an empty string.
pub fn compose_context<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a EmbeddingRecord>,
{
    records
        .into_iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
