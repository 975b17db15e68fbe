// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded conversation history.

use std::collections::VecDeque;

use mesa_core::ConversationTurn;

/// Default number of user/assistant pairs kept per session.
pub const DEFAULT_HISTORY_MAX_PAIRS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Exchange {
    user: String,
    assistant: String,
}

/// Completed exchanges of one session, oldest first.
///
/// Only whole pairs are stored, so the replayed history always alternates
/// user and assistant turns.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    exchanges: VecDeque<Exchange>,
    max_pairs: usize,
}

impl ConversationHistory {
    /// `max_pairs == 0` keeps everything.
    pub fn new(max_pairs: usize) -> Self {
        Self {
            exchanges: VecDeque::new(),
            max_pairs,
        }
    }

    pub fn max_pairs(&self) -> usize {
        self.max_pairs
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Records a completed exchange, dropping the oldest pairs past the cap.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.exchanges.push_back(Exchange {
            user: user.into(),
            assistant: assistant.into(),
        });
        if self.max_pairs > 0 {
            while self.exchanges.len() > self.max_pairs {
                self.exchanges.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    /// The stored exchanges as alternating turns.
    pub fn turns(&self) -> impl Iterator<Item = ConversationTurn> + '_ {
        self.exchanges.iter().flat_map(|exchange| {
            [
                ConversationTurn::user(exchange.user.clone()),
                ConversationTurn::assistant(exchange.assistant.clone()),
            ]
        })
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_MAX_PAIRS)
    }
}
