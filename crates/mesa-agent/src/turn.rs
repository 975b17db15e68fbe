// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One customer turn, end to end.
//!
//! [`TurnProcessor`] asks the [`DialogueSession`] for a reply, then hands the
//! reply to the [`ReservationExtractor`]. The session history keeps the raw
//! reply (marker included); the customer sees only the visible text and the
//! system messages.

use std::sync::Arc;

use mesa_core::MesaError;
use mesa_knowledge::ImageRefs;
use mesa_reservation::{CapacityLedger, ReservationExtractor, ReservationOutcome, SystemMessage};
use tracing::debug;

use crate::session::{DialogueSession, SessionDeps, SessionSettings};

/// Everything a presentation layer needs to render one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutput {
    /// Reply text with any reservation marker stripped.
    pub visible: String,
    pub images: ImageRefs,
    /// `None` when the reply carried no marker.
    pub outcome: Option<ReservationOutcome>,
    /// Messages derived from `outcome`, in display order.
    pub messages: Vec<SystemMessage>,
}

/// A dialogue session wired to the reservation ledger.
pub struct TurnProcessor {
    session: DialogueSession,
    extractor: Arc<ReservationExtractor>,
}

impl TurnProcessor {
    pub fn new(session: DialogueSession, extractor: Arc<ReservationExtractor>) -> Self {
        Self { session, extractor }
    }

    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DialogueSession {
        &mut self.session
    }

    /// Runs one turn.
    ///
    /// Errors only when no reply could be produced. Reservation problems are
    /// reported through [`TurnOutput::messages`].
    pub async fn process(&mut self, user_text: &str) -> Result<TurnOutput, MesaError> {
        let reply = self.session.respond(user_text).await?;
        let extraction = self.extractor.process(&reply.text).await;

        let messages = extraction
            .outcome
            .as_ref()
            .map(ReservationOutcome::messages)
            .unwrap_or_default();
        debug!(
            has_outcome = extraction.outcome.is_some(),
            messages = messages.len(),
            "turn processed"
        );

        Ok(TurnOutput {
            visible: extraction.visible,
            images: reply.images,
            outcome: extraction.outcome,
            messages,
        })
    }
}

/// Shared services from which conversations are started.
///
/// The index, prompt and ledger are shared by every session; each session
/// owns its history.
#[derive(Clone)]
pub struct Assistant {
    deps: SessionDeps,
    settings: SessionSettings,
    extractor: Arc<ReservationExtractor>,
}

impl Assistant {
    pub fn new(
        deps: SessionDeps,
        settings: SessionSettings,
        extractor: ReservationExtractor,
    ) -> Self {
        Self {
            deps,
            settings,
            extractor: Arc::new(extractor),
        }
    }

    /// Start a fresh conversation.
    pub fn start_session(&self) -> TurnProcessor {
        TurnProcessor::new(
            DialogueSession::new(self.deps.clone(), self.settings.clone()),
            Arc::clone(&self.extractor),
        )
    }

    pub fn ledger(&self) -> &Arc<CapacityLedger> {
        self.extractor.ledger()
    }

    pub fn deps(&self) -> &SessionDeps {
        &self.deps
    }
}
