// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the production [`Assistant`] from configuration.

use std::sync::Arc;

use mesa_agent::{Assistant, SessionDeps, SessionSettings, SystemPrompt};
use mesa_calendar::WebhookNotifier;
use mesa_config::model::MesaConfig;
use mesa_core::{MesaError, SystemClock};
use mesa_openrouter::OpenRouterProvider;
use mesa_reservation::{CapacityLedger, ReservationExtractor};
use tracing::info;

/// Loads artifacts and connects every adapter named in `config`.
///
/// Fails fast on a missing API key or unreadable artifacts.
pub async fn build_assistant(config: &MesaConfig) -> Result<Assistant, MesaError> {
    let index = mesa_knowledge::load_index(&config.knowledge)?;
    info!(
        records = index.len(),
        dimension = index.dimension(),
        "FAQ index loaded"
    );

    let openrouter = Arc::new(OpenRouterProvider::new(&config.openrouter)?);
    let prompt = SystemPrompt::from_config(&config.assistant).await?;
    let clock = Arc::new(SystemClock);

    let ledger = CapacityLedger::from_config(&config.reservations).with_clock(clock.clone());
    let mut extractor = ReservationExtractor::new(Arc::new(ledger));
    if let Some(notifier) = WebhookNotifier::from_config(&config.notifications)? {
        info!(timezone = %config.notifications.timezone, "calendar notifications enabled");
        extractor = extractor.with_notifier(Arc::new(notifier));
    }

    let deps = SessionDeps {
        embedder: openrouter.clone(),
        provider: openrouter,
        index: Arc::new(index),
        prompt: Arc::new(prompt),
        clock,
    };
    Ok(Assistant::new(
        deps,
        SessionSettings::from_config(config),
        extractor,
    ))
}
