// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-commit notification collaborator (calendar-style event creation).

use async_trait::async_trait;

use crate::error::MesaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ReservationEvent;

/// Receives committed reservations and creates an external event for each.
///
/// Called only after the reservation is durable. A failure here is reported
/// to the user as a degraded success and never rolls back the commit.
#[async_trait]
pub trait ReservationNotifier: PluginAdapter {
    /// Publishes the event and returns the external identifier.
    async fn notify(&self, event: &ReservationEvent) -> Result<String, MesaError>;
}
