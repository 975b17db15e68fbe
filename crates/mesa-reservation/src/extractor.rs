// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns an assistant reply into visible text plus a reservation outcome.

use std::sync::Arc;

use mesa_core::ReservationNotifier;
use tracing::{info, warn};

use crate::ledger::{CapacityLedger, CommitOutcome};
use crate::marker::{self, MarkerScan};
use crate::outcome::{NotificationStatus, ReservationOutcome};
use crate::types::ReservationRecord;

/// A reply after marker processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Text to show the customer.
    pub visible: String,
    /// `None` when the reply carried no marker.
    pub outcome: Option<ReservationOutcome>,
}

/// Scans replies for reservation markers and commits them to the ledger.
pub struct ReservationExtractor {
    ledger: Arc<CapacityLedger>,
    notifier: Option<Arc<dyn ReservationNotifier>>,
}

impl ReservationExtractor {
    pub fn new(ledger: Arc<CapacityLedger>) -> Self {
        Self {
            ledger,
            notifier: None,
        }
    }

    /// Notify an external collaborator after each successful commit.
    pub fn with_notifier(mut self, notifier: Arc<dyn ReservationNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn ledger(&self) -> &Arc<CapacityLedger> {
        &self.ledger
    }

    /// Process one reply. Never fails: every problem becomes an outcome.
    pub async fn process(&self, reply: &str) -> Extraction {
        match marker::scan(reply) {
            MarkerScan::NoMarker { visible } => Extraction {
                visible,
                outcome: None,
            },
            MarkerScan::Malformed { visible, error } => {
                warn!(error = %error, "malformed reservation marker");
                Extraction {
                    visible,
                    outcome: Some(ReservationOutcome::Error(error.to_string())),
                }
            }
            MarkerScan::Extracted { visible, request } => {
                let (visible, outcome) = match self.ledger.try_commit(&request).await {
                    Ok(CommitOutcome::Committed(record)) => {
                        let notification = self.notify(&record).await;
                        let outcome = ReservationOutcome::Confirmed {
                            record,
                            notification,
                        };
                        (visible, outcome)
                    }
                    Ok(CommitOutcome::Rejected { occupied, required }) => {
                        (visible, ReservationOutcome::Rejected { occupied, required })
                    }
                    // The customer sees the whole reply when the booking could not be recorded.
                    Err(e) => {
                        warn!(error = %e, "reservation commit failed");
                        (reply.to_string(), ReservationOutcome::Error(e.to_string()))
                    }
                };
                Extraction {
                    visible,
                    outcome: Some(outcome),
                }
            }
        }
    }

    async fn notify(&self, record: &ReservationRecord) -> Option<NotificationStatus> {
        let notifier = self.notifier.as_ref()?;
        Some(match notifier.notify(&record.event()).await {
            Ok(id) => {
                info!(event_id = %id, notifier = notifier.name(), "reservation notified");
                NotificationStatus::Notified(id)
            }
            Err(e) => {
                warn!(error = %e, notifier = notifier.name(), "reservation notification failed");
                NotificationStatus::Failed(e.to_string())
            }
        })
    }
}
