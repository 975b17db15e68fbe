// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer-facing system messages for reservation outcomes.

use strum::Display;

use crate::types::ReservationRecord;

/// How a presentation layer should render a system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
}

/// A message shown alongside the assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemMessage {
    pub severity: Severity,
    pub text: String,
}

impl SystemMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// What happened to the post-commit notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The collaborator accepted the event and returned its identifier.
    Notified(String),
    /// The collaborator failed; the reservation stays committed.
    Failed(String),
}

/// Outcome of processing a reservation marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// Committed. `notification` is `None` when no notifier is configured.
    Confirmed {
        record: ReservationRecord,
        notification: Option<NotificationStatus>,
    },
    /// The slot lacks tables. Nothing was written.
    Rejected { occupied: u32, required: u32 },
    /// The marker was unusable or the ledger failed.
    Error(String),
}

impl ReservationOutcome {
    /// Messages to display, in order.
    pub fn messages(&self) -> Vec<SystemMessage> {
        match self {
            Self::Confirmed {
                record,
                notification,
            } => {
                let mut messages = vec![SystemMessage::success(format!(
                    "Reserva confirmada em nome de {} para {} pessoas em {} às {}.",
                    record.name, record.party_size, record.date, record.time
                ))];
                match notification {
                    Some(NotificationStatus::Notified(id)) => messages.push(
                        SystemMessage::success(format!("Evento criado no calendário (ID: {id}).")),
                    ),
                    Some(NotificationStatus::Failed(err)) => {
                        messages.push(SystemMessage::warning(format!(
                            "Reserva registada, mas falhou a criação do evento no calendário: {err}"
                        )))
                    }
                    None => {}
                }
                messages
            }
            Self::Rejected { occupied, required } => vec![SystemMessage::warning(format!(
                "Lamento, mas já não existem mesas suficientes para esse horário. \
                 Mesas ocupadas: {occupied}, mesas necessárias: {required}."
            ))],
            Self::Error(err) => vec![SystemMessage::warning(format!(
                "Erro ao processar dados da reserva: {err}"
            ))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> ReservationRecord {
        ReservationRecord {
            date: "2024-07-04".to_string(),
            time: "19:30".to_string(),
            name: "João".to_string(),
            party_size: 5,
            tables_used: 2,
            recorded_at: NaiveDate::from_ymd_opt(2024, 7, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn confirmed_without_notifier() {
        let messages = ReservationOutcome::Confirmed {
            record: record(),
            notification: None,
        }
        .messages();
        assert_eq!(
            messages,
            vec![SystemMessage::success(
                "Reserva confirmada em nome de João para 5 pessoas em 2024-07-04 às 19:30."
            )]
        );
    }

    #[test]
    fn confirmed_and_notified() {
        let messages = ReservationOutcome::Confirmed {
            record: record(),
            notification: Some(NotificationStatus::Notified("evt-42".to_string())),
        }
        .messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, "Evento criado no calendário (ID: evt-42).");
        assert_eq!(messages[1].severity, Severity::Success);
    }

    #[test]
    fn notification_failure_is_a_degraded_success() {
        let messages = ReservationOutcome::Confirmed {
            record: record(),
            notification: Some(NotificationStatus::Failed("timeout".to_string())),
        }
        .messages();
        assert_eq!(messages[0].severity, Severity::Success);
        assert_eq!(messages[1].severity, Severity::Warning);
        assert_eq!(
            messages[1].text,
            "Reserva registada, mas falhou a criação do evento no calendário: timeout"
        );
    }

    #[test]
    fn rejection_reports_tables() {
        let messages = ReservationOutcome::Rejected {
            occupied: 14,
            required: 2,
        }
        .messages();
        assert_eq!(
            messages[0].text,
            "Lamento, mas já não existem mesas suficientes para esse horário. \
             Mesas ocupadas: 14, mesas necessárias: 2."
        );
        assert_eq!(messages[0].severity, Severity::Warning);
    }

    #[test]
    fn error_prefix() {
        let messages = ReservationOutcome::Error("party size `x` is not an integer".into()).messages();
        assert_eq!(
            messages[0].text,
            "Erro ao processar dados da reserva: party size `x` is not an integer"
        );
    }

    #[test]
    fn severity_displays_lowercase() {
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
