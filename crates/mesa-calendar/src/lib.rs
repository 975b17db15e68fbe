// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar notification for committed reservations.
//!
//! [`WebhookNotifier`] turns each committed reservation into a
//! calendar-style event and POSTs it to a configured webhook (for example a
//! small bridge in front of a Google Calendar account). The webhook answers
//! with the created event's `id`.

pub mod event;

use std::time::Duration;

use async_trait::async_trait;
use mesa_config::model::NotificationsConfig;
use mesa_core::types::ReservationEvent;
use mesa_core::{AdapterType, HealthStatus, MesaError, PluginAdapter, ReservationNotifier};
use serde::Deserialize;
use tracing::debug;

pub use event::{CalendarEvent, EventTime};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct WebhookResponse {
    id: Option<serde_json::Value>,
}

/// Posts reservation events to a calendar webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
    time_zone: String,
    duration_minutes: u32,
}

impl WebhookNotifier {
    pub fn new(
        webhook_url: impl Into<String>,
        time_zone: impl Into<String>,
        duration_minutes: u32,
    ) -> Result<Self, MesaError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MesaError::Notification {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
            time_zone: time_zone.into(),
            duration_minutes,
        })
    }

    /// The notifier described by `[notifications]`, or `None` when disabled.
    pub fn from_config(config: &NotificationsConfig) -> Result<Option<Self>, MesaError> {
        if !config.enabled {
            return Ok(None);
        }
        let url = config.webhook_url.as_deref().ok_or_else(|| {
            MesaError::Config(
                "notifications.webhook_url is required when notifications are enabled".into(),
            )
        })?;
        Self::new(url, config.timezone.clone(), config.duration_minutes).map(Some)
    }

    fn failure(message: String, source: Option<reqwest::Error>) -> MesaError {
        MesaError::Notification {
            message,
            source: source.map(Into::into),
        }
    }
}

#[async_trait]
impl PluginAdapter for WebhookNotifier {
    fn name(&self) -> &str {
        "calendar-webhook"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, MesaError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ReservationNotifier for WebhookNotifier {
    async fn notify(&self, reservation: &ReservationEvent) -> Result<String, MesaError> {
        let event =
            CalendarEvent::from_reservation(reservation, &self.time_zone, self.duration_minutes)?;

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&event)
            .send()
            .await
            .map_err(|e| Self::failure(format!("webhook request failed: {e}"), Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::failure(
                format!("webhook returned {status}: {body}"),
                None,
            ));
        }

        let body: WebhookResponse = response
            .json()
            .await
            .map_err(|e| Self::failure(format!("invalid webhook response: {e}"), Some(e)))?;

        let id = match body.id {
            Some(serde_json::Value::String(id)) if !id.is_empty() => id,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => {
                return Err(Self::failure(
                    "webhook response has no event id".to_string(),
                    None,
                ));
            }
        };

        debug!(event_id = %id, summary = %event.summary, "calendar event created");
        Ok(id)
    }
}
