// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock reservation notifier with event capture.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mesa_core::types::ReservationEvent;
use mesa_core::{AdapterType, HealthStatus, MesaError, PluginAdapter, ReservationNotifier};

/// Records every event it is asked to publish.
///
/// Returns queued ids first, then generated `mock-evt-N` ids. A queued
/// failure makes the next call fail.
pub struct MockNotifier {
    ids: Arc<Mutex<VecDeque<Result<String, String>>>>,
    events: Arc<Mutex<Vec<ReservationEvent>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::with_ids(Vec::new())
    }

    pub fn with_ids(ids: Vec<String>) -> Self {
        Self {
            ids: Arc::new(Mutex::new(ids.into_iter().map(Ok).collect())),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn fail_next(&self, message: &str) {
        self.ids.lock().await.push_back(Err(message.to_string()));
    }

    /// Events received so far, failed calls included.
    pub async fn events(&self) -> Vec<ReservationEvent> {
        self.events.lock().await.clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
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
impl ReservationNotifier for MockNotifier {
    async fn notify(&self, event: &ReservationEvent) -> Result<String, MesaError> {
        let count = {
            let mut events = self.events.lock().await;
            events.push(event.clone());
            events.len()
        };

        match self.ids.lock().await.pop_front() {
            Some(Ok(id)) => Ok(id),
            Some(Err(message)) => Err(MesaError::Notification {
                message,
                source: None,
            }),
            None => Ok(format!("mock-evt-{count}")),
        }
    }
}
