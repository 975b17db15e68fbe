// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capacity-aware reservation ledger.
//!
//! Every slot (`date`, `time`) has `table_limit` tables of [`TABLE_SIZE`]
//! seats. A commit reads the slot's occupancy and appends a record only if
//! the request still fits, with both steps inside one critical section so
//! concurrent commits cannot overbook a slot.

use std::sync::Arc;

use mesa_config::model::ReservationsConfig;
use mesa_core::{Clock, MesaError, SystemClock};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::store::{CsvReservationStore, ReservationStore};
use crate::types::{ReservationRecord, ReservationRequest};

/// Seats per table.
pub const TABLE_SIZE: u32 = 4;

/// Tables available per slot when not configured.
pub const DEFAULT_TABLE_LIMIT: u32 = 15;

/// Tables needed to seat `party_size` people.
pub fn tables_required(party_size: u32) -> u32 {
    party_size.div_ceil(TABLE_SIZE)
}

/// Result of a commit attempt. Rejection is a business outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(ReservationRecord),
    Rejected { occupied: u32, required: u32 },
}

/// Capacity snapshot of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSummary {
    pub occupied: u32,
    pub remaining: u32,
    pub limit: u32,
}

/// The reservation ledger: a store plus the capacity rule.
pub struct CapacityLedger {
    store: Arc<dyn ReservationStore>,
    table_limit: u32,
    clock: Arc<dyn Clock>,
    /// Serialises commits made through this ledger.
    commit_guard: Mutex<()>,
}

impl CapacityLedger {
    pub fn new(store: Arc<dyn ReservationStore>, table_limit: u32) -> Self {
        Self {
            store,
            table_limit,
            clock: Arc::new(SystemClock),
            commit_guard: Mutex::new(()),
        }
    }

    /// Ledger over the CSV file named in `[reservations]`.
    pub fn from_config(config: &ReservationsConfig) -> Self {
        Self::new(
            Arc::new(CsvReservationStore::new(&config.store_path)),
            config.table_limit,
        )
    }

    /// Replace the clock used for `recorded_at`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn table_limit(&self) -> u32 {
        self.table_limit
    }

    /// Tables currently held in a slot.
    pub async fn occupancy(&self, date: &str, time: &str) -> Result<u32, MesaError> {
        self.store.occupancy(date, time).await
    }

    /// Every committed record, in append order.
    pub async fn records(&self) -> Result<Vec<ReservationRecord>, MesaError> {
        self.store.records().await
    }

    pub async fn slot_summary(&self, date: &str, time: &str) -> Result<SlotSummary, MesaError> {
        let occupied = self.occupancy(date, time).await?;
        Ok(SlotSummary {
            occupied,
            remaining: self.table_limit.saturating_sub(occupied),
            limit: self.table_limit,
        })
    }

    /// Commit `request` if its slot still has room.
    ///
    /// The occupancy read and the append happen under both the in-process
    /// guard and the store's exclusive lock.
    pub async fn try_commit(
        &self,
        request: &ReservationRequest,
    ) -> Result<CommitOutcome, MesaError> {
        let required = tables_required(request.party_size);

        let _guard = self.commit_guard.lock().await;
        let _store_lock = self.store.lock().await?;

        let occupied = self.store.occupancy(&request.date, &request.time).await?;
        if occupied.saturating_add(required) > self.table_limit {
            debug!(
                date = %request.date,
                time = %request.time,
                occupied,
                required,
                limit = self.table_limit,
                "reservation rejected: slot full"
            );
            return Ok(CommitOutcome::Rejected { occupied, required });
        }

        let record = ReservationRecord {
            date: request.date.clone(),
            time: request.time.clone(),
            name: request.name.clone(),
            party_size: request.party_size,
            tables_used: required,
            recorded_at: self.clock.now(),
        };
        self.store.append(&record).await?;

        info!(
            date = %record.date,
            time = %record.time,
            party_size = record.party_size,
            tables_used = record.tables_used,
            occupied = occupied + required,
            "reservation committed"
        );
        Ok(CommitOutcome::Committed(record))
    }
}
