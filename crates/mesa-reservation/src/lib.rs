// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reservation handling for the Mesa assistant.
//!
//! The language model signals a completed booking by appending a
//! `[RESERVA|...]` marker to its reply. This crate scans for that marker,
//! commits the request against a per-slot table capacity, and reports the
//! outcome as customer-facing messages.

pub mod extractor;
pub mod ledger;
pub mod marker;
pub mod outcome;
pub mod store;
pub mod types;

pub use extractor::{Extraction, ReservationExtractor};
pub use ledger::{
    CapacityLedger, CommitOutcome, DEFAULT_TABLE_LIMIT, SlotSummary, TABLE_SIZE, tables_required,
};
pub use marker::{MARKER_TOKEN, MarkerError, MarkerScan};
pub use outcome::{NotificationStatus, ReservationOutcome, Severity, SystemMessage};
pub use store::{CsvReservationStore, MemoryReservationStore, ReservationStore, StoreLock};
pub use types::{ReservationRecord, ReservationRequest};
