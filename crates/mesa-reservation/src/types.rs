// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reservation request and ledger record types.

use chrono::NaiveDateTime;
use mesa_core::types::ReservationEvent;

/// Format of the registration timestamp stored with each record.
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A reservation the assistant collected from the customer.
///
/// Built only by the marker scanner, which guarantees a non-empty name and a
/// positive party size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub party_size: u32,
}

/// One committed row of the reservation ledger. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRecord {
    pub date: String,
    pub time: String,
    pub name: String,
    pub party_size: u32,
    pub tables_used: u32,
    pub recorded_at: NaiveDateTime,
}

impl ReservationRecord {
    /// Whether this record occupies the given slot. Exact string match.
    pub fn is_in_slot(&self, date: &str, time: &str) -> bool {
        self.date == date && self.time == time
    }

    /// The payload handed to the post-commit notifier.
    pub fn event(&self) -> ReservationEvent {
        ReservationEvent {
            name: self.name.clone(),
            party_size: self.party_size,
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

/// Sum of tables held by `records` in one slot, saturating at `u32::MAX`.
pub fn slot_occupancy<'a, I>(records: I, date: &str, time: &str) -> u32
where
    I: IntoIterator<Item = &'a ReservationRecord>,
{
    records
        .into_iter()
        .filter(|r| r.is_in_slot(date, time))
        .map(|r| r.tables_used)
        .fold(0, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, time: &str, tables: u32) -> ReservationRecord {
        ReservationRecord {
            date: date.to_string(),
            time: time.to_string(),
            name: "Ana".to_string(),
            party_size: tables * 4,
            tables_used: tables,
            recorded_at: NaiveDate::from_ymd_opt(2024, 5, 20)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn occupancy_uses_exact_slot_match() {
        let records = vec![
            record("2024-06-01", "20:00", 2),
            record("2024-06-01", "20:00", 3),
            record("2024-06-01", "20:30", 4),
            record("2024-06-02", "20:00", 1),
            record("2024-06-01", "20:00:00", 5),
        ];
        assert_eq!(slot_occupancy(&records, "2024-06-01", "20:00"), 5);
        assert_eq!(slot_occupancy(&records, "2024-06-03", "20:00"), 0);
    }

    #[test]
    fn occupancy_saturates_instead_of_wrapping() {
        let mut huge = record("2024-06-01", "20:00", 1);
        huge.tables_used = 4_000_000_000;
        let records = vec![huge.clone(), huge];
        assert_eq!(slot_occupancy(&records, "2024-06-01", "20:00"), u32::MAX);
    }

    #[test]
    fn event_carries_request_fields() {
        let event = record("2024-06-01", "20:00", 2).event();
        assert_eq!(event.name, "Ana");
        assert_eq!(event.party_size, 8);
        assert_eq!(event.date, "2024-06-01");
        assert_eq!(event.time, "20:00");
    }
}
