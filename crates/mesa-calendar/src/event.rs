// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar event payload built from a committed reservation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use mesa_core::MesaError;
use mesa_core::types::ReservationEvent;
use serde::Serialize;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Start or end of an event, in the restaurant's local zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: String,
    pub time_zone: String,
}

/// JSON body posted to the calendar webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
}

impl CalendarEvent {
    /// Build the event for a reservation lasting `duration_minutes`.
    pub fn from_reservation(
        reservation: &ReservationEvent,
        time_zone: &str,
        duration_minutes: u32,
    ) -> Result<Self, MesaError> {
        let start = slot_start(&reservation.date, &reservation.time)?;
        let end = start + Duration::minutes(i64::from(duration_minutes));
        let at = |instant: NaiveDateTime| EventTime {
            date_time: instant.format(DATE_TIME_FORMAT).to_string(),
            time_zone: time_zone.to_string(),
        };

        Ok(Self {
            summary: format!("Reserva {}p - {}", reservation.party_size, reservation.name),
            description: format!(
                "Reserva para {} pessoas em nome de {}.",
                reservation.party_size, reservation.name
            ),
            start: at(start),
            end: at(end),
        })
    }
}

fn slot_start(date: &str, time: &str) -> Result<NaiveDateTime, MesaError> {
    let invalid = |what: &str, value: &str, e: chrono::ParseError| MesaError::Notification {
        message: format!("invalid reservation {what} `{value}`: {e}"),
        source: None,
    };
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| invalid("date", date, e))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|e| invalid("time", time, e))?;
    Ok(date.and_time(time))
}
