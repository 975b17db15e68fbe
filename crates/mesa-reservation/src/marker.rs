// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scanner for the reservation marker the model appends to its reply.
//!
//! Grammar: `[RESERVA|<name>|<date:YYYY-MM-DD>|<time:HH:MM>|<partySize:int>]`.
//! Only the first marker in a reply is considered. A marker with no closing
//! `]` runs to the end of the reply.

use thiserror::Error;

use crate::types::ReservationRequest;

/// Opening token of a reservation marker.
pub const MARKER_TOKEN: &str = "[RESERVA|";

const MARKER_CLOSE: char = ']';
const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 4;

/// Why a marker body could not be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("reservation marker has {0} field(s), expected 4")]
    FieldCount(usize),

    #[error("reservation name is empty")]
    EmptyName,

    #[error("party size `{0}` is not an integer")]
    InvalidPartySize(String),

    #[error("party size must be positive, got {0}")]
    NonPositivePartySize(i64),
}

/// Result of scanning one assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerScan {
    /// No marker token; `visible` is the whole reply.
    NoMarker { visible: String },
    /// A well-formed marker; `visible` is the trimmed text before it.
    Extracted {
        visible: String,
        request: ReservationRequest,
    },
    /// A marker token with an unusable body; `visible` is the unmodified reply.
    Malformed { visible: String, error: MarkerError },
}

impl MarkerScan {
    /// Text to show the customer.
    pub fn visible(&self) -> &str {
        match self {
            Self::NoMarker { visible }
            | Self::Extracted { visible, .. }
            | Self::Malformed { visible, .. } => visible,
        }
    }
}

/// Scan `reply` for the first reservation marker.
pub fn scan(reply: &str) -> MarkerScan {
    let Some((before, after)) = reply.split_once(MARKER_TOKEN) else {
        return MarkerScan::NoMarker {
            visible: reply.to_string(),
        };
    };
    let body = after
        .split_once(MARKER_CLOSE)
        .map_or(after, |(body, _)| body);

    match parse_body(body) {
        Ok(request) => MarkerScan::Extracted {
            visible: before.trim().to_string(),
            request,
        },
        Err(error) => malformed(reply, error),
    }
}

fn malformed(reply: &str, error: MarkerError) -> MarkerScan {
    MarkerScan::Malformed {
        visible: reply.to_string(),
        error,
    }
}

fn parse_body(body: &str) -> Result<ReservationRequest, MarkerError> {
    let fields: Vec<&str> = body.split(FIELD_SEPARATOR).map(str::trim).collect();
    let &[name, date, time, party_size] = fields.as_slice() else {
        return Err(MarkerError::FieldCount(fields.len()));
    };
    debug_assert_eq!(fields.len(), FIELD_COUNT);

    if name.is_empty() {
        return Err(MarkerError::EmptyName);
    }

    let parsed: i64 = party_size
        .parse()
        .map_err(|_| MarkerError::InvalidPartySize(party_size.to_string()))?;
    if parsed <= 0 {
        return Err(MarkerError::NonPositivePartySize(parsed));
    }
    let party_size = u32::try_from(parsed)
        .map_err(|_| MarkerError::InvalidPartySize(party_size.to_string()))?;

    Ok(ReservationRequest {
        name: name.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        party_size,
    })
}
