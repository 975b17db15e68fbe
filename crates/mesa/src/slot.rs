// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mesa slot` command implementation.

use chrono::{NaiveDate, NaiveTime};
use colored::Colorize;
use mesa_config::model::MesaConfig;
use mesa_core::MesaError;
use mesa_reservation::CapacityLedger;

/// Accepts `YYYY-MM-DD` only, the format stored in the ledger.
pub fn parse_date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("`{value}` is not a date in YYYY-MM-DD form"))
}

/// Accepts `HH:MM` only, the format stored in the ledger.
pub fn parse_time(value: &str) -> Result<String, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| format!("`{value}` is not a time in HH:MM form"))
}

/// Prints how many tables a slot holds and how many remain.
pub async fn run_slot(config: &MesaConfig, date: &str, time: &str) -> Result<(), MesaError> {
    let ledger = CapacityLedger::from_config(&config.reservations);
    let summary = ledger.slot_summary(date, time).await?;

    println!("{} {date} {time}", "slot".bold());
    println!("  occupied:  {}", summary.occupied);
    let remaining = summary.remaining.to_string();
    let remaining = if summary.remaining == 0 {
        remaining.red()
    } else {
        remaining.green()
    };
    println!("  remaining: {remaining}");
    println!("  limit:     {}", summary.limit);
    Ok(())
}
