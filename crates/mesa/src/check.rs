// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mesa check` command implementation.
//!
//! Loads the same artifacts the shell would and reports what it found,
//! without calling the model.

use colored::Colorize;
use mesa_config::model::MesaConfig;
use mesa_core::MesaError;
use mesa_reservation::CapacityLedger;

pub async fn run_check(config: &MesaConfig) -> Result<(), MesaError> {
    println!("{}", "mesa check".bold());
    println!("  config: {}", "ok".green());

    let index = mesa_knowledge::load_index(&config.knowledge)?;
    println!(
        "  faq index: {} records, dimension {}",
        index.len(),
        index.dimension()
    );

    let ledger = CapacityLedger::from_config(&config.reservations);
    let records = ledger.records().await?;
    println!(
        "  ledger: {} ({} reservations, {} tables per slot)",
        config.reservations.store_path,
        records.len(),
        ledger.table_limit()
    );

    match config.openrouter.require_api_key() {
        Ok(_) => println!("  openrouter: {} ({})", "key set".green(), config.openrouter.chat_model),
        Err(_) => println!(
            "  openrouter: {} (set OPENROUTER_API_KEY or openrouter.api_key)",
            "no API key".yellow()
        ),
    }

    if config.notifications.enabled {
        println!(
            "  notifications: webhook {}",
            config.notifications.webhook_url.as_deref().unwrap_or_default()
        );
    } else {
        println!("  notifications: {}", "disabled".dimmed());
    }
    Ok(())
}
