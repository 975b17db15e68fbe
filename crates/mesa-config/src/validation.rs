// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::MesaConfig;

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &MesaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let temperature = config.assistant.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        fail(format!(
            "assistant.temperature must be between 0.0 and 2.0, got {temperature}"
        ));
    }

    if config.knowledge.top_k == 0 {
        fail("knowledge.top_k must be at least 1".to_string());
    }

    for (key, value) in [
        ("knowledge.embeddings_path", &config.knowledge.embeddings_path),
        ("knowledge.metadata_path", &config.knowledge.metadata_path),
        ("reservations.store_path", &config.reservations.store_path),
        ("openrouter.base_url", &config.openrouter.base_url),
        ("openrouter.chat_model", &config.openrouter.chat_model),
        ("openrouter.embedding_model", &config.openrouter.embedding_model),
    ] {
        if value.trim().is_empty() {
            fail(format!("{key} must not be empty"));
        }
    }

    if config.reservations.table_limit == 0 {
        fail("reservations.table_limit must be at least 1".to_string());
    }

    if config.openrouter.timeout_secs == 0 {
        fail("openrouter.timeout_secs must be at least 1".to_string());
    }

    if config.notifications.enabled {
        match config.notifications.webhook_url.as_deref().map(str::trim) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
            Some(url) if !url.is_empty() => fail(format!(
                "notifications.webhook_url `{url}` must be an http(s) URL"
            )),
            _ => fail(
                "notifications.webhook_url is required when notifications.enabled = true"
                    .to_string(),
            ),
        }
        if config.notifications.duration_minutes == 0 {
            fail("notifications.duration_minutes must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&MesaConfig::default()).is_ok());
    }

    #[test]
    fn zero_table_limit_fails() {
        let mut config = MesaConfig::default();
        config.reservations.table_limit = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "table_limit"));
    }

    #[test]
    fn out_of_range_temperature_fails() {
        let mut config = MesaConfig::default();
        config.assistant.temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "assistant.temperature"));
    }

    #[test]
    fn notifications_require_webhook_url() {
        let mut config = MesaConfig::default();
        config.notifications.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "webhook_url is required"));

        config.notifications.webhook_url = Some("ftp://calendar".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "must be an http(s) URL"));

        config.notifications.webhook_url = Some("https://hooks.example/cal".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = MesaConfig::default();
        config.knowledge.top_k = 0;
        config.knowledge.metadata_path = " ".to_string();
        config.openrouter.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
