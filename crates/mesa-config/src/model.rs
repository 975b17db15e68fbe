// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use mesa_core::MesaError;
use serde::{Deserialize, Serialize};

/// Top-level Mesa configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MesaConfig {
    /// Persona and dialogue behaviour.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// OpenRouter chat and embedding endpoints.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Precomputed FAQ knowledge base.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Reservation ledger.
    #[serde(default)]
    pub reservations: ReservationsConfig,

    /// Post-commit calendar notifications.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Persona and dialogue behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Display name used by the shell prompt.
    #[serde(default = "default_assistant_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Sampling temperature for completions.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Number of user/assistant pairs kept in history. `0` keeps everything.
    #[serde(default = "default_history_max_pairs")]
    pub history_max_pairs: usize,

    /// Markdown file replacing the built-in persona paragraph.
    /// The reservation protocol text is always appended.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            log_level: default_log_level(),
            temperature: default_temperature(),
            history_max_pairs: default_history_max_pairs(),
            system_prompt_file: None,
        }
    }
}

fn default_assistant_name() -> String {
    "Mesa".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_history_max_pairs() -> usize {
    10
}

/// OpenRouter API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// API key. Falls back to the `OPENROUTER_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for chat completions.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for query embeddings. Must match the offline job's model.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Value of the `HTTP-Referer` attribution header.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Value of the `X-Title` attribution header.
    #[serde(default = "default_title")]
    pub title: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on transient statuses (429, 5xx).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl OpenRouterConfig {
    /// Returns the configured API key, or a fatal configuration error.
    pub fn require_api_key(&self) -> Result<&str, MesaError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(MesaError::Config(
                "OpenRouter API key missing: set openrouter.api_key, MESA_OPENROUTER_API_KEY, \
                 or OPENROUTER_API_KEY"
                    .to_string(),
            )),
        }
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            referer: default_referer(),
            title: default_title(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_chat_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_embedding_model() -> String {
    "openai/text-embedding-3-large".to_string()
}

fn default_referer() -> String {
    "http://localhost:5000".to_string()
}

fn default_title() -> String {
    "Chatbot Restaurante LLM".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

fn default_max_tokens() -> u32 {
    1024
}

/// Knowledge-base artifacts produced by the offline embedding job.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// `.npy` matrix of shape `(n_records, d)`.
    #[serde(default = "default_embeddings_path")]
    pub embeddings_path: String,

    /// JSON array of `{pergunta, resposta, categoria, imagem}`.
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,

    /// Directory that relative image names are resolved against.
    #[serde(default = "default_images_dir")]
    pub images_dir: String,

    /// Number of FAQ records retrieved per turn.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            embeddings_path: default_embeddings_path(),
            metadata_path: default_metadata_path(),
            images_dir: default_images_dir(),
            top_k: default_top_k(),
        }
    }
}

fn default_embeddings_path() -> String {
    "models/faq_embeddings.npy".to_string()
}

fn default_metadata_path() -> String {
    "models/faq_metadata.json".to_string()
}

fn default_images_dir() -> String {
    "imagens".to_string()
}

fn default_top_k() -> usize {
    3
}

/// Reservation ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReservationsConfig {
    /// Append-only CSV store.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Tables available per `(date, time)` slot.
    #[serde(default = "default_table_limit")]
    pub table_limit: u32,
}

impl Default for ReservationsConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            table_limit: default_table_limit(),
        }
    }
}

fn default_store_path() -> String {
    "reservas.csv".to_string()
}

fn default_table_limit() -> u32 {
    15
}

/// Calendar-style webhook notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Opt-in. When false no notifier is wired.
    #[serde(default)]
    pub enabled: bool,

    /// Endpoint receiving the event JSON.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// IANA time-zone name attached to event start and end.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Length of the calendar event.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: None,
            timezone: default_timezone(),
            duration_minutes: default_duration_minutes(),
        }
    }
}

fn default_timezone() -> String {
    "Europe/Lisbon".to_string()
}

fn default_duration_minutes() -> u32 {
    120
}
