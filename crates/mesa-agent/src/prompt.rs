// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt assembly.
//!
//! The first system message is the persona paragraph followed by the
//! reservation protocol. The protocol embeds today's date so the model can
//! turn "amanhã" or "sábado" into an ISO date before emitting a marker.

use chrono::NaiveDate;
use mesa_config::model::AssistantConfig;
use mesa_core::MesaError;
use tracing::{info, warn};

/// Persona and grounding rules used when no prompt file is configured.
pub const DEFAULT_PERSONA: &str = "És um assistente virtual de um restaurante. \
Responde sempre com base EXCLUSIVAMENTE nas informações abaixo. \
Se a pergunta não estiver coberta, diz claramente que não tens essa informação \
e sugere ao utilizador que contacte o restaurante por telefone.";

/// The literal marker grammar the model must emit.
pub const MARKER_GRAMMAR: &str = "[RESERVA|<name>|<date:YYYY-MM-DD>|<time:HH:MM>|<partySize:int>]";

/// Heading of the second system message, which carries the retrieved FAQs.
pub const GROUNDING_HEADING: &str = "Informação do restaurante (FAQs):";

/// Loads the persona paragraph.
///
/// `system_prompt_file` wins when it exists and is non-empty; otherwise the
/// built-in persona is used.
pub async fn load_persona(config: &AssistantConfig) -> Result<String, MesaError> {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded persona from file");
                    return Ok(trimmed.to_string());
                }
                warn!(path = file_path.as_str(), "persona file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read persona file, falling back"
                );
            }
        }
    }

    Ok(DEFAULT_PERSONA.to_string())
}

/// Instructions for collecting booking details and emitting the marker.
pub fn reservation_protocol(today: NaiveDate) -> String {
    format!(
        "Também podes ajudar o cliente a fazer uma reserva. Pergunta, uma de cada vez, \
         pelas informações em falta: nome, data, hora e número de pessoas. \
         Hoje é {today}. Converte datas relativas (por exemplo \"amanhã\" ou \"sábado\") \
         para o formato AAAA-MM-DD e horas para HH:MM.\n\
         Quando tiveres todos os dados e o cliente os confirmar, termina a tua resposta \
         com uma única linha exatamente neste formato:\n\
         {MARKER_GRAMMAR}\n\
         Não escrevas esta linha antes de a reserva estar confirmada e nunca a escrevas \
         mais do que uma vez. O sistema verifica a disponibilidade e informa o cliente do \
         resultado.",
        today = today.format("%Y-%m-%d"),
    )
}

/// The static part of the system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    persona: String,
}

impl SystemPrompt {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    pub async fn from_config(config: &AssistantConfig) -> Result<Self, MesaError> {
        load_persona(config).await.map(Self::new)
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Persona plus the reservation protocol dated `today`.
    pub fn render(&self, today: NaiveDate) -> String {
        format!("{}\n\n{}", self.persona, reservation_protocol(today))
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}

/// The second system message: the composed FAQ context.
pub fn grounding_message(context: &str) -> String {
    format!("{GROUNDING_HEADING}\n\n{context}")
}
