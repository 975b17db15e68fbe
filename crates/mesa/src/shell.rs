// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mesa shell` command implementation.
//!
//! Interactive REPL over one conversation. A failed turn prints an error and
//! the conversation continues; reservation outcomes are printed as coloured
//! system messages under the reply.

use std::path::Path;

use colored::{ColoredString, Colorize};
use mesa_agent::TurnOutput;
use mesa_config::model::MesaConfig;
use mesa_core::MesaError;
use mesa_reservation::{Severity, SystemMessage};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::wiring::build_assistant;

const FAREWELL: &str = "Até à próxima!";

/// `sair`, `exit`, `quit` or `/quit`, in any case.
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    ["sair", "exit", "quit", "/quit"]
        .iter()
        .any(|cmd| line.eq_ignore_ascii_case(cmd))
}

/// One printable line of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellLine {
    Reply(String),
    Images(String),
    System(SystemMessage),
}

/// Lines to print for a turn, in display order.
pub fn render_turn(output: &TurnOutput, images_dir: &Path) -> Vec<ShellLine> {
    let mut lines = vec![ShellLine::Reply(output.visible.clone())];
    if !output.images.is_empty() {
        let paths: Vec<String> = output
            .images
            .resolve(images_dir)
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        lines.push(ShellLine::Images(paths.join(", ")));
    }
    lines.extend(output.messages.iter().cloned().map(ShellLine::System));
    lines
}

fn paint(line: &ShellLine) -> String {
    match line {
        ShellLine::Reply(text) => format!("{} {text}", "Bot:".bold().cyan()),
        ShellLine::Images(paths) => format!("{} {paths}", "[IMAGENS ASSOCIADAS]:".dimmed()),
        ShellLine::System(message) => {
            let text: ColoredString = match message.severity {
                Severity::Success => message.text.green(),
                Severity::Warning => message.text.yellow(),
            };
            format!("[{}] {text}", message.severity)
        }
    }
}

/// Runs the `mesa shell` interactive REPL.
pub async fn run_shell(config: MesaConfig) -> Result<(), MesaError> {
    let assistant = build_assistant(&config).await?;
    let mut turn = assistant.start_session();
    let images_dir = Path::new(&config.knowledge.images_dir);

    let mut rl = DefaultEditor::new()
        .map_err(|e| MesaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("{} - assistente do restaurante", config.assistant.name).bold().green());
    println!("Escreve {} para terminar.\n", "'sair'".yellow());

    let prompt = format!("{} ", "Tu:".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if is_exit_command(trimmed) {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match turn.process(trimmed).await {
                    Ok(output) => {
                        for line in render_turn(&output, images_dir) {
                            println!("{}", paint(&line));
                        }
                        println!();
                    }
                    Err(e) => {
                        debug!(error = ?e, "turn failed");
                        eprintln!(
                            "{} Ocorreu um problema ao gerar a resposta: {e}",
                            "[ERRO]".red()
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{} {FAREWELL}", "Bot:".bold().cyan());
    Ok(())
}
