// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn processing over mock adapters and an in-memory ledger.

use std::sync::Arc;

use chrono::NaiveDate;
use mesa_agent::{Assistant, SessionDeps, SessionSettings, SystemPrompt};
use mesa_core::FixedClock;
use mesa_knowledge::{EmbeddingRecord, ImageRefs, VectorIndex};
use mesa_reservation::{
    CapacityLedger, MemoryReservationStore, ReservationExtractor, ReservationOutcome, Severity,
};
use mesa_test_utils::{MockEmbedder, MockNotifier, MockProvider};

fn index() -> VectorIndex {
    VectorIndex::new(
        vec![EmbeddingRecord {
            vector: vec![1.0, 0.0],
            question: "Aceitam reservas?".to_string(),
            answer: "Sim, até 15 mesas por horário.".to_string(),
            category: "reservas".to_string(),
            image_refs: ImageRefs::parse("sala.jpg, esplanada.jpg"),
        }],
        2,
    )
    .unwrap()
}

fn assistant(replies: Vec<String>, notifier: Option<Arc<MockNotifier>>) -> Assistant {
    let clock = Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2024, 6, 28)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap(),
    ));
    let ledger = CapacityLedger::new(Arc::new(MemoryReservationStore::new()), 15)
        .with_clock(clock.clone());
    let mut extractor = ReservationExtractor::new(Arc::new(ledger));
    if let Some(notifier) = notifier {
        extractor = extractor.with_notifier(notifier);
    }

    let deps = SessionDeps {
        embedder: Arc::new(MockEmbedder::new(2)),
        provider: Arc::new(MockProvider::with_responses(replies)),
        index: Arc::new(index()),
        prompt: Arc::new(SystemPrompt::default()),
        clock,
    };
    Assistant::new(deps, SessionSettings::default(), extractor)
}

#[tokio::test]
async fn plain_reply_has_no_messages() {
    let assistant = assistant(vec!["Sim, aceitamos reservas.".into()], None);
    let mut turn = assistant.start_session();

    let output = turn.process("Aceitam reservas?").await.unwrap();
    assert_eq!(output.visible, "Sim, aceitamos reservas.");
    assert!(output.outcome.is_none());
    assert!(output.messages.is_empty());
    assert_eq!(output.images.to_string(), "sala.jpg, esplanada.jpg");
}

#[tokio::test]
async fn marker_commits_and_notifies() {
    let notifier = Arc::new(MockNotifier::with_ids(vec!["evt-7".into()]));
    let assistant = assistant(
        vec!["Tudo pronto! [RESERVA|João|2024-07-04|19:30|5]".into()],
        Some(notifier.clone()),
    );
    let mut turn = assistant.start_session();

    let output = turn.process("Confirmo.").await.unwrap();
    assert_eq!(output.visible, "Tudo pronto!");
    assert!(matches!(
        output.outcome,
        Some(ReservationOutcome::Confirmed { .. })
    ));
    assert_eq!(output.messages.len(), 2);
    assert_eq!(
        output.messages[0].text,
        "Reserva confirmada em nome de João para 5 pessoas em 2024-07-04 às 19:30."
    );
    assert_eq!(output.messages[1].text, "Evento criado no calendário (ID: evt-7).");
    assert!(output.messages.iter().all(|m| m.severity == Severity::Success));

    assert_eq!(assistant.ledger().occupancy("2024-07-04", "19:30").await.unwrap(), 2);
    let events = notifier.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "João");

    // The raw reply, marker included, stays in the model's history.
    let history: Vec<_> = turn.session().history().turns().collect();
    assert!(history[1].content.contains("[RESERVA|João"));
}

#[tokio::test]
async fn malformed_marker_keeps_reply_and_history() {
    let reply = "Ok [RESERVA|Ana|2024-06-01|20:00]";
    let assistant = assistant(vec![reply.into()], None);
    let mut turn = assistant.start_session();

    let output = turn.process("Reserva para a Ana").await.unwrap();
    assert_eq!(output.visible, reply);
    assert_eq!(output.messages.len(), 1);
    assert_eq!(output.messages[0].severity, Severity::Warning);
    assert!(
        output.messages[0]
            .text
            .starts_with("Erro ao processar dados da reserva:")
    );
    assert!(assistant.ledger().records().await.unwrap().is_empty());
    assert_eq!(turn.session().history().len(), 1);
}

#[tokio::test]
async fn sessions_share_the_ledger_but_not_history() {
    let assistant = assistant(
        vec![
            "Feito [RESERVA|Rui|2024-07-04|19:30|44]".into(),
            "Feito [RESERVA|Eva|2024-07-04|19:30|20]".into(),
        ],
        None,
    );
    let mut first = assistant.start_session();
    let mut second = assistant.start_session();

    first.process("Mesa para 44").await.unwrap();
    let output = second.process("Mesa para 20").await.unwrap();

    assert_eq!(
        output.outcome,
        Some(ReservationOutcome::Rejected {
            occupied: 11,
            required: 5
        })
    );
    assert_eq!(first.session().history().len(), 1);
    assert_eq!(second.session().history().len(), 1);
}

#[tokio::test]
async fn failed_turn_reports_error() {
    let assistant = assistant(vec![], None);
    let provider = MockProvider::new();
    provider.fail_next("boom").await;
    let deps = SessionDeps {
        provider: Arc::new(provider),
        ..assistant.deps().clone()
    };
    let broken = Assistant::new(
        deps,
        SessionSettings::default(),
        ReservationExtractor::new(Arc::clone(assistant.ledger())),
    );

    let mut turn = broken.start_session();
    assert!(turn.process("olá").await.is_err());
    assert!(turn.session().history().is_empty());
}
