// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete turn pipeline.
//!
//! Each test builds an isolated TestHarness: FAQ artifacts written to a temp
//! directory and loaded through the real loader, a CSV ledger beside them,
//! and mock model adapters. Tests are independent and order-insensitive.

use mesa_reservation::{NotificationStatus, ReservationOutcome, Severity};
use mesa_test_utils::TestHarness;

const HEADER: &str = "Data,Hora,Nome,Pessoas,Mesas,Data_Registo";

// ---- FAQ answers ----

#[tokio::test]
async fn faq_question_is_grounded_on_best_match() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Sim, temos risotto de cogumelos.".into()])
        .build()
        .await
        .unwrap();
    harness.mock_embedder.push_vector(vec![0.1, 0.9, 0.0]).await;

    let output = harness.send_message("Há comida vegetariana?").await.unwrap();
    assert_eq!(output.visible, "Sim, temos risotto de cogumelos.");
    assert_eq!(output.images.to_string(), "risotto.jpg, salada.jpg");
    assert!(output.messages.is_empty());

    let requests = harness.mock_provider.requests().await;
    let grounding = &requests[0].messages[1].content;
    let first_block = grounding
        .strip_prefix("Informação do restaurante (FAQs):\n\n")
        .unwrap();
    assert!(first_block.starts_with("PERGUNTA EXEMPLO (menu): Têm pratos vegetarianos?"));
    assert_eq!(grounding.matches("PERGUNTA EXEMPLO").count(), 3);
}

#[tokio::test]
async fn system_prompt_carries_todays_date() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_message("Olá").await.unwrap();

    let requests = harness.mock_provider.requests().await;
    let system = &requests[0].messages[0].content;
    assert!(system.contains("Hoje é 2024-05-20."));
    assert!(system.contains("[RESERVA|<name>|<date:YYYY-MM-DD>|<time:HH:MM>|<partySize:int>]"));
}

// ---- Reservations ----

#[tokio::test]
async fn reservation_is_written_to_csv() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Reserva feita! [RESERVA|Ana|2024-06-01|20:00|6]".into()])
        .build()
        .await
        .unwrap();

    let output = harness.send_message("Confirmo a reserva.").await.unwrap();
    assert_eq!(output.visible, "Reserva feita!");
    assert_eq!(
        output.messages[0].text,
        "Reserva confirmada em nome de Ana para 6 pessoas em 2024-06-01 às 20:00."
    );
    assert_eq!(
        harness.store_contents(),
        format!("{HEADER}\n2024-06-01,20:00,Ana,6,2,2024-05-20 18:45\n")
    );
}

#[tokio::test]
async fn full_slot_rejects_without_writing() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "Ok [RESERVA|Grupo|2024-06-01|20:00|56]".into(),
            "Ok [RESERVA|Rita|2024-06-01|20:00|6]".into(),
        ])
        .build()
        .await
        .unwrap();

    harness.send_message("Somos 56").await.unwrap();
    let before = harness.store_contents();

    let output = harness.send_message("Somos 6").await.unwrap();
    assert_eq!(
        output.outcome,
        Some(ReservationOutcome::Rejected {
            occupied: 14,
            required: 2
        })
    );
    assert_eq!(output.messages[0].severity, Severity::Warning);
    assert_eq!(harness.store_contents(), before);
}

#[tokio::test]
async fn notification_id_is_reported() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Tudo pronto! [RESERVA|João|2024-07-04|19:30|5]".into()])
        .with_notifications()
        .build()
        .await
        .unwrap();

    let output = harness.send_message("Sim").await.unwrap();
    match output.outcome {
        Some(ReservationOutcome::Confirmed {
            record,
            notification: Some(NotificationStatus::Notified(id)),
        }) => {
            assert_eq!(record.tables_used, 2);
            assert_eq!(id, "mock-evt-1");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    let events = harness.mock_notifier.as_ref().unwrap().events().await;
    assert_eq!(events[0].time, "19:30");
}

#[tokio::test]
async fn failed_notification_keeps_the_reservation() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Feito [RESERVA|Rui|2024-07-04|13:00|2]".into()])
        .with_notifications()
        .build()
        .await
        .unwrap();
    harness
        .mock_notifier
        .as_ref()
        .unwrap()
        .fail_next("calendar offline")
        .await;

    let output = harness.send_message("Confirmo").await.unwrap();
    assert_eq!(output.messages.len(), 2);
    assert_eq!(output.messages[0].severity, Severity::Success);
    assert_eq!(output.messages[1].severity, Severity::Warning);
    assert_eq!(harness.ledger.occupancy("2024-07-04", "13:00").await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_marker_shows_original_reply() {
    let reply = "Quase! [RESERVA|Ana|2024-06-01|20:00|muitos]";
    let harness = TestHarness::builder()
        .with_mock_responses(vec![reply.into()])
        .build()
        .await
        .unwrap();

    let output = harness.send_message("Somos muitos").await.unwrap();
    assert_eq!(output.visible, reply);
    assert!(matches!(output.outcome, Some(ReservationOutcome::Error(_))));
    assert!(harness.store_contents().is_empty());
}

// ---- Failure handling ----

#[tokio::test]
async fn completion_failure_does_not_end_the_conversation() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.mock_provider.fail_next("503 upstream").await;
    harness
        .mock_provider
        .add_response("Bem-vindo de volta.".into())
        .await;

    assert!(harness.send_message("Olá").await.is_err());
    let output = harness.send_message("Olá de novo").await.unwrap();
    assert_eq!(output.visible, "Bem-vindo de volta.");

    // The failed turn left nothing in history.
    let requests = harness.mock_provider.requests().await;
    assert_eq!(requests[1].messages.len(), 3);
}

#[tokio::test]
async fn table_limit_is_configurable() {
    let harness = TestHarness::builder()
        .with_table_limit(1)
        .with_mock_responses(vec![
            "Ok [RESERVA|A|2024-06-01|20:00|4]".into(),
            "Ok [RESERVA|B|2024-06-01|20:00|1]".into(),
        ])
        .build()
        .await
        .unwrap();

    harness.send_message("1").await.unwrap();
    let output = harness.send_message("2").await.unwrap();
    assert_eq!(
        output.outcome,
        Some(ReservationOutcome::Rejected {
            occupied: 1,
            required: 1
        })
    );
    let summary = harness.ledger.slot_summary("2024-06-01", "20:00").await.unwrap();
    assert_eq!((summary.occupied, summary.remaining, summary.limit), (1, 0, 1));
}
