//! End-to-end turn behaviour through the service boundary

mod common;

use common::{service_with, test_config, ScriptedProvider};
use profile_assistant::agent::{Conversation, CONTEXT_SEPARATOR};
use profile_assistant::error::AssistantError;
use profile_assistant::providers::{Role, Turn};
use profile_assistant::service::AssistantService;
use profile_assistant::session::Session;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_contact_question_is_enriched_and_history_holds_raw_text() {
    let provider = Arc::new(ScriptedProvider::with_script([Ok(
        "You can reach him at anshulnparate@gmail.com",
    )]));
    let service = service_with(provider.clone(), 10);

    let response = service
        .chat("How can I contact him?", Some("s1"))
        .await
        .unwrap();

    assert_eq!(response.message_count, 2);
    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .system_instruction
        .starts_with("You are an AI assistant representing Anshul Parate"));
    let sent = calls[0].turns.last().unwrap().text();
    assert!(sent.starts_with(&format!("How can I contact him?{}", CONTEXT_SEPARATOR)));
    assert!(sent.contains("anshulnparate@gmail.com"));

    let history = service.history("s1").await.unwrap().messages;
    let turns = history.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].role(), Role::System);
    assert_eq!(turns[1], Turn::user("How can I contact him?"));
    assert_eq!(
        turns[2],
        Turn::assistant("You can reach him at anshulnparate@gmail.com")
    );
}

#[tokio::test]
async fn test_window_stays_bounded_over_many_turns() {
    let provider = Arc::new(ScriptedProvider::new());
    let service = service_with(provider.clone(), 4);

    for i in 0..12 {
        let response = service
            .chat(&format!("question {}", i), Some("long"))
            .await
            .unwrap();
        assert_eq!(response.message_count, (2 * (i + 1)).min(4));

        let history = service.history("long").await.unwrap().messages;
        assert!(history.len() <= 5);
        assert!(history.turns()[0].is_system());
        assert_eq!(history.turns().iter().filter(|t| t.is_system()).count(), 1);
    }

    for call in provider.calls() {
        assert!(call.turns.len() <= 4);
        assert!(call.turns.iter().all(|t| !t.is_system()));
    }

    let history = service.history("long").await.unwrap().messages;
    assert_eq!(history.turns()[3], Turn::user("question 11"));
}

#[tokio::test]
async fn test_failed_turn_leaves_history_untouched_and_can_be_retried() {
    let provider = Arc::new(ScriptedProvider::with_script([
        Ok("first"),
        Err("quota exceeded"),
        Ok("second"),
    ]));
    let service = service_with(provider.clone(), 10);

    service.chat("hello", Some("s")).await.unwrap();
    let before = service.history("s").await.unwrap().messages;

    let err = service.chat("tell me more", Some("s")).await.unwrap_err();
    assert!(matches!(err, AssistantError::Gateway(_)));
    assert!(!err.public_message().contains("quota"));
    assert_eq!(service.history("s").await.unwrap().messages, before);

    let retry = service.chat("tell me more", Some("s")).await.unwrap();
    assert_eq!(retry.response, "second");
    assert_eq!(retry.message_count, 4);

    let calls = provider.calls();
    assert_eq!(calls[1].turns, calls[2].turns);
}

#[tokio::test]
async fn test_headless_stored_history_is_healed_on_next_turn() {
    let provider = Arc::new(ScriptedProvider::new());
    let service = service_with(provider.clone(), 10);

    let mut session = Session::new("broken");
    session.conversation =
        Conversation::from_turns(vec![Turn::user("earlier"), Turn::assistant("reply")]);
    service.store().insert(session);

    service.chat("again", Some("broken")).await.unwrap();

    let history = service.history("broken").await.unwrap().messages;
    assert!(history.turns()[0].is_system());
    assert_eq!(history.turns().iter().filter(|t| t.is_system()).count(), 1);
    assert_eq!(history.len(), 5);
    assert_eq!(provider.calls()[0].turns[0], Turn::user("earlier"));
}

#[tokio::test]
async fn test_unmatched_message_is_sent_verbatim() {
    let provider = Arc::new(ScriptedProvider::new());
    let service = service_with(provider.clone(), 10);

    service.chat("good morning", None).await.unwrap();

    assert_eq!(provider.calls()[0].turns, vec![Turn::user("good morning")]);
}

#[tokio::test]
async fn test_empty_message_is_rejected_before_session_state() {
    let provider = Arc::new(ScriptedProvider::new());
    let service = service_with(provider.clone(), 10);

    let err = service.chat("   ", Some("s")).await.unwrap_err();

    assert!(matches!(err, AssistantError::InvalidRequest(_)));
    assert!(service.store().is_empty());
    assert!(provider.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_model_times_out_as_gateway_error() {
    let provider = Arc::new(ScriptedProvider::new().with_delay(Duration::from_secs(600)));
    let mut config = test_config(10);
    config.conversation.request_timeout_seconds = 5;
    let service = AssistantService::with_provider(&config, provider);

    let err = service.chat("hello", Some("slow")).await.unwrap_err();

    assert!(matches!(err, AssistantError::Gateway(_)));
    assert!(service.history("slow").await.unwrap().messages.is_empty());
}

#[tokio::test]
async fn test_different_sessions_run_concurrently() {
    let provider = Arc::new(ScriptedProvider::new().with_delay(Duration::from_millis(300)));
    let service = Arc::new(service_with(provider.clone(), 10));

    let started = std::time::Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.chat("hi", Some(&format!("user-{}", i))).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(started.elapsed() < Duration::from_millis(1000));
    assert_eq!(service.store().len(), 4);
}

#[tokio::test]
async fn test_same_session_turns_are_serialized() {
    let provider = Arc::new(ScriptedProvider::new().with_delay(Duration::from_millis(20)));
    let service = Arc::new(service_with(provider.clone(), 10));

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.chat(&format!("m{}", i), Some("shared")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = service.history("shared").await.unwrap().messages;
    assert_eq!(history.message_count(), 6);

    let lengths: Vec<usize> = provider.calls().iter().map(|c| c.turns.len()).collect();
    assert_eq!(lengths, vec![1, 3, 5]);
}

#[tokio::test(start_paused = true)]
async fn test_sessions_listing_does_not_wait_for_in_flight_turn() {
    let provider = Arc::new(ScriptedProvider::new().with_delay(Duration::from_secs(20)));
    let service = Arc::new(service_with(provider.clone(), 10));
    service.chat("hello", Some("idle")).await.unwrap();

    let turn = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.chat("still thinking?", Some("busy")).await })
    };
    tokio::time::sleep(Duration::from_secs(1)).await;

    let listing = service.sessions();
    assert_eq!(listing.count, 2);
    assert_eq!(listing.sessions[0].session_id, "busy");
    assert_eq!(listing.sessions[0].message_count, 0);
    assert!(!turn.is_finished());

    turn.await.unwrap().unwrap();
    assert_eq!(service.sessions().sessions[0].message_count, 2);
}
