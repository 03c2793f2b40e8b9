use std::sync::Arc;

use storage::repository::{DEFAULT_SCOPE, SessionStorage, Storage, TOKEN_KEY};
use tokio::sync::Notify;
use vdesk_core::model::{OptionId, TaskId};

use super::test_harness::{StubApi, setup_view_harness, setup_view_harness_with_storage};
use crate::vm::TOKEN_PLACEHOLDER;

#[tokio::test(flavor = "current_thread")]
async fn mount_acquires_displays_and_stores_token() {
    let mut harness = setup_view_harness(StubApi::working()).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("abc123"), "missing token in {html}");
    assert!(html.contains("START WORKSHEET"), "missing start button in {html}");
    assert_eq!(harness.api.session_calls(), 1);
    let stored = harness
        .storage
        .session
        .get(DEFAULT_SCOPE, TOKEN_KEY)
        .await
        .expect("read storage");
    assert_eq!(stored.as_deref(), Some("abc123"));
}

#[tokio::test(flavor = "current_thread")]
async fn stored_token_skips_session_request() {
    let storage = Storage::in_memory();
    storage
        .session
        .set(DEFAULT_SCOPE, TOKEN_KEY, "xyz")
        .await
        .expect("seed storage");

    let mut harness = setup_view_harness_with_storage(StubApi::working(), storage).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("xyz"), "missing stored token in {html}");
    assert!(!html.contains("abc123"), "unexpected fresh token in {html}");
    assert_eq!(harness.api.session_calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_session_request_leaves_placeholder() {
    let api = StubApi {
        token: None,
        ..StubApi::working()
    };
    let mut harness = setup_view_harness(api).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains(TOKEN_PLACEHOLDER), "missing placeholder in {html}");
    assert!(html.contains("START WORKSHEET"), "start button gone in {html}");
    assert_eq!(harness.api.session_calls(), 1);
    let stored = harness
        .storage
        .session
        .get(DEFAULT_SCOPE, TOKEN_KEY)
        .await
        .expect("read storage");
    assert_eq!(stored, None);
}

#[tokio::test(flavor = "current_thread")]
async fn start_renders_task_cards_in_order() {
    let mut harness = setup_view_harness(StubApi::working()).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;

    let html = harness.render();
    assert!(!html.contains("START WORKSHEET"), "start panel still shown in {html}");
    let first = html.find("2+2=?").expect("first task rendered");
    let second = html.find("Pick blue").expect("second task rendered");
    assert!(first < second, "tasks out of order in {html}");
    assert!(html.contains("#1"), "missing ordinal in {html}");
    assert!(html.contains("#2"), "missing ordinal in {html}");
    assert_eq!(harness.state().worksheet().len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_task_load_stays_on_start_panel() {
    let api = StubApi {
        tasks: None,
        ..StubApi::working()
    };
    let mut harness = setup_view_harness(api).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("START WORKSHEET"), "start panel gone in {html}");
    assert!(harness.state().worksheet().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn correct_answer_marks_option_and_dims_siblings() {
    let mut harness = setup_view_harness(StubApi::working()).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;
    harness.select(1, 2).await;

    let result = harness
        .state()
        .worksheet()
        .result(TaskId::new(1))
        .expect("result recorded");
    assert_eq!(result.selected(), OptionId::new(2));
    assert!(result.is_correct());

    let html = harness.render();
    assert!(html.contains("option--correct"), "missing correct style in {html}");
    assert!(html.contains("option--dimmed"), "missing dimmed style in {html}");
    assert!(html.contains("✓"), "missing check mark in {html}");
    // The second task is untouched.
    assert!(html.contains("option--open"), "missing open options in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submission_records_nothing() {
    let api = StubApi {
        fail_answers: true,
        ..StubApi::working()
    };
    let mut harness = setup_view_harness(api).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;
    harness.select(1, 2).await;

    assert_eq!(harness.api.answer_calls(), 1);
    assert_eq!(harness.state().worksheet().result(TaskId::new(1)), None);
    let html = harness.render();
    assert!(!html.contains("option--correct"), "unexpected result in {html}");
    assert!(!html.contains("option--incorrect"), "unexpected result in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn answering_again_overwrites_previous_result() {
    let mut harness = setup_view_harness(StubApi::working()).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;
    harness.select(1, 2).await;
    harness.select(1, 1).await;

    let result = harness
        .state()
        .worksheet()
        .result(TaskId::new(1))
        .expect("result recorded");
    assert_eq!(result.selected(), OptionId::new(1));
    assert!(!result.is_correct());
    let html = harness.render();
    assert!(html.contains("option--incorrect"), "missing incorrect style in {html}");
    assert!(html.contains("✗"), "missing cross mark in {html}");
    assert_eq!(harness.api.answer_calls(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn late_response_wins_when_answers_overlap() {
    let release = Arc::new(Notify::new());
    let api = StubApi {
        held_option: Some((2, Arc::clone(&release))),
        ..StubApi::working()
    };
    let mut harness = setup_view_harness(api).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;

    // First answer stays in flight while the second one completes.
    harness.select(1, 2).await;
    assert_eq!(harness.state().worksheet().result(TaskId::new(1)), None);
    harness.select(1, 1).await;
    assert_eq!(harness.api.answer_calls(), 2);
    let early = harness
        .state()
        .worksheet()
        .result(TaskId::new(1))
        .expect("second answer recorded");
    assert_eq!(early.selected(), OptionId::new(1));
    assert!(!early.is_correct());

    release.notify_one();
    harness.settle().await;

    let last = harness
        .state()
        .worksheet()
        .result(TaskId::new(1))
        .expect("late answer recorded");
    assert_eq!(last.selected(), OptionId::new(2));
    assert!(last.is_correct());
    let html = harness.render();
    assert!(html.contains("option--correct"), "missing correct style in {html}");
    assert!(!html.contains("option--incorrect"), "stale result still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn selection_without_token_sends_nothing() {
    let api = StubApi {
        token: None,
        ..StubApi::working()
    };
    let mut harness = setup_view_harness(api).await;
    harness.rebuild();
    harness.settle().await;
    harness.start().await;
    harness.select(1, 2).await;

    assert_eq!(harness.api.answer_calls(), 0);
    assert_eq!(harness.state().worksheet().result(TaskId::new(1)), None);
}
