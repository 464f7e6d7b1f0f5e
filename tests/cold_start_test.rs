//! Cold-start routing: default router, deep links and notification taps
//! racing for the single desired-route slot.

mod common;

use std::sync::atomic::Ordering;

use common::{setup_test_logging, user, wait_for, FakeApi, Harness};
use inspect::adapters::MemorySessionStorage;
use inspect::domain::models::{DesiredRoute, NotificationPayload, Screen, USER_KEY};

fn stored_session() -> MemorySessionStorage {
    let blob = serde_json::to_string(&user(3, None)).unwrap();
    MemorySessionStorage::with_entries([(USER_KEY, blob.as_str())])
}

#[tokio::test]
async fn test_cold_start_without_session_lands_on_login() {
    setup_test_logging();
    let harness = Harness::new(MemorySessionStorage::new(), FakeApi::new());

    harness.start();
    harness.mount();

    assert!(harness.settle().await);
    assert_eq!(harness.screens(), vec![Screen::Loading, Screen::Login]);
    assert_eq!(harness.navigator.actions(), vec![DesiredRoute::login()]);

    harness.runtime.shutdown().await;
}

#[tokio::test]
async fn test_cold_start_with_stored_session_lands_on_home() {
    let harness = Harness::new(stored_session(), FakeApi::new());

    harness.start();
    harness.mount();

    assert!(harness.settle().await);
    assert_eq!(harness.screens(), vec![Screen::Loading, Screen::Home]);
    assert_eq!(harness.runtime.session().user().unwrap().id, 3);

    harness.runtime.shutdown().await;
}

#[tokio::test]
async fn test_deep_link_cold_start_never_touches_home_or_login() {
    setup_test_logging();
    let harness = Harness::new(stored_session(), FakeApi::new());

    harness.start();
    let generation = harness
        .runtime
        .open_url("https://inspect.example/facts/abc123");
    assert!(generation.is_some());
    harness.mount();

    assert!(harness.settle().await);
    assert_eq!(harness.screens(), vec![Screen::Loading, Screen::NewsView]);
    assert_eq!(
        harness.navigator.state().current,
        Some(DesiredRoute::news_by_uid("abc123"))
    );
    assert_eq!(
        harness.navigator.actions(),
        vec![DesiredRoute::news_by_uid("abc123")]
    );

    harness.runtime.shutdown().await;
}

#[tokio::test]
async fn test_deep_link_wins_even_when_session_is_missing() {
    let harness = Harness::new(MemorySessionStorage::new(), FakeApi::new());

    harness.start();
    harness.mount();
    harness
        .runtime
        .open_url("http://inspect.example/facts/x9/comments");

    assert!(harness.settle().await);
    let screens = harness.screens();
    assert_eq!(screens.last(), Some(&Screen::NewsView));
    assert!(!screens.contains(&Screen::Home));
}

#[tokio::test]
async fn test_unrecognized_link_falls_back_to_default_route() {
    let harness = Harness::new(stored_session(), FakeApi::new());

    harness.start();
    assert!(harness
        .runtime
        .open_url("https://elsewhere.example/facts/abc123")
        .is_none());
    harness.mount();

    assert!(harness.settle().await);
    assert_eq!(harness.screens(), vec![Screen::Loading, Screen::Home]);
}

#[tokio::test]
async fn test_notification_tap_at_launch_opens_summary() {
    let harness = Harness::new(stored_session(), FakeApi::new());

    harness.start();
    harness
        .runtime
        .notification_response(&NotificationPayload::with_summary_id(55));
    harness.mount();

    assert!(harness.settle().await);
    assert_eq!(
        harness.navigator.state().current,
        Some(DesiredRoute::news_by_id(55))
    );
    assert!(!harness.screens().contains(&Screen::Home));
}

#[tokio::test]
async fn test_deep_link_while_running_moves_from_home() {
    let harness = Harness::new(stored_session(), FakeApi::new());
    harness.start();
    harness.mount();
    assert!(harness.settle().await);

    harness
        .runtime
        .open_url("https://inspect.example/facts/later1");
    let navigator = harness.navigator.clone();
    assert!(
        wait_for(
            move || navigator.state().shows(&DesiredRoute::news_by_uid("later1")),
            2_000
        )
        .await
    );
    assert_eq!(
        harness.screens(),
        vec![Screen::Loading, Screen::Home, Screen::NewsView]
    );
}

#[tokio::test]
async fn test_login_persists_session_and_routes_home() {
    let harness = Harness::new(MemorySessionStorage::new(), FakeApi::new());
    harness.start();
    harness.mount();
    assert!(harness.settle().await);

    let credentials = inspect::domain::models::Credentials {
        email: "reader@example.com".to_string(),
        password: "secret".to_string(),
    };
    let signed_in = harness.runtime.login(&credentials).await.unwrap();
    assert_eq!(signed_in.id, 7);

    assert!(harness.settle().await);
    assert_eq!(harness.navigator.state().current_path(), Some(Screen::Home));
    assert_eq!(
        harness.runtime.session().access_token().await.unwrap().as_deref(),
        Some("fresh-token")
    );

    harness.runtime.logout().await.unwrap();
    assert!(harness.settle().await);
    assert_eq!(harness.navigator.state().current_path(), Some(Screen::Login));
    assert!(harness.runtime.session().user().is_none());
}

#[tokio::test]
async fn test_push_token_is_uploaded_once_after_boot() {
    let harness = Harness::new(stored_session(), FakeApi::new());
    harness.start();
    harness.mount();
    assert!(harness.settle().await);

    assert!(harness.runtime.attach_push_token("ExponentPushToken[x]").await);
    assert!(!harness.runtime.attach_push_token("ExponentPushToken[x]").await);
    assert_eq!(harness.api.token_uploads.load(Ordering::SeqCst), 1);
}
