//! Share-sheet ingestion against an in-memory API.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FakeApi, Harness};
use inspect::adapters::MemorySessionStorage;
use inspect::domain::models::{DesiredRoute, Screen, ShareObject, SummaryPatch};
use inspect::services::IngestionOutcome;

fn harness(api: FakeApi) -> Harness {
    Harness::new(MemorySessionStorage::new(), api)
}

#[tokio::test]
async fn test_same_link_delivered_twice_creates_one_summary() {
    let harness = harness(FakeApi::new().with_source("news.example", 1));
    let batch = vec![ShareObject::weblink("https://news.example/story")];

    let (first, second) = tokio::join!(
        harness.runtime.ingest_share(&batch),
        harness.runtime.ingest_share(&batch)
    );

    assert!(matches!(first, Some(IngestionOutcome::Routed { .. })));
    assert_eq!(second, Some(IngestionOutcome::Duplicate));
    assert_eq!(harness.api.created().len(), 1);
    assert!(harness.runtime.shares().guard().held().is_none());
    assert_eq!(harness.inbox.drain_count(), 2);
}

#[tokio::test]
async fn test_other_share_cannot_release_guard_of_share_in_flight() {
    let api = FakeApi::new()
        .with_source("news.example", 1)
        .with_summary_delay("https://news.example/b", Duration::from_millis(50));
    let harness = harness(api);
    let slow = vec![ShareObject::weblink("https://news.example/b")];
    let other = vec![ShareObject::weblink("https://news.example/a")];

    let (first, interleaved, redelivered) = tokio::join!(
        harness.runtime.ingest_share(&slow),
        async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            harness.runtime.ingest_share(&other).await
        },
        async {
            tokio::time::sleep(Duration::from_millis(15)).await;
            harness.runtime.ingest_share(&slow).await
        }
    );

    assert!(matches!(first, Some(IngestionOutcome::Routed { .. })));
    assert_eq!(interleaved, Some(IngestionOutcome::Busy));
    assert_eq!(redelivered, Some(IngestionOutcome::Duplicate));
    let urls: Vec<String> = harness.api.created().into_iter().map(|s| s.url).collect();
    assert_eq!(urls, vec!["https://news.example/b".to_string()]);
    assert!(harness.runtime.shares().guard().held().is_none());
}

#[tokio::test]
async fn test_unparseable_weblink_is_ignored_without_alert() {
    let harness = harness(FakeApi::new());
    let batch = vec![ShareObject::weblink("not a web address")];

    let outcome = harness.runtime.ingest_share(&batch).await;

    assert_eq!(outcome, Some(IngestionOutcome::Ignored));
    assert!(harness.api.created().is_empty());
    assert_eq!(harness.api.source_lookups.load(Ordering::SeqCst), 0);
    assert!(harness.alerts.messages().is_empty());
    assert!(harness.runtime.pending_route().is_none());
    assert!(harness.runtime.shares().guard().held().is_none());
    assert_eq!(harness.inbox.drain_count(), 1);
}

#[tokio::test]
async fn test_redelivery_after_completion_is_ingested_again() {
    let harness = harness(FakeApi::new());
    let batch = vec![ShareObject::weblink("https://news.example/story")];

    harness.runtime.ingest_share(&batch).await;
    harness.runtime.ingest_share(&batch).await;

    assert_eq!(harness.api.created().len(), 2);
}

#[tokio::test]
async fn test_weblink_wins_over_text_and_creates_missing_source() {
    let harness = harness(FakeApi::new());
    let share = ShareObject {
        text: Some("quoted paragraph".to_string()),
        weblink: Some("https://News.Example/story?utm_source=x#top".to_string()),
    };

    let outcome = harness.runtime.ingest_share(&[share]).await.unwrap();

    let created = harness.api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].url, "https://news.example/story");
    assert_eq!(created[0].title.as_deref(), Some("A Headline"));
    assert!(harness.api.source_ids().contains(&created[0].source_id));
    assert!(harness.api.patches().is_empty());

    let IngestionOutcome::Routed { route, .. } = outcome else {
        panic!("expected a route, got {outcome:?}");
    };
    assert_eq!(route.path, Screen::NewsView);
    assert_eq!(route.effective_args()["data"]["url"], "https://news.example/story");
    assert_eq!(harness.runtime.pending_route().unwrap().route, route);
}

#[tokio::test]
async fn test_text_with_embedded_url_creates_summary_for_that_url() {
    let harness = harness(FakeApi::new().with_source("feeds.example", 4));
    let share = ShareObject::text("Worth a read: https://feeds.example/a/b?ref=app via Reader");

    harness.runtime.ingest_share(&[share]).await.unwrap();

    let created = harness.api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].url, "https://feeds.example/a/b");
    assert_eq!(created[0].source_id, 4);
}

#[tokio::test]
async fn test_missing_title_still_creates_summary() {
    let harness = Harness::with_title(MemorySessionStorage::new(), FakeApi::new(), None);

    harness
        .runtime
        .ingest_share(&[ShareObject::weblink("https://news.example/untitled")])
        .await
        .unwrap();

    assert_eq!(harness.api.created()[0].title, None);
}

#[tokio::test]
async fn test_text_is_added_as_snippet_while_annotating() {
    let harness = harness(FakeApi::new());
    harness.runtime.open_annotation(31);

    let outcome = harness
        .runtime
        .ingest_share(&[ShareObject {
            text: Some("a key quote".to_string()),
            weblink: Some("https://news.example/story".to_string()),
        }])
        .await
        .unwrap();

    assert_eq!(harness.api.patches(), vec![(31, SummaryPatch::snippet("a key quote"))]);
    assert!(harness.api.created().is_empty());
    assert_eq!(harness.runtime.shares().annotation().current(), None);
    assert!(matches!(
        outcome,
        IngestionOutcome::Routed { route, .. } if route == DesiredRoute::news_by_id(31)
    ));
}

#[tokio::test]
async fn test_failure_alerts_and_requests_no_route() {
    let api = FakeApi::new();
    api.fail_summaries.store(true, Ordering::SeqCst);
    let harness = harness(api);
    harness.inbox.receive([ShareObject::weblink("https://news.example/story")]);

    let outcome = harness
        .runtime
        .ingest_share(&harness.inbox.pending())
        .await;

    assert_eq!(outcome, None);
    assert!(harness.runtime.pending_route().is_none());
    assert!(harness.runtime.shares().guard().held().is_none());
    assert!(harness.inbox.pending().is_empty());
    let alerts = harness.alerts.messages();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("Failed to create summary"));
}

#[tokio::test]
async fn test_only_first_object_of_a_batch_is_used() {
    let harness = harness(FakeApi::new());
    let batch = vec![
        ShareObject::weblink("https://news.example/first"),
        ShareObject::weblink("https://news.example/second"),
    ];

    harness.runtime.ingest_share(&batch).await.unwrap();

    let created = harness.api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].url, "https://news.example/first");
}

#[tokio::test]
async fn test_plain_text_without_context_is_ignored() {
    let harness = harness(FakeApi::new());

    let outcome = harness
        .runtime
        .ingest_share(&[ShareObject::text("no link here")])
        .await;

    assert_eq!(outcome, Some(IngestionOutcome::Ignored));
    assert_eq!(harness.api.source_lookups.load(Ordering::SeqCst), 0);
    assert_eq!(harness.inbox.drain_count(), 1);
}

#[tokio::test]
async fn test_background_share_reaches_news_view_once_running() {
    let harness = harness(FakeApi::new());
    harness.start();
    harness.mount();
    assert!(harness.settle().await);

    let outcome = harness
        .runtime
        .share_received(vec![ShareObject::weblink("https://news.example/live")])
        .await
        .unwrap();

    assert!(matches!(outcome, Some(IngestionOutcome::Routed { .. })));
    assert!(harness.settle().await);
    assert_eq!(harness.navigator.state().current_path(), Some(Screen::NewsView));
    harness.runtime.shutdown().await;
}
