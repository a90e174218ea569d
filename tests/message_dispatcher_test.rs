mod common;

use std::sync::{Arc, atomic::Ordering};

use messaging_scheduler::{
    application::handlers::message_dispatcher::DispatchSummary,
    infrastructure::cache::in_memory::InMemoryReceiptCache,
};

use common::{FlakyMessageStore, PHONE, ScriptedWebhook, UnavailableReceiptCache, dispatcher};

#[tokio::test]
async fn empty_store_makes_no_calls() {
    let store = FlakyMessageStore::new();
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();

    let summary = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2)
        .handle()
        .await;

    assert_eq!(summary, DispatchSummary::default());
    assert!(webhook.requests().is_empty());
    assert_eq!(store.mark_sent_calls(), 0);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn accepted_message_is_marked_sent_and_receipt_cached() {
    let store = FlakyMessageStore::new();
    store.inner.insert("hello", PHONE).await;
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();
    webhook.accept("wh-42");

    let summary = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2)
        .handle()
        .await;

    assert_eq!(
        summary,
        DispatchSummary {
            fetched: 1,
            delivered: 1,
            marked_sent: 1,
            cached: 1,
            failed: 0,
        }
    );
    assert!(store.is_sent(1).await);

    let requests = webhook.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].content, "hello");
    assert_eq!(requests[0].phone, PHONE);

    // Keyed by the webhook's id, not the store's.
    assert_eq!(cache.len().await, 1);
    let receipt = cache.get("wh-42").await.expect("receipt cached");
    assert_eq!(receipt.message_id, "wh-42");
    assert!(receipt.sending_time.ends_with('Z'));
    assert!(cache.get("1").await.is_none());
}

#[tokio::test]
async fn rejected_delivery_leaves_message_unsent() {
    let store = FlakyMessageStore::new();
    store.inner.insert("hello", PHONE).await;
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();
    webhook.reject(500);

    let summary = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2)
        .handle()
        .await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.delivered, 0);
    assert!(!store.is_sent(1).await);
    assert_eq!(store.mark_sent_calls(), 0);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn failed_mark_sent_skips_cache_and_is_redelivered_next_run() {
    let store = FlakyMessageStore::new();
    store.inner.insert("hello", PHONE).await;
    store.fail_mark_sent.store(true, Ordering::SeqCst);
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();
    webhook.accept("wh-1");
    webhook.accept("wh-2");
    let handler = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2);

    let summary = handler.handle().await;
    assert_eq!(summary.delivered, 1);
    assert_eq!(summary.marked_sent, 0);
    assert_eq!(summary.failed, 1);
    assert_eq!(webhook.requests().len(), 1);
    assert!(!store.is_sent(1).await);
    assert!(cache.is_empty().await);

    store.fail_mark_sent.store(false, Ordering::SeqCst);
    handler.handle().await;

    assert_eq!(webhook.contents(), vec!["hello", "hello"]);
    assert!(store.is_sent(1).await);
    assert!(cache.get("wh-2").await.is_some());
}

#[tokio::test]
async fn cache_outage_does_not_undo_the_send() {
    let store = FlakyMessageStore::new();
    store.inner.insert("hello", PHONE).await;
    let cache = UnavailableReceiptCache::new();
    let webhook = ScriptedWebhook::new();
    webhook.accept("wh-1");

    let summary = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2)
        .handle()
        .await;

    assert!(store.is_sent(1).await);
    assert_eq!(cache.attempts(), 1);
    assert_eq!(summary.marked_sent, 1);
    assert_eq!(summary.cached, 0);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn batch_is_bounded_and_oldest_first() {
    let store = FlakyMessageStore::new();
    store.seed(5).await;
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();
    for n in 1..=4 {
        webhook.accept(&format!("wh-{n}"));
    }
    let handler = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2);

    let summary = handler.handle().await;
    assert_eq!(summary.fetched, 2);
    assert_eq!(webhook.contents(), vec!["message 1", "message 2"]);
    assert!(store.is_sent(2).await);
    assert!(!store.is_sent(3).await);

    handler.handle().await;
    assert_eq!(
        webhook.contents(),
        vec!["message 1", "message 2", "message 3", "message 4"]
    );
    assert!(!store.is_sent(5).await);
    assert_eq!(cache.len().await, 4);
}

#[tokio::test]
async fn one_failure_does_not_abort_the_batch() {
    let store = FlakyMessageStore::new();
    store.seed(2).await;
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();
    webhook.reject(400);
    webhook.accept("wh-2");

    let summary = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2)
        .handle()
        .await;

    assert_eq!(webhook.requests().len(), 2);
    assert!(!store.is_sent(1).await);
    assert!(store.is_sent(2).await);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.marked_sent, 1);
    assert!(cache.get("wh-2").await.is_some());
}

#[tokio::test]
async fn fetch_failure_ends_the_run_quietly() {
    let store = FlakyMessageStore::new();
    store.seed(1).await;
    store.fail_fetch.store(true, Ordering::SeqCst);
    let cache = Arc::new(InMemoryReceiptCache::new());
    let webhook = ScriptedWebhook::new();
    webhook.accept("wh-1");

    let summary = dispatcher(store.clone(), cache.clone(), webhook.clone(), 2)
        .handle()
        .await;

    assert_eq!(summary, DispatchSummary::default());
    assert!(webhook.requests().is_empty());
    assert!(!store.is_sent(1).await);
}
