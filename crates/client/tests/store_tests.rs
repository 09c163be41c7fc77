//! Integration tests for the cached order store.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Utc;

use common::{sample_order, InMemoryOrders};
use mixdesk_client::error::ClientError;
use mixdesk_client::notices::{BufferNotices, NoticeLevel};
use mixdesk_client::store::OrderStore;
use mixdesk_client::types::{LocalFile, StatusHistoryEntry};
use mixdesk_core::status::OrderStatus;

fn store_with(
    api: &Arc<InMemoryOrders>,
) -> (Arc<OrderStore>, Arc<BufferNotices>) {
    let notices = Arc::new(BufferNotices::new());
    let store = Arc::new(OrderStore::new(
        Arc::clone(api) as Arc<_>,
        Arc::clone(&notices) as Arc<_>,
    ));
    (store, notices)
}

#[tokio::test]
async fn load_orders_returns_newest_first() {
    // Order A is older and `new`; order B is newer and `review`.
    let api = InMemoryOrders::new(vec![
        sample_order(1, 10, OrderStatus::New, 60),
        sample_order(2, 20, OrderStatus::Review, 5),
    ]);
    let (store, _notices) = store_with(&api);

    store.load_orders().await.unwrap();

    let orders = store.orders().await;
    assert_eq!(orders.len(), 2, "admin view sees both orders");
    assert_eq!(orders[0].id, 2, "newest created first");
    assert_eq!(orders[1].id, 1);
}

#[tokio::test]
async fn load_orders_applies_client_filter() {
    let api = InMemoryOrders::new(vec![
        sample_order(1, 10, OrderStatus::New, 60),
        sample_order(2, 20, OrderStatus::Review, 5),
    ]);
    *api.viewer_client.lock().unwrap() = Some(10);
    let (store, _notices) = store_with(&api);

    store.load_orders().await.unwrap();

    let orders = store.orders().await;
    assert_eq!(orders.len(), 1, "client sees only their own order");
    assert_eq!(orders[0].id, 1);
}

#[tokio::test]
async fn load_orders_failure_keeps_cache_and_surfaces_error() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    let (store, notices) = store_with(&api);

    store.load_orders().await.unwrap();
    assert_eq!(store.orders().await.len(), 1);

    api.fail_list.store(true, Ordering::SeqCst);
    let result = store.load_orders().await;

    assert_matches!(result, Err(ClientError::Fetch(_)));
    assert_eq!(store.orders().await.len(), 1, "cache untouched on failure");
    assert!(notices
        .drain()
        .iter()
        .any(|n| n.level == NoticeLevel::Error));
}

#[tokio::test]
async fn completed_update_visible_in_reload_and_history() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::Review, 10)]);
    let (store, notices) = store_with(&api);
    store.load_orders().await.unwrap();

    store
        .update_order_status(1, OrderStatus::Completed, None)
        .await
        .unwrap();

    // The reconciled cache must show the new status.
    store.load_orders().await.unwrap();
    assert_eq!(store.orders().await[0].status, OrderStatus::Completed);

    // The newest history entry's new status must match.
    let history = store.get_status_history(1).await;
    assert_eq!(history[0].new_status, OrderStatus::Completed);
    assert_eq!(history[0].previous_status, Some(OrderStatus::Review));

    assert!(notices
        .drain()
        .iter()
        .any(|n| n.level == NoticeLevel::Success && n.message.contains("Completed")));
}

#[tokio::test]
async fn rejected_update_propagates_without_cache_mutation() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    let (store, notices) = store_with(&api);
    store.load_orders().await.unwrap();

    api.fail_update.store(true, Ordering::SeqCst);
    let result = store
        .update_order_status(1, OrderStatus::Completed, None)
        .await;

    assert_matches!(result, Err(ClientError::Update(_)));
    assert_eq!(
        store.orders().await[0].status,
        OrderStatus::New,
        "cache must not be touched on a rejected write"
    );
    assert!(notices
        .drain()
        .iter()
        .any(|n| n.level == NoticeLevel::Error));
}

#[tokio::test]
async fn optimistic_patch_is_overwritten_by_reconciling_reload() {
    // The remote acknowledges the write but does not persist it, so the
    // reconciling reload must overwrite the optimistic patch.
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    api.persist_updates.store(false, Ordering::SeqCst);
    let (store, _notices) = store_with(&api);
    store.load_orders().await.unwrap();

    store
        .update_order_status(1, OrderStatus::Completed, None)
        .await
        .unwrap();

    assert_eq!(
        store.orders().await[0].status,
        OrderStatus::New,
        "remote view wins over the optimistic patch"
    );
}

#[tokio::test]
async fn history_soft_fails_to_empty_with_warning() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    api.fail_history.store(true, Ordering::SeqCst);
    let (store, notices) = store_with(&api);

    let history = store.get_status_history(1).await;

    assert!(history.is_empty(), "soft-fail returns an empty trail");
    let drained = notices.drain();
    assert!(drained.iter().any(|n| n.level == NoticeLevel::Warning));
}

#[tokio::test]
async fn history_entries_carry_actor_names_newest_first() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    api.push_history(StatusHistoryEntry {
        id: 1,
        order_id: 1,
        previous_status: None,
        new_status: OrderStatus::New,
        changed_by: Some(10),
        changed_by_name: Some("Casey Client".into()),
        notes: None,
        created_at: Utc::now() - chrono::Duration::minutes(10),
    });
    api.push_history(StatusHistoryEntry {
        id: 2,
        order_id: 1,
        previous_status: Some(OrderStatus::New),
        new_status: OrderStatus::InProgress,
        changed_by: Some(99),
        changed_by_name: Some("Admin User".into()),
        notes: Some("picked up".into()),
        created_at: Utc::now(),
    });
    let (store, _notices) = store_with(&api);

    let history = store.get_status_history(1).await;

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].new_status, OrderStatus::InProgress);
    assert_eq!(history[0].changed_by_name.as_deref(), Some("Admin User"));
    assert_eq!(history[1].previous_status, None, "creation entry is last");
}

#[tokio::test]
async fn disallowed_file_type_rejected_before_any_network_call() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    let (store, notices) = store_with(&api);

    let result = store
        .upload_files(
            1,
            vec![LocalFile {
                name: "notes.txt".into(),
                content_type: "text/plain".into(),
                bytes: b"hello".to_vec(),
            }],
        )
        .await;

    assert_matches!(result, Err(ClientError::Upload(_)));
    assert_eq!(
        api.upload_calls.load(Ordering::SeqCst),
        0,
        "a policy rejection must never reach the network"
    );
    assert!(notices
        .drain()
        .iter()
        .any(|n| n.level == NoticeLevel::Error));
}

#[tokio::test]
async fn valid_upload_batch_is_sent_once() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 10)]);
    let (store, notices) = store_with(&api);

    store
        .upload_files(
            1,
            vec![
                LocalFile {
                    name: "stems.wav".into(),
                    content_type: "audio/wav".into(),
                    bytes: vec![0; 128],
                },
                LocalFile {
                    name: "reference.mp3".into(),
                    content_type: "audio/mpeg".into(),
                    bytes: vec![0; 64],
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.orders.lock().unwrap()[0].files.len(), 2);
    assert!(notices
        .drain()
        .iter()
        .any(|n| n.level == NoticeLevel::Success));
}
