//! Integration tests for the access guard and the session lifecycle.

mod common;

use std::sync::Arc;

use common::{admin_profile, client_profile, sample_order, InMemoryAuth, InMemoryOrders};
use mixdesk_client::guard::{AccessGuard, StatusControls};
use mixdesk_client::notices::BufferNotices;
use mixdesk_client::session::SessionContext;
use mixdesk_client::store::OrderStore;
use mixdesk_core::status::OrderStatus;

fn store_with(api: &Arc<InMemoryOrders>) -> Arc<OrderStore> {
    let notices = Arc::new(BufferNotices::new());
    Arc::new(OrderStore::new(
        Arc::clone(api) as Arc<_>,
        notices as Arc<_>,
    ))
}

#[tokio::test]
async fn client_role_is_denied_the_status_control_but_store_is_unguarded() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 5)]);
    let store = store_with(&api);

    // The gate lives at the control surface: a client gets no mutator.
    let control = StatusControls::for_profile(&store, &client_profile(10));
    assert!(control.is_none(), "client role must not get the control");

    // The store operation itself performs no authorization check -- calling
    // it directly succeeds. Enforcement belongs to the guard (and the
    // server), not the store.
    store
        .update_order_status(1, OrderStatus::InProgress, None)
        .await
        .expect("store operation is deliberately unguarded");
}

#[tokio::test]
async fn admin_role_gets_the_control_and_can_mutate() {
    let api = InMemoryOrders::new(vec![sample_order(1, 10, OrderStatus::New, 5)]);
    let store = store_with(&api);

    let control = StatusControls::for_profile(&store, &admin_profile(99))
        .expect("admin role must get the control");

    control
        .set_status(1, OrderStatus::Completed, Some("done".into()))
        .await
        .unwrap();

    assert_eq!(
        api.orders.lock().unwrap()[0].status,
        OrderStatus::Completed
    );
}

#[test]
fn view_access_is_owner_or_admin() {
    let order = sample_order(1, 10, OrderStatus::New, 5);

    assert!(AccessGuard::can_view_order(&admin_profile(99), &order));
    assert!(AccessGuard::can_view_order(&client_profile(10), &order));
    assert!(!AccessGuard::can_view_order(&client_profile(11), &order));
}

#[tokio::test]
async fn session_lifecycle_tears_down_on_sign_out() {
    let auth = InMemoryAuth::new();
    let notices = Arc::new(BufferNotices::new());
    let session = SessionContext::new(Arc::clone(&auth) as Arc<_>, notices as Arc<_>);

    // init with no backend session stays signed out.
    assert!(session.init().await.is_none());
    assert!(session.profile().await.is_none());

    let profile = session
        .sign_in("casey@example.com", "correct-horse")
        .await
        .unwrap();
    assert_eq!(profile.email, "casey@example.com");
    assert!(session.profile().await.is_some());

    session.sign_out().await.unwrap();
    assert!(session.profile().await.is_none(), "context torn down");
}

#[tokio::test]
async fn failed_sign_in_leaves_session_signed_out() {
    let auth = InMemoryAuth::new();
    auth.fail_sign_in
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let notices = Arc::new(BufferNotices::new());
    let session = SessionContext::new(Arc::clone(&auth) as Arc<_>, Arc::clone(&notices) as Arc<_>);

    let result = session.sign_in("casey@example.com", "wrong").await;

    assert!(result.is_err());
    assert!(session.profile().await.is_none());
    assert!(!notices.drain().is_empty(), "failure surfaced as a notice");
}
