//! In-memory gateway fakes shared by the client SDK integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::mpsc;

use mixdesk_client::error::ClientError;
use mixdesk_client::gateway::{AuthApi, ChangeFeed, OrdersApi};
use mixdesk_client::types::{
    FeedEvent, LocalFile, NewOrder, Order, Profile, StatusHistoryEntry,
};
use mixdesk_core::files::FileDescriptor;
use mixdesk_core::roles::{ROLE_ADMIN, ROLE_CLIENT};
use mixdesk_core::services::ServiceKind;
use mixdesk_core::status::OrderStatus;
use mixdesk_core::types::DbId;

pub fn sample_order(id: DbId, client_id: DbId, status: OrderStatus, minutes_ago: i64) -> Order {
    let created_at = Utc::now() - Duration::minutes(minutes_ago);
    Order {
        id,
        client_id,
        title: format!("Order {id}"),
        description: None,
        service_kind: ServiceKind::Mixing,
        music_style: "electronic".into(),
        status,
        price: ServiceKind::Mixing.price(),
        files: Vec::new(),
        deadline: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn sample_profile(id: DbId, role: &str) -> Profile {
    Profile {
        id,
        email: format!("user{id}@example.com"),
        full_name: format!("User {id}"),
        avatar_url: None,
        role: role.to_string(),
        created_at: Utc::now(),
    }
}

pub fn admin_profile(id: DbId) -> Profile {
    sample_profile(id, ROLE_ADMIN)
}

pub fn client_profile(id: DbId) -> Profile {
    sample_profile(id, ROLE_CLIENT)
}

/// In-memory stand-in for the orders API.
///
/// The `viewer_client` field simulates the server-side role filter: when
/// set, listings only return that client's orders (client token); when
/// unset, everything is returned (admin token).
#[derive(Default)]
pub struct InMemoryOrders {
    pub orders: Mutex<Vec<Order>>,
    pub history: Mutex<Vec<StatusHistoryEntry>>,
    pub viewer_client: Mutex<Option<DbId>>,
    pub fail_list: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_history: AtomicBool,
    pub fail_upload: AtomicBool,
    /// When false, `update_status` acknowledges the write but the stored
    /// order keeps its old status -- simulating a remote that disagrees
    /// with the optimistic patch.
    pub persist_updates: AtomicBool,
    pub upload_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl InMemoryOrders {
    pub fn new(seed: Vec<Order>) -> Arc<Self> {
        let fake = Self {
            orders: Mutex::new(seed),
            persist_updates: AtomicBool::new(true),
            ..Self::default()
        };
        Arc::new(fake)
    }

    fn next_id(&self) -> DbId {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1000) as DbId
    }

    pub fn push_history(&self, entry: StatusHistoryEntry) {
        self.history.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl OrdersApi for InMemoryOrders {
    async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Fetch("list unavailable".into()));
        }
        let orders = self.orders.lock().unwrap().clone();
        let filtered = match *self.viewer_client.lock().unwrap() {
            Some(client_id) => orders
                .into_iter()
                .filter(|o| o.client_id == client_id)
                .collect(),
            None => orders,
        };
        Ok(filtered)
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError> {
        let id = self.next_id();
        let created = Order {
            id,
            client_id: self.viewer_client.lock().unwrap().unwrap_or(1),
            title: order.title,
            description: order.description,
            service_kind: order.service_kind,
            music_style: order.music_style,
            status: OrderStatus::New,
            price: order.service_kind.price(),
            files: Vec::new(),
            deadline: order.deadline,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        notes: Option<String>,
    ) -> Result<Order, ClientError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(ClientError::Update("write rejected".into()));
        }

        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ClientError::Update(format!("Order {order_id} not found")))?;

        let previous = order.status;
        let mut acknowledged = order.clone();
        acknowledged.status = status;
        acknowledged.updated_at = Utc::now();

        if self.persist_updates.load(Ordering::SeqCst) {
            order.status = status;
            order.updated_at = acknowledged.updated_at;
        }
        drop(orders);

        self.history.lock().unwrap().push(StatusHistoryEntry {
            id: self.next_id(),
            order_id,
            previous_status: Some(previous),
            new_status: status,
            changed_by: Some(99),
            changed_by_name: Some("Admin User".into()),
            notes,
            created_at: Utc::now(),
        });

        Ok(acknowledged)
    }

    async fn status_history(
        &self,
        order_id: DbId,
    ) -> Result<Vec<StatusHistoryEntry>, ClientError> {
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(ClientError::Fetch("history unavailable".into()));
        }
        let mut entries: Vec<_> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn upload_files(
        &self,
        order_id: DbId,
        files: Vec<LocalFile>,
    ) -> Result<Order, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(ClientError::Upload("storage rejected the batch".into()));
        }

        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ClientError::Upload(format!("Order {order_id} not found")))?;

        for file in files {
            let size = file.bytes.len() as u64;
            order.files.push(FileDescriptor::new(
                file.name,
                file.content_type,
                "memory://stored",
                size,
            ));
        }
        Ok(order.clone())
    }
}

/// Scripted change feed: tests push events through `push`, and the fake
/// counts how many channels have been opened.
#[derive(Default)]
pub struct ScriptedFeed {
    pub connect_count: AtomicUsize,
    sender: Mutex<Option<mpsc::Sender<FeedEvent>>>,
}

impl ScriptedFeed {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connections_opened(&self) -> usize {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// Push an event into the currently open channel.
    pub async fn push(&self, event: FeedEvent) {
        let sender = self
            .sender
            .lock()
            .unwrap()
            .clone()
            .expect("no open feed channel");
        sender.send(event).await.expect("feed receiver dropped");
    }
}

#[async_trait]
impl ChangeFeed for ScriptedFeed {
    async fn connect(&self) -> Result<mpsc::Receiver<FeedEvent>, ClientError> {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(16);
        *self.sender.lock().unwrap() = Some(tx);
        Ok(rx)
    }
}

/// Build a status-change feed event.
pub fn status_change_event(
    order_id: DbId,
    previous: OrderStatus,
    new: OrderStatus,
) -> FeedEvent {
    FeedEvent {
        event_type: mixdesk_client::types::FEED_EVENT_STATUS_CHANGED.to_string(),
        order_id,
        actor_user_id: Some(99),
        payload: serde_json::json!({
            "previous_status": previous.as_str(),
            "new_status": new.as_str(),
        }),
        timestamp: Utc::now(),
    }
}

/// In-memory stand-in for the identity provider.
#[derive(Default)]
pub struct InMemoryAuth {
    pub profile: Mutex<Option<Profile>>,
    pub fail_sign_in: AtomicBool,
}

impl InMemoryAuth {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl AuthApi for InMemoryAuth {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<Profile, ClientError> {
        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(ClientError::Auth("invalid credentials".into()));
        }
        let profile = Profile {
            id: 7,
            email: email.to_string(),
            full_name: "Signed In".into(),
            avatar_url: None,
            role: ROLE_CLIENT.into(),
            created_at: Utc::now(),
        };
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(profile)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Profile, ClientError> {
        let mut profile = self.sign_in(email, password).await?;
        profile.full_name = full_name.to_string();
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(profile)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        *self.profile.lock().unwrap() = None;
        Ok(())
    }

    async fn current_profile(&self) -> Result<Option<Profile>, ClientError> {
        Ok(self.profile.lock().unwrap().clone())
    }
}
