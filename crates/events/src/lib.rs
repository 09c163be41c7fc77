//! In-process change feed for order domain events.
//!
//! Handlers publish an [`OrderEvent`] after every successful mutation; the
//! WebSocket feed and any other in-process consumer subscribe through the
//! [`EventBus`].

pub mod bus;

pub use bus::{EventBus, OrderEvent};

/// An order was created.
pub const EVENT_ORDER_CREATED: &str = "order.created";

/// An order's status changed.
pub const EVENT_ORDER_STATUS_CHANGED: &str = "order.status_changed";

/// Files were appended to an order.
pub const EVENT_ORDER_FILES_ADDED: &str = "order.files_added";

/// A revision was delivered for an order.
pub const EVENT_REVISION_ADDED: &str = "revision.added";
