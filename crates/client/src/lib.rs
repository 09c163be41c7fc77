//! Mixdesk client SDK.
//!
//! A headless client for the order workflow: a cached [`OrderStore`], a
//! [`RealtimeNotifier`] that keeps it synchronized with the server's order
//! change feed, the [`AccessGuard`] gate for the interactive status-mutation
//! surface, and a [`SessionContext`] holding the signed-in profile.
//!
//! Backend access goes through the [`gateway`] traits; [`HttpGateway`] and
//! [`WsChangeFeed`] are the production implementations, and tests plug in
//! in-memory fakes.

pub mod error;
pub mod gateway;
pub mod guard;
pub mod http;
pub mod notices;
pub mod notifier;
pub mod session;
pub mod store;
pub mod types;
pub mod ws_feed;

pub use error::ClientError;
pub use gateway::{AuthApi, ChangeFeed, OrdersApi};
pub use guard::{AccessGuard, StatusControls};
pub use http::HttpGateway;
pub use notices::{BufferNotices, Notice, NoticeLevel, NoticeSink, TracingNotices};
pub use notifier::RealtimeNotifier;
pub use session::SessionContext;
pub use store::OrderStore;
pub use ws_feed::WsChangeFeed;
