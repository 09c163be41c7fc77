//! Role-based gate for the interactive order surfaces.
//!
//! The guard is advisory at this layer -- the server's extractors are the
//! authoritative enforcement -- but it is what decides which controls a
//! surface renders. The store's mutation operation itself carries no
//! authorization check, so anything interactive must come through here.

use std::sync::Arc;

use mixdesk_core::roles::ROLE_ADMIN;
use mixdesk_core::status::OrderStatus;
use mixdesk_core::types::DbId;

use crate::error::ClientError;
use crate::store::OrderStore;
use crate::types::{Order, Profile};

/// Pure role checks.
pub struct AccessGuard;

impl AccessGuard {
    /// Only admins may mutate order status interactively.
    pub fn can_update_status(profile: &Profile) -> bool {
        profile.role == ROLE_ADMIN
    }

    /// Admins see every order; everyone else only their own.
    pub fn can_view_order(profile: &Profile, order: &Order) -> bool {
        profile.role == ROLE_ADMIN || order.client_id == profile.id
    }
}

/// The interactive status-mutation control.
///
/// Handed out by [`StatusControls::for_profile`] only when the guard
/// allows it; a surface that never obtains one has nothing to render.
pub struct StatusMutator {
    store: Arc<OrderStore>,
}

impl StatusMutator {
    /// Perform the status mutation through the store.
    pub async fn set_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        notes: Option<String>,
    ) -> Result<(), ClientError> {
        self.store.update_order_status(order_id, status, notes).await
    }
}

/// Factory for role-gated controls.
pub struct StatusControls;

impl StatusControls {
    /// Return the status-mutation control if the profile's role permits
    /// it, `None` otherwise.
    pub fn for_profile(store: &Arc<OrderStore>, profile: &Profile) -> Option<StatusMutator> {
        if AccessGuard::can_update_status(profile) {
            Some(StatusMutator {
                store: Arc::clone(store),
            })
        } else {
            None
        }
    }
}
