//! Errors of user actions. These are logged by the dispatcher and never
//! surfaced to the caller of an event handler.

use cartsync_core::{DomainError, ItemId, Resource};
use cartsync_store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    InvalidId(#[from] DomainError),
    #[error("{resource} item {id} not found in local state")]
    NotFound { resource: Resource, id: ItemId },
    #[error("inventory item {0} is out of stock")]
    OutOfStock(ItemId),
    #[error("inventory item {0} is already at zero")]
    QuantityFloor(ItemId),
    #[error("cart item {0} is not being edited")]
    NotEditing(ItemId),
    #[error("remote call failed: {0}")]
    Remote(#[from] StoreError),
}

impl ActionError {
    pub fn not_found(resource: Resource, id: ItemId) -> Self {
        Self::NotFound { resource, id }
    }

    /// Precondition no-ops (nothing to do), as opposed to real failures.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            ActionError::OutOfStock(_) | ActionError::QuantityFloor(_)
        )
    }
}
