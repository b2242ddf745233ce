//! Remote store abstraction (mechanics only).
//!
//! One method per REST operation on the `/cart` and `/inventory` resources.
//! Implementations are stateless with respect to the client: each call
//! resolves to the server's representation of whatever it touched.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use cartsync_core::{CartItem, DeletedRecord, InventoryItem, ItemId, NewCartItem};

use crate::error::{StoreError, StoreResult};

/// Result of emptying the cart remotely.
///
/// Checkout is not atomic: each delete is an independent request, so some
/// lines may be removed while others fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub deleted: Vec<DeletedRecord>,
    pub failed: Vec<(ItemId, StoreError)>,
}

impl CheckoutOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `GET /cart`
    async fn fetch_cart(&self) -> StoreResult<Vec<CartItem>>;

    /// `GET /inventory`
    async fn fetch_inventory(&self) -> StoreResult<Vec<InventoryItem>>;

    /// `POST /cart`
    async fn create_cart_item(&self, item: &NewCartItem) -> StoreResult<CartItem>;

    /// `PATCH /cart/:id`
    async fn update_cart_quantity(&self, id: ItemId, quantity: u32) -> StoreResult<CartItem>;

    /// `DELETE /cart/:id`
    async fn delete_cart_item(&self, id: ItemId) -> StoreResult<DeletedRecord>;

    /// `PATCH /inventory/:id`
    async fn update_inventory_quantity(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> StoreResult<InventoryItem>;

    /// Empty the cart remotely: fetch it, then delete every line concurrently.
    ///
    /// Fails as a whole only if the initial fetch fails. Individual delete
    /// failures are reported in the outcome.
    async fn checkout(&self) -> StoreResult<CheckoutOutcome> {
        let cart = self.fetch_cart().await?;
        let ids: Vec<ItemId> = cart.iter().map(|item| item.id).collect();

        let results = join_all(ids.iter().map(|id| self.delete_cart_item(*id))).await;

        let mut outcome = CheckoutOutcome::default();
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(record) => outcome.deleted.push(record),
                Err(e) => outcome.failed.push((id, e)),
            }
        }
        Ok(outcome)
    }
}

#[async_trait]
impl<S> RemoteStore for Arc<S>
where
    S: RemoteStore + ?Sized,
{
    async fn fetch_cart(&self) -> StoreResult<Vec<CartItem>> {
        (**self).fetch_cart().await
    }

    async fn fetch_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        (**self).fetch_inventory().await
    }

    async fn create_cart_item(&self, item: &NewCartItem) -> StoreResult<CartItem> {
        (**self).create_cart_item(item).await
    }

    async fn update_cart_quantity(&self, id: ItemId, quantity: u32) -> StoreResult<CartItem> {
        (**self).update_cart_quantity(id, quantity).await
    }

    async fn delete_cart_item(&self, id: ItemId) -> StoreResult<DeletedRecord> {
        (**self).delete_cart_item(id).await
    }

    async fn update_inventory_quantity(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> StoreResult<InventoryItem> {
        (**self).update_inventory_quantity(id, quantity).await
    }

    async fn checkout(&self) -> StoreResult<CheckoutOutcome> {
        (**self).checkout().await
    }
}
