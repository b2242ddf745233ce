//! In-memory remote store for tests/dev.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use cartsync_core::{CartItem, DeletedRecord, InventoryItem, ItemId, NewCartItem};

use crate::error::{StoreError, StoreResult};
use crate::memory::{CartDb, DbError, Seed};
use crate::remote::RemoteStore;

/// A call issued against the store, recorded in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchCart,
    FetchInventory,
    CreateCartItem(NewCartItem),
    UpdateCartQuantity(ItemId, u32),
    DeleteCartItem(ItemId),
    UpdateInventoryQuantity(ItemId, u32),
}

impl StoreCall {
    /// Whether this call mutates the remote store.
    pub fn is_write(&self) -> bool {
        !matches!(self, StoreCall::FetchCart | StoreCall::FetchInventory)
    }
}

type FailurePredicate = Box<dyn Fn(&StoreCall) -> bool + Send + Sync>;

/// In-process store with json-server semantics.
///
/// - No IO
/// - Every call is journaled, including calls that fail
/// - Failures can be injected per call with a predicate
pub struct InMemoryStore {
    db: Mutex<CartDb>,
    calls: Mutex<Vec<StoreCall>>,
    fail_when: Mutex<Option<FailurePredicate>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::from_seed(Seed::default())
    }

    pub fn from_seed(seed: Seed) -> Self {
        Self {
            db: Mutex::new(CartDb::from_seed(seed)),
            calls: Mutex::new(Vec::new()),
            fail_when: Mutex::new(None),
        }
    }

    /// Snapshot of the calls issued so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Only the calls that mutate the store.
    pub fn writes(&self) -> Vec<StoreCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Fail every subsequent call matching `pred` with a network error.
    pub fn fail_when<F>(&self, pred: F)
    where
        F: Fn(&StoreCall) -> bool + Send + Sync + 'static,
    {
        *lock(&self.fail_when) = Some(Box::new(pred));
    }

    pub fn heal(&self) {
        *lock(&self.fail_when) = None;
    }

    pub fn inventory(&self) -> Vec<InventoryItem> {
        lock(&self.db).inventory().to_vec()
    }

    pub fn cart(&self) -> Vec<CartItem> {
        lock(&self.db).cart().to_vec()
    }

    fn record(&self, call: StoreCall) -> StoreResult<()> {
        let fail = lock(&self.fail_when)
            .as_ref()
            .is_some_and(|pred| pred(&call));
        tracing::trace!(?call, fail, "in-memory store call");
        lock(&self.calls).push(call);
        if fail {
            Err(StoreError::Network("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn db_error(err: DbError) -> StoreError {
    let status = match err {
        DbError::NotFound { .. } => 404,
        DbError::DuplicateId(_) => 409,
        DbError::Validation(_) => 400,
    };
    StoreError::Api(status, err.to_string())
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn fetch_cart(&self) -> StoreResult<Vec<CartItem>> {
        self.record(StoreCall::FetchCart)?;
        Ok(self.cart())
    }

    async fn fetch_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        self.record(StoreCall::FetchInventory)?;
        Ok(self.inventory())
    }

    async fn create_cart_item(&self, item: &NewCartItem) -> StoreResult<CartItem> {
        self.record(StoreCall::CreateCartItem(item.clone()))?;
        lock(&self.db).insert_cart(item.clone()).map_err(db_error)
    }

    async fn update_cart_quantity(&self, id: ItemId, quantity: u32) -> StoreResult<CartItem> {
        self.record(StoreCall::UpdateCartQuantity(id, quantity))?;
        lock(&self.db).patch_cart(id, quantity).map_err(db_error)
    }

    async fn delete_cart_item(&self, id: ItemId) -> StoreResult<DeletedRecord> {
        self.record(StoreCall::DeleteCartItem(id))?;
        lock(&self.db)
            .remove_cart(id)
            .map(DeletedRecord::from)
            .map_err(db_error)
    }

    async fn update_inventory_quantity(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> StoreResult<InventoryItem> {
        self.record(StoreCall::UpdateInventoryQuantity(id, quantity))?;
        lock(&self.db).patch_inventory(id, quantity).map_err(db_error)
    }
}
