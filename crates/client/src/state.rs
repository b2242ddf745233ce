//! Observable local mirror of the remote inventory and cart.
//!
//! Assigning either collection notifies the single registered subscriber
//! synchronously. Reading never notifies.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cartsync_core::{CartItem, InventoryItem, ItemId};

/// Callback invoked after every assignment. It takes no arguments: it reads
/// the current values back through the getters.
pub type Subscriber = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Default)]
struct Collections {
    inventory: Vec<InventoryItem>,
    cart: Vec<CartItem>,
}

#[derive(Default)]
pub struct CartState {
    collections: Mutex<Collections>,
    subscriber: Mutex<Option<Subscriber>>,
}

impl core::fmt::Debug for CartState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let collections = lock(&self.collections);
        f.debug_struct("CartState")
            .field("inventory", &collections.inventory)
            .field("cart", &collections.cart)
            .field("subscribed", &lock(&self.subscriber).is_some())
            .finish()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory(&self) -> Vec<InventoryItem> {
        lock(&self.collections).inventory.clone()
    }

    pub fn cart(&self) -> Vec<CartItem> {
        lock(&self.collections).cart.clone()
    }

    pub fn inventory_item(&self, id: ItemId) -> Option<InventoryItem> {
        lock(&self.collections)
            .inventory
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    pub fn cart_item(&self, id: ItemId) -> Option<CartItem> {
        lock(&self.collections)
            .cart
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    pub fn set_inventory(&self, inventory: Vec<InventoryItem>) {
        lock(&self.collections).inventory = inventory;
        self.notify();
    }

    pub fn set_cart(&self, cart: Vec<CartItem>) {
        lock(&self.collections).cart = cart;
        self.notify();
    }

    /// Mutate the matching inventory row in place.
    ///
    /// This is an optimistic edit, not an assignment: the subscriber is not
    /// notified. Returns `false` when no row has that id.
    pub fn patch_inventory_item<F>(&self, id: ItemId, f: F) -> bool
    where
        F: FnOnce(&mut InventoryItem),
    {
        let mut collections = lock(&self.collections);
        match collections.inventory.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// Register the subscriber, replacing any previous one.
    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *lock(&self.subscriber) = Some(Arc::new(f));
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.subscriber).is_some()
    }

    // Both locks are released before the callback runs so it can read back.
    fn notify(&self) {
        let subscriber = lock(&self.subscriber).clone();
        if let Some(subscriber) = subscriber {
            subscriber();
        }
    }
}
