//! In-memory cart/inventory tables with json-server semantics.
//!
//! Shared by `InMemoryStore` and the development server so both backends
//! agree on id assignment, duplicate handling and missing-record behavior.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cartsync_core::{CartItem, InventoryItem, ItemId, NewCartItem};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    #[error("{resource} record {id} not found")]
    NotFound { resource: &'static str, id: ItemId },
    #[error("insert failed, duplicate id {0}")]
    DuplicateId(ItemId),
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Seed document (`db.json` shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
}

impl Seed {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Fruit stand used when no seed file is configured.
    pub fn demo() -> Self {
        let stock = [("Apple", 3), ("Pear", 5), ("Banana", 0), ("Orange", 2)];
        Self {
            inventory: stock
                .iter()
                .enumerate()
                .map(|(idx, (content, quantity))| InventoryItem {
                    id: ItemId::new(idx as u64 + 1),
                    content: (*content).to_string(),
                    quantity: *quantity,
                })
                .collect(),
            cart: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartDb {
    inventory: Vec<InventoryItem>,
    cart: Vec<CartItem>,
}

impl CartDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        Self {
            inventory: seed.inventory,
            cart: seed.cart,
        }
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Insert a cart record. An explicit id must be unused; otherwise the
    /// next id after the current maximum is assigned.
    pub fn insert_cart(&mut self, item: NewCartItem) -> Result<CartItem, DbError> {
        item.validate()
            .map_err(|e| DbError::Validation(e.to_string()))?;

        let id = match item.id {
            Some(id) if self.cart.iter().any(|c| c.id == id) => {
                return Err(DbError::DuplicateId(id));
            }
            Some(id) => id,
            None => self
                .cart
                .iter()
                .map(|c| c.id)
                .max()
                .map(ItemId::next)
                .unwrap_or(ItemId::new(1)),
        };

        let record = item.into_cart_item(id);
        self.cart.push(record.clone());
        Ok(record)
    }

    /// Cart lines always hold at least one unit.
    pub fn patch_cart(&mut self, id: ItemId, quantity: u32) -> Result<CartItem, DbError> {
        if quantity == 0 {
            return Err(DbError::Validation("cart quantity must be positive".into()));
        }
        let record = self
            .cart
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DbError::NotFound { resource: "cart", id })?;
        record.quantity = quantity;
        Ok(record.clone())
    }

    pub fn remove_cart(&mut self, id: ItemId) -> Result<CartItem, DbError> {
        let pos = self
            .cart
            .iter()
            .position(|c| c.id == id)
            .ok_or(DbError::NotFound { resource: "cart", id })?;
        Ok(self.cart.remove(pos))
    }

    pub fn patch_inventory(&mut self, id: ItemId, quantity: u32) -> Result<InventoryItem, DbError> {
        let record = self
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DbError::NotFound {
                resource: "inventory",
                id,
            })?;
        record.quantity = quantity;
        Ok(record.clone())
    }
}
