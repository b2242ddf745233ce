//! Inventory and cart records, as exchanged with the remote store.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::ItemId;

/// Stock available to add to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub content: String,
    pub quantity: u32,
}

/// A quantity of one inventory item committed to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub content: String,
    pub quantity: u32,
}

/// Body of `POST /cart`. The backend assigns an id when none is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub content: String,
    pub quantity: u32,
}

impl NewCartItem {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() {
            return Err(DomainError::validation("content cannot be empty"));
        }
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }

    pub fn into_cart_item(self, id: ItemId) -> CartItem {
        CartItem {
            id,
            content: self.content,
            quantity: self.quantity,
        }
    }
}

impl From<&InventoryItem> for NewCartItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: Some(item.id),
            content: item.content.clone(),
            quantity: item.quantity,
        }
    }
}

/// Body of `PATCH /cart/:id` and `PATCH /inventory/:id`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPatch {
    pub quantity: u32,
}

/// Response of `DELETE /cart/:id`.
///
/// json-server style backends reply with `{}`, others echo the removed
/// record, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl From<CartItem> for DeletedRecord {
    fn from(item: CartItem) -> Self {
        Self {
            id: Some(item.id),
            content: Some(item.content),
            quantity: Some(item.quantity),
        }
    }
}

/// The two remote collections mirrored by the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Inventory,
    Cart,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Inventory => "inventory",
            Resource::Cart => "cart",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
