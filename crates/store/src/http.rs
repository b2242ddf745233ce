//! REST client for the cart/inventory backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use cartsync_core::{
    CartItem, DeletedRecord, InventoryItem, ItemId, NewCartItem, QuantityPatch, Resource,
};

use crate::error::{StoreError, StoreResult};
use crate::remote::RemoteStore;

/// `RemoteStore` backed by the JSON REST API (`/cart`, `/inventory`).
#[derive(Debug, Clone)]
pub struct HttpStore {
    api_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.api_url, resource)
    }

    fn record_url(&self, resource: Resource, id: ItemId) -> String {
        format!("{}/{}/{}", self.api_url, resource, id)
    }
}

/// Send a request and decode the JSON body of a successful response.
async fn send_json<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> StoreResult<T> {
    let resp = req
        .send()
        .await
        .map_err(|e| StoreError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(StoreError::Api(
            status.as_u16(),
            resp.text().await.unwrap_or_default(),
        ));
    }

    resp.json()
        .await
        .map_err(|e| StoreError::Parse(e.to_string()))
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn fetch_cart(&self) -> StoreResult<Vec<CartItem>> {
        let url = self.collection_url(Resource::Cart);
        tracing::debug!(%url, "GET cart");
        send_json(self.client.get(&url)).await
    }

    async fn fetch_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        let url = self.collection_url(Resource::Inventory);
        tracing::debug!(%url, "GET inventory");
        send_json(self.client.get(&url)).await
    }

    async fn create_cart_item(&self, item: &NewCartItem) -> StoreResult<CartItem> {
        let url = self.collection_url(Resource::Cart);
        tracing::debug!(%url, content = %item.content, quantity = item.quantity, "POST cart");
        send_json(self.client.post(&url).json(item)).await
    }

    async fn update_cart_quantity(&self, id: ItemId, quantity: u32) -> StoreResult<CartItem> {
        let url = self.record_url(Resource::Cart, id);
        tracing::debug!(%url, quantity, "PATCH cart");
        send_json(self.client.patch(&url).json(&QuantityPatch { quantity })).await
    }

    async fn delete_cart_item(&self, id: ItemId) -> StoreResult<DeletedRecord> {
        let url = self.record_url(Resource::Cart, id);
        tracing::debug!(%url, "DELETE cart");
        send_json(self.client.delete(&url)).await
    }

    async fn update_inventory_quantity(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> StoreResult<InventoryItem> {
        let url = self.record_url(Resource::Inventory, id);
        tracing::debug!(%url, quantity, "PATCH inventory");
        send_json(self.client.patch(&url).json(&QuantityPatch { quantity })).await
    }
}
