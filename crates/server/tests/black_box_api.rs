//! REST contract, exercised over a real socket.

use reqwest::StatusCode;
use serde_json::json;

use cartsync_core::{CartItem, InventoryItem, ItemId};
use cartsync_store::Seed;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(seed: Seed) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = cartsync_server::app::build_app(seed);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn fruit_seed() -> Seed {
    Seed {
        inventory: vec![
            InventoryItem { id: ItemId::new(1), content: "Apple".into(), quantity: 3 },
            InventoryItem { id: ItemId::new(2), content: "Pear".into(), quantity: 0 },
        ],
        cart: vec![CartItem { id: ItemId::new(5), content: "Fig".into(), quantity: 2 }],
    }
}

#[tokio::test]
async fn lists_both_collections() {
    let srv = TestServer::spawn(fruit_seed()).await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/inventory", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let inventory: Vec<InventoryItem> = res.json().await.unwrap();
    assert_eq!(inventory.len(), 2);

    let res = client.get(format!("{}/cart", srv.base_url)).send().await.unwrap();
    let cart: Vec<CartItem> = res.json().await.unwrap();
    assert_eq!(cart, fruit_seed().cart);
}

#[tokio::test]
async fn cart_lifecycle_create_patch_delete() {
    let srv = TestServer::spawn(fruit_seed()).await;
    let client = reqwest::Client::new();

    // Create without an id: server assigns the next one.
    let res = client
        .post(format!("{}/cart", srv.base_url))
        .json(&json!({ "content": "Plum", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 6);

    // Patch
    let res = client
        .patch(format!("{}/cart/6", srv.base_url))
        .json(&json!({ "quantity": 4 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let patched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(patched["quantity"], 4);

    // Delete echoes the removed record.
    let res = client
        .delete(format!("{}/cart/6", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let deleted: serde_json::Value = res.json().await.unwrap();
    assert_eq!(deleted["content"], "Plum");

    let res = client
        .delete(format!("{}/cart/6", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_bodies_are_rejected() {
    let srv = TestServer::spawn(fruit_seed()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/cart", srv.base_url))
        .json(&json!({ "content": "", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .patch(format!("{}/inventory/1", srv.base_url))
        .json(&json!({ "quantity": -1 }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());
    let res = client
        .patch(format!("{}/cart/5", srv.base_url))
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(format!("{}/cart", srv.base_url)).send().await.unwrap();
    let cart: Vec<CartItem> = res.json().await.unwrap();
    assert_eq!(cart[0].quantity, 2);
}
