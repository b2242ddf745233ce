//! Reconciliation controller.
//!
//! Every user action has the same two phases:
//! 1. An optimistic local change, applied before any request is issued.
//! 2. The remote write, followed by a re-fetch of whichever collection
//!    changed. The fetched collection replaces local state, which notifies
//!    the subscriber and redraws the view.
//!
//! On failure the action is abandoned and logged. There is no rollback: the
//! view keeps the optimistic value until the next successful sync.

use std::sync::Arc;

use cartsync_core::{CartItem, InventoryItem, ItemId, NewCartItem, Resource};
use cartsync_store::{CheckoutOutcome, RemoteStore};

use crate::dispatch::{self, Action, ClickEvent};
use crate::edit::EditBuffer;
use crate::error::ActionError;
use crate::freshness::{Freshness, Ticket};
use crate::render::RenderSink;
use crate::state::CartState;

pub struct Controller<S> {
    store: Arc<S>,
    state: Arc<CartState>,
    sink: Arc<dyn RenderSink>,
    edits: EditBuffer,
    freshness: Freshness,
}

impl<S> Controller<S>
where
    S: RemoteStore + 'static,
{
    pub fn new(store: Arc<S>, state: Arc<CartState>, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            store,
            state,
            sink,
            edits: EditBuffer::new(),
            freshness: Freshness::new(),
        }
    }

    pub fn state(&self) -> &Arc<CartState> {
        &self.state
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn edits(&self) -> &EditBuffer {
        &self.edits
    }

    /// Wire the view to state, then load both collections.
    ///
    /// The subscriber is registered before any request so the initial load
    /// always renders.
    pub async fn init(&self) -> Result<(), ActionError> {
        let state = Arc::downgrade(&self.state);
        let sink = Arc::clone(&self.sink);
        self.state.subscribe(move || {
            if let Some(state) = state.upgrade() {
                sink.render(&state.inventory(), &state.cart());
            }
        });

        let inventory_ticket = self.freshness.issue(Resource::Inventory);
        let cart_ticket = self.freshness.issue(Resource::Cart);

        let loaded = tokio::try_join!(self.store.fetch_inventory(), self.store.fetch_cart());
        let (inventory, cart) = match loaded {
            Ok(collections) => collections,
            Err(err) => {
                tracing::error!("initial load failed: {err}");
                return Err(err.into());
            }
        };

        tracing::info!(
            inventory = inventory.len(),
            cart = cart.len(),
            "initial state loaded"
        );
        self.commit_inventory(inventory_ticket, inventory);
        self.commit_cart(cart_ticket, cart);
        Ok(())
    }

    /// Add the whole available quantity of an inventory item to the cart.
    pub async fn add_to_cart(&self, id: ItemId) -> Result<(), ActionError> {
        let item = self.find_inventory(id)?;
        if item.quantity == 0 {
            return Err(ActionError::OutOfStock(id));
        }

        let entry = NewCartItem::from(&item);
        self.state.patch_inventory_item(id, |item| item.quantity = 0);

        let (cart, inventory) =
            tokio::join!(self.push_cart_entry(&entry), self.zero_inventory(id));

        match (cart, inventory) {
            (Err(cart_err), Err(inventory_err)) => {
                tracing::error!(%id, "error zeroing inventory: {inventory_err}");
                Err(cart_err)
            }
            (cart, inventory) => cart.and(inventory),
        }
    }

    pub async fn increase_inventory(&self, id: ItemId) -> Result<(), ActionError> {
        let item = self.find_inventory(id)?;
        let quantity = item.quantity.saturating_add(1);
        tracing::debug!(%id, quantity, "increasing {}", item.content);
        self.set_inventory_quantity(id, quantity).await
    }

    pub async fn decrease_inventory(&self, id: ItemId) -> Result<(), ActionError> {
        let item = self.find_inventory(id)?;
        if item.quantity == 0 {
            return Err(ActionError::QuantityFloor(id));
        }
        let quantity = item.quantity - 1;
        tracing::debug!(%id, quantity, "decreasing {}", item.content);
        self.set_inventory_quantity(id, quantity).await
    }

    /// Switch a cart row to edit mode. Returns the fresh draft.
    pub fn begin_edit(&self, id: ItemId) -> Result<CartItem, ActionError> {
        let item = self
            .state
            .cart_item(id)
            .ok_or(ActionError::not_found(Resource::Cart, id))?;
        tracing::debug!(%id, quantity = item.quantity, "editing {}", item.content);
        Ok(self.edits.begin(item))
    }

    pub fn increase_draft(&self, id: ItemId) -> Result<u32, ActionError> {
        self.edits.increase(id).ok_or(ActionError::NotEditing(id))
    }

    /// Decrease a draft quantity; it never goes below one.
    pub fn decrease_draft(&self, id: ItemId) -> Result<u32, ActionError> {
        self.edits.decrease(id).ok_or(ActionError::NotEditing(id))
    }

    /// Send the draft quantity. The draft is kept if the update fails.
    pub async fn save_edit(&self, id: ItemId) -> Result<(), ActionError> {
        let draft = self.edits.get(id).ok_or(ActionError::NotEditing(id))?;
        self.store.update_cart_quantity(id, draft.quantity).await?;
        tracing::info!(%id, quantity = draft.quantity, "saved cart quantity");
        self.edits.discard(id);
        self.refresh_cart().await
    }

    pub async fn delete_cart_item(&self, id: ItemId) -> Result<(), ActionError> {
        self.store.delete_cart_item(id).await?;
        tracing::info!(%id, "deleted from cart");
        self.edits.discard(id);
        self.refresh_cart().await
    }

    /// Empty the cart remotely, then clear it locally.
    ///
    /// The local cart is cleared even when some deletes failed; those lines
    /// are still on the server and reappear on the next cart re-fetch.
    pub async fn checkout(&self) -> Result<CheckoutOutcome, ActionError> {
        let outcome = self.store.checkout().await?;
        for (id, err) in &outcome.failed {
            tracing::warn!(%id, "checkout could not delete cart line: {err}");
        }

        self.edits.clear();
        let ticket = self.freshness.issue(Resource::Cart);
        self.commit_cart(ticket, Vec::new());
        tracing::info!(deleted = outcome.deleted.len(), "checkout successful");
        Ok(outcome)
    }

    /// Run one action to completion, logging instead of returning failures.
    pub async fn dispatch(&self, action: Action) {
        let result = match action {
            Action::AddToCart(id) => self.add_to_cart(id).await,
            Action::IncreaseInventory(id) => self.increase_inventory(id).await,
            Action::DecreaseInventory(id) => self.decrease_inventory(id).await,
            Action::EditCartItem(id) => self.begin_edit(id).map(drop),
            Action::IncreaseDraft(id) => self.increase_draft(id).map(drop),
            Action::DecreaseDraft(id) => self.decrease_draft(id).map(drop),
            Action::SaveCartItem(id) => self.save_edit(id).await,
            Action::DeleteCartItem(id) => self.delete_cart_item(id).await,
            Action::Checkout => self.checkout().await.map(drop),
        };

        if let Err(err) = result {
            report(action, &err);
        }
    }

    /// Entry point for delegated clicks.
    pub async fn handle_click(&self, event: &ClickEvent) {
        match dispatch::resolve(event) {
            Ok(Some(action)) => self.dispatch(action).await,
            Ok(None) => tracing::trace!(container = ?event.container, "click ignored"),
            Err(err) => tracing::warn!(container = ?event.container, "{err}"),
        }
    }

    /// Handle a click without blocking the caller.
    pub fn spawn_click(self: &Arc<Self>, event: ClickEvent) -> tokio::task::JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.handle_click(&event).await })
    }

    fn find_inventory(&self, id: ItemId) -> Result<InventoryItem, ActionError> {
        self.state
            .inventory_item(id)
            .ok_or(ActionError::not_found(Resource::Inventory, id))
    }

    async fn push_cart_entry(&self, entry: &NewCartItem) -> Result<(), ActionError> {
        self.store.create_cart_item(entry).await?;
        tracing::info!("added {} x{} to cart", entry.content, entry.quantity);
        self.refresh_cart().await
    }

    async fn zero_inventory(&self, id: ItemId) -> Result<(), ActionError> {
        self.set_inventory_quantity(id, 0).await
    }

    async fn set_inventory_quantity(&self, id: ItemId, quantity: u32) -> Result<(), ActionError> {
        self.store.update_inventory_quantity(id, quantity).await?;
        self.refresh_inventory().await
    }

    async fn refresh_cart(&self) -> Result<(), ActionError> {
        let ticket = self.freshness.issue(Resource::Cart);
        let cart = self.store.fetch_cart().await?;
        self.commit_cart(ticket, cart);
        Ok(())
    }

    async fn refresh_inventory(&self) -> Result<(), ActionError> {
        let ticket = self.freshness.issue(Resource::Inventory);
        let inventory = self.store.fetch_inventory().await?;
        self.commit_inventory(ticket, inventory);
        Ok(())
    }

    fn commit_cart(&self, ticket: Ticket, cart: Vec<CartItem>) {
        let state = &self.state;
        if !self.freshness.commit_with(ticket, || state.set_cart(cart)) {
            tracing::debug!(resource = %ticket.resource(), "dropping stale response");
        }
    }

    fn commit_inventory(&self, ticket: Ticket, inventory: Vec<InventoryItem>) {
        let state = &self.state;
        if !self.freshness.commit_with(ticket, || state.set_inventory(inventory)) {
            tracing::debug!(resource = %ticket.resource(), "dropping stale response");
        }
    }
}

fn report(action: Action, err: &ActionError) {
    match err {
        e if e.is_noop() => tracing::info!(?action, "{e}"),
        ActionError::Remote(e) => tracing::error!(?action, "remote call failed: {e}"),
        e => tracing::warn!(?action, "{e}"),
    }
}
