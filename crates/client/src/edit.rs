//! Drafts for cart rows in edit mode.
//!
//! A draft is a local copy of the cart row taken when editing starts. The
//! +/- controls only touch the draft; nothing is sent until save.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cartsync_core::{CartItem, ItemId};

/// Lowest quantity a draft can be decreased to.
pub const MIN_DRAFT_QUANTITY: u32 = 1;

#[derive(Debug, Default)]
pub struct EditBuffer {
    drafts: Mutex<BTreeMap<ItemId, CartItem>>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn drafts(&self) -> MutexGuard<'_, BTreeMap<ItemId, CartItem>> {
        self.drafts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start (or restart) editing from the given row.
    pub fn begin(&self, item: CartItem) -> CartItem {
        self.drafts().insert(item.id, item.clone());
        item
    }

    pub fn get(&self, id: ItemId) -> Option<CartItem> {
        self.drafts().get(&id).cloned()
    }

    pub fn increase(&self, id: ItemId) -> Option<u32> {
        self.drafts().get_mut(&id).map(|draft| {
            draft.quantity = draft.quantity.saturating_add(1);
            draft.quantity
        })
    }

    pub fn decrease(&self, id: ItemId) -> Option<u32> {
        self.drafts().get_mut(&id).map(|draft| {
            if draft.quantity > MIN_DRAFT_QUANTITY {
                draft.quantity -= 1;
            }
            draft.quantity
        })
    }

    pub fn discard(&self, id: ItemId) -> Option<CartItem> {
        self.drafts().remove(&id)
    }

    pub fn clear(&self) {
        self.drafts().clear();
    }

    /// All drafts, ordered by id.
    pub fn drafts_snapshot(&self) -> Vec<CartItem> {
        self.drafts().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(quantity: u32) -> CartItem {
        CartItem { id: ItemId::new(5), content: "Pear".into(), quantity }
    }

    #[test]
    fn controls_only_touch_drafts_being_edited() {
        let buffer = EditBuffer::new();
        assert_eq!(buffer.increase(ItemId::new(5)), None);
        buffer.begin(row(2));
        assert_eq!(buffer.increase(ItemId::new(5)), Some(3));
        assert_eq!(buffer.discard(ItemId::new(5)).unwrap().quantity, 3);
        assert!(buffer.get(ItemId::new(5)).is_none());
    }

    #[test]
    fn begin_restarts_from_current_row() {
        let buffer = EditBuffer::new();
        buffer.begin(row(2));
        buffer.increase(ItemId::new(5));
        buffer.begin(row(2));
        assert_eq!(buffer.get(ItemId::new(5)).unwrap().quantity, 2);
    }

    proptest! {
        /// Property: decrease never takes a draft below one; increase is unbounded.
        #[test]
        fn draft_never_drops_below_one(
            start in 1u32..20,
            steps in prop::collection::vec(any::<bool>(), 0..60)
        ) {
            let buffer = EditBuffer::new();
            buffer.begin(row(start));
            let mut expected = start;
            for up in steps {
                let got = if up { buffer.increase(ItemId::new(5)) } else { buffer.decrease(ItemId::new(5)) };
                expected = if up { expected + 1 } else { expected.saturating_sub(1).max(1) };
                prop_assert_eq!(got, Some(expected));
                prop_assert!(expected >= MIN_DRAFT_QUANTITY);
            }
        }
    }
}
