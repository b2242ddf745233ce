//! View contract.
//!
//! The controller never calls a sink directly: the sink is driven by the
//! state subscriber, which reads the latest collections at call time.

use std::io::Write;
use std::sync::Mutex;

use cartsync_core::{CartItem, InventoryItem};

pub trait RenderSink: Send + Sync {
    fn render(&self, inventory: &[InventoryItem], cart: &[CartItem]);
}

/// Plain-text view for the interactive shell.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn draw(
        out: &mut W,
        inventory: &[InventoryItem],
        cart: &[CartItem],
    ) -> std::io::Result<()> {
        writeln!(out, "Inventory")?;
        for item in inventory {
            writeln!(out, "  #{:<4} {:<20} x {}", item.id, item.content, item.quantity)?;
        }
        writeln!(out, "Cart")?;
        if cart.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for item in cart {
            writeln!(out, "  #{:<4} {:<20} x {}", item.id, item.content, item.quantity)?;
        }
        out.flush()
    }
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn render(&self, inventory: &[InventoryItem], cart: &[CartItem]) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(err) = Self::draw(&mut out, inventory, cart) {
            tracing::error!("failed to render view: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartsync_core::ItemId;

    #[test]
    fn draws_both_lists() {
        let sink = TerminalSink::new(Vec::new());
        sink.render(
            &[InventoryItem { id: ItemId::new(1), content: "Apple".into(), quantity: 3 }],
            &[],
        );
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("Inventory"));
        assert!(text.contains("#1"));
        assert!(text.contains("Apple"));
        assert!(text.contains("(empty)"));
    }
}
