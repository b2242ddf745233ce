//! Interactive cart shell.
//!
//! Each command is translated into the click a browser user would make and
//! routed through the same dispatch table.

use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::io::{AsyncBufReadExt, BufReader};

use cartsync_client::dispatch::{CART_ROW, INVENTORY_ROW};
use cartsync_client::{
    CartState, ClickEvent, ClientConfig, Container, Controller, RenderSink, TerminalSink,
};
use cartsync_store::HttpStore;

const HELP: &str = "commands: add N | inc N | dec N | edit N | more N | less N | save N | delete N | checkout | show | help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cartsync_observability::init();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "starting cart shell");

    let store = Arc::new(HttpStore::new(config.api_url.clone()));
    let state = Arc::new(CartState::new());
    let sink = Arc::new(TerminalSink::new(std::io::stdout()));
    let controller = Controller::new(store, state.clone(), sink.clone());

    controller
        .init()
        .await
        .with_context(|| format!("failed to load cart from {}", config.api_url))?;

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "show" => sink.render(&state.inventory(), &state.cart()),
            _ => match parse_command(line) {
                Ok(event) => {
                    controller.handle_click(&event).await;
                    for draft in controller.edits().drafts_snapshot() {
                        println!("  editing #{} {} x {}", draft.id, draft.content, draft.quantity);
                    }
                }
                Err(err) => println!("{err}"),
            },
        }
    }

    Ok(())
}

/// Translate a shell command into the click it stands for.
fn parse_command(line: &str) -> anyhow::Result<ClickEvent> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    if verb == "checkout" {
        return Ok(ClickEvent::checkout());
    }

    // The id is forwarded verbatim as the row's data-id; the dispatcher
    // validates it like any other attribute.
    let Some(id) = parts.next() else {
        bail!("missing item id; {HELP}");
    };

    let (container, row, control) = match verb {
        "add" => (Container::Inventory, INVENTORY_ROW, "inventory__btn--add"),
        "inc" => (Container::Inventory, INVENTORY_ROW, "inventory__btn--increase"),
        "dec" => (Container::Inventory, INVENTORY_ROW, "inventory__btn--decrease"),
        "edit" => (Container::Cart, CART_ROW, "cart__btn--edit"),
        "more" => (Container::Cart, CART_ROW, "cart__btn--increase"),
        "less" => (Container::Cart, CART_ROW, "cart__btn--decrease"),
        "save" => (Container::Cart, CART_ROW, "cart__btn--save"),
        "delete" => (Container::Cart, CART_ROW, "cart__btn--delete"),
        other => bail!("unknown command {other:?}; {HELP}"),
    };

    Ok(ClickEvent::on_row(container, row, id, &[control]))
}
