//! Cart commands.
//!
//! Each invocation behaves like one page load: the store is opened (and
//! hydrated) from the storage file, one operation runs, and the process exits.

use eketar_core::binding::{CartBadge, CartView, ProductSelection, submit_selection};
use eketar_core::{CartStore, FileStorage, ProductId, QuantityUpdate, Size};
use tracing::{debug, info};

use crate::config::CliConfig;

/// Open the store the way a page does on load.
fn open_store(config: &CliConfig) -> CartStore<FileStorage> {
    debug!(path = %config.storage_path.display(), "Opening cart storage");
    let mut store = CartStore::new(
        FileStorage::new(&config.storage_path),
        config.cart.clone(),
    );
    store.subscribe(|count: u64| {
        let badge = CartBadge::new(count);
        debug!(count, visible = badge.is_visible(), "Cart badge refreshed");
    });
    store.init();
    store
}

/// Add a product through the product page validation.
///
/// # Errors
///
/// Returns the shopper-facing validation message if the selection is rejected.
pub fn add(config: &CliConfig, selection: ProductSelection) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config);
    let redirect = submit_selection(&mut store, selection)?;
    info!(
        items = store.count(),
        next = redirect.location,
        "Added to cart"
    );
    Ok(())
}

/// Remove a row.
pub fn remove(config: &CliConfig, id: &str, size: &str) {
    let mut store = open_store(config);
    if store.remove_from_cart(&ProductId::new(id), &Size::new(size)) {
        info!(items = store.count(), "Removed {id} ({size})");
    } else {
        info!("No {id} ({size}) in cart");
    }
}

/// Set a row's quantity; zero or negative removes it.
pub fn update(config: &CliConfig, id: &str, size: &str, quantity: i64) {
    let mut store = open_store(config);
    match store.update_quantity(&ProductId::new(id), &Size::new(size), quantity) {
        QuantityUpdate::Updated => info!(items = store.count(), "Set {id} ({size}) to {quantity}"),
        QuantityUpdate::Removed => info!(items = store.count(), "Removed {id} ({size})"),
        QuantityUpdate::NotFound => info!("No {id} ({size}) in cart"),
    }
}

/// Empty the cart.
pub fn clear(config: &CliConfig) {
    let mut store = open_store(config);
    store.clear_cart();
    info!("Cart cleared");
}

/// List the cart rows.
pub fn show(config: &CliConfig) {
    let store = open_store(config);
    let view = CartView::new(store.cart(), &store.config().currency_symbol);

    if view.is_empty() {
        info!("Your cart is empty");
        return;
    }

    info!("Cart ({} items)", view.item_count);
    for line in &view.items {
        match &line.personalization {
            Some(custom) => info!(
                "  {} x{} [{}] {} ({custom})",
                line.name, line.quantity, line.size, line.price
            ),
            None => info!(
                "  {} x{} [{}] {}",
                line.name, line.quantity, line.size, line.price
            ),
        }
    }
}

/// Show the badge count.
pub fn count(config: &CliConfig) {
    let store = open_store(config);
    let badge = CartBadge::new(store.count());
    match badge.text() {
        Some(text) => info!("{text}"),
        None => info!("0 (badge hidden)"),
    }
}
