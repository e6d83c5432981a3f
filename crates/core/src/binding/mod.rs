//! Glue between the site's pages and the cart store.
//!
//! Nothing here touches a DOM. Pages read their form controls into a
//! [`ProductSelection`], hand it to [`submit_selection`], attach a
//! [`BadgeSlot`] per count badge, and render the cart page from a
//! [`CartView`].

mod badge;
mod selection;
mod view;

pub use badge::{BadgeSlot, CartBadge};
pub use selection::{ProductSelection, SelectionError, SizeSelector};
pub use view::{CartLineView, CartView};

use tracing::{info, instrument, warn};

use crate::storage::KeyValueStorage;
use crate::store::CartStore;

/// Page the shopper is sent to after adding a product.
pub const CART_PAGE: &str = "cart.html";

/// Where the page should navigate next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub location: &'static str,
}

/// Handle "Add to cart" on a product page.
///
/// # Errors
///
/// Returns a [`SelectionError`] to show to the shopper when the form is
/// incomplete. The store is not touched in that case.
#[instrument(skip(store, selection))]
pub fn submit_selection<S: KeyValueStorage>(
    store: &mut CartStore<S>,
    selection: ProductSelection,
) -> Result<Redirect, SelectionError> {
    let item = selection.into_line_item().inspect_err(|e| {
        warn!(error = %e, "Rejected product selection");
    })?;

    info!(id = %item.id, size = %item.size, "Adding product to cart");
    store.add_to_cart(item);

    Ok(Redirect {
        location: CART_PAGE,
    })
}
