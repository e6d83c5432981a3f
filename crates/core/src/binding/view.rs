//! Display data for the cart page.

use crate::cart::Cart;
use crate::types::LineItem;

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    /// `"ADE #9"`, `"ADE"`, `"#9"`, or `None` when not personalized.
    pub personalization: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
        }
    }

    /// Build the view with prices formatted using `currency_symbol`.
    #[must_use]
    pub fn new(cart: &Cart, currency_symbol: &str) -> Self {
        Self {
            items: cart
                .iter()
                .map(|item| CartLineView::new(item, currency_symbol))
                .collect(),
            item_count: cart.count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartLineView {
    #[must_use]
    pub fn new(item: &LineItem, currency_symbol: &str) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            size: item.size.to_string(),
            quantity: item.quantity.get(),
            price: item.price.display(currency_symbol),
            personalization: personalization(item),
        }
    }
}

fn personalization(item: &LineItem) -> Option<String> {
    match (item.custom_name.is_empty(), item.custom_number.is_empty()) {
        (true, true) => None,
        (false, true) => Some(item.custom_name.clone()),
        (true, false) => Some(format!("#{}", item.custom_number)),
        (false, false) => Some(format!("{} #{}", item.custom_name, item.custom_number)),
    }
}
