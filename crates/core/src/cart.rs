//! The ordered collection of cart rows.

use serde::{Deserialize, Serialize};

use crate::types::{CartKey, LineItem, NewLineItem, ProductId, Quantity, QuantityError, Size};

/// Result of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The row now has the requested quantity, or `u32::MAX` if the request
    /// was larger.
    Updated,
    /// The requested quantity was zero or negative, so the row was dropped.
    Removed,
    /// No row has that identity key.
    NotFound,
}

/// A shopping cart: rows in insertion order, at most one per `(id, size)`.
///
/// Serializes as a bare JSON array of [`LineItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from rows, merging any rows that share an identity key
    /// into the first one.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.merge(item);
        }
        cart
    }

    /// Add a product. A row with the same `(id, size)` has its quantity
    /// increased and keeps its name, price and personalization.
    pub fn add(&mut self, request: NewLineItem) {
        self.merge(LineItem::from(request));
    }

    fn merge(&mut self, item: LineItem) {
        match self.find_mut(item.key()) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Remove the row with the given identity key. Returns whether a row was
    /// removed.
    pub fn remove(&mut self, id: &ProductId, size: &Size) -> bool {
        let key = CartKey::new(id, size);
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        self.items.len() != before
    }

    /// Set a row's quantity. Zero or negative removes the row; values above
    /// `u32::MAX` saturate.
    pub fn set_quantity(&mut self, id: &ProductId, size: &Size, quantity: i64) -> QuantityUpdate {
        let quantity = match Quantity::new(quantity) {
            Ok(quantity) => quantity,
            Err(QuantityError::TooLarge { .. }) => Quantity::MAX,
            Err(QuantityError::NotPositive(_)) => {
                return if self.remove(id, size) {
                    QuantityUpdate::Removed
                } else {
                    QuantityUpdate::NotFound
                };
            }
        };

        match self.find_mut(CartKey::new(id, size)) {
            Some(item) => {
                item.quantity = quantity;
                QuantityUpdate::Updated
            }
            None => QuantityUpdate::NotFound,
        }
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all rows.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Look up a row by identity key.
    #[must_use]
    pub fn find(&self, id: &ProductId, size: &Size) -> Option<&LineItem> {
        let key = CartKey::new(id, size);
        self.items.iter().find(|item| item.key() == key)
    }

    fn find_mut(&mut self, key: CartKey<'_>) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.key() == key)
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
