//! Cart count badge in the navigation bar.

use std::cell::Cell;
use std::rc::Rc;

use crate::store::CartObserver;

/// What a count badge should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadge {
    pub count: u64,
}

impl CartBadge {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }

    /// Hidden when the cart is empty.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        self.count > 0
    }

    /// Text content for a visible badge.
    #[must_use]
    pub fn text(self) -> Option<String> {
        self.is_visible().then(|| self.count.to_string())
    }
}

/// A badge element bound to a store.
///
/// Clones share the same badge, so one clone can be subscribed to the store
/// while another is read by the page.
#[derive(Debug, Clone, Default)]
pub struct BadgeSlot(Rc<Cell<CartBadge>>);

impl BadgeSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn badge(&self) -> CartBadge {
        self.0.get()
    }
}

impl CartObserver for BadgeSlot {
    fn cart_count_changed(&self, count: u64) {
        self.0.set(CartBadge::new(count));
    }
}
