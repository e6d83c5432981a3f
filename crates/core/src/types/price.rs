//! Display price for a product.
//!
//! Prices are whole currency units (no minor units). The store never does
//! arithmetic on them; they are carried through to the cart page and
//! formatted for display.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A unit price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Read a price back from rendered text such as `"₦25,000"`.
    ///
    /// Every non-digit is dropped. Returns `None` when there are no digits or
    /// the number does not fit in a `u64`.
    #[must_use]
    pub fn parse_display(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok().map(Self)
    }

    /// Format for display with a currency symbol and thousands grouping
    /// (e.g., `"₦25,000"`).
    #[must_use]
    pub fn display(self, currency_symbol: &str) -> String {
        format!("{currency_symbol}{}", group_thousands(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
