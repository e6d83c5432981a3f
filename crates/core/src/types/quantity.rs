//! Positive line-item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i64),
    /// The value does not fit in a `u32`.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// The number of units on a cart row.
///
/// A `Quantity` is always at least 1. Deserializing `0` fails, so a persisted
/// cart containing an empty row is rejected as a schema mismatch.
///
/// ```
/// use eketar_core::Quantity;
///
/// assert_eq!(Quantity::new(3).unwrap().get(), 3);
/// assert!(Quantity::new(0).is_err());
/// assert_eq!(Quantity::from_request(None), Quantity::ONE);
/// assert_eq!(Quantity::from_request(Some(-2)), Quantity::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// The largest representable quantity.
    pub const MAX: Self = Self(u32::MAX);

    /// Create a quantity from a signed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below 1 or above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::NotPositive(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge { max: u32::MAX })
    }

    /// Quantity for an add request: unset or non-positive becomes 1, and
    /// anything above `u32::MAX` saturates.
    #[must_use]
    pub fn from_request(requested: Option<i64>) -> Self {
        match requested.map(Self::new) {
            Some(Ok(quantity)) => quantity,
            Some(Err(QuantityError::TooLarge { .. })) => Self::MAX,
            Some(Err(QuantityError::NotPositive(_))) | None => Self::ONE,
        }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Additive merge, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(QuantityError::NotPositive(0));
        }
        Ok(Self(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
