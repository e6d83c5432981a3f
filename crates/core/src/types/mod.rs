//! Core types for the EKETAR cart.
//!
//! This module provides type-safe wrappers for the values a cart row carries.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::*;
pub use line_item::{LineItem, NewLineItem};
pub use price::Price;
pub use quantity::{Quantity, QuantityError};
