//! EKETAR Core - Cart store for the EKETAR storefront.
//!
//! The storefront is a set of static pages. The cart lives entirely on the
//! shopper's device: an ordered list of rows, one per product and size,
//! written through to origin-scoped key-value storage after every change so
//! that every page (and the next visit) sees the same cart.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for product IDs, sizes, quantities and prices; cart rows
//! - [`cart`] - The ordered, merge-on-add row collection
//! - [`storage`] - Key-value storage trait and backends (memory, file, `localStorage`)
//! - [`store`] - [`CartStore`], the write-through store pages talk to
//! - [`binding`] - Product page validation, count badges, cart page view data
//! - [`config`] - Storage key and currency settings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod binding;
pub mod cart;
pub mod config;
pub mod storage;
pub mod store;
pub mod types;

pub use cart::{Cart, QuantityUpdate};
pub use config::{CartConfig, CartConfigError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CartObserver, CartStore};
pub use types::*;
