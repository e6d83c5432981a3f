//! Integration tests for the EKETAR cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p eketar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_pages` - Product page to cart page flows across page loads
//! - `cart_storage_recovery` - Corrupt, missing and failing storage
//!
//! Each test gets its own storage file under the system temp directory, so a
//! "page load" is simply a fresh [`CartStore`] opened on that file.

use std::path::{Path, PathBuf};

use eketar_core::binding::{BadgeSlot, ProductSelection};
use eketar_core::{CartConfig, CartStore, FileStorage};

/// A site's local storage for one test.
#[derive(Debug)]
pub struct TestSite {
    dir: PathBuf,
}

impl TestSite {
    /// Create an empty site. `name` must be unique per test.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "eketar-integration-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        Self { dir }
    }

    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.join("storage.json")
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open the cart as a freshly loaded page would, with one badge bound.
    #[must_use]
    pub fn load_page(&self) -> (CartStore<FileStorage>, BadgeSlot) {
        let badge = BadgeSlot::new();
        let mut store = CartStore::new(FileStorage::new(self.storage_path()), CartConfig::default());
        store.subscribe(badge.clone());
        store.init();
        (store, badge)
    }

    /// Write a raw value under the cart key, as another tab or a stale
    /// deployment might.
    ///
    /// # Panics
    ///
    /// Panics if the storage file cannot be written.
    pub fn write_raw_cart(&self, raw: &str) {
        use eketar_core::KeyValueStorage;

        let mut storage = FileStorage::new(self.storage_path());
        storage
            .set_item("eketar_cart", raw)
            .expect("failed to seed storage");
    }

    /// Read the raw persisted cart value.
    #[must_use]
    pub fn raw_cart(&self) -> Option<String> {
        use eketar_core::KeyValueStorage;

        FileStorage::new(self.storage_path())
            .get_item("eketar_cart")
            .ok()
            .flatten()
    }
}

impl Drop for TestSite {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// A product page form filled in for the home jersey.
#[must_use]
pub fn jersey_selection(size: Option<&str>, quantity: &str) -> ProductSelection {
    ProductSelection {
        product_id: Some("1".to_string()),
        name: "Home Jersey".to_string(),
        price_text: "₦25,000".to_string(),
        size: size.map(str::to_string),
        quantity: quantity.to_string(),
        custom_name: None,
        custom_number: None,
    }
}
