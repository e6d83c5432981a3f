//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EKETAR_STORAGE_PATH` - File backing the site's local storage (default: .eketar/storage.json)
//! - `EKETAR_CART_KEY` - Storage key holding the cart (default: `eketar_cart`)
//! - `EKETAR_CURRENCY_SYMBOL` - Prefix for formatted prices (default: ₦)

use std::path::PathBuf;

use eketar_core::{CartConfig, config::DEFAULT_STORAGE_KEY};
use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = ".eketar/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON file standing in for the browser's local storage
    pub storage_path: PathBuf,
    /// Cart store settings
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path = lookup("EKETAR_STORAGE_PATH")
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string());
        if storage_path.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "EKETAR_STORAGE_PATH".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let key = lookup("EKETAR_CART_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let mut cart = CartConfig::new(key).map_err(|e| {
            ConfigError::InvalidEnvVar("EKETAR_CART_KEY".to_string(), e.to_string())
        })?;
        if let Some(symbol) = lookup("EKETAR_CURRENCY_SYMBOL") {
            cart = cart.with_currency_symbol(symbol);
        }

        Ok(Self {
            storage_path: PathBuf::from(storage_path),
            cart,
        })
    }
}
