//! Cart store settings shared by every page of the site.

use thiserror::Error;

/// Storage key every page reads and writes the cart under.
pub const DEFAULT_STORAGE_KEY: &str = "eketar_cart";

/// Currency symbol used when formatting prices.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

/// Invalid cart settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartConfigError {
    #[error("storage key cannot be empty")]
    EmptyStorageKey,
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key holding the serialized cart in storage.
    storage_key: String,
    /// Prefix for formatted prices.
    pub currency_symbol: String,
}

impl CartConfig {
    /// Create a configuration with a custom storage key.
    ///
    /// # Errors
    ///
    /// Returns `CartConfigError::EmptyStorageKey` if the key is blank.
    pub fn new(storage_key: impl Into<String>) -> Result<Self, CartConfigError> {
        let storage_key = storage_key.into();
        if storage_key.trim().is_empty() {
            return Err(CartConfigError::EmptyStorageKey);
        }
        Ok(Self {
            storage_key,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        })
    }

    /// Replace the currency symbol.
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_canonical_key() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key(), "eketar_cart");
        assert_eq!(config.currency_symbol, "₦");
    }

    #[test]
    fn test_rejects_blank_key() {
        assert_eq!(CartConfig::new(""), Err(CartConfigError::EmptyStorageKey));
        assert_eq!(CartConfig::new("   "), Err(CartConfigError::EmptyStorageKey));
    }

    #[test]
    fn test_custom_key_and_symbol() {
        let config = CartConfig::new("preview_cart")
            .unwrap()
            .with_currency_symbol("$");
        assert_eq!(config.storage_key(), "preview_cart");
        assert_eq!(config.currency_symbol, "$");
    }
}
