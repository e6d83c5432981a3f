use super::{KeyValueStorage, StorageError};

/// The page's `window.localStorage`.
///
/// The handle is looked up on every call; storage can be disabled by the
/// browser at any time (private mode, site settings).
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

fn backend_error(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

impl KeyValueStorage for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| backend_error(&e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| backend_error(&e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| backend_error(&e))
    }
}
