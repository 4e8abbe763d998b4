use web_sys::{Storage, Window};

use crate::error::{describe_js, ThemeError};
use crate::state::theme::{Theme, ThemeStore};

pub fn window() -> Result<Window, ThemeError> {
    web_sys::window().ok_or(ThemeError::NoWindow)
}

pub fn local_storage() -> Result<Storage, ThemeError> {
    window()?
        .local_storage()
        .map_err(|_| ThemeError::StorageUnavailable)?
        .ok_or(ThemeError::StorageUnavailable)
}

/// Theme slot in `localStorage`, keyed per origin.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ThemeStore for LocalStorageStore {
    fn load_raw(&self) -> Option<String> {
        let storage = match local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("{}; treating theme as unset", err);
                return None;
            }
        };
        match storage.get_item(&self.key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read `{}`: {}", self.key, describe_js(&err));
                None
            }
        }
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        local_storage()?
            .set_item(&self.key, theme.as_str())
            .map_err(|err| ThemeError::StorageWrite(describe_js(&err)))
    }
}
