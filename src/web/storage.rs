//! `localStorage` settings backend.

use web_sys::Storage;

use crate::error::{Result, SpriteTabError};
use crate::settings::SettingsBackend;

#[derive(Clone, Copy, Default)]
pub struct LocalStorageBackend;

fn local_storage() -> Result<Storage> {
    web_sys::window()
        .ok_or_else(|| SpriteTabError::Storage("no window".into()))?
        .local_storage()
        .map_err(|e| SpriteTabError::from_js("localStorage", &e))?
        .ok_or_else(|| SpriteTabError::Storage("localStorage unavailable".into()))
}

impl SettingsBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| SpriteTabError::from_js("localStorage read", &e))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| SpriteTabError::from_js("localStorage write", &e))
    }
}
