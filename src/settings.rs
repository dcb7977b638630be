//! Layout preferences and their persistence.
//!
//! Settings are stored as one JSON blob under a fixed namespaced key. Loading
//! never fails: a missing or unparseable blob yields the defaults, and each
//! field that is missing or invalid falls back to its own default without
//! discarding the valid ones.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SpriteTabError};

/// Key the settings blob is persisted under.
pub const STORAGE_KEY: &str = "stash_plugin_sprite_settings";

/// Smallest allowed grid column count.
pub const MIN_COLUMNS: u8 = 1;
/// Largest allowed grid column count.
pub const MAX_COLUMNS: u8 = 12;

/// Layout preferences for the sprite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Number of grid columns, always within `MIN_COLUMNS..=MAX_COLUMNS`.
    #[serde(rename = "cols")]
    pub columns: u8,
    /// Whether each tile shows its timestamp label.
    #[serde(rename = "showTime")]
    pub show_timestamps: bool,
    /// Compact mode drops tile borders and the inter-tile gap.
    pub compact: bool,
    /// Keep the active tile scrolled into view during playback.
    #[serde(rename = "autoScroll")]
    pub auto_scroll: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: 4,
            show_timestamps: true,
            compact: false,
            auto_scroll: true,
        }
    }
}

impl Settings {
    /// Parse a persisted blob, merging field-by-field over the defaults.
    pub fn from_json_lenient(raw: &str) -> Self {
        let defaults = Self::default();
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            tracing::debug!("settings blob unparseable, using defaults");
            return defaults;
        };

        let columns = map
            .get(SettingKey::Columns.storage_name())
            .and_then(Value::as_u64)
            .and_then(|n| u8::try_from(n).ok())
            .filter(|n| (MIN_COLUMNS..=MAX_COLUMNS).contains(n))
            .unwrap_or(defaults.columns);
        let flag = |key: SettingKey, fallback: bool| {
            map.get(key.storage_name())
                .and_then(Value::as_bool)
                .unwrap_or(fallback)
        };

        Self {
            columns,
            show_timestamps: flag(SettingKey::ShowTimestamps, defaults.show_timestamps),
            compact: flag(SettingKey::Compact, defaults.compact),
            auto_scroll: flag(SettingKey::AutoScroll, defaults.auto_scroll),
        }
    }

    /// Overlay the fields present in `patch`.
    pub fn merged(mut self, patch: &SettingsPatch) -> Self {
        if let Some(columns) = patch.columns {
            self.columns = clamp_columns(columns);
        }
        if let Some(show) = patch.show_timestamps {
            self.show_timestamps = show;
        }
        if let Some(compact) = patch.compact {
            self.compact = compact;
        }
        if let Some(auto_scroll) = patch.auto_scroll {
            self.auto_scroll = auto_scroll;
        }
        self
    }
}

/// Clamp a requested column count into the allowed range.
pub fn clamp_columns(columns: u8) -> u8 {
    columns.clamp(MIN_COLUMNS, MAX_COLUMNS)
}

/// Identifies a single setting, used to re-apply one change at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Columns,
    ShowTimestamps,
    Compact,
    AutoScroll,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Columns,
        SettingKey::ShowTimestamps,
        SettingKey::Compact,
        SettingKey::AutoScroll,
    ];

    /// Field name inside the persisted JSON blob.
    pub fn storage_name(self) -> &'static str {
        match self {
            SettingKey::Columns => "cols",
            SettingKey::ShowTimestamps => "showTime",
            SettingKey::Compact => "compact",
            SettingKey::AutoScroll => "autoScroll",
        }
    }
}

/// A partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub columns: Option<u8>,
    pub show_timestamps: Option<bool>,
    pub compact: Option<bool>,
    pub auto_scroll: Option<bool>,
}

impl SettingsPatch {
    pub fn columns(columns: u8) -> Self {
        Self {
            columns: Some(columns),
            ..Self::default()
        }
    }

    /// Patch that sets a boolean toggle. `Columns` is not a toggle and yields
    /// an empty patch.
    pub fn toggle(key: SettingKey, value: bool) -> Self {
        let mut patch = Self::default();
        match key {
            SettingKey::ShowTimestamps => patch.show_timestamps = Some(value),
            SettingKey::Compact => patch.compact = Some(value),
            SettingKey::AutoScroll => patch.auto_scroll = Some(value),
            SettingKey::Columns => {}
        }
        patch
    }

    /// Keys this patch touches.
    pub fn keys(&self) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| match key {
                SettingKey::Columns => self.columns.is_some(),
                SettingKey::ShowTimestamps => self.show_timestamps.is_some(),
                SettingKey::Compact => self.compact.is_some(),
                SettingKey::AutoScroll => self.auto_scroll.is_some(),
            })
            .collect()
    }
}

/// Durable key to JSON-blob storage.
pub trait SettingsBackend {
    /// Read the raw blob for `key`, `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;
    /// Durably replace the blob for `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend. Clones share the same underlying map, which stands in
/// for a page reload in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the store.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.insert_raw(key, value);
        Ok(())
    }
}

/// Loads and saves [`Settings`] through a [`SettingsBackend`].
///
/// Constructed explicitly and handed to the panel that uses it, so several
/// independent panels can coexist in one process.
#[derive(Debug, Clone)]
pub struct SettingsStore<B> {
    backend: B,
    key: String,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the persisted settings. Always returns a complete value.
    pub fn load(&self) -> Settings {
        self.load_or(Settings::default())
    }

    /// Merge `patch` over the current settings, persist, and return the result.
    ///
    /// A failed write is logged; the merged value is still returned so the
    /// caller's view stays consistent with the user's action.
    pub fn save(&self, patch: &SettingsPatch) -> Settings {
        self.save_over(Settings::default(), patch)
    }

    /// Like [`SettingsStore::save`], but when nothing can be read back the
    /// patch is merged over `current` instead of the defaults, so earlier
    /// changes survive storage that rejects reads.
    pub fn save_over(&self, current: Settings, patch: &SettingsPatch) -> Settings {
        let merged = self.load_or(current).merged(patch);
        if let Err(e) = self.persist(&merged) {
            tracing::warn!(error = %e, "settings write failed");
        }
        merged
    }

    fn load_or(&self, fallback: Settings) -> Settings {
        match self.backend.read(&self.key) {
            Ok(Some(raw)) => Settings::from_json_lenient(&raw),
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, "settings read failed");
                fallback
            }
        }
    }

    fn persist(&self, settings: &Settings) -> Result<()> {
        let raw = serde_json::to_string(settings)?;
        self.backend.write(&self.key, &raw)
    }
}

/// Backend that rejects every operation, for exercising fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl SettingsBackend for UnavailableBackend {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(SpriteTabError::Storage("storage unavailable".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(SpriteTabError::Storage("storage unavailable".into()))
    }
}
