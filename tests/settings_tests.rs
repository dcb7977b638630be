//! Settings persistence tests
//!
//! Settings must survive a reload, tolerate damaged blobs, and keep the
//! column count inside its bounds.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use serde_json::Value;
use spritetab::settings::{
    MemoryBackend, SettingKey, Settings, SettingsPatch, SettingsStore, UnavailableBackend,
    MAX_COLUMNS, MIN_COLUMNS, STORAGE_KEY,
};
use test_case::test_case;

#[test]
fn test_saved_settings_survive_reload() {
    let backend = MemoryBackend::new();
    let store = SettingsStore::new(backend.clone());
    store.save(&SettingsPatch::columns(6));
    store.save(&SettingsPatch::toggle(SettingKey::Compact, true));

    // A fresh store over the same storage stands in for a page reload.
    let reloaded = SettingsStore::new(backend).load();
    assert_eq!(
        reloaded,
        Settings {
            columns: 6,
            show_timestamps: true,
            compact: true,
            auto_scroll: true,
        }
    );
}

#[test]
fn test_blob_uses_short_field_names() {
    let backend = MemoryBackend::new();
    SettingsStore::new(backend.clone()).save(&SettingsPatch::toggle(SettingKey::AutoScroll, false));

    let raw = backend.raw(STORAGE_KEY).expect("blob written");
    let blob: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(blob["cols"], 4);
    assert_eq!(blob["showTime"], true);
    assert_eq!(blob["compact"], false);
    assert_eq!(blob["autoScroll"], false);
}

#[test]
fn test_untouched_fields_keep_previous_values() {
    let backend = MemoryBackend::new();
    backend.insert_raw(
        STORAGE_KEY,
        r#"{"cols": 9, "showTime": false, "compact": true, "autoScroll": false}"#,
    );
    let merged = SettingsStore::new(backend).save(&SettingsPatch::columns(3));
    assert_eq!(merged.columns, 3);
    assert!(!merged.show_timestamps);
    assert!(merged.compact);
    assert!(!merged.auto_scroll);
}

#[test_case(r#"{"cols": "wide"}"#, 4 ; "wrong type")]
#[test_case(r#"{"cols": 0}"#, 4 ; "below range")]
#[test_case(r#"{"cols": 40}"#, 4 ; "above range")]
#[test_case(r#"{"cols": 12}"#, 12 ; "upper bound")]
#[test_case(r#"{"cols": -3}"#, 4 ; "negative")]
fn test_invalid_stored_columns_fall_back(raw: &str, expected: u8) {
    let backend = MemoryBackend::new();
    backend.insert_raw(STORAGE_KEY, raw);
    assert_eq!(SettingsStore::new(backend).load().columns, expected);
}

#[test_case(0, MIN_COLUMNS ; "zero")]
#[test_case(13, MAX_COLUMNS ; "past max")]
#[test_case(255, MAX_COLUMNS ; "max u8")]
#[test_case(5, 5 ; "in range")]
fn test_patch_columns_are_clamped(requested: u8, expected: u8) {
    let store = SettingsStore::new(MemoryBackend::new());
    assert_eq!(store.save(&SettingsPatch::columns(requested)).columns, expected);
    assert_eq!(store.load().columns, expected);
}

#[test]
fn test_unavailable_storage_still_applies_changes() {
    common::init_tracing();
    let store = SettingsStore::new(UnavailableBackend);
    assert_eq!(store.load(), Settings::default());
    let merged = store.save(&SettingsPatch::toggle(SettingKey::ShowTimestamps, false));
    assert!(!merged.show_timestamps);
}

#[test]
fn test_independent_stores_do_not_share_state() {
    let a = SettingsStore::new(MemoryBackend::new());
    let b = SettingsStore::new(MemoryBackend::new());
    a.save(&SettingsPatch::columns(10));
    assert_eq!(b.load().columns, 4);
}

#[test]
fn test_save_over_keeps_base_when_storage_unreadable() {
    let store = SettingsStore::new(UnavailableBackend);
    let current = store.save(&SettingsPatch::toggle(SettingKey::Compact, true));
    let current = store.save_over(current, &SettingsPatch::toggle(SettingKey::AutoScroll, false));
    let merged = store.save_over(current, &SettingsPatch::columns(2));
    assert!(merged.compact);
    assert!(!merged.auto_scroll);
    assert_eq!(merged.columns, 2);
}

#[test]
fn test_save_over_prefers_stored_blob() {
    let backend = MemoryBackend::new();
    backend.insert_raw(STORAGE_KEY, r#"{"cols": 9}"#);
    let store = SettingsStore::new(backend);
    let stale = Settings {
        columns: 3,
        ..Settings::default()
    };
    let merged = store.save_over(stale, &SettingsPatch::toggle(SettingKey::Compact, true));
    assert_eq!(merged.columns, 9);
    assert!(merged.compact);
}
