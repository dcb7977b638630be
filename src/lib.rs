//! spritetab - sprite-sheet scrubbing panel for a media library's scene page
//!
//! Cuts a scene's sprite sheet into a grid of clickable thumbnails, keeps the
//! tile under the play position highlighted, and seeks the player on click:
//! - Grid geometry inferred from the sheet's pixel size
//! - Column count, timestamps, compact mode and auto-scroll persisted per user
//! - Platform-free core, driven headlessly in tests
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { SpriteTab } from 'spritetab';
//! await init();
//! const tab = new SpriteTab({ maxDiscoveryAttempts: 30 });
//! tab.routeChanged(location.pathname);
//! ```

// Core
pub mod config;
pub mod error;
pub mod geometry;
pub mod settings;
pub mod timeline;

// Panel
pub mod grid;
pub mod host;
pub mod media;
pub mod panel;
pub mod scene;
pub mod style;
pub mod sync;

// Browser shell
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::SpriteTabConfig;
pub use error::{Result, SpriteTabError};
pub use geometry::SpriteGeometry;
pub use grid::{GridSurface, SpriteGrid};
pub use host::{HostSession, PanelTicket};
pub use panel::{PanelStatus, SpritePanel};
pub use settings::{Settings, SettingsStore};
pub use sync::PlaybackSynchronizer;
pub use timeline::{format_timestamp, index_to_time, time_to_index};

#[cfg(target_arch = "wasm32")]
pub use web::SpriteTab;

/// Resolve the grid for a sheet of the given natural size.
///
/// Returns `[columns, rows]`, or an empty array when the sheet holds no
/// whole tile.
#[wasm_bindgen(js_name = "resolveSpriteGeometry")]
pub fn resolve_sprite_geometry(width_px: f64, height_px: f64) -> Vec<u32> {
    SpriteGeometry::resolve_default(width_px, height_px)
        .map(|g| vec![g.columns, g.rows])
        .unwrap_or_default()
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
