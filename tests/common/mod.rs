//! Shared helpers for the integration tests.
//!
//! Builds headless panels over a [`MemoryBackend`] and a [`RecordingSurface`],
//! plus a scripted player locator and an instant poll timer for discovery.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::Cell;
use std::future::Future;

use spritetab::config::SpriteTabConfig;
use spritetab::grid::{RecordingSurface, SurfaceOp};
use spritetab::media::{ManualMedia, MediaLocator, PollTimer};
use spritetab::panel::SpritePanel;
use spritetab::scene::SceneMedia;
use spritetab::settings::{MemoryBackend, SettingsStore};

pub type TestPanel = SpritePanel<RecordingSurface, MemoryBackend>;

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Sheet size that resolves to `columns` x `rows` with the default tile size.
pub fn sheet_size(columns: u32, rows: u32) -> (f64, f64) {
    (f64::from(columns) * 160.0, f64::from(rows) * 90.0)
}

pub fn scene(duration: f64) -> SceneMedia {
    SceneMedia::new(Some("/scene/7/vtt/sprite".into()), duration)
}

/// A panel whose sheet has already loaded as a `columns` x `rows` grid.
pub fn ready_panel(backend: MemoryBackend, columns: u32, rows: u32, duration: f64) -> TestPanel {
    let mut panel = SpritePanel::new(
        SettingsStore::new(backend),
        scene(duration),
        SpriteTabConfig::default(),
    );
    let (w, h) = sheet_size(columns, rows);
    panel
        .sheet_loaded(RecordingSurface::new(), w, h)
        .expect("sheet builds");
    panel
}

/// Number of surface ops recorded so far; pair with [`ops_since`].
pub fn op_mark(panel: &TestPanel) -> usize {
    panel.grid().map_or(0, |g| g.surface().ops().len())
}

/// Surface ops recorded after `mark`.
pub fn ops_since(panel: &TestPanel, mark: usize) -> Vec<SurfaceOp> {
    panel
        .grid()
        .map(|g| g.surface().ops()[mark..].to_vec())
        .unwrap_or_default()
}

/// Locator that finds nothing for the first `misses` lookups.
pub struct ScriptedLocator {
    misses: u32,
    lookups: Cell<u32>,
    media: ManualMedia,
}

impl ScriptedLocator {
    pub fn appearing_after(misses: u32, media: ManualMedia) -> Self {
        Self {
            misses,
            lookups: Cell::new(0),
            media,
        }
    }

    pub fn never() -> Self {
        Self::appearing_after(u32::MAX, ManualMedia::new())
    }

    pub fn lookups(&self) -> u32 {
        self.lookups.get()
    }
}

impl MediaLocator for ScriptedLocator {
    type Media = ManualMedia;

    fn locate(&self) -> Option<ManualMedia> {
        let n = self.lookups.get();
        self.lookups.set(n + 1);
        (n >= self.misses).then(|| self.media.clone())
    }
}

/// Timer that resolves immediately and records each requested delay.
#[derive(Default)]
pub struct InstantTimer {
    pub sleeps: Vec<u32>,
}

impl PollTimer for InstantTimer {
    fn sleep(&mut self, interval_ms: u32) -> impl Future<Output = ()> {
        self.sleeps.push(interval_ms);
        std::future::ready(())
    }
}
