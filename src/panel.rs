//! One sprite panel: settings, grid, and synchronizer wired together.
//!
//! The panel is platform-free. The browser shell feeds it events (sheet
//! loaded, player found, time update, control changed, tab shown) and it
//! answers through its [`GridSurface`].

use crate::config::SpriteTabConfig;
use crate::error::{Result, SpriteTabError};
use crate::geometry::SpriteGeometry;
use crate::grid::{GridSurface, SpriteGrid};
use crate::media::MediaElement;
use crate::scene::SceneMedia;
use crate::settings::{Settings, SettingsBackend, SettingsPatch, SettingsStore};
use crate::sync::{PlaybackSynchronizer, SyncOutcome, SyncState};

pub const NO_SPRITES_MESSAGE: &str = "No sprites available.";
pub const VIDEO_NOT_READY_MESSAGE: &str = "Video not ready.";

/// Lifecycle of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    /// Waiting for the sprite sheet image.
    LoadingSheet,
    /// Terminal: no sheet, sheet failed to load, or it resolved to no tiles.
    NoSprites,
    /// Tiles are built.
    Ready,
    /// Tiles are built but discovery gave up on the player.
    VideoNotReady,
}

impl PanelStatus {
    /// User-facing message for this status, if it has one.
    pub fn message(self) -> Option<&'static str> {
        match self {
            PanelStatus::NoSprites => Some(NO_SPRITES_MESSAGE),
            PanelStatus::VideoNotReady => Some(VIDEO_NOT_READY_MESSAGE),
            PanelStatus::LoadingSheet | PanelStatus::Ready => None,
        }
    }
}

pub struct SpritePanel<S: GridSurface, B: SettingsBackend> {
    store: SettingsStore<B>,
    settings: Settings,
    scene: SceneMedia,
    config: SpriteTabConfig,
    grid: Option<SpriteGrid<S>>,
    sync: PlaybackSynchronizer,
    status: PanelStatus,
}

impl<S: GridSurface, B: SettingsBackend> SpritePanel<S, B> {
    /// Settings are loaded once here; later changes go through
    /// [`SpritePanel::update_settings`].
    pub fn new(store: SettingsStore<B>, scene: SceneMedia, config: SpriteTabConfig) -> Self {
        let settings = store.load();
        let status = if scene.has_sprites() {
            PanelStatus::LoadingSheet
        } else {
            PanelStatus::NoSprites
        };
        Self {
            store,
            settings,
            scene,
            config,
            grid: None,
            sync: PlaybackSynchronizer::new(),
            status,
        }
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> &SceneMedia {
        &self.scene
    }

    pub fn grid(&self) -> Option<&SpriteGrid<S>> {
        self.grid.as_ref()
    }

    pub fn synchronizer(&self) -> &PlaybackSynchronizer {
        &self.sync
    }

    /// The sheet image finished loading with the given natural size.
    ///
    /// Builds the tiles. A sheet that resolves to no tiles moves the panel to
    /// [`PanelStatus::NoSprites`] instead of failing. Only the first load
    /// builds; later calls are ignored.
    pub fn sheet_loaded(&mut self, surface: S, width_px: f64, height_px: f64) -> Result<()> {
        if self.status != PanelStatus::LoadingSheet {
            tracing::debug!(status = ?self.status, "ignoring sheet load");
            return Ok(());
        }
        let Some(geometry) = SpriteGeometry::resolve(
            width_px,
            height_px,
            self.config.tile_width_px,
            self.config.tile_aspect,
        ) else {
            tracing::info!(width_px, height_px, "sprite sheet resolved to no tiles");
            self.status = PanelStatus::NoSprites;
            return Ok(());
        };
        match SpriteGrid::build(surface, geometry, &self.scene, &self.settings) {
            Ok(grid) => {
                self.grid = Some(grid);
                self.status = PanelStatus::Ready;
                Ok(())
            }
            Err(e) => {
                self.status = PanelStatus::NoSprites;
                Err(e)
            }
        }
    }

    /// The sheet image could not be loaded.
    pub fn sheet_failed(&mut self, reason: &str) {
        tracing::info!(reason, "sprite sheet failed to load");
        self.grid = None;
        self.status = PanelStatus::NoSprites;
    }

    /// Persist a settings change and re-apply it to the built tiles.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Settings {
        self.settings = self.store.save_over(self.settings, patch);
        if let Some(grid) = self.grid.as_mut() {
            for key in patch.keys() {
                grid.apply_settings_change(key, &self.settings);
            }
        }
        self.settings
    }

    /// The player was found; run the initial pass at its position.
    pub fn media_attached<M: MediaElement + ?Sized>(&mut self, media: &M) -> SyncOutcome {
        let Some(grid) = self.grid.as_mut() else {
            return SyncOutcome::Skipped;
        };
        self.sync.attach(media.current_time(), grid, &self.settings)
    }

    /// Discovery gave up on the player.
    pub fn media_unavailable(&mut self) {
        if self.status == PanelStatus::Ready {
            self.status = PanelStatus::VideoNotReady;
        }
    }

    pub fn time_update(&mut self, position: f64) -> SyncOutcome {
        if self.sync.state() != SyncState::Attached {
            return SyncOutcome::Skipped;
        }
        let Some(grid) = self.grid.as_mut() else {
            return SyncOutcome::Skipped;
        };
        self.sync.on_time_update(position, grid, &self.settings)
    }

    /// The panel's tab was selected; bring the active tile back into view.
    pub fn tab_shown(&mut self) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            return false;
        };
        self.sync.reveal_active(grid, &self.settings)
    }

    /// A tile was clicked: seek the player to it and resume.
    pub fn select_tile<M: MediaElement + ?Sized>(&self, index: u32, media: &M) -> Result<f64> {
        let grid = self.grid.as_ref().ok_or(SpriteTabError::NoSprites)?;
        grid.select_tile(index, media)
            .ok_or_else(|| SpriteTabError::Other(format!("no tile at index {index}")))
    }
}
