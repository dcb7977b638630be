//! Keeps the highlighted tile in step with the player.
//!
//! The synchronizer owns the decision of which tile is active. It writes the
//! decision through [`SpriteGrid`], which stays the only writer of tile
//! visuals. Time-update signals can arrive on every rendered frame, so a tick
//! that maps to the already-active tile does no work at all.

use crate::grid::{GridSurface, SpriteGrid};
use crate::settings::Settings;
use crate::timeline::time_to_index;

/// Whether a player has been found and subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No media element yet; discovery is still polling.
    Unattached,
    /// A media element is held and its time-update signal is subscribed.
    Attached,
}

/// Result of one synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The scene has no usable duration; nothing is highlighted.
    Skipped,
    /// The position still maps to the active tile.
    Unchanged,
    /// The highlight moved.
    Moved {
        from: Option<u32>,
        to: u32,
        scrolled: bool,
    },
}

/// Per-panel synchronization state.
#[derive(Debug)]
pub struct PlaybackSynchronizer {
    state: SyncState,
    active_index: Option<u32>,
}

impl Default for PlaybackSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSynchronizer {
    pub fn new() -> Self {
        Self {
            state: SyncState::Unattached,
            active_index: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn active_index(&self) -> Option<u32> {
        self.active_index
    }

    /// Record that the player was found and run the initial pass at its
    /// current position. Later calls only run a pass; attachment happens once.
    pub fn attach<S: GridSurface>(
        &mut self,
        position: f64,
        grid: &mut SpriteGrid<S>,
        settings: &Settings,
    ) -> SyncOutcome {
        if self.state == SyncState::Unattached {
            self.state = SyncState::Attached;
            tracing::debug!(position, "playback synchronizer attached");
        }
        self.on_time_update(position, grid, settings)
    }

    /// Handle one time-update signal reporting play position `t`.
    pub fn on_time_update<S: GridSurface>(
        &mut self,
        t: f64,
        grid: &mut SpriteGrid<S>,
        settings: &Settings,
    ) -> SyncOutcome {
        let Some(new_index) = time_to_index(t, grid.duration_seconds(), grid.tile_count()) else {
            return SyncOutcome::Skipped;
        };
        if self.active_index == Some(new_index) {
            return SyncOutcome::Unchanged;
        }

        let from = self.active_index;
        if let Some(previous) = from {
            grid.set_highlight(previous, false);
        }
        grid.set_highlight(new_index, true);
        self.active_index = Some(new_index);

        let scrolled = settings.auto_scroll && grid.scroll_into_view(new_index);
        tracing::trace!(?from, to = new_index, scrolled, "active tile moved");
        SyncOutcome::Moved {
            from,
            to: new_index,
            scrolled,
        }
    }

    /// Scroll the active tile back into view, used when the panel is shown
    /// again. Does nothing when auto-scroll is off or no tile is active.
    pub fn reveal_active<S: GridSurface>(
        &self,
        grid: &mut SpriteGrid<S>,
        settings: &Settings,
    ) -> bool {
        match self.active_index {
            Some(index) if settings.auto_scroll => grid.scroll_into_view(index),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::geometry::SpriteGeometry;
    use crate::grid::{RecordingSurface, SurfaceOp};
    use crate::scene::SceneMedia;

    fn grid(duration: f64) -> SpriteGrid<RecordingSurface> {
        let geometry = SpriteGeometry::new(5, 4).unwrap();
        let media = SceneMedia::new(Some("s.jpg".into()), duration);
        let mut grid =
            SpriteGrid::build(RecordingSurface::new(), geometry, &media, &Settings::default())
                .unwrap();
        grid.surface_mut().take_ops();
        grid
    }

    #[test]
    fn test_starts_unattached() {
        let sync = PlaybackSynchronizer::new();
        assert_eq!(sync.state(), SyncState::Unattached);
        assert_eq!(sync.active_index(), None);
    }

    #[test]
    fn test_attach_runs_initial_pass() {
        let mut grid = grid(120.0);
        let mut sync = PlaybackSynchronizer::new();
        let outcome = sync.attach(60.0, &mut grid, &Settings::default());
        assert_eq!(sync.state(), SyncState::Attached);
        assert_eq!(
            outcome,
            SyncOutcome::Moved {
                from: None,
                to: 10,
                scrolled: true
            }
        );
        assert_eq!(grid.surface().highlighted(), vec![10]);
    }

    #[test]
    fn test_repeated_signal_is_idempotent() {
        let mut grid = grid(120.0);
        let mut sync = PlaybackSynchronizer::new();
        let settings = Settings::default();
        sync.on_time_update(61.0, &mut grid, &settings);
        let before = grid.surface().ops().len();
        assert_eq!(
            sync.on_time_update(62.0, &mut grid, &settings),
            SyncOutcome::Unchanged
        );
        assert_eq!(
            sync.on_time_update(62.0, &mut grid, &settings),
            SyncOutcome::Unchanged
        );
        assert_eq!(grid.surface().ops().len(), before);
    }

    #[test]
    fn test_transition_clears_previous_highlight() {
        let mut grid = grid(120.0);
        let mut sync = PlaybackSynchronizer::new();
        let settings = Settings {
            auto_scroll: false,
            ..Settings::default()
        };
        sync.on_time_update(0.0, &mut grid, &settings);
        sync.on_time_update(30.0, &mut grid, &settings);
        assert_eq!(grid.surface().highlighted(), vec![5]);
        assert_eq!(grid.active_index(), Some(5));
        assert!(!grid
            .surface()
            .ops()
            .iter()
            .any(|op| matches!(op, SurfaceOp::ScrollIntoView { .. })));
    }

    #[test]
    fn test_zero_duration_is_skipped() {
        let mut grid = grid(0.0);
        let mut sync = PlaybackSynchronizer::new();
        assert_eq!(
            sync.attach(12.0, &mut grid, &Settings::default()),
            SyncOutcome::Skipped
        );
        assert_eq!(sync.state(), SyncState::Attached);
        assert!(grid.surface().ops().is_empty());
    }

    #[test]
    fn test_reveal_active_respects_auto_scroll() {
        let mut grid = grid(120.0);
        let mut sync = PlaybackSynchronizer::new();
        let off = Settings {
            auto_scroll: false,
            ..Settings::default()
        };
        assert!(!sync.reveal_active(&mut grid, &Settings::default()));
        sync.on_time_update(90.0, &mut grid, &off);
        assert!(!sync.reveal_active(&mut grid, &off));
        assert!(sync.reveal_active(&mut grid, &Settings::default()));
        assert_eq!(
            grid.surface().ops().last(),
            Some(&SurfaceOp::ScrollIntoView { index: 15 })
        );
    }
}
