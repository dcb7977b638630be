//! Sprite grid: the tile collection and its visual state.
//!
//! [`SpriteGrid`] decides what every tile looks like and is the only writer of
//! tile visuals; a [`GridSurface`] carries the writes out (DOM in the browser,
//! [`RecordingSurface`] headless). Tiles are created once per sheet load.
//! Settings changes only touch the attributes they affect, so tile identity
//! survives every layout change.

use crate::error::{Result, SpriteTabError};
use crate::geometry::SpriteGeometry;
use crate::media::{seek_and_play, MediaElement};
use crate::scene::SceneMedia;
use crate::settings::{SettingKey, Settings};
use crate::timeline::{format_timestamp, index_to_time};

/// Everything a surface needs to create one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSpec<'a> {
    pub index: u32,
    pub time_seconds: f64,
    /// Timestamp label text; the label always exists, visibility varies.
    pub label: String,
    pub sprite_url: &'a str,
    pub background_position_pct: (f64, f64),
    pub background_size_pct: f64,
    pub compact: bool,
    pub show_timestamp: bool,
}

/// Write side of a tile grid.
pub trait GridSurface {
    /// Reference to one created tile.
    type Handle;

    fn set_columns(&mut self, columns: u8);
    fn set_gap(&mut self, compact: bool);
    fn create_tile(&mut self, spec: &TileSpec<'_>) -> Result<Self::Handle>;
    /// Border and corner radius for compact or regular mode.
    fn set_tile_frame(&mut self, tile: &Self::Handle, compact: bool);
    fn set_label_visible(&mut self, tile: &Self::Handle, visible: bool);
    fn set_highlight(&mut self, tile: &Self::Handle, active: bool);
    /// Bring a tile to the middle of the viewport with smooth motion.
    fn scroll_into_view(&mut self, tile: &Self::Handle);
}

/// One grid cell.
#[derive(Debug)]
pub struct Tile<H> {
    pub index: u32,
    pub time_seconds: f64,
    pub handle: H,
    pub is_active: bool,
}

/// The built tile collection for one sprite sheet.
pub struct SpriteGrid<S: GridSurface> {
    surface: S,
    geometry: SpriteGeometry,
    duration_seconds: f64,
    tiles: Vec<Tile<S::Handle>>,
}

impl<S: GridSurface> SpriteGrid<S> {
    /// Create all tiles in raster order with styles matching `settings`.
    ///
    /// Fails with [`SpriteTabError::NoSprites`] when the scene has no sheet.
    pub fn build(
        mut surface: S,
        geometry: SpriteGeometry,
        media: &SceneMedia,
        settings: &Settings,
    ) -> Result<Self> {
        let url = media
            .sprite_sheet_url
            .as_deref()
            .ok_or(SpriteTabError::NoSprites)?;

        surface.set_columns(settings.columns);
        surface.set_gap(settings.compact);

        let duration = media.duration_seconds;
        let mut tiles = Vec::with_capacity(geometry.tile_count as usize);
        for index in 0..geometry.tile_count {
            let time_seconds = index_to_time(index, duration, geometry.tile_count);
            let spec = TileSpec {
                index,
                time_seconds,
                label: format_timestamp(time_seconds),
                sprite_url: url,
                background_position_pct: geometry.background_position_pct(index),
                background_size_pct: geometry.background_size_pct(),
                compact: settings.compact,
                show_timestamp: settings.show_timestamps,
            };
            let handle = surface.create_tile(&spec)?;
            tiles.push(Tile {
                index,
                time_seconds,
                handle,
                is_active: false,
            });
        }
        tracing::debug!(tiles = tiles.len(), duration, "sprite grid built");

        Ok(Self {
            surface,
            geometry,
            duration_seconds: duration,
            tiles,
        })
    }

    pub fn geometry(&self) -> SpriteGeometry {
        self.geometry
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn tile_count(&self) -> u32 {
        self.geometry.tile_count
    }

    pub fn tiles(&self) -> &[Tile<S::Handle>] {
        &self.tiles
    }

    pub fn tile(&self, index: u32) -> Option<&Tile<S::Handle>> {
        self.tiles.get(index as usize)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Index of the highlighted tile, if any.
    pub fn active_index(&self) -> Option<u32> {
        self.tiles.iter().find(|t| t.is_active).map(|t| t.index)
    }

    /// Re-apply one changed setting to the existing tiles.
    pub fn apply_settings_change(&mut self, key: SettingKey, settings: &Settings) {
        match key {
            SettingKey::Columns => self.surface.set_columns(settings.columns),
            SettingKey::Compact => {
                self.surface.set_gap(settings.compact);
                for tile in &self.tiles {
                    self.surface.set_tile_frame(&tile.handle, settings.compact);
                }
            }
            SettingKey::ShowTimestamps => {
                for tile in &self.tiles {
                    self.surface
                        .set_label_visible(&tile.handle, settings.show_timestamps);
                }
            }
            // Read by the synchronizer on its next tick.
            SettingKey::AutoScroll => {}
        }
    }

    /// Set or clear the highlight on one tile. Returns `false` for an unknown
    /// index or when the tile is already in the requested state.
    pub fn set_highlight(&mut self, index: u32, active: bool) -> bool {
        let Some(tile) = self.tiles.get_mut(index as usize) else {
            return false;
        };
        if tile.is_active == active {
            return false;
        }
        tile.is_active = active;
        self.surface.set_highlight(&tile.handle, active);
        true
    }

    pub fn scroll_into_view(&mut self, index: u32) -> bool {
        let Some(tile) = self.tiles.get(index as usize) else {
            return false;
        };
        self.surface.scroll_into_view(&tile.handle);
        true
    }

    /// Jump playback to the start of tile `index` and resume.
    ///
    /// This is a command to the player only; the highlight follows once the
    /// player reports its new position.
    pub fn select_tile<M: MediaElement + ?Sized>(&self, index: u32, media: &M) -> Option<f64> {
        let time = self.tile(index)?.time_seconds;
        tracing::debug!(index, time, "seeking to tile");
        seek_and_play(media, time);
        Some(time)
    }
}

/// Mutation issued to a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Columns(u8),
    Gap { compact: bool },
    CreateTile { index: u32 },
    Frame { index: u32, compact: bool },
    LabelVisible { index: u32, visible: bool },
    Highlight { index: u32, active: bool },
    ScrollIntoView { index: u32 },
}

/// Handle returned by [`RecordingSurface`]; `id` is unique per created tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedTile {
    pub id: u64,
    pub index: u32,
}

/// Headless surface that logs every mutation.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    next_id: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain the log, keeping the id counter.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn highlight_ops(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Highlight { .. }))
            .count()
    }

    /// Tiles whose last highlight op turned them on.
    pub fn highlighted(&self) -> Vec<u32> {
        let mut on: Vec<u32> = Vec::new();
        for op in &self.ops {
            if let SurfaceOp::Highlight { index, active } = op {
                on.retain(|i| i != index);
                if *active {
                    on.push(*index);
                }
            }
        }
        on.sort_unstable();
        on
    }
}

impl GridSurface for RecordingSurface {
    type Handle = RecordedTile;

    fn set_columns(&mut self, columns: u8) {
        self.ops.push(SurfaceOp::Columns(columns));
    }

    fn set_gap(&mut self, compact: bool) {
        self.ops.push(SurfaceOp::Gap { compact });
    }

    fn create_tile(&mut self, spec: &TileSpec<'_>) -> Result<Self::Handle> {
        let id = self.next_id;
        self.next_id += 1;
        self.ops.push(SurfaceOp::CreateTile { index: spec.index });
        Ok(RecordedTile {
            id,
            index: spec.index,
        })
    }

    fn set_tile_frame(&mut self, tile: &Self::Handle, compact: bool) {
        self.ops.push(SurfaceOp::Frame {
            index: tile.index,
            compact,
        });
    }

    fn set_label_visible(&mut self, tile: &Self::Handle, visible: bool) {
        self.ops.push(SurfaceOp::LabelVisible {
            index: tile.index,
            visible,
        });
    }

    fn set_highlight(&mut self, tile: &Self::Handle, active: bool) {
        self.ops.push(SurfaceOp::Highlight {
            index: tile.index,
            active,
        });
    }

    fn scroll_into_view(&mut self, tile: &Self::Handle) {
        self.ops.push(SurfaceOp::ScrollIntoView { index: tile.index });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

    use super::*;
    use crate::media::ManualMedia;

    fn build(columns: u32, rows: u32, duration: f64) -> SpriteGrid<RecordingSurface> {
        let geometry = SpriteGeometry::new(columns, rows).unwrap();
        let media = SceneMedia::new(Some("sprite.jpg".into()), duration);
        SpriteGrid::build(RecordingSurface::new(), geometry, &media, &Settings::default())
            .unwrap()
    }

    #[test]
    fn test_build_creates_tiles_in_raster_order() {
        let grid = build(5, 4, 120.0);
        assert_eq!(grid.tiles().len(), 20);
        let created: Vec<u32> = grid
            .surface()
            .ops()
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::CreateTile { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(created, (0..20).collect::<Vec<_>>());
        assert_eq!(grid.tile(10).unwrap().time_seconds, 60.0);
        assert_eq!(grid.active_index(), None);
    }

    #[test]
    fn test_build_without_sheet_fails() {
        let geometry = SpriteGeometry::new(2, 2).unwrap();
        let media = SceneMedia::new(None, 10.0);
        let result = SpriteGrid::build(
            RecordingSurface::new(),
            geometry,
            &media,
            &Settings::default(),
        );
        assert!(matches!(result, Err(SpriteTabError::NoSprites)));
    }

    #[test]
    fn test_columns_change_touches_only_layout() {
        let mut grid = build(3, 3, 90.0);
        grid.surface_mut().take_ops();
        let settings = Settings {
            columns: 9,
            ..Settings::default()
        };
        grid.apply_settings_change(SettingKey::Columns, &settings);
        assert_eq!(grid.surface().ops(), &[SurfaceOp::Columns(9)]);
    }

    #[test]
    fn test_timestamp_toggle_flips_every_label() {
        let mut grid = build(2, 2, 40.0);
        grid.surface_mut().take_ops();
        let settings = Settings {
            show_timestamps: false,
            ..Settings::default()
        };
        grid.apply_settings_change(SettingKey::ShowTimestamps, &settings);
        let ops = grid.surface().ops();
        assert_eq!(ops.len(), 4);
        assert!(ops
            .iter()
            .all(|op| matches!(op, SurfaceOp::LabelVisible { visible: false, .. })));
    }

    #[test]
    fn test_auto_scroll_change_has_no_visual_effect() {
        let mut grid = build(2, 2, 40.0);
        grid.surface_mut().take_ops();
        grid.apply_settings_change(SettingKey::AutoScroll, &Settings::default());
        assert!(grid.surface().ops().is_empty());
    }

    #[test]
    fn test_set_highlight_skips_redundant_writes() {
        let mut grid = build(2, 2, 40.0);
        grid.surface_mut().take_ops();
        assert!(grid.set_highlight(1, true));
        assert!(!grid.set_highlight(1, true));
        assert!(!grid.set_highlight(99, true));
        assert_eq!(grid.surface().highlight_ops(), 1);
        assert_eq!(grid.active_index(), Some(1));
    }

    #[test]
    fn test_select_tile_seeks_and_plays() {
        let grid = build(5, 4, 120.0);
        let media = ManualMedia::new();
        assert_eq!(grid.select_tile(10, &media), Some(60.0));
        assert_eq!(media.seeks(), vec![60.0]);
        assert!(media.is_playing());
        assert_eq!(grid.select_tile(20, &media), None);
    }
}
