//! Sprite sheet geometry inference.
//!
//! Sheets carry no metadata about their grid, so the column and row counts are
//! guessed from the image's pixel size, an assumed tile width, and an assumed
//! 16:9 tile shape. Sheets whose tiles are not 16:9, or whose width is not a
//! clean multiple of the assumed tile width, resolve to a wrong split and the
//! tiles misalign. That is accepted; there is nothing to validate against.

use serde::Serialize;

/// Width in pixels the sheet generator is assumed to use per tile.
pub const ASSUMED_TILE_WIDTH_PX: f64 = 160.0;

/// Height / width ratio of one tile (16:9 frames).
pub const ASSUMED_ASPECT_RATIO: f64 = 9.0 / 16.0;

/// Grid layout of a sprite sheet. `tile_count == columns * rows`, both >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteGeometry {
    pub columns: u32,
    pub rows: u32,
    pub tile_count: u32,
}

impl SpriteGeometry {
    /// Build a geometry from explicit counts. Returns `None` when either count
    /// is zero or the product overflows.
    pub fn new(columns: u32, rows: u32) -> Option<Self> {
        if columns == 0 || rows == 0 {
            return None;
        }
        let tile_count = columns.checked_mul(rows)?;
        Some(Self {
            columns,
            rows,
            tile_count,
        })
    }

    /// Infer the geometry of a sheet from its natural pixel size.
    ///
    /// `aspect_ratio` is tile height divided by tile width. Returns `None` when
    /// the sheet resolves to zero columns or rows.
    pub fn resolve(
        source_width_px: f64,
        source_height_px: f64,
        tile_width_px: f64,
        aspect_ratio: f64,
    ) -> Option<Self> {
        if tile_width_px <= 0.0 || aspect_ratio <= 0.0 {
            return None;
        }
        let columns = round_to_count(source_width_px / tile_width_px)?;
        if columns == 0 {
            tracing::debug!(source_width_px, "sheet narrower than half a tile");
            return None;
        }
        let tile_height_px = (source_width_px / f64::from(columns)) * aspect_ratio;
        let rows = round_to_count(source_height_px / tile_height_px)?;
        let geometry = Self::new(columns, rows);
        match geometry {
            Some(g) => tracing::debug!(
                columns = g.columns,
                rows = g.rows,
                tile_count = g.tile_count,
                "sprite geometry resolved"
            ),
            None => tracing::debug!(source_height_px, "sheet shorter than half a tile"),
        }
        geometry
    }

    /// Infer the geometry using the default tile width and 16:9 aspect.
    pub fn resolve_default(source_width_px: f64, source_height_px: f64) -> Option<Self> {
        Self::resolve(
            source_width_px,
            source_height_px,
            ASSUMED_TILE_WIDTH_PX,
            ASSUMED_ASPECT_RATIO,
        )
    }

    /// Column and row of a tile in raster order.
    pub fn cell_of(&self, index: u32) -> (u32, u32) {
        (index % self.columns, index / self.columns)
    }

    /// CSS `background-position` percentages that show tile `index`.
    ///
    /// A single-column or single-row sheet has no travel along that axis, so
    /// the position is anchored at 0%.
    pub fn background_position_pct(&self, index: u32) -> (f64, f64) {
        let (col, row) = self.cell_of(index);
        let x = if self.columns > 1 {
            f64::from(col) / f64::from(self.columns - 1) * 100.0
        } else {
            0.0
        };
        let y = if self.rows > 1 {
            f64::from(row) / f64::from(self.rows - 1) * 100.0
        } else {
            0.0
        };
        (x, y)
    }

    /// CSS `background-size` width percentage so one tile fills its cell.
    pub fn background_size_pct(&self) -> f64 {
        f64::from(self.columns) * 100.0
    }
}

/// Round a non-negative finite ratio to a tile count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_count(ratio: f64) -> Option<u32> {
    if !ratio.is_finite() || ratio < 0.0 {
        return None;
    }
    let rounded = ratio.round();
    if rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}
