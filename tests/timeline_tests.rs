//! Geometry and timeline tests
//!
//! Checks the mapping between play position and tile index across whole
//! ranges of durations and tile counts, and geometry inference for common
//! sheet sizes.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]

use spritetab::geometry::SpriteGeometry;
use spritetab::timeline::{format_timestamp, index_to_time, time_to_index};
use test_case::test_case;

const DURATIONS: [f64; 5] = [0.5, 7.25, 60.0, 1234.5, 7200.0];
const TILE_COUNTS: [u32; 5] = [1, 3, 20, 81, 144];

#[test]
fn test_index_always_in_range() {
    for duration in DURATIONS {
        for n in TILE_COUNTS {
            for step in -10..=110 {
                let t = duration * f64::from(step) / 100.0;
                let i = time_to_index(t, duration, n).unwrap();
                assert!(i < n, "t={t} d={duration} n={n} gave {i}");
            }
        }
    }
}

#[test]
fn test_tile_start_maps_back_to_tile() {
    for duration in DURATIONS {
        for n in TILE_COUNTS {
            for i in 0..n {
                let t = index_to_time(i, duration, n);
                let back = time_to_index(t, duration, n).unwrap();
                // Float rounding at tile boundaries may land on a neighbour.
                assert!(
                    back.abs_diff(i) <= 1,
                    "i={i} t={t} d={duration} n={n} came back as {back}"
                );
            }
        }
    }
}

#[test]
fn test_index_is_monotonic_in_time() {
    let (duration, n) = (600.0, 48);
    let mut last = 0;
    for tenth in 0..=6000 {
        let i = time_to_index(f64::from(tenth) / 10.0, duration, n).unwrap();
        assert!(i >= last);
        last = i;
    }
    assert_eq!(last, n - 1);
}

#[test_case(0.0, 0 ; "start")]
#[test_case(59.999, 9 ; "just before midpoint")]
#[test_case(60.0, 10 ; "midpoint")]
#[test_case(119.9, 19 ; "last tile")]
#[test_case(120.0, 19 ; "end clamps")]
#[test_case(500.0, 19 ; "past end clamps")]
#[test_case(-4.0, 0 ; "negative clamps")]
fn test_two_minute_scene_with_twenty_tiles(t: f64, expected: u32) {
    assert_eq!(time_to_index(t, 120.0, 20), Some(expected));
}

#[test_case(f64::NAN ; "nan")]
#[test_case(0.0 ; "zero")]
#[test_case(-1.0 ; "negative")]
fn test_unknown_duration_skips(duration: f64) {
    assert_eq!(time_to_index(10.0, duration, 20), None);
}

#[test]
fn test_no_tiles_skips() {
    assert_eq!(time_to_index(10.0, 120.0, 0), None);
    assert_eq!(index_to_time(0, 120.0, 0), 0.0);
}

#[test_case(1280.0, 540.0, 8, 6 ; "eight by six")]
#[test_case(1600.0, 900.0, 10, 10 ; "ten by ten")]
#[test_case(160.0, 90.0, 1, 1 ; "single tile")]
#[test_case(1290.0, 545.0, 8, 6 ; "rounds small excess")]
fn test_geometry_from_sheet_size(w: f64, h: f64, columns: u32, rows: u32) {
    let g = SpriteGeometry::resolve_default(w, h).unwrap();
    assert_eq!((g.columns, g.rows), (columns, rows));
    assert_eq!(g.tile_count, columns * rows);
}

#[test_case(0.0, 540.0 ; "zero width")]
#[test_case(1280.0, 0.0 ; "zero height")]
#[test_case(40.0, 20.0 ; "smaller than a tile")]
#[test_case(f64::NAN, 540.0 ; "nan width")]
fn test_degenerate_sheet_has_no_geometry(w: f64, h: f64) {
    assert!(SpriteGeometry::resolve_default(w, h).is_none());
}

#[test]
fn test_background_offsets_cover_sheet_corners() {
    let g = SpriteGeometry::new(8, 6).unwrap();
    assert_eq!(g.background_position_pct(0), (0.0, 0.0));
    assert_eq!(g.background_position_pct(7), (100.0, 0.0));
    assert_eq!(g.background_position_pct(40), (0.0, 100.0));
    assert_eq!(g.background_position_pct(47), (100.0, 100.0));
    assert_eq!(g.background_size_pct(), 800.0);
}

#[test]
fn test_single_column_offsets_stay_finite() {
    let g = SpriteGeometry::new(1, 1).unwrap();
    let (x, y) = g.background_position_pct(0);
    assert!(x.is_finite() && y.is_finite());
}

#[test_case(0.0, "0:00" ; "zero")]
#[test_case(6.0, "0:06" ; "seconds")]
#[test_case(61.9, "1:01" ; "truncates fraction")]
#[test_case(3600.0, "1:00:00" ; "one hour")]
#[test_case(3725.0, "1:02:05" ; "hours minutes seconds")]
#[test_case(f64::INFINITY, "0:00" ; "infinite")]
fn test_timestamp_labels(seconds: f64, expected: &str) {
    assert_eq!(format_timestamp(seconds), expected);
}

#[test]
fn test_tile_times_are_evenly_spaced() {
    let n = 20;
    for i in 0..n {
        let t = index_to_time(i, 120.0, n);
        assert!((t - f64::from(i) * 6.0).abs() < 1e-9, "tile {i} starts at {t}");
    }
}
