//! Mapping between playback time and tile index.
//!
//! Tile `i` of `n` covers the slice of the video starting at `i / n` of the
//! duration. Both directions run on every time-update signal, so they stay
//! allocation-free.

/// Tile index for playback position `t`, clamped to `0..tile_count`.
///
/// Returns `None` when the mapping is undefined: zero or negative duration,
/// an empty sheet, or a non-finite position.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn time_to_index(t: f64, duration: f64, tile_count: u32) -> Option<u32> {
    if duration.is_nan() || duration <= 0.0 || tile_count == 0 || !t.is_finite() {
        return None;
    }
    let raw = ((t / duration) * f64::from(tile_count)).floor();
    let last = tile_count - 1;
    if raw <= 0.0 {
        return Some(0);
    }
    if raw >= f64::from(last) {
        return Some(last);
    }
    Some(raw as u32)
}

/// Playback position at which tile `index` begins.
pub fn index_to_time(index: u32, duration: f64, tile_count: u32) -> f64 {
    if tile_count == 0 {
        return 0.0;
    }
    (f64::from(index) / f64::from(tile_count)) * duration
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Zero, negative, and non-finite inputs render as `0:00`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    let h = whole / 3600;
    let m = (whole % 3600) / 60;
    let s = whole % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use test_case::test_case;

    #[test]
    fn test_undefined_without_duration() {
        assert_eq!(time_to_index(5.0, 0.0, 10), None);
        assert_eq!(time_to_index(5.0, -1.0, 10), None);
        assert_eq!(time_to_index(5.0, f64::NAN, 10), None);
        assert_eq!(time_to_index(5.0, 100.0, 0), None);
        assert_eq!(time_to_index(f64::NAN, 100.0, 10), None);
    }

    #[test]
    fn test_clamps_out_of_range_positions() {
        assert_eq!(time_to_index(-3.0, 100.0, 10), Some(0));
        assert_eq!(time_to_index(100.0, 100.0, 10), Some(9));
        assert_eq!(time_to_index(5000.0, 100.0, 10), Some(9));
    }

    #[test]
    fn test_midpoint_of_two_minute_scene() {
        assert_eq!(index_to_time(10, 120.0, 20), 60.0);
        assert_eq!(time_to_index(60.0, 120.0, 20), Some(10));
        assert_eq!(time_to_index(59.999, 120.0, 20), Some(9));
    }

    #[test]
    fn test_index_to_time_empty_sheet() {
        assert_eq!(index_to_time(3, 120.0, 0), 0.0);
    }

    #[test_case(0.0, "0:00" ; "zero")]
    #[test_case(-4.0, "0:00" ; "negative")]
    #[test_case(f64::INFINITY, "0:00" ; "infinite")]
    #[test_case(5.9, "0:05" ; "fraction truncates")]
    #[test_case(65.0, "1:05" ; "minutes")]
    #[test_case(3599.0, "59:59" ; "just under an hour")]
    #[test_case(3600.0, "1:00:00" ; "one hour")]
    #[test_case(3725.0, "1:02:05" ; "hours minutes seconds")]
    fn test_format_timestamp(seconds: f64, expected: &str) {
        assert_eq!(format_timestamp(seconds), expected);
    }
}
