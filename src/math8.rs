//! Integer helpers for the per-tick hot path.
//!
//! Everything here avoids floating point: 8-bit scaling for pixels and
//! Q16 fixed point (`0..=65536` == `0.0..=1.0`) for fade progress.

/// One in Q16 fixed point.
pub const Q16_ONE: u32 = 1 << 16;

/// Largest Q16 value that easing curves report.
pub const Q16_MAX: u32 = Q16_ONE - 1;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Fade progress as Q16, clamped to `0..=Q16_ONE`
///
/// A zero duration counts as finished.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn progress_q16(elapsed_ms: u32, duration_ms: u32) -> u32 {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return Q16_ONE;
    }
    (((elapsed_ms as u64) << 16) / duration_ms as u64) as u32
}

/// Linear re-mapping with truncating integer division.
///
/// Mirrors the classic Arduino `map()`; the input is not clamped.
#[inline]
pub const fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Fade every channel of a pixel toward black by `amount` (0-255)
#[inline]
pub const fn fade_to_black_by(value: u8, amount: u8) -> u8 {
    scale8(value, 255 - amount)
}
