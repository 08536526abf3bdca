//! Auto-brightness from ambient light.
//!
//! Inverse mapping: the darker the room, the brighter the lamp.

use crate::math8::map_range;

/// At or below this the lamp goes to full brightness
pub const DARK_LUX: f32 = 10.0;
/// At or above this the lamp dims to [`BRIGHT_ROOM_PERCENT`]
pub const BRIGHT_LUX: f32 = 300.0;
/// Brightness percent in a bright room
pub const BRIGHT_ROOM_PERCENT: u8 = 10;
/// Brightness percent in the dark
pub const DARK_ROOM_PERCENT: u8 = 100;
/// Changes up to this many percent are ignored to avoid flicker
pub const AMBIENT_HYSTERESIS: u8 = 2;

/// Target brightness percent for an ambient reading
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lux_to_percent(lux: f32) -> u8 {
    if lux.is_nan() || lux <= DARK_LUX {
        return DARK_ROOM_PERCENT;
    }
    if lux >= BRIGHT_LUX {
        return BRIGHT_ROOM_PERCENT;
    }
    map_range(
        lux as i32,
        DARK_LUX as i32,
        BRIGHT_LUX as i32,
        i32::from(DARK_ROOM_PERCENT),
        i32::from(BRIGHT_ROOM_PERCENT),
    ) as u8
}
