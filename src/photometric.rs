//! Logical brightness to physical channel intensity.
//!
//! Brightness levels are `0..=100`. Level 0 is off; every other level lands
//! inside the physical duty window `[floor, ceiling]` so the lamp stays
//! dimmable without ever going invisible. Levels `1..=10` map linearly onto
//! the bottom tenth of the window, levels `11..=100` follow a squared curve
//! over the rest of it.

use crate::color::{Rgb, cct_to_raw_rgb};
use crate::math8::map_range;

/// Highest logical brightness level
pub const LEVEL_MAX: u8 = 100;

/// Level where the squared upper segment takes over
const LOW_SEGMENT_TOP: u8 = 10;

/// Width of the upper segment input, squared
const HIGH_SEGMENT_SPAN_SQ: u32 = (LEVEL_MAX - LOW_SEGMENT_TOP) as u32 * (LEVEL_MAX - LOW_SEGMENT_TOP) as u32;

/// Physical duty-cycle window of the LED driver (out of 255)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmWindow {
    /// Lowest duty that still lights the LEDs
    pub floor: u8,
    /// Highest duty the hardware is allowed to reach
    pub ceiling: u8,
}

impl PwmWindow {
    pub const DEFAULT: Self = Self {
        floor: 10,
        ceiling: 80,
    };

    /// Lowest level a user-facing percent maps to
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn min_visible_level(self) -> u8 {
        if self.ceiling == 0 {
            return 1;
        }
        let level = self.floor as u16 * LEVEL_MAX as u16 / self.ceiling as u16;
        if level == 0 {
            1
        } else if level > LEVEL_MAX as u16 {
            LEVEL_MAX
        } else {
            level as u8
        }
    }

    /// Map a user-facing percent (`1..=100`) to an internal level
    ///
    /// Percent 0 is reserved for power-off and maps to level 0.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    pub const fn percent_to_level(self, percent: u8) -> u8 {
        if percent == 0 {
            return 0;
        }
        let percent = if percent > LEVEL_MAX { LEVEL_MAX } else { percent };
        map_range(
            percent as i32,
            1,
            LEVEL_MAX as i32,
            self.min_visible_level() as i32,
            LEVEL_MAX as i32,
        ) as u8
    }

    /// Target duty for a logical level, before channel scaling
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    pub const fn duty(self, level: u8) -> u8 {
        if level == 0 {
            return 0;
        }
        let level = if level > LEVEL_MAX { LEVEL_MAX } else { level };
        let floor = self.floor as u32;
        let ceiling = if self.ceiling < self.floor {
            floor
        } else {
            self.ceiling as u32
        };
        let low_top = floor + (ceiling - floor) / 10;

        let duty = if level <= LOW_SEGMENT_TOP {
            map_range(
                level as i32,
                1,
                LOW_SEGMENT_TOP as i32,
                floor as i32,
                low_top as i32,
            ) as u32
        } else {
            let normalized = (level - LOW_SEGMENT_TOP) as u32;
            low_top + normalized * normalized * (ceiling - low_top) / HIGH_SEGMENT_SPAN_SQ
        };
        duty as u8
    }

    /// Scale one channel value by a logical level
    ///
    /// Exactly 0 when either input is 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn scale_channel(self, value: u8, level: u8) -> u8 {
        if value == 0 || level == 0 {
            return 0;
        }
        (value as u32 * self.duty(level) as u32 / 255) as u8
    }

    /// Scale every channel of a color by a logical level
    pub const fn scale_color(self, color: Rgb, level: u8) -> Rgb {
        Rgb {
            r: self.scale_channel(color.r, level),
            g: self.scale_channel(color.g, level),
            b: self.scale_channel(color.b, level),
        }
    }

    /// Color temperature rendered at a logical level
    pub const fn cct_to_rgb(self, kelvin: u16, level: u8) -> Rgb {
        self.scale_color(cct_to_raw_rgb(kelvin), level)
    }
}

impl Default for PwmWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// [`PwmWindow::scale_channel`] with the default hardware window
pub const fn scale_channel(value: u8, level: u8) -> u8 {
    PwmWindow::DEFAULT.scale_channel(value, level)
}

/// [`PwmWindow::cct_to_rgb`] with the default hardware window
pub const fn cct_to_rgb(kelvin: u16, level: u8) -> Rgb {
    PwmWindow::DEFAULT.cct_to_rgb(kelvin, level)
}
