mod kelvin;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use kelvin::{
    CCT_DEFAULT, CCT_MAX, CCT_MIN, clamp_cct, cct_to_raw_rgb, kelvin_to_mireds, mireds_to_kelvin,
};
pub use utils::{hsv2rgb, rgb_from_u32, rgb_to_u32};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// Which color representation drives the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    Rgb,
    #[default]
    Temperature,
}

impl ColorMode {
    pub const fn as_u8(self) -> u8 {
        match self {
            ColorMode::Rgb => 0,
            ColorMode::Temperature => 1,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ColorMode::Rgb),
            1 => Some(ColorMode::Temperature),
            _ => None,
        }
    }

    pub const fn is_temperature(self) -> bool {
        matches!(self, ColorMode::Temperature)
    }
}
