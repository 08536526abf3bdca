//! Rainbow cycling effect
//!
//! Classic `fill_rainbow`: consecutive LEDs step through the hue wheel by a
//! fixed amount, and the whole wheel rotates a little every frame.

use super::{FrameContext, Pattern};
use crate::color::{Hsv, Rgb, hsv2rgb};

/// Hue advance per frame
const HUE_PER_TICK: u32 = 2;
/// Hue distance between neighbouring LEDs
const HUE_STEP: u8 = 7;
const SATURATION: u8 = 240;

/// Hue wheel scrolling along the strip
#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowPattern;

impl Pattern for RainbowPattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, frame: &FrameContext, canvas: &mut [Rgb]) -> u8 {
        let mut hue = frame.tick.wrapping_mul(HUE_PER_TICK) as u8;
        for pixel in canvas.iter_mut() {
            *pixel = hsv2rgb(Hsv {
                hue,
                sat: SATURATION,
                val: 255,
            });
            hue = hue.wrapping_add(HUE_STEP);
        }
        255
    }
}
