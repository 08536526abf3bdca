//! Spin effect
//!
//! Same hue rotation as the rainbow, but the hue follows the ring column
//! instead of the wiring order, so the colors sweep around the lamp.

use super::{FrameContext, Pattern};
use crate::color::{Hsv, Rgb, hsv2rgb};

const HUE_PER_TICK: u32 = 2;
/// Hue distance between neighbouring columns
const HUE_PER_COLUMN: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpinPattern;

impl Pattern for SpinPattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, frame: &FrameContext, canvas: &mut [Rgb]) -> u8 {
        let base_hue = frame.tick.wrapping_mul(HUE_PER_TICK) as u8;
        for (index, pixel) in canvas.iter_mut().enumerate() {
            let column = frame.layout.column_of(index);
            let hue = base_hue.wrapping_add((column * HUE_PER_COLUMN) as u8);
            *pixel = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            });
        }
        255
    }
}
