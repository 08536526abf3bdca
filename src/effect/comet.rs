//! Comet effect
//!
//! A single column in the base color runs around the ring, leaving a trail
//! that fades a little every frame.

use super::{FrameContext, Pattern};
use crate::{color::Rgb, math8::fade_to_black_by};

/// Fade applied to the whole canvas every frame
const TRAIL_FADE: u8 = 40;
/// Frames the head stays on one column
const TICKS_PER_STEP: u32 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct CometPattern;

impl Pattern for CometPattern {
    fn render(&self, frame: &FrameContext, canvas: &mut [Rgb]) -> u8 {
        let columns = frame.layout.ring_columns(canvas.len());
        let head = (frame.tick / TICKS_PER_STEP) as usize % columns;

        for (index, pixel) in canvas.iter_mut().enumerate() {
            if frame.layout.column_of(index) == head {
                *pixel = frame.base;
            } else {
                *pixel = Rgb {
                    r: fade_to_black_by(pixel.r, TRAIL_FADE),
                    g: fade_to_black_by(pixel.g, TRAIL_FADE),
                    b: fade_to_black_by(pixel.b, TRAIL_FADE),
                };
            }
        }
        255
    }
}
