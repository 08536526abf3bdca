//! Police-style alert effect
//!
//! An 8 second cycle. For the first six seconds half of the ring is red and
//! the other half blue, rotating backwards one column every 40 ms. The last
//! two seconds strobe the whole lamp in 100 ms phases, alternating bursts of
//! red and blue flashes.

use super::{FrameContext, Pattern};
use crate::color::{BLACK, BLUE, RED, Rgb};

const CYCLE_MS: u64 = 8_000;
const ROTATION_MS: u64 = 6_000;
const ROTATION_STEP_MS: u64 = 40;
const STROBE_PHASE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct AlertPattern;

impl AlertPattern {
    #[allow(clippy::cast_possible_truncation)]
    fn rotate(frame: &FrameContext, position_ms: u64, canvas: &mut [Rgb]) {
        let columns = frame.layout.ring_columns(canvas.len());
        let step = (position_ms / ROTATION_STEP_MS) as usize % columns;
        let offset = columns - step;

        for (index, pixel) in canvas.iter_mut().enumerate() {
            let position = (frame.layout.column_of(index) + offset) % columns;
            *pixel = if position < columns / 2 { RED } else { BLUE };
        }
    }

    fn strobe(position_ms: u64, canvas: &mut [Rgb]) {
        let phase = (position_ms - ROTATION_MS) / STROBE_PHASE_MS;
        let color = match phase % 4 {
            0 | 2 if (phase / 8) % 2 == 0 => RED,
            0 | 2 => BLUE,
            _ => BLACK,
        };
        canvas.fill(color);
    }
}

impl Pattern for AlertPattern {
    fn render(&self, frame: &FrameContext, canvas: &mut [Rgb]) -> u8 {
        let position_ms = frame.elapsed_ms() % CYCLE_MS;
        if position_ms < ROTATION_MS {
            Self::rotate(frame, position_ms, canvas);
        } else {
            Self::strobe(position_ms, canvas);
        }
        255
    }
}
