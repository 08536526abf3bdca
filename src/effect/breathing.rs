//! Breathing effect
//!
//! The whole lamp pulses in its current base color. The envelope is
//! `exp(sin(t))`, which lingers near the bottom and blooms quickly at the
//! top, and never drops below a visible floor.

use core::f32::consts::PI;

use libm::{expf, sinf};

use super::{FrameContext, Pattern};
use crate::{color::Rgb, math8::map_range};

/// One full breath
const PERIOD_MS: u64 = 4_000;
/// `exp(-1)`, the minimum of `exp(sin(t))`
const ENVELOPE_OFFSET: f32 = 0.367_879_44;
/// Stretches `exp(sin(t)) - exp(-1)` onto roughly `0..=255`
const ENVELOPE_GAIN: f32 = 108.0;
/// Lowest envelope value, keeps the lamp from looking switched off
const ENVELOPE_FLOOR: i32 = 50;

#[derive(Debug, Clone, Copy, Default)]
pub struct BreathingPattern;

impl BreathingPattern {
    /// Envelope (0-255) at `elapsed_ms`
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn envelope(elapsed_ms: u64) -> u8 {
        let phase = (elapsed_ms % PERIOD_MS) as f32 / (PERIOD_MS / 2) as f32 * PI;
        let raw = ((expf(sinf(phase)) - ENVELOPE_OFFSET) * ENVELOPE_GAIN).clamp(0.0, 255.0);
        map_range(raw as i32, 0, 255, ENVELOPE_FLOOR, 255) as u8
    }
}

impl Pattern for BreathingPattern {
    fn render(&self, frame: &FrameContext, canvas: &mut [Rgb]) -> u8 {
        canvas.fill(frame.base);
        Self::envelope(frame.elapsed_ms())
    }
}
