//! Fade curves evaluated in Q16 fixed point.

use crate::math8::Q16_MAX;

const FADE_CURVE_ID_LINEAR: u8 = 0;
const FADE_CURVE_ID_EASE_IN: u8 = 1;
const FADE_CURVE_ID_EASE_OUT: u8 = 2;
const FADE_CURVE_ID_SMOOTHSTEP: u8 = 3;

/// Interpolation curve applied to every fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FadeCurve {
    #[default]
    Linear = FADE_CURVE_ID_LINEAR,
    /// `t²`
    EaseIn = FADE_CURVE_ID_EASE_IN,
    /// `1 - (1 - t)²`
    EaseOut = FADE_CURVE_ID_EASE_OUT,
    /// `3t² - 2t³`, also used for ease-in-out
    Smoothstep = FADE_CURVE_ID_SMOOTHSTEP,
}

impl FadeCurve {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            FADE_CURVE_ID_LINEAR => Self::Linear,
            FADE_CURVE_ID_EASE_IN => Self::EaseIn,
            FADE_CURVE_ID_EASE_OUT => Self::EaseOut,
            FADE_CURVE_ID_SMOOTHSTEP => Self::Smoothstep,
            _ => return None,
        })
    }

    /// Apply the curve to a Q16 progress value.
    ///
    /// Input is `0..=65536`, output is `0..=65535`. Both ends pass through
    /// untouched so a fade never loses its first or last step to rounding.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn apply(self, t: u32) -> u32 {
        if t == 0 {
            return 0;
        }
        if t >= Q16_MAX {
            return Q16_MAX;
        }

        let t64 = t as u64;
        match self {
            Self::Linear => t,
            Self::EaseIn => ((t64 * t64) >> 16) as u32,
            Self::EaseOut => {
                let u = (Q16_MAX - t) as u64;
                Q16_MAX - ((u * u) >> 16) as u32
            }
            Self::Smoothstep => {
                let t2 = (t64 * t64) >> 16;
                let t3 = (t2 * t64) >> 16;
                let eased = 3 * t2 - 2 * t3;
                // Truncation can push the last few steps one past the top.
                if eased > Q16_MAX as u64 {
                    Q16_MAX
                } else {
                    eased as u32
                }
            }
        }
    }
}
