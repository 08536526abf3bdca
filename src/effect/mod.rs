//! Procedural effects with compile-time known variants
//!
//! Every effect is a pure function of the frame counter, the lamp's base
//! color and the panel layout. Patterns draw into an unscaled canvas and
//! report a brightness envelope; the renderer applies the photometric
//! scaling on the way out, so the canvas never compounds scaling errors.

mod alert;
mod breathing;
mod comet;
mod rainbow;
mod spin;

pub use alert::AlertPattern;
pub use breathing::BreathingPattern;
pub use comet::CometPattern;
pub use rainbow::RainbowPattern;
pub use spin::SpinPattern;

use crate::{
    color::{BLACK, Rgb},
    layout::PanelLayout,
    math8::scale8,
    photometric::PwmWindow,
};

const EFFECT_NAME_NONE: &str = "none";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_BREATHING: &str = "breathing";
const EFFECT_NAME_ALERT: &str = "police";
const EFFECT_NAME_ALERT_ALIAS: &str = "alert";
const EFFECT_NAME_SPIN: &str = "spin";
const EFFECT_NAME_COMET: &str = "meteor";
const EFFECT_NAME_COMET_ALIAS: &str = "comet";

const EFFECT_ID_NONE: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_BREATHING: u8 = 2;
const EFFECT_ID_ALERT: u8 = 3;
const EFFECT_ID_SPIN: u8 = 4;
const EFFECT_ID_COMET: u8 = 5;

/// Everything a pattern may read while drawing one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Frame counter, starting at 1 for the first frame after a reset
    pub tick: u32,
    /// Milliseconds between two frames
    pub tick_period_ms: u32,
    /// Current base color (CCT or RGB, unscaled)
    pub base: Rgb,
    pub layout: PanelLayout,
}

impl FrameContext {
    /// Time since the effect started
    pub const fn elapsed_ms(&self) -> u64 {
        self.tick as u64 * self.tick_period_ms as u64
    }
}

/// A single procedural pattern
pub trait Pattern {
    /// Draw one frame into the unscaled canvas
    ///
    /// Returns the brightness envelope (0-255) the frame is shown at before
    /// the lamp brightness is applied.
    fn render(&self, frame: &FrameContext, canvas: &mut [Rgb]) -> u8;
}

/// Known effects that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Effect {
    /// Static color and brightness
    #[default]
    None = EFFECT_ID_NONE,
    Rainbow = EFFECT_ID_RAINBOW,
    Breathing = EFFECT_ID_BREATHING,
    /// Red/blue rotation followed by a strobe
    Alert = EFFECT_ID_ALERT,
    Spin = EFFECT_ID_SPIN,
    /// Single head with a fading trail
    Comet = EFFECT_ID_COMET,
}

impl Effect {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_NONE => Self::None,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_BREATHING => Self::Breathing,
            EFFECT_ID_ALERT => Self::Alert,
            EFFECT_ID_SPIN => Self::Spin,
            EFFECT_ID_COMET => Self::Comet,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => EFFECT_NAME_NONE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Breathing => EFFECT_NAME_BREATHING,
            Self::Alert => EFFECT_NAME_ALERT,
            Self::Spin => EFFECT_NAME_SPIN,
            Self::Comet => EFFECT_NAME_COMET,
        }
    }

    /// Parse an effect name, ignoring ASCII case
    pub fn parse_from_str(s: &str) -> Option<Self> {
        const NAMES: [(&str, Effect); 8] = [
            (EFFECT_NAME_NONE, Effect::None),
            (EFFECT_NAME_RAINBOW, Effect::Rainbow),
            (EFFECT_NAME_BREATHING, Effect::Breathing),
            (EFFECT_NAME_ALERT, Effect::Alert),
            (EFFECT_NAME_ALERT_ALIAS, Effect::Alert),
            (EFFECT_NAME_SPIN, Effect::Spin),
            (EFFECT_NAME_COMET, Effect::Comet),
            (EFFECT_NAME_COMET_ALIAS, Effect::Comet),
        ];
        let s = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, effect)| *effect)
    }

    /// Parse an effect name, falling back to [`Effect::None`]
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse_from_str(s).unwrap_or(Self::None)
    }

    /// Check if this effect draws procedurally
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    fn pattern(self) -> Option<&'static dyn Pattern> {
        match self {
            Self::None => None,
            Self::Rainbow => Some(&RainbowPattern),
            Self::Breathing => Some(&BreathingPattern),
            Self::Alert => Some(&AlertPattern),
            Self::Spin => Some(&SpinPattern),
            Self::Comet => Some(&CometPattern),
        }
    }
}

/// Frame counter plus the canvas effects draw into
#[derive(Debug, Clone)]
pub struct EffectRenderer<const N: usize> {
    tick: u32,
    canvas: [Rgb; N],
}

impl<const N: usize> EffectRenderer<N> {
    pub const fn new() -> Self {
        Self {
            tick: 0,
            canvas: [BLACK; N],
        }
    }

    /// Restart the frame counter and clear trails
    pub fn reset(&mut self) {
        self.tick = 0;
        self.canvas = [BLACK; N];
    }

    /// Frames rendered since the last reset
    pub const fn tick(&self) -> u32 {
        self.tick
    }

    /// Render one frame of `effect` at a logical brightness `level`
    ///
    /// Returns `false` without touching `out` for [`Effect::None`].
    pub fn render(
        &mut self,
        effect: Effect,
        base: Rgb,
        level: u8,
        settings: &RenderSettings,
        out: &mut [Rgb; N],
    ) -> bool {
        let Some(pattern) = effect.pattern() else {
            return false;
        };

        self.tick = self.tick.wrapping_add(1);
        let frame = FrameContext {
            tick: self.tick,
            tick_period_ms: settings.tick_period_ms,
            base,
            layout: settings.layout,
        };
        let envelope = pattern.render(&frame, &mut self.canvas);
        let scale = settings.pwm.scale_channel(envelope, level);

        for (pixel, raw) in out.iter_mut().zip(self.canvas.iter()) {
            *pixel = Rgb {
                r: scale8(raw.r, scale),
                g: scale8(raw.g, scale),
                b: scale8(raw.b, scale),
            };
        }
        true
    }
}

impl<const N: usize> Default for EffectRenderer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hardware facts the renderer needs
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub tick_period_ms: u32,
    pub pwm: PwmWindow,
    pub layout: PanelLayout,
}
