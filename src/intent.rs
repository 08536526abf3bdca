//! Typed commands for the lamp.
//!
//! Transports (BLE command parser, MQTT handler, touchscreen, button task)
//! turn their messages into a [`LampIntent`] and either apply it directly or
//! queue it for the lamp task through an [`IntentQueue`].

use crate::OutputDriver;
use crate::channel::EventQueue;
use crate::color::{Hsv, Rgb};
use crate::controller::{LampController, LampError};
use crate::effect::Effect;
use crate::event::{Destinations, EventSink};
use crate::scene::Scene;
use crate::settings::SettingsStore;

/// Several state changes applied together, Home Assistant style
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LampStateIntent {
    pub power: Option<bool>,
    pub brightness: Option<u8>,
    pub color: Option<Rgb>,
    /// Kelvin, ignored when `color` is set
    pub color_temperature: Option<u16>,
    pub effect: Option<Effect>,
    pub fade_ms: u16,
}

/// One inbound command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LampIntent {
    Power { on: bool, fade_ms: u16 },
    TogglePower { fade_ms: u16 },
    Brightness { percent: u8, fade_ms: u16 },
    ColorTemperature { kelvin: u16, fade_ms: u16 },
    Color { color: Rgb, fade_ms: u16 },
    Hsv { hue: u8, sat: u8, val: u8, fade_ms: u16 },
    Effect(Effect),
    Scene(Scene),
    AutoBrightness(bool),
    /// Ambient light reading in lux
    AmbientLux(f32),
    State(LampStateIntent),
}

/// An intent together with the destinations that must not be notified
pub type QueuedIntent = (LampIntent, Destinations);

/// Queue of intents waiting for the lamp task
pub type IntentQueue<const SIZE: usize> = EventQueue<QueuedIntent, SIZE>;

impl<D, S, E, const N: usize> LampController<D, S, E, N>
where
    D: OutputDriver,
    S: SettingsStore,
    E: EventSink,
{
    /// Apply one intent under a single lock
    pub fn apply_intent(&self, intent: LampIntent, exclude: Destinations) -> Result<(), LampError> {
        let mut core = self.lock("apply_intent")?;
        match intent {
            LampIntent::Power { on, fade_ms } => core.set_power(on, fade_ms, exclude),
            LampIntent::TogglePower { fade_ms } => core.toggle_power(fade_ms, exclude),
            LampIntent::Brightness { percent, fade_ms } => {
                core.set_brightness(percent, fade_ms, exclude);
            }
            LampIntent::ColorTemperature { kelvin, fade_ms } => {
                core.set_cct(kelvin, fade_ms, exclude);
            }
            LampIntent::Color { color, fade_ms } => core.set_color(color, fade_ms, exclude),
            LampIntent::Hsv {
                hue,
                sat,
                val,
                fade_ms,
            } => core.set_hsv(Hsv { hue, sat, val }, fade_ms, exclude),
            LampIntent::Effect(effect) => core.set_effect(effect, exclude),
            LampIntent::Scene(scene) => core.set_scene(scene, exclude),
            LampIntent::AutoBrightness(enabled) => core.set_auto_brightness(enabled, exclude),
            LampIntent::AmbientLux(lux) => core.apply_ambient_lux(lux, exclude),
            LampIntent::State(state) => {
                // Power last: brightness set while off becomes the power-on level.
                if let Some(effect) = state.effect {
                    core.set_effect(effect, exclude);
                }
                if let Some(percent) = state.brightness {
                    core.set_brightness(percent, state.fade_ms, exclude);
                }
                if let Some(color) = state.color {
                    core.set_color(color, state.fade_ms, exclude);
                } else if let Some(kelvin) = state.color_temperature {
                    core.set_cct(kelvin, state.fade_ms, exclude);
                }
                if let Some(on) = state.power {
                    core.set_power(on, state.fade_ms, exclude);
                }
            }
        }
        Ok(())
    }

    /// Apply everything queued so far, in order
    ///
    /// Stops at the first intent that cannot get the lock; that intent is
    /// dropped, the rest stay queued for the next call.
    pub fn process_pending<const SIZE: usize>(&self, queue: &IntentQueue<SIZE>) -> Result<usize, LampError> {
        let mut applied = 0;
        while let Some((intent, exclude)) = queue.pop() {
            self.apply_intent(intent, exclude)?;
            applied += 1;
        }
        Ok(applied)
    }
}
