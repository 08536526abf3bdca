//! Lamp controller: the single owner of lamp state.
//!
//! All state, both fade sessions and the LED buffer sit behind one mutex.
//! Setters only mutate state and arm fades; visual convergence happens in
//! [`LampController::tick`], which the lamp task calls once per tick period.
//! Every public call waits at most `lock_timeout` for the lock and skips the
//! operation with [`LampError::Busy`] when it cannot get it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::ambient::{AMBIENT_HYSTERESIS, lux_to_percent};
use crate::color::{BLACK, ColorMode, Hsv, Rgb, cct_to_raw_rgb, clamp_cct, hsv2rgb, rgb_to_u32};
use crate::easing::FadeCurve;
use crate::effect::{Effect, EffectRenderer, RenderSettings};
use crate::event::{Destinations, EventKind, EventSink, LampEvent};
use crate::layout::PanelLayout;
use crate::persistence::{COMMIT_DELAY, CommitTracker, DirtyFlags};
use crate::photometric::{LEVEL_MAX, PwmWindow};
use crate::scene::Scene;
use crate::settings::{DEFAULT_SAVED_BRIGHTNESS, LampSettings, SettingKey, SettingsStore};
use crate::transition::{FadeSession, FadeStep};

/// Shortest brightness fade when a non-zero fade was requested
pub const MIN_FADE_MS: u32 = 50;

/// Default fade-in after boot
pub const BOOT_FADE_MS: u16 = 1000;
/// Default fade for scene presets
pub const SCENE_FADE_MS: u16 = 500;
/// Default fade for ambient-light adjustments
pub const AMBIENT_FADE_MS: u16 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampError {
    /// The lock could not be taken in time; nothing was changed
    Busy,
}

impl core::fmt::Display for LampError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Busy => f.write_str("lamp busy"),
        }
    }
}

/// Controller configuration
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    /// Period of [`LampController::tick`]; fades advance by this much per tick
    pub tick_period: Duration,
    /// Quiet period before changed settings are written
    pub commit_delay: Duration,
    /// Longest wait for the state lock
    pub lock_timeout: Duration,
    pub pwm: PwmWindow,
    pub layout: PanelLayout,
    pub boot_fade_ms: u16,
    pub scene_fade_ms: u16,
    pub ambient_fade_ms: u16,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(10),
            commit_delay: COMMIT_DELAY,
            lock_timeout: Duration::from_millis(20),
            pwm: PwmWindow::DEFAULT,
            layout: PanelLayout::DEFAULT,
            boot_fade_ms: BOOT_FADE_MS,
            scene_fade_ms: SCENE_FADE_MS,
            ambient_fade_ms: AMBIENT_FADE_MS,
        }
    }
}

/// Consistent copy of the observable lamp state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampSnapshot {
    pub on: bool,
    /// Level currently rendered, `0..=100`
    pub brightness: u8,
    /// Percent restored on power-on, `1..=100`
    pub saved_brightness: u8,
    /// Kelvin; the target while a fade toward CCT runs
    pub cct: u16,
    /// Base color; the target while an RGB fade runs
    pub rgb: Rgb,
    /// Color mode the lamp is in or fading toward
    pub color_mode: ColorMode,
    pub effect: Effect,
    pub scene: Scene,
    pub auto_brightness: bool,
    pub fade_curve: FadeCurve,
    /// A brightness fade is in progress
    pub fading: bool,
}

impl LampSnapshot {
    pub const fn is_cct_mode(&self) -> bool {
        self.color_mode.is_temperature()
    }
}

/// Lamp state, owned by the controller lock
pub(crate) struct LampCore<D, S, E, const N: usize> {
    driver: D,
    store: S,
    sink: E,
    config: LampConfig,
    render: RenderSettings,

    on: bool,
    brightness: u8,
    saved_brightness: u8,
    cct: u16,
    rgb: Rgb,
    use_cct: bool,
    effect: Effect,
    scene: Scene,
    auto_brightness: bool,
    fade_curve: FadeCurve,

    brightness_fade: FadeSession<u8>,
    cct_fade: FadeSession<u16>,
    rgb_fade: FadeSession<Rgb>,
    /// The running RGB fade ends by switching to CCT mode at `final_cct`
    returns_to_cct: bool,
    final_cct: u16,

    commit: CommitTracker,
    renderer: EffectRenderer<N>,
    leds: [Rgb; N],
}

impl<D, S, E, const N: usize> LampCore<D, S, E, N>
where
    D: OutputDriver,
    S: SettingsStore,
    E: EventSink,
{
    #[allow(clippy::cast_possible_truncation)]
    fn new(driver: D, mut store: S, sink: E, config: LampConfig) -> Self {
        let settings = LampSettings::load_from(&mut store);
        log::info!(
            "lamp: hydrated on={} brightness={} cct={} mode={:?} auto={}",
            settings.on,
            settings.saved_brightness,
            settings.cct,
            settings.color_mode,
            settings.auto_brightness
        );

        let tick_period_ms = config.tick_period.as_millis().clamp(1, u64::from(u32::MAX)) as u32;
        Self {
            driver,
            store,
            sink,
            render: RenderSettings {
                tick_period_ms,
                pwm: config.pwm,
                layout: config.layout,
            },
            config,
            on: settings.on,
            brightness: 0,
            saved_brightness: settings.saved_brightness,
            cct: settings.cct,
            rgb: settings.rgb,
            use_cct: settings.color_mode.is_temperature(),
            effect: Effect::None,
            scene: Scene::None,
            auto_brightness: settings.auto_brightness,
            fade_curve: FadeCurve::Linear,
            brightness_fade: FadeSession::new(0),
            cct_fade: FadeSession::new(settings.cct),
            rgb_fade: FadeSession::new(settings.rgb),
            returns_to_cct: false,
            final_cct: settings.cct,
            commit: CommitTracker::new(config.commit_delay),
            renderer: EffectRenderer::new(),
            leds: [BLACK; N],
        }
    }

    /// Push the first frame, start the fade-in and tell everyone
    fn boot(&mut self) {
        self.refresh();
        if self.on {
            let level = self.config.pwm.percent_to_level(self.saved_brightness);
            self.fade_to_brightness(level, self.config.boot_fade_ms);
        }
        let exclude = Destinations::NONE;
        self.notify(LampEvent::new(EventKind::Brightness, i32::from(self.saved_brightness)), exclude);
        self.notify(LampEvent::new(EventKind::Cct, i32::from(self.cct)), exclude);
        self.notify(LampEvent::flag(EventKind::AutoBrightness, self.auto_brightness), exclude);
    }

    fn notify(&mut self, event: LampEvent, exclude: Destinations) {
        self.sink.publish(event, exclude);
    }

    /// Nothing may be shown: logically off and no fade-out running
    const fn is_dark(&self) -> bool {
        !self.on && !self.brightness_fade.is_active()
    }

    /// Unscaled base color of the live representation
    const fn base_color(&self) -> Rgb {
        if self.use_cct {
            cct_to_raw_rgb(self.cct)
        } else {
            self.rgb
        }
    }

    fn push(&mut self) {
        self.driver.write(&self.leds);
    }

    fn push_black(&mut self) {
        if self.leds.iter().any(|pixel| *pixel != BLACK) {
            self.leds = [BLACK; N];
            self.push();
        }
    }

    /// Re-render the static frame
    ///
    /// Effects draw from the tick, so with an effect selected this only
    /// enforces black while dark.
    fn refresh(&mut self) {
        if self.effect.is_active() {
            if self.is_dark() {
                self.push_black();
            }
            return;
        }
        let color = if self.is_dark() {
            BLACK
        } else {
            self.config.pwm.scale_color(self.base_color(), self.brightness)
        };
        self.leds = [color; N];
        self.push();
    }

    /// Fade the rendered level toward `level`
    ///
    /// The nominal duration covers the full 0-100 range and shrinks with the
    /// distance actually travelled. A zero-length fade lands immediately.
    pub(crate) fn fade_to_brightness(&mut self, level: u8, nominal_ms: u16) {
        let level = level.min(LEVEL_MAX);
        let distance = u32::from(level.abs_diff(self.brightness));
        let mut duration = u32::from(nominal_ms) * distance / u32::from(LEVEL_MAX);
        if nominal_ms > 0 && distance > 0 && duration < MIN_FADE_MS {
            duration = MIN_FADE_MS;
        }

        if duration == 0 {
            self.brightness_fade.cancel();
            self.brightness = level;
            self.refresh();
            return;
        }
        log::debug!("lamp: fade {} -> {} over {}ms", self.brightness, level, duration);
        self.brightness_fade.arm(level, duration);
    }

    pub(crate) fn cancel_fade(&mut self) {
        self.brightness_fade.cancel();
    }

    pub(crate) fn set_fade_curve(&mut self, curve: FadeCurve) {
        self.fade_curve = curve;
    }

    pub(crate) fn set_power(&mut self, on: bool, fade_ms: u16, exclude: Destinations) {
        self.brightness_fade.cancel();
        self.on = on;
        if on {
            let level = self.config.pwm.percent_to_level(self.saved_brightness());
            self.fade_to_brightness(level, fade_ms);
        } else {
            // Effects have their own cadence; a slow fade cannot blend with them.
            let fade_ms = if self.effect.is_active() { 0 } else { fade_ms };
            self.fade_to_brightness(0, fade_ms);
        }
        self.commit.mark(&[SettingKey::Power]);
        self.notify(LampEvent::flag(EventKind::Light, on), exclude);
    }

    pub(crate) fn toggle_power(&mut self, fade_ms: u16, exclude: Destinations) {
        self.set_power(!self.on, fade_ms, exclude);
    }

    pub(crate) fn set_brightness(&mut self, percent: u8, fade_ms: u16, exclude: Destinations) {
        // 0% belongs to power-off.
        let percent = percent.clamp(1, LEVEL_MAX);
        if self.on {
            let level = self.config.pwm.percent_to_level(percent);
            if fade_ms > 0 {
                self.fade_to_brightness(level, fade_ms);
            } else {
                self.brightness_fade.cancel();
                self.brightness = level;
                self.refresh();
            }
        }
        self.saved_brightness = percent;
        self.commit.mark(&[SettingKey::SavedBrightness]);
        self.notify(LampEvent::new(EventKind::Brightness, i32::from(percent)), exclude);
    }

    pub(crate) fn set_saved_brightness(&mut self, percent: u8) {
        if percent == 0 {
            return;
        }
        self.saved_brightness = percent.min(LEVEL_MAX);
        self.commit.mark(&[SettingKey::SavedBrightness]);
    }

    pub(crate) const fn saved_brightness(&self) -> u8 {
        if self.saved_brightness == 0 {
            DEFAULT_SAVED_BRIGHTNESS
        } else {
            self.saved_brightness
        }
    }

    pub(crate) fn set_cct(&mut self, kelvin: u16, fade_ms: u16, exclude: Destinations) {
        let kelvin = clamp_cct(kelvin);
        if fade_ms > 0 && self.use_cct {
            self.rgb_fade.cancel();
            self.returns_to_cct = false;
            self.cct_fade.arm(kelvin, u32::from(fade_ms));
        } else if fade_ms > 0 {
            // Fade in RGB space toward the equivalent color, switch mode at the end.
            self.cct_fade.cancel();
            self.returns_to_cct = true;
            self.final_cct = kelvin;
            self.rgb_fade.arm(cct_to_raw_rgb(kelvin), u32::from(fade_ms));
        } else {
            self.cancel_color_fades();
            self.cct = kelvin;
            self.use_cct = true;
            self.refresh();
        }
        self.commit.mark(&[SettingKey::ColorTemperature, SettingKey::ColorMode]);
        self.notify(LampEvent::new(EventKind::Cct, i32::from(kelvin)), exclude);
    }

    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn set_color(&mut self, color: Rgb, fade_ms: u16, exclude: Destinations) {
        if fade_ms > 0 {
            if self.use_cct {
                // Continue from what is on screen now.
                self.rgb = cct_to_raw_rgb(self.cct);
                self.use_cct = false;
            }
            self.cct_fade.cancel();
            self.returns_to_cct = false;
            self.rgb_fade.arm(color, u32::from(fade_ms));
        } else {
            self.cancel_color_fades();
            self.rgb = color;
            self.use_cct = false;
            self.refresh();
        }
        self.commit.mark(&[SettingKey::Color, SettingKey::ColorMode]);
        self.notify(LampEvent::new(EventKind::Rgb, rgb_to_u32(color) as i32), exclude);
    }

    pub(crate) fn set_hsv(&mut self, color: Hsv, fade_ms: u16, exclude: Destinations) {
        self.set_color(hsv2rgb(color), fade_ms, exclude);
    }

    fn cancel_color_fades(&mut self) {
        self.cct_fade.cancel();
        self.rgb_fade.cancel();
        self.returns_to_cct = false;
    }

    pub(crate) fn set_effect(&mut self, effect: Effect, exclude: Destinations) {
        log::debug!("lamp: effect {}", effect.as_str());
        self.effect = effect;
        self.renderer.reset();
        if effect.is_active() {
            self.scene = Scene::None;
        } else {
            self.refresh();
        }
        self.notify(LampEvent::new(EventKind::Effect, i32::from(effect as u8)), exclude);
    }

    pub(crate) fn set_scene(&mut self, scene: Scene, exclude: Destinations) {
        log::debug!("lamp: scene {}", scene.as_str());
        let Some(preset) = scene.preset() else {
            self.scene = Scene::None;
            return;
        };
        let fade_ms = self.config.scene_fade_ms;
        self.set_cct(preset.cct, fade_ms, exclude);
        self.set_brightness(preset.brightness, fade_ms, exclude);
        self.scene = scene;
        if self.effect.is_active() {
            self.set_effect(Effect::None, exclude);
        }
    }

    pub(crate) fn set_auto_brightness(&mut self, enabled: bool, exclude: Destinations) {
        if self.auto_brightness == enabled {
            return;
        }
        self.auto_brightness = enabled;
        self.commit.mark(&[SettingKey::AutoBrightness]);
        self.notify(LampEvent::flag(EventKind::AutoBrightness, enabled), exclude);
    }

    pub(crate) fn apply_ambient_lux(&mut self, lux: f32, exclude: Destinations) {
        if !self.auto_brightness {
            return;
        }
        let target = lux_to_percent(lux);
        if target.abs_diff(self.saved_brightness()) > AMBIENT_HYSTERESIS {
            self.set_brightness(target, self.config.ambient_fade_ms, exclude);
        }
    }

    /// One period of the lamp task
    pub(crate) fn tick(&mut self, now: Instant) {
        let step = self.render.tick_period_ms;
        let curve = self.fade_curve;
        self.commit.observe(now);

        match self.brightness_fade.advance(self.brightness, step, curve) {
            FadeStep::Idle => {}
            FadeStep::Progress(level) => {
                if level != self.brightness {
                    self.brightness = level;
                    self.refresh();
                }
            }
            FadeStep::Done(level) => {
                self.brightness = level;
                self.refresh();
            }
        }

        let mut color_changed = false;
        match self.cct_fade.advance(self.cct, step, curve) {
            FadeStep::Idle => {}
            FadeStep::Progress(kelvin) | FadeStep::Done(kelvin) => {
                color_changed |= kelvin != self.cct;
                self.cct = kelvin;
            }
        }
        match self.rgb_fade.advance(self.rgb, step, curve) {
            FadeStep::Idle => {}
            FadeStep::Progress(color) => {
                color_changed |= color != self.rgb;
                self.rgb = color;
            }
            FadeStep::Done(color) => {
                self.rgb = color;
                if self.returns_to_cct {
                    self.returns_to_cct = false;
                    self.use_cct = true;
                    self.cct = self.final_cct;
                }
                color_changed = true;
            }
        }
        if color_changed {
            self.refresh();
        }

        if self.commit.is_due(now) {
            self.flush();
        }

        if self.effect.is_active() {
            if self.is_dark() {
                self.push_black();
            } else {
                let base = self.base_color();
                self.renderer
                    .render(self.effect, base, self.brightness, &self.render, &mut self.leds);
                self.push();
            }
        }
    }

    /// What should survive a reboot: targets, not mid-fade values
    fn persisted(&self) -> LampSettings {
        let color_mode = if self.use_cct || self.returns_to_cct {
            ColorMode::Temperature
        } else {
            ColorMode::Rgb
        };
        LampSettings {
            on: self.on,
            saved_brightness: self.saved_brightness(),
            cct: self.target_cct(),
            rgb: self.target_rgb(),
            color_mode,
            auto_brightness: self.auto_brightness,
        }
    }

    const fn target_cct(&self) -> u16 {
        if self.returns_to_cct {
            self.final_cct
        } else if self.cct_fade.is_active() {
            self.cct_fade.target()
        } else {
            self.cct
        }
    }

    fn target_rgb(&self) -> Rgb {
        if self.rgb_fade.is_active() && !self.returns_to_cct {
            self.rgb_fade.target()
        } else {
            self.rgb
        }
    }

    /// Write every dirty field now
    pub(crate) fn flush(&mut self) {
        let flags = self.commit.flags();
        if !flags.any() {
            return;
        }
        let settings = self.persisted();
        for key in SettingKey::ALL {
            if !flags.get(key) {
                continue;
            }
            match self.store.save(settings.get(key)) {
                Ok(()) => self.commit.clear(key),
                Err(err) => log::warn!("lamp: failed to persist {}: {}", key.as_str(), err),
            }
        }
        self.commit.settle();
        log::debug!("lamp: settings committed, pending {:?}", self.commit.flags());
    }

    pub(crate) fn snapshot(&self) -> LampSnapshot {
        let color_mode = if self.use_cct || self.returns_to_cct {
            ColorMode::Temperature
        } else {
            ColorMode::Rgb
        };
        let rgb = if self.rgb_fade.is_active() {
            self.rgb_fade.target()
        } else {
            self.rgb
        };
        LampSnapshot {
            on: self.on,
            brightness: self.brightness,
            saved_brightness: self.saved_brightness(),
            cct: self.target_cct(),
            rgb,
            color_mode,
            effect: self.effect,
            scene: self.scene,
            auto_brightness: self.auto_brightness,
            fade_curve: self.fade_curve,
            fading: self.brightness_fade.is_active(),
        }
    }
}

/// Thread-safe handle to the lamp
///
/// Construct once at startup and share by reference with every task that
/// controls the lamp.
pub struct LampController<D, S, E, const N: usize> {
    core: Mutex<CriticalSectionRawMutex, LampCore<D, S, E, N>>,
    lock_timeout: Duration,
}

impl<D, S, E, const N: usize> LampController<D, S, E, N>
where
    D: OutputDriver,
    S: SettingsStore,
    E: EventSink,
{
    /// Load settings from `store`, push the first frame and start the
    /// boot fade-in
    pub fn new(driver: D, store: S, sink: E, config: LampConfig) -> Self {
        let mut core = LampCore::new(driver, store, sink, config);
        core.boot();
        Self {
            core: Mutex::new(core),
            lock_timeout: config.lock_timeout,
        }
    }

    /// Take the state lock, waiting at most `lock_timeout`
    pub(crate) fn lock(
        &self,
        operation: &'static str,
    ) -> Result<MutexGuard<'_, CriticalSectionRawMutex, LampCore<D, S, E, N>>, LampError> {
        if let Ok(guard) = self.core.try_lock() {
            return Ok(guard);
        }
        let deadline = Instant::now() + self.lock_timeout;
        loop {
            if let Ok(guard) = self.core.try_lock() {
                return Ok(guard);
            }
            if Instant::now() >= deadline {
                log::warn!("lamp: {} skipped, lock busy", operation);
                return Err(LampError::Busy);
            }
            core::hint::spin_loop();
        }
    }

    /// Switch on or off, fading over `fade_ms`
    ///
    /// Switching off while an effect runs cuts the light immediately.
    pub fn set_power(&self, on: bool, fade_ms: u16, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_power")?.set_power(on, fade_ms, exclude);
        Ok(())
    }

    pub fn toggle_power(&self, fade_ms: u16, exclude: Destinations) -> Result<(), LampError> {
        self.lock("toggle_power")?.toggle_power(fade_ms, exclude);
        Ok(())
    }

    /// Set the brightness percent, `0` is treated as `1`
    ///
    /// While off only the saved brightness changes.
    pub fn set_brightness(&self, percent: u8, fade_ms: u16, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_brightness")?.set_brightness(percent, fade_ms, exclude);
        Ok(())
    }

    /// Set the color temperature in Kelvin and switch to CCT mode
    ///
    /// Out-of-range values are clamped to
    /// [`CCT_MIN`](crate::color::CCT_MIN)`..=`[`CCT_MAX`](crate::color::CCT_MAX).
    pub fn set_cct(&self, kelvin: u16, fade_ms: u16, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_cct")?.set_cct(kelvin, fade_ms, exclude);
        Ok(())
    }

    /// Set the base color and switch to RGB mode
    pub fn set_color(&self, color: Rgb, fade_ms: u16, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_color")?.set_color(color, fade_ms, exclude);
        Ok(())
    }

    pub fn set_hsv(&self, color: Hsv, fade_ms: u16, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_hsv")?.set_hsv(color, fade_ms, exclude);
        Ok(())
    }

    /// Select an effect; any effect clears the scene label
    pub fn set_effect(&self, effect: Effect, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_effect")?.set_effect(effect, exclude);
        Ok(())
    }

    /// Select an effect by name; unknown names select [`Effect::None`]
    pub fn set_effect_by_name(&self, name: &str, exclude: Destinations) -> Result<(), LampError> {
        self.set_effect(Effect::parse_lossy(name), exclude)
    }

    /// Apply a scene preset and stop any effect
    pub fn set_scene(&self, scene: Scene, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_scene")?.set_scene(scene, exclude);
        Ok(())
    }

    /// Apply a scene by name; unknown names only reset the label
    pub fn set_scene_by_name(&self, name: &str, exclude: Destinations) -> Result<(), LampError> {
        self.set_scene(Scene::parse_lossy(name), exclude)
    }

    /// Change the brightness restored on power-on without touching the output
    ///
    /// `0` is ignored.
    pub fn set_saved_brightness(&self, percent: u8) -> Result<(), LampError> {
        self.lock("set_saved_brightness")?.set_saved_brightness(percent);
        Ok(())
    }

    pub fn set_auto_brightness(&self, enabled: bool, exclude: Destinations) -> Result<(), LampError> {
        self.lock("set_auto_brightness")?.set_auto_brightness(enabled, exclude);
        Ok(())
    }

    /// Feed an ambient light reading; adjusts brightness when auto
    /// brightness is on
    pub fn apply_ambient_lux(&self, lux: f32, exclude: Destinations) -> Result<(), LampError> {
        self.lock("apply_ambient_lux")?.apply_ambient_lux(lux, exclude);
        Ok(())
    }

    /// Fade the rendered level (`0..=100`) directly, without touching power
    /// or the saved brightness
    pub fn fade_to_brightness(&self, level: u8, nominal_ms: u16) -> Result<(), LampError> {
        self.lock("fade_to_brightness")?.fade_to_brightness(level, nominal_ms);
        Ok(())
    }

    /// Freeze the brightness fade where it is
    pub fn cancel_fade(&self) -> Result<(), LampError> {
        self.lock("cancel_fade")?.cancel_fade();
        Ok(())
    }

    pub fn set_fade_curve(&self, curve: FadeCurve) -> Result<(), LampError> {
        self.lock("set_fade_curve")?.set_fade_curve(curve);
        Ok(())
    }

    /// Write every dirty setting now
    pub fn flush_now(&self) -> Result<(), LampError> {
        self.lock("flush_now")?.flush();
        Ok(())
    }

    /// Advance fades, commit settled settings and draw the effect frame
    pub fn tick(&self, now: Instant) -> Result<(), LampError> {
        self.lock("tick")?.tick(now);
        Ok(())
    }

    pub fn snapshot(&self) -> Result<LampSnapshot, LampError> {
        Ok(self.lock("snapshot")?.snapshot())
    }

    pub fn is_on(&self) -> Result<bool, LampError> {
        Ok(self.lock("is_on")?.on)
    }

    /// Level currently rendered, `0..=100`
    pub fn brightness(&self) -> Result<u8, LampError> {
        Ok(self.lock("brightness")?.brightness)
    }

    pub fn saved_brightness(&self) -> Result<u8, LampError> {
        Ok(self.lock("saved_brightness")?.saved_brightness())
    }

    pub fn cct(&self) -> Result<u16, LampError> {
        Ok(self.lock("cct")?.target_cct())
    }

    pub fn rgb(&self) -> Result<Rgb, LampError> {
        Ok(self.snapshot()?.rgb)
    }

    pub fn is_cct_mode(&self) -> Result<bool, LampError> {
        Ok(self.snapshot()?.is_cct_mode())
    }

    pub fn effect(&self) -> Result<Effect, LampError> {
        Ok(self.lock("effect")?.effect)
    }

    pub fn scene(&self) -> Result<Scene, LampError> {
        Ok(self.lock("scene")?.scene)
    }

    pub fn is_auto_brightness(&self) -> Result<bool, LampError> {
        Ok(self.lock("is_auto_brightness")?.auto_brightness)
    }

    pub fn is_fading(&self) -> Result<bool, LampError> {
        Ok(self.lock("is_fading")?.brightness_fade.is_active())
    }

    pub fn fade_curve(&self) -> Result<FadeCurve, LampError> {
        Ok(self.lock("fade_curve")?.fade_curve)
    }

    /// Copy of the last frame pushed to the LEDs
    pub fn frame(&self) -> Result<[Rgb; N], LampError> {
        Ok(self.lock("frame")?.leds)
    }

    /// Settings waiting to be written
    pub fn dirty(&self) -> Result<DirtyFlags, LampError> {
        Ok(self.lock("dirty")?.commit.flags())
    }
}
