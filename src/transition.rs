//! Fade sessions: `Idle → Active → Idle`.
//!
//! A session only tracks timing and endpoints; the live value it drives is
//! owned by the caller and passed into [`FadeSession::advance`] every tick.
//! That keeps a fade interruptible: whenever the target changes, the next
//! tick re-captures the start from the live value instead of snapping back.

use crate::color::Rgb;
use crate::easing::FadeCurve;
use crate::math8::progress_q16;

/// Values that can be interpolated with a Q16 progress
pub trait Lerp: Copy + PartialEq {
    /// Interpolate between `start` and `target`, `t` in `0..=65536`
    fn lerp_q16(start: Self, target: Self, t: u32) -> Self;
}

impl Lerp for u8 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn lerp_q16(start: Self, target: Self, t: u32) -> Self {
        // Stay in the wide domain until the end to avoid truncation bias
        // at low brightness.
        let delta = i64::from(target) - i64::from(start);
        let value = (i64::from(start) << 16) + delta * i64::from(t);
        (value >> 16).clamp(0, i64::from(u8::MAX)) as u8
    }
}

impl Lerp for u16 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn lerp_q16(start: Self, target: Self, t: u32) -> Self {
        let delta = i64::from(target) - i64::from(start);
        let value = i64::from(start) + ((delta * i64::from(t)) >> 16);
        value.clamp(0, i64::from(u16::MAX)) as u16
    }
}

impl Lerp for Rgb {
    fn lerp_q16(start: Self, target: Self, t: u32) -> Self {
        Rgb {
            r: u8::lerp_q16(start.r, target.r, t),
            g: u8::lerp_q16(start.g, target.g, t),
            b: u8::lerp_q16(start.b, target.b, t),
        }
    }
}

/// Result of advancing a session by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep<T> {
    /// No fade in progress
    Idle,
    /// Intermediate value for this tick
    Progress(T),
    /// The fade reached its target this tick and is now idle
    Done(T),
}

/// One fade between a captured start and a target
#[derive(Debug, Clone)]
pub struct FadeSession<T: Lerp> {
    active: bool,
    /// Value at the start of the current run
    start: T,
    /// Requested end value
    target: T,
    /// Target observed by the last tick, used to detect retargeting
    seen_target: T,
    /// Set by [`cancel`](Self::cancel); the next run starts from the live value
    restart: bool,
    duration_ms: u32,
    elapsed_ms: u32,
}

impl<T: Lerp> FadeSession<T> {
    /// Create an idle session resting at `initial`
    pub const fn new(initial: T) -> Self {
        Self {
            active: false,
            start: initial,
            target: initial,
            seen_target: initial,
            restart: false,
            duration_ms: 0,
            elapsed_ms: 0,
        }
    }

    /// Check if a fade is in progress
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Target of the current (or last) fade
    pub const fn target(&self) -> T {
        self.target
    }

    /// Duration of the current (or last) fade
    pub const fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Arm the session toward `target`
    ///
    /// The start value is captured by the next [`advance`](Self::advance).
    pub fn arm(&mut self, target: T, duration_ms: u32) {
        // An idle session may have been bypassed by a direct write.
        if !self.active {
            self.restart = true;
        }
        self.target = target;
        self.duration_ms = duration_ms;
        self.active = true;
    }

    /// Stop the fade where it is
    pub fn cancel(&mut self) {
        self.active = false;
        self.restart = true;
    }

    /// Advance by one tick of `step_ms`
    ///
    /// `current` is the live value the fade is driving.
    pub fn advance(&mut self, current: T, step_ms: u32, curve: FadeCurve) -> FadeStep<T> {
        if !self.active {
            self.resync(current);
            return FadeStep::Idle;
        }

        if self.restart || self.target != self.seen_target {
            self.resync(current);
        }

        if current == self.target || self.duration_ms == 0 {
            return self.finish();
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(step_ms).min(self.duration_ms);
        if self.elapsed_ms >= self.duration_ms {
            return self.finish();
        }

        let progress = curve.apply(progress_q16(self.elapsed_ms, self.duration_ms));
        FadeStep::Progress(T::lerp_q16(self.start, self.target, progress))
    }

    /// Snap to the target and go idle
    fn finish(&mut self) -> FadeStep<T> {
        self.active = false;
        self.resync(self.target);
        FadeStep::Done(self.target)
    }

    fn resync(&mut self, current: T) {
        self.start = current;
        self.elapsed_ms = 0;
        self.seen_target = self.target;
        self.restart = false;
    }
}
