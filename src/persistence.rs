//! Delayed commit of changed settings.
//!
//! Setters only flag what changed. The periodic tick writes the flagged
//! fields once nothing has changed for a quiet period, so a burst of
//! changes (a dragged slider) costs a single flash write.

use embassy_time::{Duration, Instant};

use crate::settings::SettingKey;

/// Quiet period before changed settings are written
pub const COMMIT_DELAY: Duration = Duration::from_millis(1000);

/// Per-field "needs writing" flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags {
    pub power: bool,
    pub saved_brightness: bool,
    pub cct: bool,
    pub rgb: bool,
    pub mode: bool,
    pub auto_brightness: bool,
}

impl DirtyFlags {
    /// Check if any field needs writing
    pub const fn any(&self) -> bool {
        self.power
            || self.saved_brightness
            || self.cct
            || self.rgb
            || self.mode
            || self.auto_brightness
    }

    pub const fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Power => self.power,
            SettingKey::SavedBrightness => self.saved_brightness,
            SettingKey::ColorTemperature => self.cct,
            SettingKey::Color => self.rgb,
            SettingKey::ColorMode => self.mode,
            SettingKey::AutoBrightness => self.auto_brightness,
        }
    }

    pub fn set(&mut self, key: SettingKey, dirty: bool) {
        let flag = match key {
            SettingKey::Power => &mut self.power,
            SettingKey::SavedBrightness => &mut self.saved_brightness,
            SettingKey::ColorTemperature => &mut self.cct,
            SettingKey::Color => &mut self.rgb,
            SettingKey::ColorMode => &mut self.mode,
            SettingKey::AutoBrightness => &mut self.auto_brightness,
        };
        *flag = dirty;
    }
}

/// Dirty flags plus the quiet-period timer
///
/// Setters have no clock, so a change only raises `touched`; the next
/// [`observe`](Self::observe) stamps it with the tick's time.
#[derive(Debug, Clone)]
pub struct CommitTracker {
    flags: DirtyFlags,
    touched: bool,
    last_change: Option<Instant>,
    delay: Duration,
}

impl CommitTracker {
    pub const fn new(delay: Duration) -> Self {
        Self {
            flags: DirtyFlags {
                power: false,
                saved_brightness: false,
                cct: false,
                rgb: false,
                mode: false,
                auto_brightness: false,
            },
            touched: false,
            last_change: None,
            delay,
        }
    }

    pub const fn flags(&self) -> DirtyFlags {
        self.flags
    }

    /// Flag `keys` as changed and restart the quiet period
    pub fn mark(&mut self, keys: &[SettingKey]) {
        for key in keys {
            self.flags.set(*key, true);
        }
        self.touched = true;
    }

    /// Record the time of any change made since the last tick
    pub fn observe(&mut self, now: Instant) {
        if self.touched {
            self.touched = false;
            self.last_change = Some(now);
        }
    }

    /// Check if dirty fields have been quiet long enough to write
    pub fn is_due(&self, now: Instant) -> bool {
        if !self.flags.any() || self.touched {
            return false;
        }
        match self.last_change {
            Some(changed) => now.saturating_duration_since(changed) >= self.delay,
            None => false,
        }
    }

    /// Clear one field after a successful write
    pub fn clear(&mut self, key: SettingKey) {
        self.flags.set(key, false);
    }

    /// Drop the timer once every field is written
    ///
    /// Fields that failed to write stay dirty and the quiet period starts
    /// over, so the write is retried later.
    pub fn settle(&mut self) {
        if self.flags.any() {
            self.touched = true;
        } else {
            self.last_change = None;
        }
    }
}

impl Default for CommitTracker {
    fn default() -> Self {
        Self::new(COMMIT_DELAY)
    }
}
