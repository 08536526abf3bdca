//! Persisted lamp settings.
//!
//! The store is a plain key/value contract: six keys, each holding a `u32`.
//! How and where the values end up (NVS, flash sector, RAM) is up to the
//! [`SettingsStore`] implementation.

use heapless::LinearMap;

use crate::color::{CCT_DEFAULT, ColorMode, Rgb, WHITE, clamp_cct, rgb_from_u32, rgb_to_u32};
use crate::photometric::LEVEL_MAX;

/// Saved brightness used when nothing valid is stored
pub const DEFAULT_SAVED_BRIGHTNESS: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The key has never been written
    NotFound,
    /// The underlying storage failed
    Driver,
    /// A stored value is out of range for its key
    InvalidData,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => f.write_str("setting not found"),
            Self::Driver => f.write_str("storage driver error"),
            Self::InvalidData => f.write_str("invalid setting data"),
        }
    }
}

const SETTING_KEY_POWER: &str = "on";
const SETTING_KEY_SAVED_BRIGHTNESS: &str = "br";
const SETTING_KEY_COLOR_TEMPERATURE: &str = "cct";
const SETTING_KEY_COLOR: &str = "rgb";
const SETTING_KEY_COLOR_MODE: &str = "mode";
const SETTING_KEY_AUTO_BRIGHTNESS: &str = "auto_br";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Power,
    SavedBrightness,
    ColorTemperature,
    Color,
    ColorMode,
    AutoBrightness,
}

impl SettingKey {
    pub const ALL: [Self; 6] = [
        Self::Power,
        Self::SavedBrightness,
        Self::ColorTemperature,
        Self::Color,
        Self::ColorMode,
        Self::AutoBrightness,
    ];

    /// Storage key name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Power => SETTING_KEY_POWER,
            Self::SavedBrightness => SETTING_KEY_SAVED_BRIGHTNESS,
            Self::ColorTemperature => SETTING_KEY_COLOR_TEMPERATURE,
            Self::Color => SETTING_KEY_COLOR,
            Self::ColorMode => SETTING_KEY_COLOR_MODE,
            Self::AutoBrightness => SETTING_KEY_AUTO_BRIGHTNESS,
        }
    }
}

/// One persisted value together with its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Power(bool),
    /// Brightness percent restored on power-on, `1..=100`
    SavedBrightness(u8),
    /// Kelvin
    ColorTemperature(u16),
    Color(Rgb),
    ColorMode(ColorMode),
    AutoBrightness(bool),
}

impl Setting {
    pub const fn key(self) -> SettingKey {
        match self {
            Self::Power(_) => SettingKey::Power,
            Self::SavedBrightness(_) => SettingKey::SavedBrightness,
            Self::ColorTemperature(_) => SettingKey::ColorTemperature,
            Self::Color(_) => SettingKey::Color,
            Self::ColorMode(_) => SettingKey::ColorMode,
            Self::AutoBrightness(_) => SettingKey::AutoBrightness,
        }
    }

    /// Value as stored; colors are packed as `0xRRGGBB`
    #[allow(clippy::cast_lossless)]
    pub const fn raw_value(self) -> u32 {
        match self {
            Self::Power(on) | Self::AutoBrightness(on) => on as u32,
            Self::SavedBrightness(percent) => percent as u32,
            Self::ColorTemperature(kelvin) => kelvin as u32,
            Self::Color(color) => rgb_to_u32(color),
            Self::ColorMode(mode) => mode.as_u8() as u32,
        }
    }

    /// Decode a stored value
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_raw(key: SettingKey, raw: u32) -> Result<Self, StorageError> {
        let setting = match key {
            SettingKey::Power => Self::Power(raw != 0),
            SettingKey::AutoBrightness => Self::AutoBrightness(raw != 0),
            SettingKey::SavedBrightness => {
                if raw > u32::from(LEVEL_MAX) {
                    return Err(StorageError::InvalidData);
                }
                Self::SavedBrightness(raw as u8)
            }
            SettingKey::ColorTemperature => {
                let kelvin = u16::try_from(raw).map_err(|_| StorageError::InvalidData)?;
                Self::ColorTemperature(kelvin)
            }
            SettingKey::Color => {
                if raw > 0x00FF_FFFF {
                    return Err(StorageError::InvalidData);
                }
                Self::Color(rgb_from_u32(raw))
            }
            SettingKey::ColorMode => {
                let mode = u8::try_from(raw)
                    .ok()
                    .and_then(ColorMode::from_u8)
                    .ok_or(StorageError::InvalidData)?;
                Self::ColorMode(mode)
            }
        };
        Ok(setting)
    }
}

/// Key/value persistence used by the lamp
pub trait SettingsStore {
    /// Load one setting, [`StorageError::NotFound`] when never written
    fn load(&mut self, key: SettingKey) -> Result<Setting, StorageError>;

    /// Store one setting
    fn save(&mut self, setting: Setting) -> Result<(), StorageError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn load(&mut self, key: SettingKey) -> Result<Setting, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, setting: Setting) -> Result<(), StorageError> {
        (**self).save(setting)
    }
}

/// Everything the lamp persists, with first-boot defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampSettings {
    pub on: bool,
    pub saved_brightness: u8,
    pub cct: u16,
    pub rgb: Rgb,
    pub color_mode: ColorMode,
    pub auto_brightness: bool,
}

impl Default for LampSettings {
    fn default() -> Self {
        Self {
            on: true,
            saved_brightness: DEFAULT_SAVED_BRIGHTNESS,
            cct: CCT_DEFAULT,
            rgb: WHITE,
            color_mode: ColorMode::Temperature,
            auto_brightness: false,
        }
    }
}

impl LampSettings {
    /// Read every key, keeping the default for anything missing or broken
    pub fn load_from<S: SettingsStore>(store: &mut S) -> Self {
        let mut settings = Self::default();
        for key in SettingKey::ALL {
            match store.load(key) {
                Ok(setting) if setting.key() == key => settings.apply(setting),
                Ok(_) => log::warn!("settings: key {} returned a foreign value", key.as_str()),
                Err(StorageError::NotFound) => {}
                Err(err) => log::warn!("settings: failed to load {}: {}", key.as_str(), err),
            }
        }
        settings.sanitized()
    }

    /// Overwrite the field a setting belongs to
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::Power(on) => self.on = on,
            Setting::SavedBrightness(percent) => self.saved_brightness = percent,
            Setting::ColorTemperature(kelvin) => self.cct = kelvin,
            Setting::Color(color) => self.rgb = color,
            Setting::ColorMode(mode) => self.color_mode = mode,
            Setting::AutoBrightness(enabled) => self.auto_brightness = enabled,
        }
    }

    /// Current value for `key`
    pub const fn get(&self, key: SettingKey) -> Setting {
        match key {
            SettingKey::Power => Setting::Power(self.on),
            SettingKey::SavedBrightness => Setting::SavedBrightness(self.saved_brightness),
            SettingKey::ColorTemperature => Setting::ColorTemperature(self.cct),
            SettingKey::Color => Setting::Color(self.rgb),
            SettingKey::ColorMode => Setting::ColorMode(self.color_mode),
            SettingKey::AutoBrightness => Setting::AutoBrightness(self.auto_brightness),
        }
    }

    /// Saved brightness never 0, CCT inside the supported range
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.saved_brightness == 0 {
            self.saved_brightness = DEFAULT_SAVED_BRIGHTNESS;
        }
        self.saved_brightness = self.saved_brightness.min(LEVEL_MAX);
        self.cct = clamp_cct(self.cct);
        self
    }
}

/// RAM-backed store, for hosts without flash and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: LinearMap<SettingKey, u32, 6>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Stored raw value for `key`
    pub fn raw(&self, key: SettingKey) -> Option<u32> {
        self.values.get(&key).copied()
    }

    /// Store a raw value directly, bypassing validation
    pub fn insert_raw(&mut self, key: SettingKey, raw: u32) {
        // Six keys, six slots.
        let _ = self.values.insert(key, raw);
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self, key: SettingKey) -> Result<Setting, StorageError> {
        let raw = self.raw(key).ok_or(StorageError::NotFound)?;
        Setting::from_raw(key, raw)
    }

    fn save(&mut self, setting: Setting) -> Result<(), StorageError> {
        self.values
            .insert(setting.key(), setting.raw_value())
            .map_err(|_| StorageError::Driver)?;
        self.writes += 1;
        Ok(())
    }
}
