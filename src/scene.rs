//! Named lighting presets.
//!
//! A scene is only a label plus a (CCT, brightness) pair; applying it goes
//! through the regular setters.

const SCENE_NAME_NONE: &str = "None";
const SCENE_NAME_READING: &str = "Reading";
const SCENE_NAME_NIGHT: &str = "Night";
const SCENE_NAME_COZY: &str = "Cozy";
const SCENE_NAME_BRIGHT: &str = "Bright";

/// Values a preset applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenePreset {
    /// Color temperature in Kelvin
    pub cct: u16,
    /// Brightness percent
    pub brightness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    #[default]
    None,
    Reading,
    Night,
    Cozy,
    Bright,
}

impl Scene {
    /// Display label
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => SCENE_NAME_NONE,
            Self::Reading => SCENE_NAME_READING,
            Self::Night => SCENE_NAME_NIGHT,
            Self::Cozy => SCENE_NAME_COZY,
            Self::Bright => SCENE_NAME_BRIGHT,
        }
    }

    /// Preset values, `None` for [`Scene::None`]
    pub const fn preset(self) -> Option<ScenePreset> {
        let (cct, brightness) = match self {
            Self::None => return None,
            Self::Reading => (4500, 80),
            Self::Night => (2700, 5),
            Self::Cozy => (3000, 50),
            Self::Bright => (6000, 100),
        };
        Some(ScenePreset { cct, brightness })
    }

    /// Parse a scene name, ignoring ASCII case
    pub fn parse_from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        [
            Self::None,
            Self::Reading,
            Self::Night,
            Self::Cozy,
            Self::Bright,
        ]
        .into_iter()
        .find(|scene| scene.as_str().eq_ignore_ascii_case(s))
    }

    /// Parse a scene name, falling back to [`Scene::None`]
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse_from_str(s).unwrap_or(Self::None)
    }
}

impl core::fmt::Display for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
