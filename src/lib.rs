#![no_std]

pub mod ambient;
pub mod channel;
pub mod color;
pub mod controller;
pub mod easing;
pub mod effect;
pub mod event;
pub mod intent;
pub mod layout;
pub mod math8;
pub mod persistence;
pub mod photometric;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod transition;

pub use channel::{EventQueue, QueueSender};
pub use controller::{LampConfig, LampController, LampError, LampSnapshot};
pub use easing::FadeCurve;
pub use effect::{Effect, EffectRenderer};
pub use event::{Destinations, EventBus, EventKind, EventSink, LampEvent, NullSink};
pub use intent::{IntentQueue, LampIntent, LampStateIntent};
pub use layout::PanelLayout;
pub use persistence::DirtyFlags;
pub use photometric::{PwmWindow, cct_to_rgb, scale_channel};
pub use scene::Scene;
pub use scheduler::{TickResult, TickScheduler};
pub use settings::{LampSettings, MemoryStore, Setting, SettingKey, SettingsStore, StorageError};

pub use color::{ColorMode, Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The lamp controller is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

impl<T: OutputDriver + ?Sized> OutputDriver for &mut T {
    fn write(&mut self, colors: &[Rgb]) {
        (**self).write(colors);
    }
}
