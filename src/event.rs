//! State-change notifications.
//!
//! Every mutating controller call takes an exclude mask naming the
//! destinations that must not hear about the change, usually the one the
//! command came from, so a slider moved on MQTT does not echo back to MQTT.

use core::ops::{BitOr, BitOrAssign};

use crate::channel::QueueSender;

const EVENT_KIND_LIGHT: u8 = 5;
const EVENT_KIND_BRIGHTNESS: u8 = 6;
const EVENT_KIND_CCT: u8 = 7;
const EVENT_KIND_RGB: u8 = 8;
const EVENT_KIND_EFFECT: u8 = 9;
const EVENT_KIND_AUTO_BRIGHTNESS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    /// `value`: 0 = off, 1 = on
    Light = EVENT_KIND_LIGHT,
    /// `value`: brightness percent
    Brightness = EVENT_KIND_BRIGHTNESS,
    /// `value`: Kelvin
    Cct = EVENT_KIND_CCT,
    /// `value`: `0xRRGGBB`
    Rgb = EVENT_KIND_RGB,
    /// `value`: effect id
    Effect = EVENT_KIND_EFFECT,
    /// `value`: 0 = off, 1 = on
    AutoBrightness = EVENT_KIND_AUTO_BRIGHTNESS,
}

impl EventKind {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EVENT_KIND_LIGHT => Self::Light,
            EVENT_KIND_BRIGHTNESS => Self::Brightness,
            EVENT_KIND_CCT => Self::Cct,
            EVENT_KIND_RGB => Self::Rgb,
            EVENT_KIND_EFFECT => Self::Effect,
            EVENT_KIND_AUTO_BRIGHTNESS => Self::AutoBrightness,
            _ => return None,
        })
    }
}

/// One notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampEvent {
    pub kind: EventKind,
    pub value: i32,
}

impl LampEvent {
    pub const fn new(kind: EventKind, value: i32) -> Self {
        Self { kind, value }
    }

    pub const fn flag(kind: EventKind, on: bool) -> Self {
        Self::new(kind, if on { 1 } else { 0 })
    }
}

/// Bitmask of notification consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Destinations(pub u8);

impl Destinations {
    pub const NONE: Self = Self(0);
    pub const GUI: Self = Self(1 << 0);
    pub const MQTT: Self = Self(1 << 1);
    pub const BLE: Self = Self(1 << 2);
    pub const ALL: Self = Self(0xFF);

    /// Check if every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Destinations {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Destinations {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Receiver of lamp notifications
///
/// Called with the controller lock held, so implementations must not block.
pub trait EventSink {
    /// Deliver `event` to every destination not in `exclude`
    fn publish(&mut self, event: LampEvent, exclude: Destinations);
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn publish(&mut self, event: LampEvent, exclude: Destinations) {
        (**self).publish(event, exclude);
    }
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: LampEvent, _exclude: Destinations) {}
}

/// Fan-out to the display, MQTT and BLE queues
///
/// Destinations without a queue are skipped. A full queue drops the event.
pub struct EventBus<'a, const SIZE: usize> {
    gui: Option<QueueSender<'a, LampEvent, SIZE>>,
    mqtt: Option<QueueSender<'a, LampEvent, SIZE>>,
    ble: Option<QueueSender<'a, LampEvent, SIZE>>,
}

impl<'a, const SIZE: usize> EventBus<'a, SIZE> {
    pub const fn new() -> Self {
        Self {
            gui: None,
            mqtt: None,
            ble: None,
        }
    }

    #[must_use]
    pub const fn with_gui(mut self, sender: QueueSender<'a, LampEvent, SIZE>) -> Self {
        self.gui = Some(sender);
        self
    }

    #[must_use]
    pub const fn with_mqtt(mut self, sender: QueueSender<'a, LampEvent, SIZE>) -> Self {
        self.mqtt = Some(sender);
        self
    }

    #[must_use]
    pub const fn with_ble(mut self, sender: QueueSender<'a, LampEvent, SIZE>) -> Self {
        self.ble = Some(sender);
        self
    }
}

impl<const SIZE: usize> Default for EventBus<'_, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> EventSink for EventBus<'_, SIZE> {
    fn publish(&mut self, event: LampEvent, exclude: Destinations) {
        let routes = [
            (Destinations::GUI, "gui", &self.gui),
            (Destinations::MQTT, "mqtt", &self.mqtt),
            (Destinations::BLE, "ble", &self.ble),
        ];
        for (destination, name, sender) in routes {
            if exclude.contains(destination) {
                continue;
            }
            let Some(sender) = sender else {
                continue;
            };
            if sender.try_push(event).is_err() {
                log::warn!("event: {} queue full, dropped {:?}", name, event.kind);
            }
        }
    }
}
