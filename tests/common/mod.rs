#![allow(dead_code)]

use smartlamp_core::{
    Destinations, EventBus, EventQueue, Instant, LampConfig, LampController, LampEvent,
    MemoryStore, OutputDriver, Rgb,
};

pub const LEDS: usize = 64;
pub const TICK_MS: u64 = 10;

/// Driver that only counts pushed frames
#[derive(Debug, Default)]
pub struct CountingDriver {
    pub frames: usize,
}

impl OutputDriver for CountingDriver {
    fn write(&mut self, _colors: &[Rgb]) {
        self.frames += 1;
    }
}

pub type TestLamp<'a> =
    LampController<CountingDriver, &'a mut MemoryStore, EventBus<'a, 32>, LEDS>;

pub fn lamp<'a>(store: &'a mut MemoryStore, bus: EventBus<'a, 32>) -> TestLamp<'a> {
    LampController::new(CountingDriver::default(), store, bus, LampConfig::default())
}

/// Advance simulated time tick by tick, returning the next tick time
pub fn run_ticks(lamp: &TestLamp<'_>, start_ms: u64, ticks: u64) -> u64 {
    let mut now = start_ms;
    for _ in 0..ticks {
        lamp.tick(Instant::from_millis(now)).unwrap();
        now += TICK_MS;
    }
    now
}

/// Run ticks until no brightness fade is active
pub fn settle(lamp: &TestLamp<'_>, start_ms: u64) -> u64 {
    let mut now = start_ms;
    for _ in 0..2_000 {
        lamp.tick(Instant::from_millis(now)).unwrap();
        now += TICK_MS;
        if !lamp.is_fading().unwrap() {
            break;
        }
    }
    // Colour fades run on their own clock; give them time to land.
    run_ticks(lamp, now, 100)
}

pub fn drain(queue: &EventQueue<LampEvent, 32>) -> Vec<LampEvent> {
    let mut events = Vec::new();
    while let Some(event) = queue.pop() {
        events.push(event);
    }
    events
}

pub const NONE: Destinations = Destinations::NONE;
