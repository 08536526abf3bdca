//! Tick pacing for the lamp task.
//!
//! Portable: no async, no platform timer. The caller sleeps for the
//! returned duration between ticks.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::controller::{LampController, LampError};
use crate::event::EventSink;
use crate::settings::SettingsStore;

/// Result of a scheduled tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero when behind schedule)
    pub sleep_duration: Duration,
}

/// Fixed-period pacing with drift correction
///
/// Falling more than two periods behind drops the backlog instead of
/// catching up with a burst of ticks.
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(config.tick_period);
/// loop {
///     let result = scheduler.run(&lamp, Instant::now());
///     Timer::at(result.next_deadline).await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickScheduler {
    next_tick: Option<Instant>,
    period: Duration,
}

impl TickScheduler {
    pub const fn new(period: Duration) -> Self {
        Self {
            next_tick: None,
            period,
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Account for one tick happening at `now`
    pub fn advance(&mut self, now: Instant) -> TickResult {
        let max_drift = self.period * 2;
        let scheduled = match self.next_tick {
            Some(deadline) if now <= deadline + max_drift => deadline,
            _ => now,
        };

        let next_deadline = scheduled + self.period;
        self.next_tick = Some(next_deadline);

        TickResult {
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
        }
    }

    /// Tick the lamp and schedule the next tick
    ///
    /// A busy lamp only skips its tick; the schedule keeps going.
    pub fn run<D, S, E, const N: usize>(
        &mut self,
        lamp: &LampController<D, S, E, N>,
        now: Instant,
    ) -> TickResult
    where
        D: OutputDriver,
        S: SettingsStore,
        E: EventSink,
    {
        if let Err(LampError::Busy) = lamp.tick(now) {
            log::debug!("scheduler: tick skipped");
        }
        self.advance(now)
    }
}
