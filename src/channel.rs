//! Bounded event queues for `no_std` consumers.
//!
//! Each consumer of lamp events (display task, MQTT bridge, BLE server)
//! owns one queue. The lamp side only ever pushes without waiting; the
//! consumer drains at its own pace. Built on `critical-section` and
//! `heapless::Deque`, so it is safe to share between tasks and interrupts.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Returned when the queue has no room; hands the value back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// A bounded, interrupt-safe FIFO
pub struct EventQueue<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> EventQueue<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle; any number may coexist
    pub const fn sender(&self) -> QueueSender<'_, T, SIZE> {
        QueueSender { queue: self }
    }

    /// Push without waiting
    pub fn try_push(&self, value: T) -> Result<(), QueueFull<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(QueueFull)
        })
    }

    /// Oldest queued value, if any
    pub fn pop(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything queued
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }
}

impl<T, const SIZE: usize> Default for EventQueue<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Push-only handle to an [`EventQueue`]
#[derive(Clone, Copy)]
pub struct QueueSender<'a, T, const SIZE: usize> {
    queue: &'a EventQueue<T, SIZE>,
}

impl<T, const SIZE: usize> QueueSender<'_, T, SIZE> {
    pub fn try_push(&self, value: T) -> Result<(), QueueFull<T>> {
        self.queue.try_push(value)
    }
}
