//! Timer slot: the single timer handle a reveal owns.
//!
//! Only phase transitions in the scheduler arm or disarm a slot. Firing a
//! slot disarms it, so a callback that unwinds mid-tick can never leave a
//! live timer behind.

use std::time::{Duration, Instant};

/// One optional deadline.
#[derive(Debug, Default)]
pub struct TimerSlot {
    deadline: Option<Instant>,
    /// Number of times this slot has been armed.
    arms: u64,
}

impl TimerSlot {
    /// Create a disarmed slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot, replacing any previous deadline.
    pub fn arm(&mut self, at: Instant) {
        self.deadline = Some(at);
        self.arms += 1;
    }

    /// Disarm the slot. Returns whether it was armed.
    pub fn disarm(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending.
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// How many times the slot has been armed.
    pub const fn arms(&self) -> u64 {
        self.arms
    }

    /// Fire the slot if its deadline has passed.
    ///
    /// Returns the deadline that fired; the slot is disarmed afterwards.
    pub fn fire(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(at) if at <= now => self.deadline.take(),
            _ => None,
        }
    }
}

/// Deadline for the tick after one scheduled at `fired`.
///
/// Keeps a steady cadence, but if the host fell behind it re-bases on
/// `now` instead of queueing a burst of catch-up ticks.
pub fn next_deadline(fired: Instant, now: Instant, cadence: Duration) -> Instant {
    let next = fired + cadence;
    if next < now {
        now + cadence
    } else {
        next
    }
}
