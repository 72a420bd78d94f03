//! A single timed action inside a sequence

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step of a sequence
///
/// Fires its action once the owning sequence has been running for at
/// least `delay_ms`, then stays fired until the sequence is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step<A> {
    /// Delay from sequence start (milliseconds)
    delay_ms: u32,
    /// Action handed out when the step fires
    action: A,
    /// Whether the step has fired since the last reset
    fired: bool,
}

impl<A: Copy> Step<A> {
    /// Create an unfired step
    pub const fn new(delay_ms: u32, action: A) -> Self {
        Self {
            delay_ms,
            action,
            fired: false,
        }
    }

    /// Delay from sequence start
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// The step's action
    pub fn action(&self) -> A {
        self.action
    }

    /// Whether the step has fired
    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Fire if due; returns the action exactly once
    pub(crate) fn poll(&mut self, elapsed_ms: u64) -> Option<A> {
        if self.fired || elapsed_ms < u64::from(self.delay_ms) {
            return None;
        }
        self.fired = true;
        Some(self.action)
    }

    /// Make the step fire again on the next run
    pub(crate) fn rearm(&mut self) {
        self.fired = false;
    }
}
