//! Alternating position offset

use crate::mood::FlickerChange;

/// One flicker axis
///
/// While enabled, each frame yields `-amplitude` then `+amplitude`,
/// alternating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Flicker {
    enabled: bool,
    amplitude: i32,
    alternate: bool,
}

impl Flicker {
    pub const fn new(amplitude: i32) -> Self {
        Self {
            enabled: false,
            amplitude,
            alternate: false,
        }
    }

    /// Enable or disable, optionally replacing the amplitude
    pub fn set(&mut self, enabled: bool, amplitude: Option<i32>) {
        self.enabled = enabled;
        if let Some(amplitude) = amplitude {
            self.amplitude = amplitude;
        }
    }

    /// Apply a mood-driven change
    pub fn apply(&mut self, change: FlickerChange) {
        match change {
            FlickerChange::Keep => {}
            FlickerChange::Off => self.set(false, None),
            FlickerChange::On { amplitude } => self.set(true, Some(amplitude)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn amplitude(&self) -> i32 {
        self.amplitude
    }

    /// Offset for this frame (0 when disabled)
    pub fn next_offset(&mut self) -> i32 {
        if !self.enabled {
            return 0;
        }
        let offset = if self.alternate {
            self.amplitude
        } else {
            -self.amplitude
        };
        self.alternate = !self.alternate;
        offset
    }
}
