//! Macro animations
//!
//! Orthogonal effects layered over the eye geometry: autoblink, idle
//! drift, laugh and confuse one-shots, and the two flicker axes.

pub mod flicker;
pub mod timers;

pub use flicker::Flicker;
pub use timers::{IntervalTimer, OneShot, OneShotEdge};

/// Default autoblink interval (seconds)
pub const BLINK_INTERVAL_S: u16 = 1;
/// Default autoblink jitter (seconds)
pub const BLINK_VARIATION_S: u16 = 4;
/// Default idle drift interval (seconds)
pub const IDLE_INTERVAL_S: u16 = 1;
/// Default idle drift jitter (seconds)
pub const IDLE_VARIATION_S: u16 = 3;

/// Laugh duration (ms)
pub const LAUGH_DURATION_MS: u64 = 500;
/// Vertical flicker amplitude while laughing
pub const LAUGH_AMPLITUDE: i32 = 5;
/// Confuse duration (ms)
pub const CONFUSE_DURATION_MS: u64 = 500;
/// Horizontal flicker amplitude while confused
pub const CONFUSE_AMPLITUDE: i32 = 20;

/// Every macro animation timer, each with its own state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacroAnimations {
    pub autoblink: IntervalTimer,
    pub idle: IntervalTimer,
    pub laugh: OneShot,
    pub confuse: OneShot,
    pub horizontal: Flicker,
    pub vertical: Flicker,
}

impl Default for MacroAnimations {
    fn default() -> Self {
        Self {
            autoblink: IntervalTimer::new(BLINK_INTERVAL_S, BLINK_VARIATION_S),
            idle: IntervalTimer::new(IDLE_INTERVAL_S, IDLE_VARIATION_S),
            laugh: OneShot::Idle,
            confuse: OneShot::Idle,
            horizontal: Flicker::new(2),
            vertical: Flicker::new(10),
        }
    }
}
