//! Timers for recurring and one-shot macro animations

use rand::{Rng, RngCore};

/// Recurring timer with random jitter (autoblink, idle drift)
///
/// When it comes due it reschedules itself `interval + random(0..=variation)`
/// seconds ahead. A freshly enabled timer is due immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    enabled: bool,
    interval_s: u16,
    variation_s: u16,
    due_at_ms: u64,
}

impl IntervalTimer {
    /// Create a disabled timer
    pub const fn new(interval_s: u16, variation_s: u16) -> Self {
        Self {
            enabled: false,
            interval_s,
            variation_s,
            due_at_ms: 0,
        }
    }

    /// Enable or disable, optionally replacing interval and jitter
    pub fn configure(&mut self, enabled: bool, interval_s: Option<u16>, variation_s: Option<u16>) {
        self.enabled = enabled;
        if let Some(interval) = interval_s {
            self.interval_s = interval;
        }
        if let Some(variation) = variation_s {
            self.variation_s = variation;
        }
    }

    /// Enable or disable without touching the timing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_s(&self) -> u16 {
        self.interval_s
    }

    pub fn variation_s(&self) -> u16 {
        self.variation_s
    }

    /// Next due timestamp
    pub fn due_at_ms(&self) -> u64 {
        self.due_at_ms
    }

    /// Longest possible gap between two firings
    pub fn max_period_ms(&self) -> u64 {
        (u64::from(self.interval_s) + u64::from(self.variation_s)) * 1000
    }

    /// Returns true (and reschedules) if enabled and due
    pub fn poll<R: RngCore + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        if !self.enabled || now_ms < self.due_at_ms {
            return false;
        }
        let jitter = u64::from(rng.gen_range(0..=self.variation_s));
        self.due_at_ms = now_ms + (u64::from(self.interval_s) + jitter) * 1000;
        true
    }
}

/// Self-disarming one-shot effect (laugh, confuse)
///
/// `Idle -> Armed` on trigger, `Armed -> Active` on the next poll,
/// `Active -> Idle` once the duration has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OneShot {
    #[default]
    Idle,
    Armed,
    Active { since_ms: u64 },
}

/// Edge reported by [`OneShot::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OneShotEdge {
    Started,
    Finished,
}

impl OneShot {
    /// Arm the effect; ignored while it is already armed or running
    pub fn trigger(&mut self) {
        if *self == OneShot::Idle {
            *self = OneShot::Armed;
        }
    }

    /// Whether the effect is armed or running
    pub fn is_pending(&self) -> bool {
        *self != OneShot::Idle
    }

    /// Advance the state machine
    pub fn poll(&mut self, now_ms: u64, duration_ms: u64) -> Option<OneShotEdge> {
        match *self {
            OneShot::Idle => None,
            OneShot::Armed => {
                *self = OneShot::Active { since_ms: now_ms };
                Some(OneShotEdge::Started)
            }
            OneShot::Active { since_ms } if now_ms.saturating_sub(since_ms) >= duration_ms => {
                *self = OneShot::Idle;
                Some(OneShotEdge::Finished)
            }
            OneShot::Active { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_disabled_timer_never_fires() {
        let mut timer = IntervalTimer::new(1, 4);
        let mut rng = StepRng::new(0, 0);
        assert!(!timer.poll(0, &mut rng));
        assert!(!timer.poll(100_000, &mut rng));
    }

    #[test]
    fn test_enabled_timer_fires_immediately_then_waits() {
        let mut timer = IntervalTimer::new(2, 0);
        timer.set_enabled(true);
        let mut rng = StepRng::new(0, 0);

        assert!(timer.poll(500, &mut rng));
        assert_eq!(timer.due_at_ms(), 2_500);
        assert!(!timer.poll(2_499, &mut rng));
        assert!(timer.poll(2_500, &mut rng));
    }

    #[test]
    fn test_jitter_within_variation() {
        let mut timer = IntervalTimer::new(1, 3);
        timer.configure(true, None, None);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut now = 0;
        for _ in 0..50 {
            assert!(timer.poll(now, &mut rng));
            let gap = timer.due_at_ms() - now;
            assert!((1_000..=4_000).contains(&gap));
            assert_eq!(gap % 1_000, 0);
            now = timer.due_at_ms();
        }
    }

    #[test]
    fn test_configure_overrides() {
        let mut timer = IntervalTimer::new(1, 4);
        timer.configure(true, Some(2), None);
        assert_eq!(timer.interval_s(), 2);
        assert_eq!(timer.variation_s(), 4);
        assert_eq!(timer.max_period_ms(), 6_000);
    }

    #[test]
    fn test_one_shot_cycle() {
        let mut shot = OneShot::default();
        assert_eq!(shot.poll(0, 500), None);

        shot.trigger();
        assert!(shot.is_pending());
        assert_eq!(shot.poll(100, 500), Some(OneShotEdge::Started));
        assert_eq!(shot.poll(599, 500), None);
        assert_eq!(shot.poll(600, 500), Some(OneShotEdge::Finished));
        assert!(!shot.is_pending());
        assert_eq!(shot.poll(700, 500), None);
    }

    #[test]
    fn test_one_shot_retrigger_while_active_is_ignored() {
        let mut shot = OneShot::default();
        shot.trigger();
        shot.poll(0, 500);
        shot.trigger();
        assert_eq!(shot, OneShot::Active { since_ms: 0 });
    }
}
