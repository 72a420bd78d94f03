//! Side effects of entering a mood

/// Eyelid overlay drawn over both eyes
///
/// Only one overlay can be active, which keeps tired, angry and happy
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Eyelids {
    /// No overlay
    #[default]
    None,
    /// Upper lid sloping down from the outer edge
    Tired,
    /// Upper lid sloping down from the inner edge
    Angry,
    /// Lower lid pushing up from below
    Happy,
}

/// What a mood change does to one flicker axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlickerChange {
    /// Leave the axis as it is
    Keep,
    /// Stop flickering (amplitude unchanged)
    Off,
    /// Start flickering with the given amplitude
    On { amplitude: i32 },
}

/// Flag deltas produced by a mood transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoodEffects {
    /// Eyelid overlay for the new mood
    pub eyelids: Eyelids,
    /// Curiosity flag after the change
    pub curious: bool,
    /// Horizontal flicker change
    pub horizontal: FlickerChange,
    /// Vertical flicker change
    pub vertical: FlickerChange,
}
