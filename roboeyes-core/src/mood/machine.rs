//! Mood definition and transitions

use super::effects::{Eyelids, FlickerChange, MoodEffects};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flicker amplitude used by the Frozen and Scary moods (pixels)
pub const MOOD_FLICKER_AMPLITUDE: i32 = 2;

/// Emotional state driving eyelid shape and flicker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mood {
    #[default]
    Default,
    Tired,
    Angry,
    Happy,
    /// Shivering sideways
    Frozen,
    /// Tired lids plus vertical shiver
    Scary,
    /// Eyes grow taller near the edges of their travel
    Curious,
}

impl Mood {
    /// Moods that own the flicker axes while active
    pub fn is_shaky(self) -> bool {
        matches!(self, Mood::Frozen | Mood::Scary)
    }

    /// Eyelid overlay this mood shows
    pub fn eyelids(self) -> Eyelids {
        match self {
            Mood::Tired | Mood::Scary => Eyelids::Tired,
            Mood::Angry => Eyelids::Angry,
            Mood::Happy => Eyelids::Happy,
            Mood::Default | Mood::Frozen | Mood::Curious => Eyelids::None,
        }
    }

    /// Entry effects of moving from `self` to `next`
    ///
    /// Leaving Frozen or Scary for a calm mood stops both flicker axes.
    /// Entering Frozen or Scary claims both axes. Every other flicker state
    /// (for example a running laugh) is left alone.
    pub fn transition(self, next: Mood) -> MoodEffects {
        let (mut horizontal, mut vertical) = (FlickerChange::Keep, FlickerChange::Keep);

        if self.is_shaky() && !next.is_shaky() {
            horizontal = FlickerChange::Off;
            vertical = FlickerChange::Off;
        }

        match next {
            Mood::Frozen => {
                horizontal = FlickerChange::On {
                    amplitude: MOOD_FLICKER_AMPLITUDE,
                };
                vertical = FlickerChange::Off;
            }
            Mood::Scary => {
                horizontal = FlickerChange::Off;
                vertical = FlickerChange::On {
                    amplitude: MOOD_FLICKER_AMPLITUDE,
                };
            }
            _ => {}
        }

        MoodEffects {
            eyelids: next.eyelids(),
            curious: next == Mood::Curious,
            horizontal,
            vertical,
        }
    }
}
