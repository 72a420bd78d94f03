//! Mood state
//!
//! Exactly one mood is active at a time. Changing mood is a pure function
//! of the old and new mood that yields the flag changes the engine applies.

pub mod effects;
pub mod machine;

pub use effects::{Eyelids, FlickerChange, MoodEffects};
pub use machine::{Mood, MOOD_FLICKER_AMPLITUDE};
