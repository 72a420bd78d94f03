//! Engine commands as data
//!
//! Lets scripted sequences drive the same operations as direct calls.

use super::position::Position;
use crate::mood::Mood;

/// Eye selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Which {
    #[default]
    Both,
    Left,
    Right,
}

impl Which {
    /// Selector for a left/right flag pair; neither means the right eye
    pub fn from_flags(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Which::Both,
            (true, false) => Which::Left,
            _ => Which::Right,
        }
    }

    pub fn left(self) -> bool {
        matches!(self, Which::Both | Which::Left)
    }

    pub fn right(self) -> bool {
        matches!(self, Which::Both | Which::Right)
    }
}

/// One engine operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeCommand {
    SetMood(Mood),
    Blink(Which),
    Open(Which),
    Close(Which),
    Wink { left: bool, right: bool },
    Laugh,
    Confuse,
    SetPosition(Position),
    SetCuriosity(bool),
    SetCyclops(bool),
    SetAutoblink(bool),
    SetIdle(bool),
    HorizontalFlicker(bool),
    VerticalFlicker(bool),
}
