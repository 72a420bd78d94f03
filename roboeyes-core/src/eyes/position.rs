//! Predefined gaze positions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the eyes look, as a point on the travel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Position {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Position {
    /// Left eye target inside `[0, max_x] x [0, max_y]`
    pub fn target(self, max_x: i32, max_y: i32) -> (i32, i32) {
        let (mid_x, mid_y) = (max_x / 2, max_y / 2);
        match self {
            Position::Center => (mid_x, mid_y),
            Position::North => (mid_x, 0),
            Position::NorthEast => (max_x, 0),
            Position::East => (max_x, mid_y),
            Position::SouthEast => (max_x, max_y),
            Position::South => (mid_x, max_y),
            Position::SouthWest => (0, max_y),
            Position::West => (0, mid_y),
            Position::NorthWest => (0, 0),
        }
    }
}
