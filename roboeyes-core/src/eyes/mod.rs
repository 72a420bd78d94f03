//! Eye animation engine
//!
//! - [`Eye`]: per-eye geometry and tweening
//! - [`RoboEyes`]: the frame loop, commands and drawing
//! - [`EyeCommand`]: commands as values, for scripted sequences

pub mod command;
pub mod engine;
pub mod geometry;
pub mod position;

pub use command::{EyeCommand, Which};
pub use engine::{RoboEyes, Tick};
pub use geometry::{tween, Eye};
pub use position::Position;
