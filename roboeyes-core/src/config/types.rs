//! Configuration type definitions
//!
//! Start-up settings for the eye engine. Every field has a default, so a
//! config file only needs the keys it wants to change.

use roboeyes_display::{HEIGHT, WIDTH};

use crate::mood::Mood;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default frame rate (frames per second)
pub const DEFAULT_FPS: u16 = 20;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input is not valid TOML or does not match the schema
    Parse,
    /// Frame rate of zero
    InvalidFrameRate,
    /// Eyes do not fit the canvas
    InvalidGeometry,
}

/// Recurring animation timer settings
///
/// Interval and variation left unset keep the engine's built-in timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimerConfig {
    /// Start enabled
    pub enabled: bool,
    /// Base interval (seconds)
    pub interval_s: Option<u16>,
    /// Random extra delay, `0..=variation_s` seconds
    pub variation_s: Option<u16>,
}

/// Default eye shape (both eyes start identical)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EyeGeometry {
    /// Eye width (pixels)
    pub width: u8,
    /// Eye height (pixels)
    pub height: u8,
    /// Corner radius (pixels)
    pub radius: u8,
    /// Gap between the eyes (pixels)
    pub space_between: u8,
}

impl Default for EyeGeometry {
    fn default() -> Self {
        Self {
            width: 36,
            height: 36,
            radius: 8,
            space_between: 10,
        }
    }
}

/// Engine start-up configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EyesConfig {
    /// Frames per second
    pub fps: u16,
    /// Periodic blinking
    pub autoblink: TimerConfig,
    /// Random gaze drift
    pub idle: TimerConfig,
    /// Initial mood
    pub mood: Mood,
    /// Single-eye mode
    pub cyclops: bool,
    /// Grow eyes near the edges of their travel
    pub curious: bool,
    /// Eye shape
    pub geometry: EyeGeometry,
}

impl Default for EyesConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            autoblink: TimerConfig::default(),
            idle: TimerConfig::default(),
            mood: Mood::Default,
            cyclops: false,
            curious: false,
            geometry: EyeGeometry::default(),
        }
    }
}

impl EyesConfig {
    /// Check the config can be rendered
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }

        let g = &self.geometry;
        let span = 2 * usize::from(g.width) + usize::from(g.space_between);
        if g.width == 0 || g.height == 0 || span > WIDTH || usize::from(g.height) > HEIGHT {
            return Err(ConfigError::InvalidGeometry);
        }
        Ok(())
    }

    /// Frame interval in milliseconds
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}
