//! Board-agnostic animation logic for RoboEyes
//!
//! This crate contains everything above the framebuffer:
//!
//! - Eye animation engine (tweening, drawing, frame gating)
//! - Mood transitions
//! - Macro animation timers (autoblink, idle drift, laugh, confuse, flicker)
//! - Scripted sequences
//! - Configuration type definitions
//!
//! # Example
//!
//! ```ignore
//! let mut eyes = RoboEyes::new(SmallRng::seed_from_u64(1));
//! let mut sink = LinkSink::new(link);
//! eyes.set_autoblinker(true, None, None);
//! loop {
//!     if let Tick::ShowFailed(e) = eyes.update(clock.now_ms(), &mut sink) {
//!         // decide whether the link is gone
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod eyes;
pub mod mood;
pub mod sequence;

// Re-export key types
pub use config::{ConfigError, EyesConfig};
pub use eyes::{EyeCommand, Position, RoboEyes, Tick, Which};
pub use mood::Mood;
pub use sequence::{SequenceError, Sequences};
