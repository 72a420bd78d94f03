//! RoboEyes Hardware Abstraction Layer
//!
//! The brick's display is reached through a single capability: writing a
//! block of bytes into a module's memory map. Connection setup (USB,
//! Bluetooth, serial) happens elsewhere; by the time anything in this
//! workspace sees the device it is already a [`MemoryLink`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  roboeyes-core (animation engine)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  roboeyes-display (paged framebuffer)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  roboeyes-hal (this crate - MemoryLink) │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod link;

pub use link::{
    LinkError, MemoryLink, CHUNK_COUNT, CHUNK_SIZE, DISPLAY_BASE_OFFSET, DISPLAY_MODULE_ID,
};
