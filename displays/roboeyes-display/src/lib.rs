//! Paged framebuffer and drawing primitives for RoboEyes
//!
//! This crate provides:
//! - [`PagedFramebuffer`], an 800-byte 1-bit image laid out in the display's
//!   native page order, with a chunked flush over a [`MemoryLink`]
//! - [`PixelTarget`], the pixel-level surface the primitives draw on
//! - [`RenderSink`], the hook the animation engine calls once per frame
//! - [`primitives`], stateless rasterizers (circle, line, rect, rounded
//!   rect, triangle)
//!
//! # Memory layout
//!
//! The 100x64 canvas is split into 8 pages of 8 pixel rows. Each byte holds
//! one column of a page, least significant bit on top:
//!
//! ```text
//! byte index = (y / 8) * 100 + x
//! bit        = y % 8
//! ```
//!
//! [`MemoryLink`]: roboeyes_hal::MemoryLink

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod framebuffer;
pub mod primitives;

// Re-export key types
pub use backend::{LinkSink, PixelTarget, RenderSink};
pub use framebuffer::{FlushError, PagedFramebuffer, BUFFER_SIZE, HEIGHT, PAGES, WIDTH};
