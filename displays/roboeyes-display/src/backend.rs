//! Drawing surface and frame output traits
//!
//! Defines what primitives draw on and where a finished frame goes.

use roboeyes_hal::MemoryLink;

use crate::framebuffer::{FlushError, PagedFramebuffer};

/// Pixel-addressable 1-bit surface
///
/// Implementations must silently ignore coordinates outside `size()`.
/// Primitives rely on that to draw partially off-screen shapes without
/// clipping every intermediate coordinate themselves.
pub trait PixelTarget {
    /// Set (`on = true`) or clear a pixel
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Canvas size as (width, height)
    fn size(&self) -> (i32, i32);
}

/// Receiver for finished frames
///
/// Called once per rendered frame, after the buffer is fully composed.
/// The sink decides whether and when the frame reaches the device.
pub trait RenderSink {
    /// Error reported back to the caller of the engine
    type Error;

    /// Take a composed frame
    fn show(&mut self, frame: &PagedFramebuffer) -> Result<(), Self::Error>;
}

impl<F, E> RenderSink for F
where
    F: FnMut(&PagedFramebuffer) -> Result<(), E>,
{
    type Error = E;

    fn show(&mut self, frame: &PagedFramebuffer) -> Result<(), E> {
        self(frame)
    }
}

/// Sink that flushes every frame straight through a [`MemoryLink`]
///
/// Counts consecutive failed flushes so the caller can decide when the
/// link is gone for good.
pub struct LinkSink<L> {
    link: L,
    consecutive_failures: u32,
}

impl<L: MemoryLink> LinkSink<L> {
    /// Wrap a link
    pub fn new(link: L) -> Self {
        Self {
            link,
            consecutive_failures: 0,
        }
    }

    /// Number of flushes that failed in a row (0 after any success)
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Access the underlying link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutable access to the underlying link
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Give the link back
    pub fn into_inner(self) -> L {
        self.link
    }
}

impl<L: MemoryLink> RenderSink for LinkSink<L> {
    type Error = FlushError<L::Error>;

    fn show(&mut self, frame: &PagedFramebuffer) -> Result<(), Self::Error> {
        match frame.flush(&mut self.link) {
            Ok(()) => {
                self.consecutive_failures = 0;
                Ok(())
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                Err(e)
            }
        }
    }
}
