//! Paged framebuffer
//!
//! Holds the whole screen in the exact byte order the display expects so a
//! flush is a straight copy of 40-byte slices.

use roboeyes_hal::{MemoryLink, CHUNK_SIZE, DISPLAY_BASE_OFFSET, DISPLAY_MODULE_ID};

use crate::backend::PixelTarget;

/// Display width in pixels
pub const WIDTH: usize = 100;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Backing size in bytes
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// A chunk write failed during a flush
///
/// The chunks before `chunk` reached the device; the rest were not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushError<E> {
    /// Index of the failed chunk (0-19)
    pub chunk: u8,
    /// Device offset the chunk was addressed to
    pub offset: u32,
    /// Error reported by the link
    pub error: E,
}

/// 1-bit framebuffer organized as pages
#[derive(Clone, PartialEq, Eq)]
pub struct PagedFramebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Default for PagedFramebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PagedFramebuffer {
    /// Create a cleared framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Zero every pixel (no device I/O)
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set every pixel to `on`
    pub fn fill(&mut self, on: bool) {
        self.buffer.fill(if on { 0xFF } else { 0x00 });
    }

    /// Set or clear a single pixel
    ///
    /// Coordinates outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let Some((index, mask)) = locate(x, y) else {
            return;
        };
        if on {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }

    /// Read a single pixel; anything off-canvas reads as unset
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        match locate(x, y) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    /// Raw page-ordered bytes
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.buffer
    }

    /// One page (100 column bytes), or `None` past the last page
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        if page >= PAGES {
            return None;
        }
        Some(&self.buffer[page * WIDTH..(page + 1) * WIDTH])
    }

    /// Iterate the flush chunks as `(device offset, bytes)` pairs
    pub fn chunks(&self) -> impl Iterator<Item = (u32, &[u8])> {
        self.buffer
            .chunks(CHUNK_SIZE)
            .enumerate()
            .map(|(i, chunk)| (DISPLAY_BASE_OFFSET + (i * CHUNK_SIZE) as u32, chunk))
    }

    /// Push the whole buffer to the display
    ///
    /// Writes 20 chunks of 40 bytes in ascending offset order. The first
    /// failing chunk aborts the flush; nothing is retried here.
    pub fn flush<L: MemoryLink + ?Sized>(&self, link: &mut L) -> Result<(), FlushError<L::Error>> {
        for (i, (offset, chunk)) in self.chunks().enumerate() {
            link.write_memory_block(DISPLAY_MODULE_ID, offset, chunk)
                .map_err(|error| FlushError {
                    chunk: i as u8,
                    offset,
                    error,
                })?;
        }
        Ok(())
    }

    /// Number of set pixels
    pub fn count_set(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_ones()).sum()
    }
}

impl PixelTarget for PagedFramebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        PagedFramebuffer::set_pixel(self, x, y, on);
    }

    fn size(&self) -> (i32, i32) {
        (WIDTH as i32, HEIGHT as i32)
    }
}

/// Byte index and bit mask for an on-canvas pixel
fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
    if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
}

impl core::fmt::Debug for PagedFramebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PagedFramebuffer[{} set]", self.count_set())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PagedFramebuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PagedFramebuffer[{=u32} set]", self.count_set());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use proptest::prelude::*;
    use roboeyes_hal::{LinkError, CHUNK_COUNT};

    /// Records every write; fails the write at `fail_at` if set
    struct RecordingLink {
        writes: Vec<(u32, u32, usize), 32>,
        fail_at: Option<usize>,
    }

    impl RecordingLink {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail_at: None,
            }
        }
    }

    impl MemoryLink for RecordingLink {
        type Error = LinkError;

        fn write_memory_block(
            &mut self,
            module_id: u32,
            offset: u32,
            bytes: &[u8],
        ) -> Result<(), LinkError> {
            if self.fail_at == Some(self.writes.len()) {
                return Err(LinkError::Timeout);
            }
            self.writes.push((module_id, offset, bytes.len())).unwrap();
            Ok(())
        }
    }

    #[test]
    fn test_geometry() {
        assert_eq!(BUFFER_SIZE, 800);
        assert_eq!(PAGES, 8);
    }

    #[test]
    fn test_set_pixel_maps_to_page_layout() {
        let mut fb = PagedFramebuffer::new();
        fb.set_pixel(5, 13, true);
        // page 1, column 5, bit 5
        assert_eq!(fb.as_bytes()[105], 1 << 5);
        assert_eq!(fb.count_set(), 1);
        assert!(fb.get_pixel(5, 13));
    }

    #[test]
    fn test_clear_pixel_keeps_neighbours() {
        let mut fb = PagedFramebuffer::new();
        fb.fill(true);
        fb.set_pixel(99, 63, false);
        assert_eq!(fb.as_bytes()[799], 0x7F);
        assert_eq!(fb.count_set(), 800 * 8 - 1);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut fb = PagedFramebuffer::new();
        fb.fill(true);
        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_page_access() {
        let mut fb = PagedFramebuffer::new();
        fb.set_pixel(0, 63, true);
        assert_eq!(fb.page(7).unwrap()[0], 0x80);
        assert!(fb.page(8).is_none());
    }

    #[test]
    fn test_flush_writes_twenty_chunks_in_order() {
        let fb = PagedFramebuffer::new();
        let mut link = RecordingLink::new();
        fb.flush(&mut link).unwrap();

        assert_eq!(link.writes.len(), CHUNK_COUNT);
        for (i, &(module, offset, len)) in link.writes.iter().enumerate() {
            assert_eq!(module, DISPLAY_MODULE_ID);
            assert_eq!(offset, DISPLAY_BASE_OFFSET + (i * CHUNK_SIZE) as u32);
            assert_eq!(len, CHUNK_SIZE);
        }
        assert_eq!(link.writes[19].1, DISPLAY_BASE_OFFSET + 760);
    }

    #[test]
    fn test_flush_aborts_on_first_failure() {
        let fb = PagedFramebuffer::new();
        let mut link = RecordingLink::new();
        link.fail_at = Some(3);

        let err = fb.flush(&mut link).unwrap_err();
        assert_eq!(err.chunk, 3);
        assert_eq!(err.offset, DISPLAY_BASE_OFFSET + 120);
        assert_eq!(err.error, LinkError::Timeout);
        assert_eq!(link.writes.len(), 3);
    }

    #[test]
    fn test_flush_retry_sends_full_frame() {
        let fb = PagedFramebuffer::new();
        let mut link = RecordingLink::new();
        link.fail_at = Some(0);
        assert!(fb.flush(&mut link).is_err());

        link.fail_at = None;
        fb.flush(&mut link).unwrap();
        assert_eq!(link.writes.len(), CHUNK_COUNT);
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_is_ignored(
            x in prop_oneof![-1000i32..0, 100i32..1000],
            y in -1000i32..1000,
            on in any::<bool>(),
        ) {
            let mut fb = PagedFramebuffer::new();
            fb.fill(true);
            let before = fb.clone();
            fb.set_pixel(x, y, on);
            fb.set_pixel(y.rem_euclid(100), x.abs() + 64, on);
            prop_assert!(fb == before);
        }

        #[test]
        fn prop_set_and_clear_touch_one_bit(x in 0i32..100, y in 0i32..64) {
            let mut fb = PagedFramebuffer::new();
            fb.set_pixel(x, y, true);
            let index = ((y / 8) * 100 + x) as usize;
            prop_assert_eq!(fb.as_bytes()[index], 1u8 << (y % 8));
            prop_assert_eq!(fb.count_set(), 1);

            fb.fill(true);
            fb.set_pixel(x, y, false);
            prop_assert_eq!(fb.as_bytes()[index], !(1u8 << (y % 8)));
            prop_assert_eq!(fb.count_set(), 800 * 8 - 1);
        }
    }
}
