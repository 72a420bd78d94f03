//! Memory-mapped device link
//!
//! Provides the one transport operation the display needs: write a block
//! of bytes at an offset inside a firmware module's I/O map.

/// Module identifier of the display in the brick's I/O map
pub const DISPLAY_MODULE_ID: u32 = 0xA0001;

/// Offset of the screen buffer inside the display module
pub const DISPLAY_BASE_OFFSET: u32 = 119;

/// Largest block the link accepts in one write
pub const CHUNK_SIZE: usize = 40;

/// Number of chunks in a full screen (800 bytes / 40)
pub const CHUNK_COUNT: usize = 20;

/// Transport failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Device did not answer in time
    Timeout,
    /// Device rejected the write
    Nack,
    /// Connection is gone
    Disconnected,
    /// Anything else the transport reports
    Other,
}

/// Memory-map writer
///
/// Implemented by whatever owns the connection to the brick. The display
/// code only ever writes; it never reads device memory back.
pub trait MemoryLink {
    /// Error type for link operations
    type Error;

    /// Write `bytes` into module `module_id` starting at `offset`
    ///
    /// # Arguments
    /// * `module_id` - Firmware module identifier
    /// * `offset` - Byte offset inside the module's I/O map
    /// * `bytes` - Block to write (at most [`CHUNK_SIZE`] bytes)
    fn write_memory_block(
        &mut self,
        module_id: u32,
        offset: u32,
        bytes: &[u8],
    ) -> Result<(), Self::Error>;
}

impl<T: MemoryLink + ?Sized> MemoryLink for &mut T {
    type Error = T::Error;

    fn write_memory_block(
        &mut self,
        module_id: u32,
        offset: u32,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        (**self).write_memory_block(module_id, offset, bytes)
    }
}
