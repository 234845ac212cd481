//! Flash-backed storage for the serial number.
//!
//! Uses the first page of a reserved erase sector. Erased flash reads as
//! `0xFF`, which is exactly the "never written" sentinel the serial store
//! looks for, so a freshly flashed board seeds its default serial on
//! first boot.
//!
//! Writes are read-modify-write of that page: read it, patch it, erase
//! the sector, program the page back.

use embassy_rp::flash::{Blocking, Error as FlashError, Flash, ERASE_SIZE, PAGE_SIZE};
use embassy_rp::peripherals::FLASH;
use relay_core::{check_bounds, Storage, StorageError};

use crate::config::FLASH_SIZE;

/// Convert flash errors to [`StorageError`].
///
/// A plain function because neither type is local to this crate.
#[inline]
fn flash_error_to_storage_error(e: FlashError) -> StorageError {
    match e {
        FlashError::OutOfBounds => StorageError::OutOfBounds,
        _ => StorageError::Io,
    }
}

/// One flash page of persistent storage.
pub struct FlashStorage<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
    /// Start of the reserved sector, relative to the start of flash.
    base: u32,
}

impl<'d> FlashStorage<'d> {
    /// Create storage at `base`, which must be sector aligned.
    #[must_use]
    pub fn new(flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>, base: u32) -> Self {
        debug_assert_eq!(base as usize % ERASE_SIZE, 0);
        Self { flash, base }
    }
}

impl Storage for FlashStorage<'_> {
    fn capacity(&self) -> usize {
        PAGE_SIZE
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(PAGE_SIZE, offset, buf.len())?;
        self.flash
            .blocking_read(self.base + offset as u32, buf)
            .map_err(flash_error_to_storage_error)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        check_bounds(PAGE_SIZE, offset, data.len())?;

        let mut page = [0u8; PAGE_SIZE];
        self.flash
            .blocking_read(self.base, &mut page)
            .map_err(flash_error_to_storage_error)?;

        let target = &mut page[offset..offset + data.len()];
        if *target == *data {
            // Already stored; skip the erase cycle.
            return Ok(());
        }
        target.copy_from_slice(data);

        self.flash
            .blocking_erase(self.base, self.base + ERASE_SIZE as u32)
            .map_err(flash_error_to_storage_error)?;
        self.flash
            .blocking_write(self.base, &page)
            .map_err(flash_error_to_storage_error)?;

        defmt::debug!("flash: wrote {=usize} bytes at {=usize}", data.len(), offset);
        Ok(())
    }
}
