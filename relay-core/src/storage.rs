//! Non-volatile storage capability and error types.

/// Error type for storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Access past the end of the storage area.
    OutOfBounds,
    /// The backend failed to read, erase or program.
    Io,
}

/// Byte-addressed persistent storage.
///
/// Backends may be a flash page, an EEPROM, a file or a key-value record.
/// A successful `write` must be durable when it returns; there is no
/// asynchronous completion.
pub trait Storage {
    /// Usable size in bytes.
    fn capacity(&self) -> usize;

    /// Fill `buf` with the bytes stored at `offset`.
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Persist `data` at `offset`.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

/// Check that `offset..offset + len` fits in `capacity`.
#[inline]
pub fn check_bounds(capacity: usize, offset: usize, len: usize) -> Result<(), StorageError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StorageError::OutOfBounds),
    }
}

/// Value of a byte that was never programmed.
pub const ERASED_BYTE: u8 = 0xFF;

/// RAM-backed storage.
///
/// Starts erased (all `0xFF`) and counts accesses so tests can verify
/// when the backend is actually touched.
#[derive(Clone, Debug)]
pub struct MemoryStorage<const N: usize> {
    bytes: [u8; N],
    reads: usize,
    writes: usize,
}

impl<const N: usize> MemoryStorage<N> {
    /// Create erased storage.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_contents([ERASED_BYTE; N])
    }

    /// Create storage holding `bytes`.
    #[must_use]
    pub const fn with_contents(bytes: [u8; N]) -> Self {
        Self {
            bytes,
            reads: 0,
            writes: 0,
        }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Number of `read` calls so far.
    #[must_use]
    pub const fn reads(&self) -> usize {
        self.reads
    }

    /// Number of `write` calls so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl<const N: usize> Default for MemoryStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Storage for MemoryStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, buf.len())?;
        self.reads += 1;
        buf.copy_from_slice(&self.bytes[offset..offset + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, data.len())?;
        self.writes += 1;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_starts_erased() {
        let mut storage = MemoryStorage::<16>::new();
        let mut buf = [0u8; 4];
        storage.read(0, &mut buf).unwrap();
        assert_eq!(buf, [ERASED_BYTE; 4]);
    }

    #[test]
    fn test_memory_storage_write_then_read() {
        let mut storage = MemoryStorage::<16>::new();
        storage.write(4, b"abc").unwrap();

        let mut buf = [0u8; 3];
        storage.read(4, &mut buf).unwrap();
        assert_eq!(&buf, b"abc");
        assert_eq!(storage.writes(), 1);
        assert_eq!(storage.reads(), 1);
    }

    #[test]
    fn test_memory_storage_bounds() {
        let mut storage = MemoryStorage::<8>::new();
        assert_eq!(storage.write(6, b"abc"), Err(StorageError::OutOfBounds));
        let mut buf = [0u8; 2];
        assert_eq!(storage.read(usize::MAX, &mut buf), Err(StorageError::OutOfBounds));
        assert_eq!(storage.writes(), 0);
    }
}
