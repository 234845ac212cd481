//! SerialStore: persisted serial number with a per-boot cache.

use crate::storage::{Storage, StorageError};
use relay_proto::{SerialNumber, SERIAL_NUMBER_LEN};

/// Offset of the serial number in storage.
pub const SERIAL_OFFSET: usize = 0;

/// Serial number persisted at [`SERIAL_OFFSET`] and cached in RAM.
///
/// The first successful [`load`](Self::load) fills the cache; storage is
/// not read again until the store is rebuilt (i.e. the next boot). An
/// uninitialized slot is seeded with the default serial on first load.
pub struct SerialStore<S> {
    storage: S,
    default: SerialNumber,
    cache: Option<SerialNumber>,
}

impl<S: Storage> SerialStore<S> {
    /// Create a store over `storage`, falling back to `default`.
    pub const fn new(storage: S, default: SerialNumber) -> Self {
        Self {
            storage,
            default,
            cache: None,
        }
    }

    /// Current serial number.
    ///
    /// Never fails: if storage cannot be read, or seeding the default
    /// cannot be written, the default is returned and the cache stays
    /// empty so the next call tries storage again.
    pub fn load(&mut self) -> SerialNumber {
        if let Some(serial) = self.cache {
            return serial;
        }

        let mut raw = [0u8; SERIAL_NUMBER_LEN];
        if let Err(e) = self.storage.read(SERIAL_OFFSET, &mut raw) {
            warn!("serial read failed: {:?}", e);
            return self.default;
        }

        let stored = SerialNumber::new(raw);
        if !stored.is_uninitialized() {
            debug!("serial loaded from storage");
            self.cache = Some(stored);
            return stored;
        }

        info!("serial slot uninitialized, seeding default");
        let default = self.default;
        if let Err(e) = self.write(default) {
            warn!("seeding default serial failed: {:?}", e);
        }
        default
    }

    /// Persist a new serial number and update the cache.
    ///
    /// The cache only changes once storage has accepted the write, so a
    /// failed write leaves [`load`](Self::load) returning the old value.
    pub fn write(&mut self, serial: SerialNumber) -> Result<(), StorageError> {
        self.storage.write(SERIAL_OFFSET, serial.as_bytes())?;
        self.cache = Some(serial);
        Ok(())
    }

    /// True once the serial number has been loaded or written this boot.
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Serial number used for uninitialized storage.
    #[inline]
    pub fn default_serial(&self) -> SerialNumber {
        self.default
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get a mutable reference to the storage backend.
    ///
    /// Writing through this bypasses the cache.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Decompose the store into its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const DEFAULT: SerialNumber = SerialNumber::new(*b"UNSET\0");

    // Storage that fails every write but reads fine
    struct ReadOnlyStorage(MemoryStorage<16>);

    impl Storage for ReadOnlyStorage {
        fn capacity(&self) -> usize {
            self.0.capacity()
        }

        fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
            self.0.read(offset, buf)
        }

        fn write(&mut self, _offset: usize, _data: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Io)
        }
    }

    #[test]
    fn test_first_load_seeds_default() {
        let mut store = SerialStore::new(MemoryStorage::<16>::new(), DEFAULT);
        assert_eq!(store.load(), DEFAULT);
        assert_eq!(&store.storage().as_bytes()[..6], b"UNSET\0");
        assert!(store.is_cached());
    }

    #[test]
    fn test_load_reads_persisted_value() {
        let mut contents = [0xFFu8; 16];
        contents[..6].copy_from_slice(b"ABC001");
        let mut store = SerialStore::new(MemoryStorage::with_contents(contents), DEFAULT);

        assert_eq!(store.load(), SerialNumber::new(*b"ABC001"));
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_load_is_cached_after_first_call() {
        let mut store = SerialStore::new(MemoryStorage::<16>::new(), DEFAULT);
        store.load();
        let reads = store.storage().reads();

        // Changing storage behind the cache is not observed.
        store.storage_mut().write(0, b"OTHER1").unwrap();
        assert_eq!(store.load(), DEFAULT);
        assert_eq!(store.storage().reads(), reads);
    }

    #[test]
    fn test_write_updates_storage_and_cache() {
        let mut store = SerialStore::new(MemoryStorage::<16>::new(), DEFAULT);
        let serial = SerialNumber::new(*b"RELAY7");

        store.write(serial).unwrap();
        assert_eq!(store.load(), serial);
        assert_eq!(&store.storage().as_bytes()[..6], b"RELAY7");
        assert_eq!(store.storage().reads(), 0);
    }

    #[test]
    fn test_failed_write_keeps_old_value() {
        let mut contents = [0xFFu8; 16];
        contents[..6].copy_from_slice(b"ABC001");
        let mut store = SerialStore::new(
            ReadOnlyStorage(MemoryStorage::with_contents(contents)),
            DEFAULT,
        );
        assert_eq!(store.load(), SerialNumber::new(*b"ABC001"));

        let result = store.write(SerialNumber::new(*b"NEW001"));
        assert_eq!(result, Err(StorageError::Io));
        assert_eq!(store.load(), SerialNumber::new(*b"ABC001"));
    }

    #[test]
    fn test_failed_seed_returns_default_uncached() {
        let mut store = SerialStore::new(ReadOnlyStorage(MemoryStorage::new()), DEFAULT);
        assert_eq!(store.load(), DEFAULT);
        assert!(!store.is_cached());
    }
}
