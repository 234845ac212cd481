//! Platform-agnostic logic of the USB relay board.
//!
//! This crate holds everything between the USB transport and the hardware,
//! with the hardware reached only through two small capabilities. It can be
//! used both in embedded `no_std` firmware and on host for testing.
//!
//! # Overview
//!
//! - [`pins`]: relay output capability ([`PinBank`]), in-memory [`MemoryPins`]
//! - [`storage`]: persistence capability ([`Storage`]), in-memory [`MemoryStorage`]
//! - [`relays`]: the relay bank ([`RelayBank`])
//! - [`serial_store`]: cached, persisted serial number ([`SerialStore`])
//! - [`device`]: command interpreter and status reporter ([`RelayDevice`])
//!
//! # Example
//!
//! ```rust
//! use relay_core::{MemoryPins, MemoryStorage, RelayDevice, SerialNumber};
//!
//! let mut device = RelayDevice::new(
//!     MemoryPins::<4>::new(),
//!     MemoryStorage::<64>::new(),
//!     SerialNumber::new(*b"UNSET\0"),
//! );
//!
//! // Relay 5 does not exist on a 4-relay board, so this switches all of them.
//! device.handle_command(&[0xFF, 0x05]).unwrap();
//! device.handle_command(&[0xFD, 0x02]).unwrap();
//! // Relay 2 is bit 1.
//! assert_eq!(device.status_record().relay_mask, 0b1101);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod device;
pub mod pins;
pub mod relays;
pub mod serial_store;
pub mod storage;

// Re-export main types at crate root
pub use device::{CommandError, RelayDevice};
pub use pins::{MemoryPins, PinBank};
pub use relays::RelayBank;
pub use serial_store::{SerialStore, SERIAL_OFFSET};
pub use storage::{check_bounds, MemoryStorage, Storage, StorageError, ERASED_BYTE};

pub use relay_proto::{
    Command, DecodeError, RelayTarget, SerialDescriptor, SerialNumber, StatusRecord, MAX_RELAYS,
    REPORT_LEN, SERIAL_NUMBER_LEN, STATUS_RECORD_LEN,
};
