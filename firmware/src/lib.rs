//! USB relay board firmware for RP2040.
//!
//! This crate provides the embedded implementation of a USB HID relay
//! controller: relay outputs on GPIO, the serial number in flash, and the
//! host protocol over HID feature reports.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Relay 1  | 2    | Relay driver, high = energized |
//! | Relay 2  | 3    | Relay driver, high = energized |
//! | Relay 3  | 4    | Relay driver, high = energized |
//! | Relay 4  | 5    | Relay driver, high = energized |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three tasks:
//!
//! - **USB Task**: Runs the USB device stack; HID control requests call
//!   straight into the [`RelayDevice`] owned by the request handler
//! - **HID Task**: Owns the HID interrupt endpoint and logs enumeration
//! - **Watchdog Task**: Feeds the hardware watchdog
//!
//! # Modules
//!
//! - [`config`]: Static board configuration (relay wiring, USB ids, defaults)
//! - [`flash_storage`]: Flash-backed [`Storage`] ([`FlashStorage`])
//! - [`usb_hid`]: HID transport ([`RelayRequestHandler`], [`REPORT_DESCRIPTOR`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)

#![no_std]

// Exactly one panic handler may be linked
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they define conflicting panic handlers");

// Re-export core types for convenience
pub use relay_core::{
    Command, CommandError, PinBank, RelayBank, RelayDevice, SerialNumber, SerialStore,
    StatusRecord, Storage, StorageError, REPORT_LEN, SERIAL_NUMBER_LEN,
};

pub mod config;
pub mod flash_storage;
pub mod usb_hid;

pub use flash_storage::FlashStorage;
pub use usb_hid::{configure_usb_hid, RelayHidWriter, RelayRequestHandler, REPORT_DESCRIPTOR};
