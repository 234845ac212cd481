//! Wire protocol of the USB relay board.
//!
//! The host talks to the board through 8-byte HID feature reports:
//!
//! - **Command** (host -> device, `SET_REPORT`): byte 0 is the opcode, byte 1
//!   the operand. For [`CMD_SET_SERIAL`] bytes 1..7 carry the new serial number.
//! - **Status** (device -> host, `GET_REPORT`): bytes 0..6 are the serial
//!   number, byte 6 is reserved, byte 7 is the relay bit mask.
//!
//! The serial number is additionally exposed as a USB string descriptor
//! ([`SerialDescriptor`]).
//!
//! ```text
//! [0xFF, 0x02] -> relay 2 on
//! [0xFD, 0x09] -> every relay off (operand above relay count)
//! [0xFA, b'A', b'B', b'C', b'0', b'0', b'1'] -> serial = "ABC001"
//! ```
//!
//! # Example
//!
//! ```
//! use relay_proto::{Command, RelayTarget};
//!
//! let cmd = Command::decode(&[0xFF, 0x05, 0, 0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(cmd, Command::RelayOn(5));
//! assert_eq!(RelayTarget::resolve(5, 4), Some(RelayTarget::All));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod command;
pub mod report;
pub mod serial;

pub use command::{Command, DecodeError, RelayTarget};
pub use report::{SerialDescriptor, StatusRecord};
pub use serial::SerialNumber;

/// Opcode: drive one relay (or all of them) on.
pub const CMD_RELAY_ON: u8 = 0xFF;
/// Opcode: drive one relay (or all of them) off.
pub const CMD_RELAY_OFF: u8 = 0xFD;
/// Opcode: replace the persisted serial number.
pub const CMD_SET_SERIAL: u8 = 0xFA;

/// Length of the serial number in bytes.
pub const SERIAL_NUMBER_LEN: usize = 6;

/// First-byte value of a serial number slot that was never written.
pub const UNINITIALIZED_SENTINEL: u8 = 0xFF;

/// Size of the HID feature report in both directions.
pub const REPORT_LEN: usize = 8;

/// Size of the status record returned to the host.
pub const STATUS_RECORD_LEN: usize = REPORT_LEN;

/// Relays addressable by the one-byte status mask.
pub const MAX_RELAYS: usize = 8;

/// USB descriptor type tag for string descriptors.
pub const STRING_DESCRIPTOR_TYPE: u8 = 0x03;

/// Length of the serial number string descriptor (UTF-16LE body plus header).
pub const SERIAL_DESCRIPTOR_LEN: usize = 2 * SERIAL_NUMBER_LEN + 2;
