//! Host command decoding.
//!
//! A command is the payload of a HID `SET_REPORT` request:
//!
//! ```text
//! byte 0     opcode   (CMD_RELAY_ON | CMD_RELAY_OFF | CMD_SET_SERIAL)
//! byte 1     operand  (1-based relay number, or first serial byte)
//! bytes 2..7 rest of the serial number for CMD_SET_SERIAL
//! ```
//!
//! Relay operands are kept raw here; resolving them against the relay count
//! is done with [`RelayTarget::resolve`].

use crate::serial::SerialNumber;
use crate::{CMD_RELAY_OFF, CMD_RELAY_ON, CMD_SET_SERIAL, REPORT_LEN, SERIAL_NUMBER_LEN};

/// Error type for command decoding.
///
/// None of these are reported back to the host; the device ignores
/// commands it cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// No bytes at all.
    Empty,
    /// Buffer too short for the opcode it carries.
    Truncated {
        /// Opcode of the partial command.
        opcode: u8,
        /// Bytes received.
        len: usize,
    },
    /// Opcode not recognized.
    UnknownOpcode(u8),
}

/// A decoded host command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive a relay on. Carries the raw 1-based operand.
    RelayOn(u8),
    /// Drive a relay off. Carries the raw 1-based operand.
    RelayOff(u8),
    /// Replace the persisted serial number.
    SetSerial(SerialNumber),
}

impl Command {
    /// Decode a command buffer.
    ///
    /// Trailing bytes beyond what the opcode needs are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let (&opcode, rest) = data.split_first().ok_or(DecodeError::Empty)?;
        let truncated = DecodeError::Truncated {
            opcode,
            len: data.len(),
        };

        match opcode {
            CMD_RELAY_ON => rest.first().map(|&op| Self::RelayOn(op)).ok_or(truncated),
            CMD_RELAY_OFF => rest.first().map(|&op| Self::RelayOff(op)).ok_or(truncated),
            CMD_SET_SERIAL => SerialNumber::from_slice(rest)
                .map(Self::SetSerial)
                .ok_or(truncated),
            other => Err(DecodeError::UnknownOpcode(other)),
        }
    }

    /// Encode the command as a full feature report, zero padded.
    ///
    /// This is what host tooling sends; the device only decodes.
    #[must_use]
    pub fn encode(&self) -> [u8; REPORT_LEN] {
        let mut report = [0u8; REPORT_LEN];
        match self {
            Self::RelayOn(operand) => {
                report[0] = CMD_RELAY_ON;
                report[1] = *operand;
            }
            Self::RelayOff(operand) => {
                report[0] = CMD_RELAY_OFF;
                report[1] = *operand;
            }
            Self::SetSerial(serial) => {
                report[0] = CMD_SET_SERIAL;
                report[1..=SERIAL_NUMBER_LEN].copy_from_slice(serial.as_bytes());
            }
        }
        report
    }
}

/// The relay(s) a relay command applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayTarget {
    /// One relay, by 0-based index.
    Single(usize),
    /// Every relay on the board.
    All,
}

impl RelayTarget {
    /// Resolve a 1-based operand against the number of relays.
    ///
    /// Operands strictly greater than `relay_count` address every relay;
    /// an operand equal to `relay_count` still addresses the last one.
    /// Operand 0 addresses nothing and yields `None`.
    #[must_use]
    pub fn resolve(operand: u8, relay_count: usize) -> Option<Self> {
        match usize::from(operand) {
            0 => None,
            n if n > relay_count => Some(Self::All),
            n => Some(Self::Single(n - 1)),
        }
    }
}
