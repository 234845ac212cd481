//! Device-to-host encodings: the status record and the serial descriptor.

use crate::serial::SerialNumber;
use crate::{SERIAL_DESCRIPTOR_LEN, SERIAL_NUMBER_LEN, STATUS_RECORD_LEN, STRING_DESCRIPTOR_TYPE};

/// Status record returned on a HID `GET_REPORT`.
///
/// ```text
/// bytes 0..6  serial number
/// byte  6     reserved (0)
/// byte  7     relay mask, bit i set = relay i energized
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRecord {
    /// Serial number as currently cached by the device.
    pub serial: SerialNumber,
    /// Relay bit mask.
    pub relay_mask: u8,
}

impl StatusRecord {
    /// Offset of the relay mask byte.
    pub const MASK_OFFSET: usize = 7;

    #[must_use]
    pub const fn new(serial: SerialNumber, relay_mask: u8) -> Self {
        Self { serial, relay_mask }
    }

    /// Convert the record to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; STATUS_RECORD_LEN] {
        let mut out = [0u8; STATUS_RECORD_LEN];
        out[..SERIAL_NUMBER_LEN].copy_from_slice(self.serial.as_bytes());
        out[Self::MASK_OFFSET] = self.relay_mask;
        out
    }
}

/// USB string descriptor carrying the serial number.
///
/// Each serial byte is widened to a UTF-16LE code unit, so the
/// descriptor is `2 * len + 2` bytes long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerialDescriptor([u8; SERIAL_DESCRIPTOR_LEN]);

impl SerialDescriptor {
    #[must_use]
    pub fn new(serial: &SerialNumber) -> Self {
        let mut out = [0u8; SERIAL_DESCRIPTOR_LEN];
        out[0] = SERIAL_DESCRIPTOR_LEN as u8;
        out[1] = STRING_DESCRIPTOR_TYPE;
        for (i, &b) in serial.as_bytes().iter().enumerate() {
            out[2 + 2 * i] = b;
        }
        Self(out)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SERIAL_DESCRIPTOR_LEN] {
        &self.0
    }

    /// Descriptor length as announced in byte 0.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0[0] as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_record_layout() {
        let record = StatusRecord::new(SerialNumber::new(*b"ABC001"), 0b1011);
        assert_eq!(
            record.as_bytes(),
            [b'A', b'B', b'C', b'0', b'0', b'1', 0, 0b1011]
        );
    }

    #[test]
    fn test_serial_descriptor_layout() {
        let serial = SerialNumber::new(*b"UNSET\0");
        let desc = SerialDescriptor::new(&serial);
        let bytes = desc.as_bytes();

        assert_eq!(bytes.len(), 14);
        assert_eq!(desc.len(), 14);
        assert_eq!(bytes[0], 0x0E);
        assert_eq!(bytes[1], 0x03);
        for (i, &b) in serial.as_bytes().iter().enumerate() {
            assert_eq!(bytes[2 + 2 * i], b);
            assert_eq!(bytes[3 + 2 * i], 0);
        }
    }
}
