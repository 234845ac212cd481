//! Device serial number.

use crate::{SERIAL_NUMBER_LEN, UNINITIALIZED_SENTINEL};

/// Fixed-length opaque serial number.
///
/// Host tools conventionally store printable ASCII padded with NUL, but
/// the device treats the bytes as opaque and never validates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialNumber([u8; SERIAL_NUMBER_LEN]);

impl SerialNumber {
    /// Create a serial number from its raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; SERIAL_NUMBER_LEN]) -> Self {
        Self(bytes)
    }

    /// Take the first [`SERIAL_NUMBER_LEN`] bytes of `data`.
    ///
    /// Returns `None` if `data` is too short.
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let bytes = data.get(..SERIAL_NUMBER_LEN)?;
        let mut out = [0u8; SERIAL_NUMBER_LEN];
        out.copy_from_slice(bytes);
        Some(Self(out))
    }

    /// Raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SERIAL_NUMBER_LEN] {
        &self.0
    }

    /// True when the slot this value was read from has never been written.
    #[inline]
    #[must_use]
    pub const fn is_uninitialized(&self) -> bool {
        self.0[0] == UNINITIALIZED_SENTINEL
    }

    /// The printable part of the serial number, up to the first NUL.
    ///
    /// Returns `None` when that part is empty or contains anything other
    /// than printable ASCII.
    #[must_use]
    pub fn printable(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(SERIAL_NUMBER_LEN);
        let text = &self.0[..end];
        if text.is_empty() || !text.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return None;
        }
        core::str::from_utf8(text).ok()
    }
}

impl From<[u8; SERIAL_NUMBER_LEN]> for SerialNumber {
    fn from(bytes: [u8; SERIAL_NUMBER_LEN]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_takes_prefix() {
        let serial = SerialNumber::from_slice(b"ABC001XYZ").unwrap();
        assert_eq!(serial.as_bytes(), b"ABC001");
    }

    #[test]
    fn test_from_slice_too_short() {
        assert_eq!(SerialNumber::from_slice(b"ABC"), None);
    }

    #[test]
    fn test_uninitialized_sentinel() {
        assert!(SerialNumber::new([0xFF; 6]).is_uninitialized());
        assert!(SerialNumber::new([0xFF, 0, 0, 0, 0, 0]).is_uninitialized());
        assert!(!SerialNumber::new(*b"UNSET\0").is_uninitialized());
    }

    #[test]
    fn test_printable_stops_at_nul() {
        assert_eq!(SerialNumber::new(*b"UNSET\0").printable(), Some("UNSET"));
        assert_eq!(SerialNumber::new(*b"ABC001").printable(), Some("ABC001"));
    }

    #[test]
    fn test_printable_rejects_binary() {
        assert_eq!(SerialNumber::new([0xFF; 6]).printable(), None);
        assert_eq!(SerialNumber::new([0; 6]).printable(), None);
        assert_eq!(SerialNumber::new(*b"AB\x07CD\0").printable(), None);
    }
}
