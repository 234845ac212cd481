//! Property tests for the relay bank and serial number store.

use proptest::prelude::*;
use relay_core::{
    MemoryPins, MemoryStorage, RelayBank, RelayDevice, SerialNumber, SerialStore, SERIAL_NUMBER_LEN,
};

const DEFAULT: SerialNumber = SerialNumber::new(*b"UNSET\0");

proptest! {
    /// Switching one relay touches exactly its bit.
    #[test]
    fn set_touches_only_its_bit(
        initial in proptest::array::uniform8(any::<bool>()),
        index in 0usize..8,
        on in any::<bool>(),
    ) {
        let mut relays = RelayBank::new(MemoryPins::with_levels(initial));
        let before = relays.status_mask();

        relays.set(index, on);
        let after = relays.status_mask();

        prop_assert_eq!(after & (1 << index) != 0, on);
        prop_assert_eq!(after & !(1 << index), before & !(1 << index));
    }

    /// `[0xFF, k]` and `[0xFD, k]` drive exactly relay k-1 from any start.
    #[test]
    fn relay_command_drives_only_relay_k(
        initial in proptest::array::uniform4(any::<bool>()),
        k in 1u8..=4,
        on in any::<bool>(),
    ) {
        let mut dev = RelayDevice::new(
            MemoryPins::with_levels(initial),
            MemoryStorage::<64>::new(),
            DEFAULT,
        );
        let before = dev.relays_mut().status_mask();
        let bit = 1u8 << (k - 1);

        let opcode = if on { 0xFF } else { 0xFD };
        dev.handle_command(&[opcode, k]).unwrap();

        let expected = if on { before | bit } else { before & !bit };
        prop_assert_eq!(dev.relays_mut().status_mask(), expected);
    }

    /// Repeating a relay command has no further effect.
    #[test]
    fn relay_commands_are_idempotent(
        opcode in prop_oneof![Just(0xFFu8), Just(0xFDu8)],
        operand in 1u8..=255,
    ) {
        let mut dev = RelayDevice::new(MemoryPins::<4>::new(), MemoryStorage::<64>::new(), DEFAULT);

        dev.handle_command(&[opcode, operand]).unwrap();
        let once = dev.relays_mut().status_mask();
        dev.handle_command(&[opcode, operand]).unwrap();

        prop_assert_eq!(dev.relays_mut().status_mask(), once);
    }

    /// Any serial number written is the one loaded back.
    #[test]
    fn serial_round_trip(bytes in any::<[u8; 6]>()) {
        let mut store = SerialStore::new(MemoryStorage::<64>::new(), DEFAULT);
        let serial = SerialNumber::new(bytes);

        store.write(serial).unwrap();
        prop_assert_eq!(store.load(), serial);
        prop_assert_eq!(&store.storage().as_bytes()[..6], &bytes[..]);
    }

    /// The printable view always fits a serial-sized string buffer.
    #[test]
    fn printable_serial_fits_buffer(bytes in any::<[u8; 6]>()) {
        if let Some(text) = SerialNumber::new(bytes).printable() {
            prop_assert!(!text.is_empty());
            prop_assert!(text.len() <= SERIAL_NUMBER_LEN);
            prop_assert_eq!(text.as_bytes(), &bytes[..text.len()]);
        }
    }

    /// The serial descriptor widens every serial byte.
    #[test]
    fn descriptor_interleaves_zero_bytes(bytes in any::<[u8; 6]>()) {
        let mut dev = RelayDevice::new(MemoryPins::<4>::new(), MemoryStorage::<64>::new(), DEFAULT);
        dev.serial_store_mut().write(SerialNumber::new(bytes)).unwrap();

        let desc = dev.serial_descriptor();
        let out = desc.as_bytes();
        prop_assert_eq!(out[0], 0x0E);
        prop_assert_eq!(out[1], 0x03);
        for (i, &b) in bytes.iter().enumerate() {
            prop_assert_eq!(out[2 + 2 * i], b);
            prop_assert_eq!(out[3 + 2 * i], 0);
        }
    }
}
