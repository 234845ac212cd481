//! RelayBank: the addressable set of relay outputs.

use crate::pins::PinBank;
use relay_proto::{RelayTarget, MAX_RELAYS};

/// N independent relays, relay `i` bound to pin `i` of the bank.
///
/// Indices are trusted: the command interpreter filters them before they
/// get here, and the pin bank ignores anything out of range.
pub struct RelayBank<P> {
    pins: P,
}

impl<P: PinBank> RelayBank<P> {
    /// Create a relay bank over the given pins.
    pub fn new(pins: P) -> Self {
        Self { pins }
    }

    /// Number of relays.
    #[inline]
    pub fn count(&self) -> usize {
        self.pins.len()
    }

    /// Energize (`on`) or release relay `index`.
    pub fn set(&mut self, index: usize, on: bool) {
        trace!("relay {=usize} -> {=bool}", index, on);
        self.pins.set_level(index, on);
    }

    /// Drive every relay to the same state, in index order.
    pub fn set_all(&mut self, on: bool) {
        trace!("all relays -> {=bool}", on);
        for index in 0..self.count() {
            self.pins.set_level(index, on);
        }
    }

    /// Apply a resolved relay target.
    pub fn apply(&mut self, target: RelayTarget, on: bool) {
        match target {
            RelayTarget::Single(index) => self.set(index, on),
            RelayTarget::All => self.set_all(on),
        }
    }

    /// Whether relay `index` is currently energized, read from the pin.
    pub fn is_on(&mut self, index: usize) -> bool {
        self.pins.is_high(index)
    }

    /// Pack the pin levels into a mask, bit `i` set when relay `i` is on.
    ///
    /// Reads the hardware every call; relays past [`MAX_RELAYS`] do not fit
    /// in the mask and are left out.
    pub fn status_mask(&mut self) -> u8 {
        let count = self.count().min(MAX_RELAYS);
        (0..count)
            .filter(|&i| self.pins.is_high(i))
            .fold(0u8, |mask, i| mask | (1 << i))
    }

    /// Get a reference to the pin bank.
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Get a mutable reference to the pin bank.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Decompose the relay bank into its pins.
    pub fn into_pins(self) -> P {
        self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::MemoryPins;

    fn bank() -> RelayBank<MemoryPins<4>> {
        RelayBank::new(MemoryPins::new())
    }

    #[test]
    fn test_set_single_relay() {
        let mut relays = bank();
        relays.set(2, true);
        assert_eq!(relays.status_mask(), 0b0100);
        assert!(relays.is_on(2));

        relays.set(2, false);
        assert_eq!(relays.status_mask(), 0);
    }

    #[test]
    fn test_set_leaves_other_relays() {
        let mut relays = bank();
        relays.set(0, true);
        relays.set(3, true);
        relays.set(0, false);
        assert_eq!(relays.status_mask(), 0b1000);
    }

    #[test]
    fn test_set_all() {
        let mut relays = bank();
        relays.set_all(true);
        assert_eq!(relays.status_mask(), 0b1111);
        relays.set_all(false);
        assert_eq!(relays.status_mask(), 0);
    }

    #[test]
    fn test_apply_target() {
        let mut relays = bank();
        relays.apply(RelayTarget::All, true);
        relays.apply(RelayTarget::Single(1), false);
        assert_eq!(relays.status_mask(), 0b1101);
    }

    #[test]
    fn test_mask_reads_pins_not_cache() {
        let mut relays = bank();
        relays.set(0, true);
        // Something outside the relay logic pulls the pin low.
        relays.pins_mut().force(0, false);
        relays.pins_mut().force(1, true);
        assert_eq!(relays.status_mask(), 0b0010);
    }

    #[test]
    fn test_mask_ignores_relays_past_eight() {
        let mut relays = RelayBank::new(MemoryPins::<10>::new());
        relays.set_all(true);
        assert_eq!(relays.count(), 10);
        assert_eq!(relays.status_mask(), 0xFF);
    }
}
