//! Relay pin capability.

use core::convert::Infallible;
use embedded_hal::digital::StatefulOutputPin;

/// An indexed set of digital outputs, one per relay.
///
/// The output level is the relay state: there is no shadow copy, so
/// [`is_high`](Self::is_high) must report what the pin is driving right now.
///
/// Implementations must tolerate out-of-range indices by ignoring them.
pub trait PinBank {
    /// Number of pins in the bank.
    fn len(&self) -> usize;

    /// True if the bank has no pins.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drive pin `index` high or low.
    fn set_level(&mut self, index: usize, high: bool);

    /// Read back the level pin `index` is driving.
    fn is_high(&mut self, index: usize) -> bool;
}

/// Any array of infallible stateful output pins is a bank.
///
/// This covers HAL GPIO outputs such as `embassy_rp::gpio::Output`.
impl<P, const N: usize> PinBank for [P; N]
where
    P: StatefulOutputPin<Error = Infallible>,
{
    fn len(&self) -> usize {
        N
    }

    fn set_level(&mut self, index: usize, high: bool) {
        if let Some(pin) = self.get_mut(index) {
            let res = if high { pin.set_high() } else { pin.set_low() };
            res.unwrap_or_else(|e| match e {});
        }
    }

    fn is_high(&mut self, index: usize) -> bool {
        self.get_mut(index)
            .map(|pin| pin.is_set_high().unwrap_or_else(|e| match e {}))
            .unwrap_or(false)
    }
}

/// In-memory pin bank.
///
/// Reference backend for host tests; levels start low like freshly
/// configured outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryPins<const N: usize> {
    levels: [bool; N],
}

impl<const N: usize> MemoryPins<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self { levels: [false; N] }
    }

    /// Start from the given levels.
    #[must_use]
    pub const fn with_levels(levels: [bool; N]) -> Self {
        Self { levels }
    }

    /// Current levels, without going through the trait.
    #[must_use]
    pub const fn levels(&self) -> &[bool; N] {
        &self.levels
    }

    /// Force a level from outside the relay logic (e.g. an external reset).
    pub fn force(&mut self, index: usize, high: bool) {
        if let Some(level) = self.levels.get_mut(index) {
            *level = high;
        }
    }
}

impl<const N: usize> Default for MemoryPins<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PinBank for MemoryPins<N> {
    fn len(&self) -> usize {
        N
    }

    fn set_level(&mut self, index: usize, high: bool) {
        self.force(index, high);
    }

    fn is_high(&mut self, index: usize) -> bool {
        self.levels.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorType, OutputPin};

    // Minimal HAL-style output pin
    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for MockPin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_hal_array_drives_pins() {
        let mut bank: [MockPin; 3] = Default::default();
        bank.set_level(1, true);

        assert!(!bank[0].high);
        assert!(bank[1].high);
        assert!(bank.is_high(1));

        bank.set_level(1, false);
        assert!(!bank.is_high(1));
    }

    #[test]
    fn test_hal_array_ignores_out_of_range() {
        let mut bank: [MockPin; 2] = Default::default();
        bank.set_level(5, true);
        assert!(!bank.is_high(5));
        assert_eq!(PinBank::len(&bank), 2);
    }

    #[test]
    fn test_memory_pins_start_low() {
        let mut pins = MemoryPins::<4>::new();
        assert!((0..4).all(|i| !pins.is_high(i)));
    }

    #[test]
    fn test_memory_pins_force() {
        let mut pins = MemoryPins::<4>::new();
        pins.force(2, true);
        assert!(pins.is_high(2));
        assert_eq!(pins.levels(), &[false, false, true, false]);
    }
}
