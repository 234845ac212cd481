// Board configuration: relay wiring, default identity and USB descriptors.

use relay_core::{SerialNumber, MAX_RELAYS, SERIAL_NUMBER_LEN};

// =============================================================================
// Relays
// =============================================================================

/// Number of relays on the board.
pub const RELAY_COUNT: usize = 4;

/// GPIO numbers driving relays 1..=RELAY_COUNT, in order.
///
/// [`relay_pins!`](crate::relay_pins) binds these; keep both in sync.
pub const RELAY_GPIOS: [u8; RELAY_COUNT] = [2, 3, 4, 5];

/// The relay output array built by [`relay_pins!`](crate::relay_pins).
pub type RelayPins = [embassy_rp::gpio::Output<'static>; RELAY_COUNT];

/// Bind the relay outputs, all driven low (released).
///
/// Takes the peripherals struct returned by `embassy_rp::init` and moves
/// the relay pins out of it.
#[macro_export]
macro_rules! relay_pins {
    ($p:ident) => {
        [
            ::embassy_rp::gpio::Output::new($p.PIN_2, ::embassy_rp::gpio::Level::Low),
            ::embassy_rp::gpio::Output::new($p.PIN_3, ::embassy_rp::gpio::Level::Low),
            ::embassy_rp::gpio::Output::new($p.PIN_4, ::embassy_rp::gpio::Level::Low),
            ::embassy_rp::gpio::Output::new($p.PIN_5, ::embassy_rp::gpio::Level::Low),
        ]
    };
}

const _: () = assert!(RELAY_COUNT <= MAX_RELAYS, "status mask holds at most 8 relays");

// =============================================================================
// Serial number
// =============================================================================

/// Serial number written to storage on first boot.
pub const DEFAULT_SERIAL: SerialNumber = SerialNumber::new(*b"UNSET\0");

/// USB serial string used when the stored serial is not printable.
pub const FALLBACK_SERIAL_STRING: &str = "UNSET";

const _: () = assert!(
    FALLBACK_SERIAL_STRING.len() <= SERIAL_NUMBER_LEN,
    "fallback serial must fit the USB serial string buffer"
);

// =============================================================================
// Persistent storage
// =============================================================================

/// Size of the on-board QSPI flash (Raspberry Pi Pico).
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the storage sector: the last erase sector of flash.
/// `memory.x` keeps the firmware image out of it.
pub const STORAGE_OFFSET: u32 = (FLASH_SIZE - embassy_rp::flash::ERASE_SIZE) as u32;

// =============================================================================
// USB descriptors
// =============================================================================

/// Shared V-USB vendor/product ids for HID devices; host relay tools
/// look the board up by these.
pub const USB_VID: u16 = 0x16C0;
pub const USB_PID: u16 = 0x05DF;

/// Device release 1.00 (BCD).
pub const USB_DEVICE_RELEASE: u16 = 0x0100;

pub const USB_MANUFACTURER: &str = "thmahe.dev";

/// Product name, `USBRelay` followed by the relay count.
pub const USB_PRODUCT: &str = "USBRelay4";

const _: () = assert!(
    USB_PRODUCT.as_bytes()[USB_PRODUCT.len() - 1] == b'0' + RELAY_COUNT as u8,
    "product name must end with the relay count"
);

/// Bus power draw in mA.
pub const USB_MAX_POWER_MA: u16 = 500;

/// Interrupt endpoint polling interval in ms.
pub const HID_POLL_MS: u8 = 5;

// =============================================================================
// Watchdog
// =============================================================================

/// Reset the board if the executor stalls this long.
pub const WATCHDOG_TIMEOUT_MS: u64 = 1_000;

/// How often the watchdog is fed.
pub const WATCHDOG_FEED_MS: u64 = 250;
