#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Timer};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use static_cell::StaticCell;
use usb_relay::config::{self, RelayPins};
use usb_relay::{
    configure_usb_hid, relay_pins, FlashStorage, RelayDevice, RelayHidWriter, RelayRequestHandler,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type Handler = RelayRequestHandler<RelayPins, FlashStorage<'static>>;

/// Request handler, owner of all relay and serial number state.
static HANDLER: StaticCell<Handler> = StaticCell::new();

/// USB serial number string, read from flash at boot.
static SERIAL_STRING: StaticCell<heapless::String<{ usb_relay::SERIAL_NUMBER_LEN }>> =
    StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("USB relay starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Start the watchdog first so a hang anywhere below resets the board
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_millis(config::WATCHDOG_TIMEOUT_MS));

    // --- Relays and storage ---
    let pins: RelayPins = relay_pins!(p);
    let flash = Flash::new_blocking(p.FLASH);
    let storage = FlashStorage::new(flash, config::STORAGE_OFFSET);

    let handler = HANDLER.init(RelayRequestHandler::new(RelayDevice::new(
        pins,
        storage,
        config::DEFAULT_SERIAL,
    )));

    // Loads (and on first boot seeds) the serial number
    let serial = handler.device_mut().serial_number();
    let text = serial_text(serial.printable());
    let serial_string: &'static heapless::String<{ usb_relay::SERIAL_NUMBER_LEN }> =
        SERIAL_STRING.init(text);
    info!("serial number: {=str}", serial_string.as_str());

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(serial_string.as_str());
    usb_config.device_release = config::USB_DEVICE_RELEASE;
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class; control requests go to the handler
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state, handler);

    // Build the USB device
    let usb_device = builder.build();

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(hid_task(hid_writer).unwrap());
    spawner.spawn(watchdog_task(watchdog).unwrap());

    info!("USB relay initialized, {=usize} relays", config::RELAY_COUNT);
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// HID task - holds the interrupt endpoint for the lifetime of the device.
#[embassy_executor::task]
async fn hid_task(mut writer: RelayHidWriter<'static>) {
    writer.ready().await;
    info!("USB HID configured by host");
    core::future::pending::<()>().await;
}

/// USB serial string for the stored serial.
///
/// `printable` is at most `SERIAL_NUMBER_LEN` bytes, so it always fits; the
/// fallback covers non-printable serials.
fn serial_text(printable: Option<&str>) -> heapless::String<{ usb_relay::SERIAL_NUMBER_LEN }> {
    printable
        .and_then(|text| heapless::String::try_from(text).ok())
        .or_else(|| heapless::String::try_from(config::FALLBACK_SERIAL_STRING).ok())
        .unwrap_or_default()
}

/// Watchdog task - feeds the watchdog while the executor is alive.
#[embassy_executor::task]
async fn watchdog_task(mut watchdog: Watchdog) {
    loop {
        watchdog.feed();
        Timer::after_millis(config::WATCHDOG_FEED_MS).await;
    }
}
