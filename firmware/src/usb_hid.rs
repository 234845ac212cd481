//! USB HID transport for the relay board.
//!
//! The board enumerates as a vendor-defined HID device with a single
//! 8-byte feature report. Host tools talk to it with feature reports only:
//!
//! - `SET_REPORT` carries a command, handed to [`RelayDevice::handle_command`]
//! - `GET_REPORT` returns the status record from [`RelayDevice::read_status`]
//!
//! Both run synchronously inside the USB control callback. Nothing is
//! reported back on failure; the host sees the effect on the next status read.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use relay_core::{PinBank, RelayDevice, Storage, REPORT_LEN};

use crate::config::HID_POLL_MS;

/// HID writer type for the relay interface.
pub type RelayHidWriter<'d> = HidWriter<'d, Driver<'d, USB>, REPORT_LEN>;

/// Vendor-defined HID report descriptor.
///
/// Declares one 8-byte feature report without report ID; byte values are
/// opaque to the HID layer.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x06, 0x00, 0xFF, // Usage Page (Vendor Defined 0xFF00)
    0x09, 0x01, // Usage (Vendor Usage 1)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x08, //   Report Count (8)
    0x09, 0x00, //   Usage (Undefined)
    0xB2, 0x02, 0x01, //   Feature (Data, Variable, Absolute, Buffered Bytes)
    0xC0, // End Collection
];

/// HID request handler owning the device state.
///
/// This is the only place the relay device is reachable from, so every
/// command and status read is serialized by the USB control pipe.
pub struct RelayRequestHandler<P, S> {
    device: RelayDevice<P, S>,
}

impl<P: PinBank, S: Storage> RelayRequestHandler<P, S> {
    /// Create a new handler around the given device.
    pub fn new(device: RelayDevice<P, S>) -> Self {
        Self { device }
    }

    /// Get a mutable reference to the device.
    pub fn device_mut(&mut self) -> &mut RelayDevice<P, S> {
        &mut self.device
    }
}

impl<P: PinBank, S: Storage> RequestHandler for RelayRequestHandler<P, S> {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::Feature(_) | ReportId::In(_) => {
                let len = self.device.read_status(buf);
                defmt::trace!("status read: {=usize} bytes", len);
                Some(len)
            }
            ReportId::Out(_) => None,
        }
    }

    fn set_report(&mut self, _id: ReportId, data: &[u8]) -> OutResponse {
        match self.device.handle_command(data) {
            Ok(command) => defmt::info!("command: {:?}", command),
            Err(e) => defmt::warn!("command ignored: {:?}", e),
        }
        // The protocol has no error channel; the host never sees a stall.
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer; the board never sends input reports, but the
/// writer owns the interrupt endpoint and must be kept alive.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    handler: &'d mut dyn RequestHandler,
) -> RelayHidWriter<'d> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: REPORT_LEN as u16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
