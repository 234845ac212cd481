//! RelayDevice: the command interpreter and status reporter.
//!
//! The USB transport calls into this from its control-request callbacks:
//!
//! - HID `SET_REPORT` -> [`RelayDevice::handle_command`]
//! - HID `GET_REPORT` -> [`RelayDevice::read_status`]
//! - serial string descriptor -> [`RelayDevice::serial_descriptor`], for
//!   transports that serve string descriptors on request
//!
//! Every call runs to completion without blocking or retrying.

use crate::pins::PinBank;
use crate::relays::RelayBank;
use crate::serial_store::SerialStore;
use crate::storage::{Storage, StorageError};
use relay_proto::{
    Command, DecodeError, RelayTarget, SerialDescriptor, SerialNumber, StatusRecord,
    STATUS_RECORD_LEN,
};

/// Owns the relay bank and the serial number store.
///
/// This is the whole device state; the transport holds one instance and
/// passes it by reference into every callback.
pub struct RelayDevice<P, S> {
    relays: RelayBank<P>,
    serial: SerialStore<S>,
}

impl<P: PinBank, S: Storage> RelayDevice<P, S> {
    /// Create a device from relay pins, a storage backend and the serial
    /// number to seed uninitialized storage with.
    pub fn new(pins: P, storage: S, default_serial: SerialNumber) -> Self {
        Self::from_parts(
            RelayBank::new(pins),
            SerialStore::new(storage, default_serial),
        )
    }

    /// Create a device from already-built components.
    pub fn from_parts(relays: RelayBank<P>, serial: SerialStore<S>) -> Self {
        Self { relays, serial }
    }

    /// Decode and execute one command buffer.
    ///
    /// Returns the executed command for logging and testing. The host never
    /// sees the result: undecodable commands and operand 0 are ignored, and
    /// a failed serial write leaves the previous serial in place.
    pub fn handle_command(&mut self, data: &[u8]) -> Result<Command, CommandError> {
        let command = Command::decode(data).map_err(CommandError::Decode)?;
        self.execute(command)?;
        Ok(command)
    }

    /// Execute an already decoded command.
    pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::RelayOn(operand) => self.switch(operand, true),
            Command::RelayOff(operand) => self.switch(operand, false),
            Command::SetSerial(serial) => {
                debug!("set serial");
                self.serial.write(serial).map_err(CommandError::Storage)
            }
        }
    }

    fn switch(&mut self, operand: u8, on: bool) -> Result<(), CommandError> {
        let target = RelayTarget::resolve(operand, self.relays.count())
            .ok_or(CommandError::NoTarget(operand))?;
        self.relays.apply(target, on);
        Ok(())
    }

    /// Current serial number (loads it on first use).
    pub fn serial_number(&mut self) -> SerialNumber {
        self.serial.load()
    }

    /// Snapshot of serial number and relay mask.
    pub fn status_record(&mut self) -> StatusRecord {
        let serial = self.serial.load();
        StatusRecord::new(serial, self.relays.status_mask())
    }

    /// Answer a status read of `buf.len()` bytes.
    ///
    /// Copies as much of the status record as fits and returns the number
    /// of bytes written. A zero-length request does nothing.
    ///
    /// embassy-usb hands `get_report` its whole control buffer rather than
    /// a `wLength`-sized slice, so on the board every read (including a
    /// `wLength == 0` one) loads the serial, seeding storage on first boot.
    /// The USB stack truncates the reply to `wLength`.
    pub fn read_status(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let record = self.status_record().as_bytes();
        let len = buf.len().min(STATUS_RECORD_LEN);
        buf[..len].copy_from_slice(&record[..len]);
        len
    }

    /// Serial number encoded as a USB string descriptor.
    ///
    /// Widens the raw bytes as stored, NULs included, and always reflects
    /// the latest `SET_SERIAL`. The RP2040 firmware does not serve this:
    /// embassy-usb takes the serial string once at build time, so the board
    /// reports the boot-time printable serial (or `"UNSET"`) until reset.
    pub fn serial_descriptor(&mut self) -> SerialDescriptor {
        SerialDescriptor::new(&self.serial.load())
    }

    /// Get a reference to the relay bank.
    pub fn relays(&self) -> &RelayBank<P> {
        &self.relays
    }

    /// Get a mutable reference to the relay bank.
    pub fn relays_mut(&mut self) -> &mut RelayBank<P> {
        &mut self.relays
    }

    /// Get a reference to the serial number store.
    pub fn serial_store(&self) -> &SerialStore<S> {
        &self.serial
    }

    /// Get a mutable reference to the serial number store.
    pub fn serial_store_mut(&mut self) -> &mut SerialStore<S> {
        &mut self.serial
    }

    /// Decompose the device into its components.
    pub fn into_parts(self) -> (RelayBank<P>, SerialStore<S>) {
        (self.relays, self.serial)
    }
}

/// Why a command had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// The buffer did not decode to a known command.
    Decode(DecodeError),
    /// Relay operand addresses no relay (operand 0).
    NoTarget(u8),
    /// Persisting the serial number failed.
    Storage(StorageError),
}
