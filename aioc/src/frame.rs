//! Implements the fixed-size feature report frame every register
//! transaction is carried in.

use bitflags::bitflags;
use thiserror::Error;

/// The HID report ID used for all register access feature reports.
pub const REPORT_ID: u8 = 0x00;

/// The exact length of every request and response frame, report ID byte
/// included. The length never varies.
pub const REPORT_LENGTH: usize = 7;

bitflags! {
    /// The command byte sent as part of every frame.
    ///
    /// Bits combine freely. A plain register read carries no bits at all,
    /// [`Command::WRITE_STROBE`] commits the value field of the same frame,
    /// and the remaining bits trigger device-level actions that ignore the
    /// address and value fields of their frame entirely.
    #[repr(transparent)]
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Command: u8 {
        /// Commit the value field to the addressed register on this
        /// transaction.
        const WRITE_STROBE = 0x01;

        /// Reinitialize the register file with the factory defaults.
        const DEFAULTS = 0x10;

        /// Reload the register file from the non-volatile store.
        const RECALL = 0x40;

        /// Persist the current register file to the non-volatile store.
        const STORE = 0x80;
    }
}

/// Represents a single register access frame.
///
/// Requests and responses share this exact layout. In a response only the
/// value field carries meaning; the command and address fields echo the
/// request or are left to the device.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Frame {
    /// The command bits of the transaction.
    pub command: Command,

    /// The one-byte register address.
    pub address: u8,

    /// The 32-bit register value. Zero for reads and device-level
    /// commands.
    pub value: u32,
}

impl Frame {
    /// Encodes the frame into its raw wire form:
    /// `[report ID, command, address, value as little-endian u32]`.
    pub fn encode(&self) -> [u8; REPORT_LENGTH] {
        let mut raw = [0u8; REPORT_LENGTH];
        raw[0] = REPORT_ID;
        raw[1] = self.command.bits();
        raw[2] = self.address;
        raw[3..].copy_from_slice(&self.value.to_le_bytes());
        raw
    }

    /// Tries to decode a frame from its raw wire form.
    ///
    /// Command bits this crate does not know about are retained, so
    /// re-encoding a decoded frame reproduces the original command byte.
    /// Whether an address/command pairing is legal is decided by the
    /// device, not here.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        if raw.len() != REPORT_LENGTH {
            return Err(FrameError::MalformedFrame(raw.len()));
        }

        Ok(Self {
            command: Command::from_bits_retain(raw[1]),
            address: raw[2],
            value: u32::from_le_bytes(raw[3..].try_into().unwrap()),
        })
    }
}

/// Represents an error caused by a malformed register access frame.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Indicates that a received byte sequence does not have the fixed
    /// frame length. This usually means the transport and the device are
    /// desynchronized.
    #[error("expected a frame of exactly {REPORT_LENGTH} bytes, got {0}")]
    MalformedFrame(usize),
}
