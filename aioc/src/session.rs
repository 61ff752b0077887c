//! Implements the register session driving a configuration run.

use std::error::Error;

use thiserror::Error;

use crate::{
    channel::FeatureReportChannel,
    frame::{Command, Frame, FrameError, REPORT_ID, REPORT_LENGTH},
    mux::{ButtonSource, PttSource},
    register::{Button, PttLine, Register},
};

/// The identification signature every adapter reports in its magic
/// register, as ASCII bytes in wire order.
pub const MAGIC: [u8; 4] = *b"AIOC";

/// Represents an exclusive register access session with one adapter.
///
/// A fresh session is unidentified: [`Session::identify`] has to succeed
/// before any register operation is accepted. Once [`Session::close`] has
/// been called, the underlying channel is released and every further
/// operation fails with [`SessionError::SessionClosed`].
pub struct Session<C: FeatureReportChannel> {
    /// The underlying feature report channel. Dropped on close.
    channel: Option<C>,

    /// Whether the identification handshake has succeeded.
    identified: bool,
}

impl<C: FeatureReportChannel> Session<C> {
    /// Creates a new, unidentified session taking exclusive ownership of
    /// the given channel.
    pub fn new(channel: C) -> Self {
        Self {
            channel: Some(channel),
            identified: false,
        }
    }

    fn channel(&self) -> Result<&C, SessionError<C::Error>> {
        self.channel.as_ref().ok_or(SessionError::SessionClosed)
    }

    fn identified_channel(&self) -> Result<&C, SessionError<C::Error>> {
        let chan = self.channel()?;
        if !self.identified {
            return Err(SessionError::NotIdentified);
        }
        Ok(chan)
    }

    /// Reads a register value without any session state requirement.
    /// The identification handshake uses this before the session is marked
    /// identified.
    fn read_raw(chan: &C, address: u8) -> Result<u32, SessionError<C::Error>> {
        // Sending the request frame sets the device's internal address
        // pointer and latches the value; the readout is a separate feature
        // report request. Nothing may interleave between the two phases.
        let request = Frame {
            command: Command::empty(),
            address,
            value: 0,
        };
        chan.send_feature_report(&request.encode())?;

        let mut buf = [0u8; REPORT_LENGTH];
        let len = chan.get_feature_report(REPORT_ID, &mut buf)?;

        // Only the value field of the response is meaningful; the command
        // and address fields are ignored.
        let response = Frame::decode(&buf[..len]).map_err(SessionError::Frame)?;
        Ok(response.value)
    }

    /// Performs the identification handshake.
    ///
    /// Reads the magic register and verifies that its value spells out
    /// [`MAGIC`]. On success the session becomes identified and the magic
    /// bytes are returned. On mismatch the session stays unidentified and
    /// configuration must not proceed, since the connected device is not a
    /// recognized adapter.
    pub fn identify(&mut self) -> Result<[u8; 4], SessionError<C::Error>> {
        let chan = self.channel()?;
        let magic = Self::read_raw(chan, Register::Magic.into())?.to_le_bytes();

        if magic != MAGIC {
            return Err(SessionError::UnexpectedMagic(magic));
        }

        self.identified = true;
        Ok(magic)
    }

    /// Reads a single register.
    pub fn read_register(&self, register: Register) -> Result<u32, SessionError<C::Error>> {
        let chan = self.identified_channel()?;
        Self::read_raw(chan, register.into())
    }

    /// Writes a single register in one transaction.
    ///
    /// The value takes effect immediately via the write strobe. No
    /// read-back is implied; callers that need confirmation issue a
    /// separate [`Session::read_register`].
    pub fn write_register(
        &self,
        register: Register,
        value: u32,
    ) -> Result<(), SessionError<C::Error>> {
        let chan = self.identified_channel()?;
        let frame = Frame {
            command: Command::WRITE_STROBE,
            address: register.into(),
            value,
        };
        chan.send_feature_report(&frame.encode())?;
        Ok(())
    }

    /// Sends a device-level command ([`Command::DEFAULTS`],
    /// [`Command::RECALL`] or [`Command::STORE`]).
    ///
    /// The device performs the action asynchronously relative to the USB
    /// acknowledgment and defines no completion signal, so this is fire
    /// and forget.
    pub fn send_command(&self, command: Command) -> Result<(), SessionError<C::Error>> {
        let chan = self.identified_channel()?;
        let frame = Frame {
            command,
            address: 0x00,
            value: 0,
        };
        chan.send_feature_report(&frame.encode())?;
        Ok(())
    }

    /// Reads every known register in ascending address order.
    pub fn dump_all(&self) -> Result<Vec<(Register, u32)>, SessionError<C::Error>> {
        let mut values = Vec::with_capacity(Register::ALL.len());
        for register in Register::ALL {
            values.push((register, self.read_register(register)?));
        }
        Ok(values)
    }

    /// Reads the source set currently keying a PTT output.
    pub fn ptt_source(&self, line: PttLine) -> Result<PttSource, SessionError<C::Error>> {
        Ok(PttSource::from_bits_retain(
            self.read_register(line.register())?,
        ))
    }

    /// Routes a source set to a PTT output.
    pub fn set_ptt_source(
        &self,
        line: PttLine,
        sources: PttSource,
    ) -> Result<(), SessionError<C::Error>> {
        self.write_register(line.register(), sources.bits())
    }

    /// Reads the source set currently driving an emulated CM108 button.
    pub fn button_source(&self, button: Button) -> Result<ButtonSource, SessionError<C::Error>> {
        Ok(ButtonSource::from_bits_retain(
            self.read_register(button.register())?,
        ))
    }

    /// Routes a source set to an emulated CM108 button.
    pub fn set_button_source(
        &self,
        button: Button,
        sources: ButtonSource,
    ) -> Result<(), SessionError<C::Error>> {
        self.write_register(button.register(), sources.bits())
    }

    /// Closes the session and releases the underlying channel.
    ///
    /// Further operations fail with [`SessionError::SessionClosed`].
    pub fn close(&mut self) {
        self.identified = false;
        self.channel = None;
    }
}

/// Represents an error that occurred during a register session.
#[derive(Debug, Error)]
pub enum SessionError<E: Error> {
    /// Indicates that the underlying feature report channel returned an
    /// I/O error. The session never retries on its own.
    #[error("the feature report channel returned an error")]
    Transport(#[from] E),

    /// Indicates that a response could not be decoded as a register access
    /// frame.
    #[error("the response could not be decoded")]
    Frame(#[source] FrameError),

    /// Indicates that the identification register did not spell out the
    /// expected signature and the connected device is not a recognized
    /// adapter.
    #[error("unexpected identification magic {0:02x?}")]
    UnexpectedMagic([u8; 4]),

    /// Indicates that a register operation was invoked before the
    /// identification handshake succeeded.
    #[error("the device has not been identified yet")]
    NotIdentified,

    /// Indicates that an operation was invoked after the session was
    /// closed.
    #[error("the session is closed")]
    SessionClosed,
}
