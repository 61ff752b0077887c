//! Defines the transport seam the register protocol runs on.
//!
//! Device discovery, opening and closing are left to the implementor; the
//! protocol only ever sees an already opened channel.

use std::error::Error;

/// The USB vendor ID an unconfigured adapter enumerates with.
///
/// This is only used to locate the physical device and is not part of the
/// register protocol itself. Note that the [`crate::register::Register::UsbId`]
/// register can change the IDs a device enumerates with.
pub const VENDOR_ID: u16 = 0x1209;

/// The USB product ID an unconfigured adapter enumerates with.
pub const PRODUCT_ID: u16 = 0x7388;

/// Represents a HID feature report channel to an opened adapter.
///
/// Any type this trait is implemented for can drive a
/// [`crate::session::Session`]. The protocol is a strict synchronous
/// request/response sequence of bounded control transfers, so the trait is
/// blocking by design.
///
/// The channel must be exclusively owned by one session: a register read is
/// a two-phase sequence and a racing writer could move the device's
/// internal address pointer between the phases, corrupting the result.
pub trait FeatureReportChannel {
    /// An implementation-specific error type.
    type Error: Error;

    /// Sends a feature report across the channel. `data` starts with the
    /// report ID byte.
    fn send_feature_report(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads a feature report for the given report ID into `buf`.
    ///
    /// Returns the exact amount of read bytes on success.
    fn get_feature_report(&self, report_id: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
