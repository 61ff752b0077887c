//! Implements the signal source sets routed by the PTT and CM108 button
//! multiplexers.
//!
//! Both register kinds are open bitmasks: the firmware ORs every routed
//! source onto the output, and an empty set means nothing is routed. Bits
//! this crate does not know about are carried along unchanged, so reading
//! and re-writing a register never drops a routing a newer firmware may
//! define.

use std::{fmt, str::FromStr};

use bitflags::{bitflags, parser};

bitflags! {
    /// The set of signal sources keying a PTT output.
    #[repr(transparent)]
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct PttSource: u32 {
        /// CM108 GPIO 1 output state.
        const CM108_GPIO1 = 0x0000_0001;

        /// CM108 GPIO 2 output state.
        const CM108_GPIO2 = 0x0000_0002;

        /// CM108 GPIO 3 output state.
        const CM108_GPIO3 = 0x0000_0004;

        /// CM108 GPIO 4 output state.
        const CM108_GPIO4 = 0x0000_0008;

        /// The serial DTR line.
        const SERIAL_DTR = 0x0000_0100;

        /// The serial RTS line.
        const SERIAL_RTS = 0x0000_0200;

        /// DTR asserted while RTS is not.
        const SERIAL_DTR_NRTS = 0x0000_0400;

        /// RTS asserted while DTR is not.
        const SERIAL_NDTR_RTS = 0x0000_0800;

        /// The virtual PTT derived from outgoing audio level.
        const VPTT = 0x0000_1000;
    }
}

bitflags! {
    /// The set of signal sources driving an emulated CM108 button.
    #[repr(transparent)]
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct ButtonSource: u32 {
        /// Hardware input 1.
        const IN1 = 0x0001_0000;

        /// Hardware input 2.
        const IN2 = 0x0002_0000;

        /// The virtual COS derived from incoming audio level.
        const VCOS = 0x0100_0000;
    }
}

impl PttSource {
    /// The bits of the set that do not belong to any source known to this
    /// crate.
    pub fn residue(self) -> u32 {
        self.bits() & !Self::all().bits()
    }
}

impl ButtonSource {
    /// The bits of the set that do not belong to any source known to this
    /// crate.
    pub fn residue(self) -> u32 {
        self.bits() & !Self::all().bits()
    }
}

impl fmt::Display for PttSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        parser::to_writer(self, f)
    }
}

impl fmt::Display for ButtonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        parser::to_writer(self, f)
    }
}

impl FromStr for PttSource {
    type Err = parser::ParseError;

    /// Parses a `|`-separated list of source names, e.g.
    /// `SERIAL_RTS | CM108_GPIO3`. Unknown bits are accepted as hex
    /// literals; `NONE` or an empty string yields the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(Self::empty());
        }
        parser::from_str(s)
    }
}

impl FromStr for ButtonSource {
    type Err = parser::ParseError;

    /// Parses a `|`-separated list of source names, e.g. `IN2 | VCOS`.
    /// Unknown bits are accepted as hex literals; `NONE` or an empty
    /// string yields the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(Self::empty());
        }
        parser::from_str(s)
    }
}
