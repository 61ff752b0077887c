//! An implementation of the register configuration protocol spoken by AIOC
//! ([All-In-One-Cable](https://github.com/skuep/AIOC)) radio interface
//! adapters.
//!
//! The AIOC is a small USB adapter that connects a handheld radio to a
//! computer as a soundcard, a serial port and a CM108-style HID device.
//! Which signal keys the transmitter (PTT) and which inputs drive the
//! emulated CM108 buttons is not fixed: the firmware routes them through a
//! set of multiplexer registers that live in an internal register file.
//!
//! This crate implements the register access protocol layered on top of HID
//! feature reports, not the underlying HID communication, which is left to
//! an external crate of your choice. The trait used for bridging your HID
//! implementation to this crate is [`channel::FeatureReportChannel`], so
//! make sure to provide an implementation for it. The crate primarily used
//! while testing and developing is [`hidapi`](https://docs.rs/hidapi),
//! whose `HidDevice` maps onto the trait directly.
//!
//! # Quickstart
//!
//! ```ignore
//! use aioc::{frame::Command, register::PttLine, session::Session};
//!
//! // `my_channel` is your implementation of `FeatureReportChannel`,
//! // usually wrapping an exclusively opened HID device handle.
//! let mut session = Session::new(my_channel);
//!
//! // Every session starts with the identification handshake. If the
//! // connected device does not report the expected magic signature, no
//! // register operation will be accepted.
//! let magic = session.identify()?;
//! println!("magic: {}", magic.escape_ascii());
//!
//! // Read and reroute the primary PTT output.
//! let sources = session.ptt_source(PttLine::Ptt1)?;
//! println!("PTT1 is keyed by {sources}");
//! session.set_ptt_source(PttLine::Ptt1, aioc::mux::PttSource::SERIAL_RTS)?;
//!
//! // Changes are live immediately but lost on power cycle unless they are
//! // committed to the non-volatile store.
//! session.send_command(Command::STORE)?;
//! ```

pub mod channel;
pub mod frame;
pub mod mux;
pub mod register;
pub mod session;
