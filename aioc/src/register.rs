//! Implements the device-defined register catalog.
//!
//! The catalog is fixed by the firmware; addresses are constants and never
//! computed. An address outside this set is a programming error, not a
//! runtime condition.

use std::collections::HashMap;

use lazy_static::lazy_static;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Represents a register of the adapter's internal register file.
///
/// Every register holds a 32-bit value, even where the firmware only uses
/// a few of its bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Register {
    /// The identification register. Reads as the ASCII bytes `AIOC` on a
    /// genuine device; see [`crate::session::MAGIC`].
    Magic = 0x00,

    /// The USB identity override: vendor ID in the low half, product ID in
    /// the high half. Writing this changes the IDs the adapter enumerates
    /// with on the next replug.
    UsbId = 0x08,

    /// Source selection for the primary PTT output.
    AiocIomux0 = 0x24,

    /// Source selection for the secondary PTT output.
    AiocIomux1 = 0x25,

    /// Source selection for emulated CM108 button 1 (volume up).
    Cm108Iomux0 = 0x44,

    /// Source selection for emulated CM108 button 2 (volume down).
    Cm108Iomux1 = 0x45,

    /// Source selection for emulated CM108 button 3 (playback mute).
    Cm108Iomux2 = 0x46,

    /// Source selection for emulated CM108 button 4 (record mute).
    Cm108Iomux3 = 0x47,

    /// Serial interface control bits.
    SerialCtrl = 0x60,

    /// Source selection for serial status line 0.
    SerialIomux0 = 0x64,

    /// Source selection for serial status line 1.
    SerialIomux1 = 0x65,

    /// Source selection for serial status line 2.
    SerialIomux2 = 0x66,

    /// Source selection for serial status line 3.
    SerialIomux3 = 0x67,

    /// Audio level threshold for the virtual PTT.
    VpttLvlCtrl = 0x82,

    /// Tail timing for the virtual PTT.
    VpttTimCtrl = 0x84,

    /// Audio level threshold for the virtual COS.
    VcosLvlCtrl = 0x92,

    /// Timing control for the virtual COS.
    VcosTimCtrl = 0x94,
}

impl Register {
    /// All known registers in ascending address order.
    pub const ALL: [Register; 17] = [
        Register::Magic,
        Register::UsbId,
        Register::AiocIomux0,
        Register::AiocIomux1,
        Register::Cm108Iomux0,
        Register::Cm108Iomux1,
        Register::Cm108Iomux2,
        Register::Cm108Iomux3,
        Register::SerialCtrl,
        Register::SerialIomux0,
        Register::SerialIomux1,
        Register::SerialIomux2,
        Register::SerialIomux3,
        Register::VpttLvlCtrl,
        Register::VpttTimCtrl,
        Register::VcosLvlCtrl,
        Register::VcosTimCtrl,
    ];

    /// The name of the register as used by the firmware sources.
    pub fn name(self) -> &'static str {
        match self {
            Register::Magic => "MAGIC",
            Register::UsbId => "USBID",
            Register::AiocIomux0 => "AIOC_IOMUX0",
            Register::AiocIomux1 => "AIOC_IOMUX1",
            Register::Cm108Iomux0 => "CM108_IOMUX0",
            Register::Cm108Iomux1 => "CM108_IOMUX1",
            Register::Cm108Iomux2 => "CM108_IOMUX2",
            Register::Cm108Iomux3 => "CM108_IOMUX3",
            Register::SerialCtrl => "SERIAL_CTRL",
            Register::SerialIomux0 => "SERIAL_IOMUX0",
            Register::SerialIomux1 => "SERIAL_IOMUX1",
            Register::SerialIomux2 => "SERIAL_IOMUX2",
            Register::SerialIomux3 => "SERIAL_IOMUX3",
            Register::VpttLvlCtrl => "VPTT_LVLCTRL",
            Register::VpttTimCtrl => "VPTT_TIMCTRL",
            Register::VcosLvlCtrl => "VCOS_LVLCTRL",
            Register::VcosTimCtrl => "VCOS_TIMCTRL",
        }
    }

    /// Classifies the register into its semantic group.
    pub fn group(self) -> RegisterGroup {
        match self {
            Register::Magic => RegisterGroup::Identification,
            Register::UsbId => RegisterGroup::UsbIdentity,
            Register::AiocIomux0 | Register::AiocIomux1 => RegisterGroup::PttMux,
            Register::Cm108Iomux0
            | Register::Cm108Iomux1
            | Register::Cm108Iomux2
            | Register::Cm108Iomux3 => RegisterGroup::ButtonMux,
            Register::SerialCtrl => RegisterGroup::SerialControl,
            Register::SerialIomux0
            | Register::SerialIomux1
            | Register::SerialIomux2
            | Register::SerialIomux3 => RegisterGroup::SerialMux,
            Register::VpttLvlCtrl
            | Register::VpttTimCtrl
            | Register::VcosLvlCtrl
            | Register::VcosTimCtrl => RegisterGroup::LevelTiming,
        }
    }
}

/// Represents the semantic group a register belongs to.
///
/// Groups only route values to the right presentation and flag codecs;
/// they carry no behavior of their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RegisterGroup {
    Identification,
    UsbIdentity,
    PttMux,
    ButtonMux,
    SerialControl,
    SerialMux,
    LevelTiming,
}

/// Represents one of the two physical PTT outputs of the adapter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PttLine {
    Ptt1,
    Ptt2,
}

impl PttLine {
    /// The multiplexer register routing this output.
    pub fn register(self) -> Register {
        match self {
            PttLine::Ptt1 => Register::AiocIomux0,
            PttLine::Ptt2 => Register::AiocIomux1,
        }
    }
}

/// Represents one of the four buttons of the emulated CM108 soundcard.
///
/// The names follow the CM108 datasheet; host software such as AX.25 stacks
/// typically repurposes them as channel state inputs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Button {
    VolumeUp,
    VolumeDown,
    PlaybackMute,
    RecordMute,
}

impl Button {
    /// The multiplexer register routing this button.
    pub fn register(self) -> Register {
        match self {
            Button::VolumeUp => Register::Cm108Iomux0,
            Button::VolumeDown => Register::Cm108Iomux1,
            Button::PlaybackMute => Register::Cm108Iomux2,
            Button::RecordMute => Register::Cm108Iomux3,
        }
    }
}

/// Represents a well-known register for presentation purposes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct KnownRegister {
    /// The register itself.
    pub register: Register,

    /// The name of the register as used by the firmware sources.
    pub name: &'static str,

    /// The semantic group the register belongs to.
    pub group: RegisterGroup,
}

/// Looks up a register by its raw address.
///
/// Returns [`None`] for addresses outside the catalog.
pub fn lookup(address: u8) -> Option<KnownRegister> {
    KNOWN_REGISTERS.get(&address).copied()
}

lazy_static! {
    static ref KNOWN_REGISTERS: HashMap<u8, KnownRegister> = Register::ALL
        .into_iter()
        .map(|register| {
            (register.into(), KnownRegister {
                register,
                name: register.name(),
                group: register.group(),
            })
        })
        .collect();
}
