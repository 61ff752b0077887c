//! Implements the feature report transport using the `hidapi` crate.

use aioc::{
    channel::{FeatureReportChannel, PRODUCT_ID, VENDOR_ID},
    session::Session,
};
use anyhow::{Context, Result, anyhow};
use hidapi::{HidApi, HidDevice, HidError};
use serde::Serialize;

/// The USB string descriptors of an adapter, captured at open time.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct DeviceStrings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

/// An exclusively opened adapter handle.
pub struct AiocDevice {
    device: HidDevice,
    strings: DeviceStrings,
}

impl AiocDevice {
    /// Tries to open the first adapter enumerating with the default
    /// vendor and product IDs.
    pub fn open() -> Result<Self> {
        let api = HidApi::new().context("could not initialize hidapi")?;

        let info = api
            .device_list()
            .find(|info| info.vendor_id() == VENDOR_ID && info.product_id() == PRODUCT_ID)
            .ok_or_else(|| {
                anyhow!("no adapter found ({VENDOR_ID:#06x}:{PRODUCT_ID:#06x})")
            })?;

        let device = info
            .open_device(&api)
            .context("could not open the adapter")?;

        Ok(Self {
            strings: DeviceStrings {
                manufacturer: info.manufacturer_string().map(str::to_owned),
                product: info.product_string().map(str::to_owned),
                serial: info.serial_number().map(str::to_owned),
            },
            device,
        })
    }

    /// The USB string descriptors of the opened adapter.
    pub fn strings(&self) -> DeviceStrings {
        self.strings.clone()
    }
}

impl FeatureReportChannel for AiocDevice {
    type Error = HidError;

    fn send_feature_report(&self, data: &[u8]) -> Result<(), HidError> {
        self.device.send_feature_report(data)
    }

    fn get_feature_report(&self, report_id: u8, buf: &mut [u8]) -> Result<usize, HidError> {
        // hidapi expects the requested report ID in the first buffer byte.
        buf[0] = report_id;
        self.device.get_feature_report(buf)
    }
}

/// Opens the adapter, captures its USB strings and performs the
/// identification handshake.
///
/// A device that does not report the expected magic signature aborts the
/// whole run; no configuration command may touch an unrecognized device.
pub fn open_identified() -> Result<(DeviceStrings, Session<AiocDevice>)> {
    let device = AiocDevice::open()?;
    let strings = device.strings();

    let mut session = Session::new(device);
    session
        .identify()
        .context("device identification failed")?;

    Ok((strings, session))
}
