use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AlexaError, Result};

/// Body of `GET /api/devices-v2/device`.
#[derive(Debug, Deserialize)]
pub(crate) struct DevicesResponse {
    pub devices: Vec<Device>,
}

/// An Echo (or other Alexa-enabled) device linked to the account.
///
/// Only the name is required to list a device. The identifiers a command
/// needs are checked by [`Device::target`] when the device is addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Human-readable name, e.g. "Kitchen Echo".
    pub account_name: String,
    /// Every other attribute the server reported, kept verbatim (nulls included).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Identifiers a behavior payload is addressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTarget<'a> {
    pub device_type: &'a str,
    pub serial_number: &'a str,
    pub customer_id: &'a str,
}

impl Device {
    pub fn name(&self) -> &str {
        &self.account_name
    }

    /// Look up a raw attribute by its wire name (`accountName`, `softwareVersion`, ...).
    pub fn attribute(&self, name: &str) -> Option<Value> {
        if name == "accountName" {
            return Some(Value::String(self.account_name.clone()));
        }
        self.attributes.get(name).cloned()
    }

    pub fn device_family(&self) -> Option<&str> {
        self.str_attribute("deviceFamily")
    }

    pub fn online(&self) -> Option<bool> {
        self.attributes.get("online").and_then(Value::as_bool)
    }

    /// Resolve the identifiers needed to send this device a command.
    pub fn target(&self) -> Result<CommandTarget<'_>> {
        Ok(CommandTarget {
            device_type: self.required("deviceType")?,
            serial_number: self.required("serialNumber")?,
            customer_id: self.required("deviceOwnerCustomerId")?,
        })
    }

    fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    fn required(&self, name: &str) -> Result<&str> {
        self.str_attribute(name).ok_or_else(|| {
            AlexaError::MalformedResponse(format!(
                "device '{}' has no usable {}",
                self.account_name, name
            ))
        })
    }
}

/// Devices in the order the server listed them. Indexes are 0-based
/// positions in this list and only mean something within the run that
/// fetched it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceList {
    devices: Vec<Device>,
}

impl DeviceList {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Resolve an index, failing with `InvalidIndex` when out of range.
    pub fn get(&self, index: usize) -> Result<&Device> {
        self.devices.get(index).ok_or(AlexaError::InvalidIndex {
            index,
            len: self.devices.len(),
        })
    }

    /// `(index, device)` pairs in server order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Device)> {
        self.devices.iter().enumerate()
    }

    /// One `#.) deviceName` line per device.
    pub fn listing(&self) -> Vec<String> {
        self.iter()
            .map(|(index, device)| format!("{}.) {}", index, device.name()))
            .collect()
    }
}

/// Outcome of a behavior command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResult {
    /// Name of the device the command was sent to.
    pub device: String,
    /// Response body, when the server sent back JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}
