//! Input device registry and capture filter.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Selector id accepting input from every device
pub const ALL_DEVICES: &str = "all";

/// A MIDI input device as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiDevice {
    pub id: String,
    pub name: String,
}

impl MidiDevice {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Known input devices plus the currently selected capture source.
///
/// The registry always lists the synthetic "All Devices" entry first; a
/// selection that disappears on a device-list update falls back to it.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<MidiDevice>,
    selected_id: String,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: vec![MidiDevice::new(ALL_DEVICES, "All Devices")],
            selected_id: ALL_DEVICES.to_string(),
        }
    }

    /// Replace the device list, deduplicating by (name, id). A selected
    /// device that is no longer present resets the selection to "all".
    pub fn update_devices<I>(&mut self, devices: I)
    where
        I: IntoIterator<Item = MidiDevice>,
    {
        let mut unique = vec![MidiDevice::new(ALL_DEVICES, "All Devices")];
        let mut seen = HashSet::new();

        for device in devices {
            let key = format!("{}-{}", device.name, device.id);
            if seen.insert(key) {
                unique.push(device);
            }
        }

        self.devices = unique;

        if self.selected_id != ALL_DEVICES
            && !self.devices.iter().any(|d| d.id == self.selected_id)
        {
            self.selected_id = ALL_DEVICES.to_string();
        }
    }

    pub fn select(&mut self, id: &str) {
        self.selected_id = id.to_string();
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn selected(&self) -> Option<&MidiDevice> {
        self.devices.iter().find(|d| d.id == self.selected_id)
    }

    pub fn devices(&self) -> &[MidiDevice] {
        &self.devices
    }

    /// Capture filter: "all" accepts everything; otherwise the id must
    /// match exactly, with a case-insensitive name-containment fallback in
    /// either direction for hosts that report vendor-prefixed names.
    pub fn is_allowed(&self, device_name: &str, device_id: &str) -> bool {
        if self.selected_id == ALL_DEVICES {
            return true;
        }
        if !device_id.is_empty() && device_id == self.selected_id {
            return true;
        }
        if let Some(selected) = self.selected() {
            if !device_name.is_empty() {
                let name = device_name.to_lowercase();
                let selected_name = selected.name.to_lowercase();
                return name.contains(&selected_name) || selected_name.contains(&name);
            }
        }
        false
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
