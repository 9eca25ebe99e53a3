//! JSON note-event log input
//!
//! A log is an array of note-on records with absolute millisecond
//! timestamps, in arrival order:
//!
//! ```json
//! [
//!   { "time_ms": 0, "note": 60, "velocity": 100 },
//!   { "time_ms": 12, "note": 64, "velocity": 90, "device_name": "Keystation", "device_id": "kbd-1" }
//! ]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use strudel_capture::MidiDevice;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    pub time_ms: u64,
    pub note: u8,
    pub velocity: u8,

    #[serde(default = "default_device_name")]
    pub device_name: String,

    #[serde(default = "default_device_id")]
    pub device_id: String,
}

fn default_device_name() -> String { "Event Log".to_string() }
fn default_device_id() -> String { "event-log".to_string() }

#[derive(Debug)]
pub struct EventLog {
    pub records: Vec<NoteRecord>,
}

impl EventLog {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read event log: {}", path.display()))?;

        let records: Vec<NoteRecord> = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse event log: {}", path.display()))?;

        Ok(Self { records })
    }

    /// Unique (id, name) pairs for seeding the device registry
    pub fn devices(&self) -> Vec<MidiDevice> {
        let mut devices: Vec<MidiDevice> = Vec::new();
        for record in &self.records {
            let device = MidiDevice::new(record.device_id.clone(), record.device_name.clone());
            if !devices.contains(&device) {
                devices.push(device);
            }
        }
        devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record: NoteRecord =
            serde_json::from_str(r#"{"time_ms": 5, "note": 60, "velocity": 100}"#).unwrap();
        assert_eq!(record.device_name, "Event Log");
        assert_eq!(record.device_id, "event-log");
    }

    #[test]
    fn test_devices_deduplicate() {
        let records: Vec<NoteRecord> = serde_json::from_str(
            r#"[
                {"time_ms": 0, "note": 60, "velocity": 100, "device_name": "A", "device_id": "a"},
                {"time_ms": 10, "note": 62, "velocity": 100, "device_name": "A", "device_id": "a"},
                {"time_ms": 20, "note": 64, "velocity": 100, "device_name": "B", "device_id": "b"}
            ]"#,
        )
        .unwrap();
        let log = EventLog { records };

        let devices = log.devices();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "a");
        assert_eq!(devices[1].id, "b");
    }
}
