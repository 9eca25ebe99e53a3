//! Capture session
//!
//! One `StrudelCoder` per editor target: it owns the buffer, the encoder
//! config, the device registry, and the clock and sink collaborators. The
//! application assembly creates it at startup and drops it at shutdown;
//! there is no global state.

use crate::buffer::NoteCaptureBuffer;
use crate::clock::Clock;
use crate::config::{EncoderConfig, NotationKey};
use crate::device::{DeviceRegistry, MidiDevice};
use crate::notation::render;
use crate::sink::TextSink;

pub struct StrudelCoder {
    buffer: NoteCaptureBuffer,
    config: EncoderConfig,
    devices: DeviceRegistry,
    clock: Box<dyn Clock>,
    sink: Box<dyn TextSink>,
}

impl StrudelCoder {
    pub fn new(config: EncoderConfig, clock: Box<dyn Clock>, sink: Box<dyn TextSink>) -> Self {
        Self {
            buffer: NoteCaptureBuffer::new(config.max_notes),
            devices: DeviceRegistry::new(),
            config,
            clock,
            sink,
        }
    }

    /// Capture a note-on. Notes from devices the filter rejects are
    /// silently dropped; every accepted note re-encodes the buffer and
    /// pushes the result to the sink.
    pub fn capture_note(&mut self, note: u8, velocity: u8, device_name: &str, device_id: &str) {
        if !self.devices.is_allowed(device_name, device_id) {
            return;
        }

        let now_ms = self.clock.now_ms();
        self.buffer.capture(
            note,
            velocity,
            device_name,
            device_id,
            now_ms,
            self.config.chord_window_ms,
        );
        self.emit();
    }

    /// Drop all captured notes and push the empty placeholder notation.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.emit();
    }

    /// Render the current buffer. Pure read: calling this twice without a
    /// mutation in between yields byte-identical output.
    pub fn notation(&self) -> String {
        render(self.buffer.events(), &self.config)
    }

    pub fn captured_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.devices
    }

    pub fn update_devices<I>(&mut self, devices: I)
    where
        I: IntoIterator<Item = MidiDevice>,
    {
        self.devices.update_devices(devices);
    }

    pub fn select_device(&mut self, id: &str) {
        self.devices.select(id);
    }

    /// Tempo changes always re-emit, even over an empty buffer, so the
    /// editor's setcpm line tracks the control immediately.
    pub fn set_bpm(&mut self, bpm: u32) {
        self.config.bpm = bpm;
        self.emit();
    }

    pub fn set_notation_key(&mut self, key: NotationKey) {
        self.config.notation_key = key;
        self.emit_if_captured();
    }

    pub fn set_quantize_resolution(&mut self, resolution_ms: u64) {
        self.config.quantize_resolution_ms = resolution_ms;
        self.emit_if_captured();
    }

    pub fn set_chord_window(&mut self, window_ms: u64) {
        self.config.chord_window_ms = window_ms;
    }

    pub fn set_sound(&mut self, sound: impl Into<String>) {
        self.config.sound = sound.into();
        self.emit_if_captured();
    }

    fn emit_if_captured(&mut self) {
        if !self.buffer.is_empty() {
            self.emit();
        }
    }

    /// Emission failures are reported and swallowed; the buffer is never
    /// touched by this path.
    fn emit(&mut self) {
        let code = self.notation();
        if let Err(err) = self.sink.set_content(&code) {
            eprintln!("Warning: failed to update editor: {}", err);
        }
    }
}
