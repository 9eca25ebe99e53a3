use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which field of a captured event drives the token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotationKey {
    /// Note names ("c4", "a#3")
    #[value(name = "musical", alias = "name")]
    Name,

    /// Raw MIDI numbers ("60", "57")
    #[value(name = "integer", alias = "midi")]
    Midi,
}

/// Encoder parameters. All fields are caller-supplied and mutable at
/// runtime except `max_notes`, which is consumed when the capture buffer
/// is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Duration rounding granularity in milliseconds
    #[serde(default = "default_quantize_resolution_ms")]
    pub quantize_resolution_ms: u64,

    /// Maximum gap in milliseconds for two events to merge into one chord
    #[serde(default = "default_chord_window_ms")]
    pub chord_window_ms: u64,

    /// Note names vs raw MIDI numbers in the output tokens
    #[serde(default = "default_notation_key")]
    pub notation_key: NotationKey,

    /// Emitted verbatim as `setcpm(<bpm>)`; not used in quantization math
    #[serde(default = "default_bpm")]
    pub bpm: u32,

    /// Target sound; legacy "name(n)" forms are rewritten to "name:0"
    #[serde(default = "default_sound")]
    pub sound: String,

    /// Capture buffer capacity; the oldest event is evicted beyond this
    #[serde(default = "default_max_notes")]
    pub max_notes: usize,
}

fn default_quantize_resolution_ms() -> u64 { 500 }
fn default_chord_window_ms() -> u64 { 20 }
fn default_notation_key() -> NotationKey { NotationKey::Name }
fn default_bpm() -> u32 { 20 }
fn default_sound() -> String { "piano".to_string() }
fn default_max_notes() -> usize { 100 }

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            quantize_resolution_ms: 500,
            chord_window_ms: 20,
            notation_key: NotationKey::Name,
            bpm: 20,
            sound: "piano".to_string(),
            max_notes: 100,
        }
    }
}
