//! Live MIDI capture to Strudel notation
//!
//! This crate turns a stream of timestamped note-on events into compact
//! Strudel code: near-simultaneous notes group into chords at ingest,
//! rapid repeats coalesce with the replication operator, held notes gain
//! duration suffixes, and the result is pushed to an editor sink after
//! every capture.
//!
//! # Examples
//!
//! ```
//! use strudel_capture::{EncoderConfig, ManualClock, MemorySink, StrudelCoder};
//!
//! let clock = ManualClock::new();
//! let mut coder = StrudelCoder::new(
//!     EncoderConfig::default(),
//!     Box::new(clock.clone()),
//!     Box::new(MemorySink::new()),
//! );
//!
//! coder.capture_note(60, 100, "Test Keyboard", "kbd-1");
//! clock.advance(10);
//! coder.capture_note(64, 90, "Test Keyboard", "kbd-1");
//!
//! assert!(coder.notation().contains("[c4, e4]"));
//! ```
//!
//! # Token grammar
//!
//! - Bare value: `c4`
//! - Rapid repeats: `c4!3`
//! - Held value: `c4@2`
//! - Chord: `[c4, e4, g4]`, optionally `[c4, e4, g4]@2`
//!
//! Values are note names or raw MIDI numbers depending on the configured
//! [`NotationKey`].

pub mod buffer;
pub mod clock;
pub mod config;
pub mod device;
pub mod encode;
pub mod event;
pub mod notation;
pub mod note;
pub mod session;
pub mod sink;

pub use buffer::NoteCaptureBuffer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EncoderConfig, NotationKey};
pub use device::{DeviceRegistry, MidiDevice, ALL_DEVICES};
pub use encode::{compress, quantize, Token};
pub use event::{CapturedEvent, ChordEvent, NoteOn};
pub use notation::{render, transform_sound_name};
pub use note::midi_note_name;
pub use session::StrudelCoder;
pub use sink::{MemorySink, SinkError, TextSink};
