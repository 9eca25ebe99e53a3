//! Standard MIDI File replay
//!
//! Flattens an SMF into time-ordered note-on records so a recorded
//! performance can be fed through the capture engine as if played live.

use anyhow::{Context, Result};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use std::path::Path;

use crate::events::NoteRecord;

pub const MIDI_DEVICE_NAME: &str = "MIDI File";
pub const MIDI_DEVICE_ID: &str = "midi-file";

pub fn load_midi_events(path: &Path) -> Result<Vec<NoteRecord>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read MIDI file: {}", path.display()))?;

    let smf = Smf::parse(&data).context("Failed to parse MIDI file")?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int() as u32,
        Timing::Timecode(fps, subframe) => {
            // Convert timecode to ticks per beat approximation
            (fps.as_f32() * subframe as f32 * 4.0) as u32
        }
    };

    let tempo = extract_tempo(&smf);

    let mut records = Vec::new();
    for track in &smf.tracks {
        let mut time_ms = 0.0;
        for event in track {
            time_ms += tick_to_ms(event.delta.as_int(), ticks_per_beat, tempo);

            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = event.kind
            {
                // Note-on with zero velocity is a note-off in disguise
                if vel.as_int() > 0 {
                    records.push(NoteRecord {
                        time_ms: time_ms.round() as u64,
                        note: key.as_int(),
                        velocity: vel.as_int(),
                        device_name: MIDI_DEVICE_NAME.to_string(),
                        device_id: MIDI_DEVICE_ID.to_string(),
                    });
                }
            }
        }
    }

    // Tracks are parallel in an SMF; the capture engine expects one
    // arrival-ordered stream.
    records.sort_by_key(|r| r.time_ms);

    Ok(records)
}

fn extract_tempo(smf: &Smf) -> u32 {
    for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = event.kind {
                return tempo.as_int();
            }
        }
    }
    // Default tempo: 120 BPM = 500000 microseconds per beat
    500000
}

fn tick_to_ms(ticks: u32, ticks_per_beat: u32, tempo: u32) -> f64 {
    let ms_per_tick = (tempo as f64 / 1000.0) / ticks_per_beat as f64;
    ticks as f64 * ms_per_tick
}
