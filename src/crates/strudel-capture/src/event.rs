//! Captured event types
//!
//! A buffer entry is either a lone note or a chord grouped at ingest time.
//! Chord membership is decided once, when the note arrives; the encoder
//! never regroups.

use serde::{Deserialize, Serialize};

use crate::config::NotationKey;

/// A single captured note-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteOn {
    pub midi: u8,
    pub name: String,
    pub velocity: u8,
    /// Milliseconds since the buffer's time origin; the first captured
    /// event is always 0.
    pub time_ms: u64,
    pub device_name: String,
    pub device_id: String,
}

/// Notes played close enough together to count as simultaneous.
/// Insertion order is play order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEvent {
    pub midis: Vec<u8>,
    pub names: Vec<String>,
    /// Highest velocity among the constituent notes
    pub velocity: u8,
    /// Anchored at the first constituent's time
    pub time_ms: u64,
    pub device_name: String,
    pub device_id: String,
}

/// One entry in the capture buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CapturedEvent {
    Single(NoteOn),
    Chord(ChordEvent),
}

impl NoteOn {
    /// Token text for this note under the given notation key
    pub fn value(&self, key: NotationKey) -> String {
        match key {
            NotationKey::Name => self.name.clone(),
            NotationKey::Midi => self.midi.to_string(),
        }
    }
}

impl CapturedEvent {
    pub fn time_ms(&self) -> u64 {
        match self {
            CapturedEvent::Single(note) => note.time_ms,
            CapturedEvent::Chord(chord) => chord.time_ms,
        }
    }

    pub fn velocity(&self) -> u8 {
        match self {
            CapturedEvent::Single(note) => note.velocity,
            CapturedEvent::Chord(chord) => chord.velocity,
        }
    }

    pub fn is_chord(&self) -> bool {
        matches!(self, CapturedEvent::Chord(_))
    }

    /// Token values for this event under the given notation key, in play
    /// order (length 1 for a single note).
    pub fn values(&self, key: NotationKey) -> Vec<String> {
        match self {
            CapturedEvent::Single(note) => vec![note.value(key)],
            CapturedEvent::Chord(chord) => match key {
                NotationKey::Name => chord.names.clone(),
                NotationKey::Midi => chord.midis.iter().map(|m| m.to_string()).collect(),
            },
        }
    }

    /// Merge a new note into this event: `Single -> Chord` creates a
    /// two-note chord anchored at the single's time, `Chord -> Chord`
    /// appends. Velocity becomes the maximum of the constituents.
    pub(crate) fn join(self, note: NoteOn) -> CapturedEvent {
        match self {
            CapturedEvent::Single(first) => CapturedEvent::Chord(ChordEvent {
                midis: vec![first.midi, note.midi],
                names: vec![first.name, note.name],
                velocity: first.velocity.max(note.velocity),
                time_ms: first.time_ms,
                device_name: note.device_name,
                device_id: note.device_id,
            }),
            CapturedEvent::Chord(mut chord) => {
                chord.midis.push(note.midi);
                chord.names.push(note.name);
                chord.velocity = chord.velocity.max(note.velocity);
                CapturedEvent::Chord(chord)
            }
        }
    }

    /// Rebase this event's time after an eviction re-anchor
    pub(crate) fn shift_earlier(&mut self, delta_ms: u64) {
        match self {
            CapturedEvent::Single(note) => note.time_ms = note.time_ms.saturating_sub(delta_ms),
            CapturedEvent::Chord(chord) => chord.time_ms = chord.time_ms.saturating_sub(delta_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(midi: u8, name: &str, velocity: u8, time_ms: u64) -> NoteOn {
        NoteOn {
            midi,
            name: name.to_string(),
            velocity,
            time_ms,
            device_name: "Test Keyboard".to_string(),
            device_id: "kbd-1".to_string(),
        }
    }

    #[test]
    fn test_single_to_chord_keeps_anchor_time() {
        let first = CapturedEvent::Single(note(60, "c4", 80, 1500));
        let joined = first.join(note(64, "e4", 100, 1510));

        match joined {
            CapturedEvent::Chord(chord) => {
                assert_eq!(chord.midis, vec![60, 64]);
                assert_eq!(chord.names, vec!["c4", "e4"]);
                assert_eq!(chord.velocity, 100);
                assert_eq!(chord.time_ms, 1500);
            }
            CapturedEvent::Single(_) => panic!("expected chord"),
        }
    }

    #[test]
    fn test_chord_extend_preserves_play_order() {
        let chord = CapturedEvent::Single(note(60, "c4", 90, 0))
            .join(note(64, "e4", 70, 5))
            .join(note(67, "g4", 85, 12));

        assert!(chord.is_chord());
        assert_eq!(
            chord.values(NotationKey::Name),
            vec!["c4", "e4", "g4"]
        );
        assert_eq!(chord.velocity(), 90);
        assert_eq!(chord.time_ms(), 0);
    }

    #[test]
    fn test_values_by_key() {
        let single = CapturedEvent::Single(note(57, "a3", 64, 0));
        assert_eq!(single.values(NotationKey::Name), vec!["a3"]);
        assert_eq!(single.values(NotationKey::Midi), vec!["57"]);

        let chord = single.join(note(60, "c4", 64, 3));
        assert_eq!(chord.values(NotationKey::Midi), vec!["57", "60"]);
    }

    #[test]
    fn test_shift_earlier_saturates() {
        let mut event = CapturedEvent::Single(note(60, "c4", 64, 100));
        event.shift_earlier(250);
        assert_eq!(event.time_ms(), 0);
    }
}
