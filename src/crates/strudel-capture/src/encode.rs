//! Token compression
//!
//! Turns the ordered event log into compact notation tokens: rapid
//! identical repeats coalesce to `value!count`, held values gain
//! `@duration`, chords render as `[a, b, c]`. The pass is a pure
//! left-to-right fold over the buffer; identical inputs always produce
//! identical tokens.

use crate::config::NotationKey;
use crate::event::CapturedEvent;

/// One compressed unit of output notation
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare value occupying one quantize unit
    Note(String),

    /// `value!count` - identical notes fired in rapid succession.
    /// Repeat notation suppresses duration encoding; downstream consumers
    /// depend on this exact grammar.
    Repeat { value: String, count: usize },

    /// `value@beats` - held until the next event
    Held { value: String, beats: u64 },

    /// `[v1, v2, ...]` in play order, with `@beats` when held
    Chord { values: Vec<String>, beats: Option<u64> },
}

impl Token {
    /// Render this token as Strudel mini notation
    pub fn to_strudel(&self) -> String {
        match self {
            Token::Note(value) => value.clone(),
            Token::Repeat { value, count } => format!("{}!{}", value, count),
            Token::Held { value, beats } => format!("{}@{}", value, beats),
            Token::Chord { values, beats } => {
                let inner = format!("[{}]", values.join(", "));
                match beats {
                    Some(beats) => format!("{}@{}", inner, beats),
                    None => inner,
                }
            }
        }
    }

    pub fn is_chord(&self) -> bool {
        matches!(self, Token::Chord { .. })
    }
}

/// Round a millisecond gap to whole quantize units, never less than 1.
/// A zero resolution clamps to 1 instead of dividing by zero.
pub fn quantize(delta_ms: u64, resolution_ms: u64) -> u64 {
    if resolution_ms == 0 {
        return 1;
    }
    ((delta_ms as f64 / resolution_ms as f64).round() as u64).max(1)
}

/// Compress the event sequence into tokens, left to right.
pub fn compress(events: &[CapturedEvent], key: NotationKey, resolution_ms: u64) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < events.len() {
        let current = &events[i];

        if current.is_chord() {
            // A chord is never coalesced with its neighbours; it only
            // picks up a duration when a later event bounds it.
            let beats = events.get(i + 1).and_then(|next| {
                let beats = quantize(
                    next.time_ms().saturating_sub(current.time_ms()),
                    resolution_ms,
                );
                (beats > 1).then_some(beats)
            });
            tokens.push(Token::Chord {
                values: current.values(key),
                beats,
            });
            i += 1;
            continue;
        }

        // Coalesce identical singles that quantize within one unit of the
        // group start.
        let group_start = current.time_ms();
        let value = current
            .values(key)
            .into_iter()
            .next()
            .unwrap_or_default();
        let mut end = i + 1;
        while let Some(next) = events.get(end) {
            if next.is_chord() || next.values(key) != [value.as_str()] {
                break;
            }
            if quantize(next.time_ms().saturating_sub(group_start), resolution_ms) > 1 {
                break;
            }
            end += 1;
        }
        let count = end - i;

        // Duration is measured from the group start to the next different
        // event; the terminal group never carries one.
        let beats = match events.get(end) {
            Some(next) => quantize(next.time_ms().saturating_sub(group_start), resolution_ms),
            None => 1,
        };

        if count > 1 {
            tokens.push(Token::Repeat { value, count });
        } else if beats > 1 {
            tokens.push(Token::Held { value, beats });
        } else {
            tokens.push(Token::Note(value));
        }
        i = end;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NoteOn;
    use crate::note::midi_note_name;
    use proptest::prelude::*;

    fn single(midi: u8, time_ms: u64) -> CapturedEvent {
        CapturedEvent::Single(NoteOn {
            midi,
            name: midi_note_name(midi),
            velocity: 100,
            time_ms,
            device_name: "Test Keyboard".to_string(),
            device_id: "kbd-1".to_string(),
        })
    }

    fn chord(midis: &[u8], time_ms: u64) -> CapturedEvent {
        let mut event = single(midis[0], time_ms);
        for &midi in &midis[1..] {
            event = event.join(NoteOn {
                midi,
                name: midi_note_name(midi),
                velocity: 100,
                time_ms,
                device_name: "Test Keyboard".to_string(),
                device_id: "kbd-1".to_string(),
            });
        }
        event
    }

    fn render(events: &[CapturedEvent], key: NotationKey, resolution_ms: u64) -> Vec<String> {
        compress(events, key, resolution_ms)
            .iter()
            .map(Token::to_strudel)
            .collect()
    }

    #[test]
    fn test_quantize_floors_at_one() {
        assert_eq!(quantize(0, 500), 1);
        assert_eq!(quantize(250, 500), 1);
        assert_eq!(quantize(500, 500), 1);
        assert_eq!(quantize(750, 500), 2);
        assert_eq!(quantize(1000, 500), 2);
    }

    #[test]
    fn test_quantize_zero_resolution_clamps() {
        assert_eq!(quantize(0, 0), 1);
        assert_eq!(quantize(123456, 0), 1);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(compress(&[], NotationKey::Name, 500).is_empty());
    }

    #[test]
    fn test_lone_note_is_bare() {
        let events = [single(60, 0)];
        assert_eq!(render(&events, NotationKey::Name, 500), vec!["c4"]);
    }

    #[test]
    fn test_rapid_repeats_coalesce() {
        let events = [single(60, 0), single(60, 100), single(60, 200)];
        assert_eq!(render(&events, NotationKey::Name, 500), vec!["c4!3"]);
    }

    #[test]
    fn test_repeat_suppresses_duration() {
        // The repeated group is followed much later by a different note;
        // the group still renders as !2, not @n.
        let events = [single(60, 0), single(60, 100), single(64, 3000)];
        assert_eq!(render(&events, NotationKey::Name, 500), vec!["c4!2", "e4"]);
    }

    #[test]
    fn test_held_note_gets_duration() {
        let events = [single(60, 0), single(64, 1000)];
        assert_eq!(render(&events, NotationKey::Name, 500), vec!["c4@2", "e4"]);
    }

    #[test]
    fn test_terminal_note_never_carries_duration() {
        let events = [single(60, 0), single(64, 500), single(67, 5000)];
        let tokens = render(&events, NotationKey::Name, 500);
        assert_eq!(tokens, vec!["c4", "e4@9", "g4"]);
    }

    #[test]
    fn test_identical_notes_far_apart_do_not_coalesce() {
        let events = [single(60, 0), single(60, 2000)];
        assert_eq!(render(&events, NotationKey::Name, 500), vec!["c4@4", "c4"]);
    }

    #[test]
    fn test_chord_token_joins_with_comma_space() {
        let events = [chord(&[60, 64, 67], 0)];
        assert_eq!(
            render(&events, NotationKey::Name, 500),
            vec!["[c4, e4, g4]"]
        );
    }

    #[test]
    fn test_chord_duration_when_followed() {
        let events = [chord(&[60, 64], 0), single(67, 1000)];
        assert_eq!(
            render(&events, NotationKey::Name, 500),
            vec!["[c4, e4]@2", "g4"]
        );
    }

    #[test]
    fn test_terminal_chord_never_carries_duration() {
        let events = [single(57, 0), chord(&[60, 64], 5000)];
        assert_eq!(
            render(&events, NotationKey::Name, 500),
            vec!["a3@10", "[c4, e4]"]
        );
    }

    #[test]
    fn test_midi_key_renders_numbers() {
        let events = [chord(&[60, 64], 0), single(67, 1000)];
        assert_eq!(
            render(&events, NotationKey::Midi, 500),
            vec!["[60, 64]@2", "67"]
        );
    }

    #[test]
    fn test_repeat_groups_split_on_chord() {
        let events = [single(60, 0), chord(&[60, 64], 100), single(60, 200)];
        assert_eq!(
            render(&events, NotationKey::Name, 500),
            vec!["c4", "[c4, e4]", "c4"]
        );
    }

    proptest! {
        #[test]
        fn prop_quantize_is_at_least_one(delta in 0u64..10_000_000, resolution in 0u64..100_000) {
            prop_assert!(quantize(delta, resolution) >= 1);
        }
    }
}
