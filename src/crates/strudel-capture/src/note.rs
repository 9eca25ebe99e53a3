/// Lowest MIDI note with a name in the capture table ("a0").
pub const LOWEST_NAMED_NOTE: u8 = 21;

/// Highest MIDI note with a name in the capture table ("c6").
pub const HIGHEST_NAMED_NOTE: u8 = 84;

/// Convert a MIDI note number to its notation name (e.g., "c4", "g#5").
///
/// Notes outside the named table degrade to a synthetic `n<midi>` name
/// rather than failing.
pub fn midi_note_name(note: u8) -> String {
    const NOTE_NAMES: [&str; 12] = [
        "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b"
    ];

    if !(LOWEST_NAMED_NOTE..=HIGHEST_NAMED_NOTE).contains(&note) {
        return format!("n{}", note);
    }

    let note_name = NOTE_NAMES[(note % 12) as usize];
    let octave = (note / 12) as i32 - 1;

    format!("{}{}", note_name, octave)
}
