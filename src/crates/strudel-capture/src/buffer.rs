//! Bounded, time-ordered log of captured note and chord events.

use crate::event::{CapturedEvent, NoteOn};
use crate::note::midi_note_name;

/// Default capture buffer capacity
pub const DEFAULT_CAPACITY: usize = 100;

/// Ordered log of incoming note-on events with relative timestamps.
///
/// Chord grouping happens here, at ingest time: a note arriving within the
/// chord window of the last entry merges into it instead of appending.
/// Beyond `capacity` the oldest event is evicted and the time origin is
/// re-anchored so the surviving oldest event sits at relative time 0.
#[derive(Debug)]
pub struct NoteCaptureBuffer {
    events: Vec<CapturedEvent>,
    origin_ms: Option<u64>,
    capacity: usize,
}

impl NoteCaptureBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            origin_ms: None,
            capacity,
        }
    }

    /// Ingest one note-on. `now_ms` comes from the session's clock; the
    /// caller has already applied the device filter.
    pub fn capture(
        &mut self,
        midi: u8,
        velocity: u8,
        device_name: &str,
        device_id: &str,
        now_ms: u64,
        chord_window_ms: u64,
    ) {
        let relative_ms = if self.events.is_empty() {
            self.origin_ms = Some(now_ms);
            0
        } else {
            now_ms.saturating_sub(self.origin_ms.unwrap_or(now_ms))
        };

        let note = NoteOn {
            midi,
            name: midi_note_name(midi),
            velocity,
            time_ms: relative_ms,
            device_name: device_name.to_string(),
            device_id: device_id.to_string(),
        };

        // Relative times are nondecreasing, so any entry within the chord
        // window implies the last entry is too; only the last is checked.
        let joins_last = self
            .events
            .last()
            .is_some_and(|last| last.time_ms().abs_diff(relative_ms) <= chord_window_ms);

        if joins_last {
            if let Some(last) = self.events.pop() {
                self.events.push(last.join(note));
            }
        } else {
            self.events.push(CapturedEvent::Single(note));
        }

        if self.events.len() > self.capacity {
            self.events.remove(0);
            self.rebase();
        }
    }

    /// Empty the buffer and unset the time origin.
    pub fn clear(&mut self) {
        self.events.clear();
        self.origin_ms = None;
    }

    pub fn events(&self) -> &[CapturedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shift stored times so the oldest event reads 0 again, advancing the
    /// origin by the same amount so future captures stay consistent.
    fn rebase(&mut self) {
        let Some(first) = self.events.first() else {
            self.origin_ms = None;
            return;
        };
        let shift = first.time_ms();
        if shift == 0 {
            return;
        }
        for event in &mut self.events {
            event.shift_earlier(shift);
        }
        if let Some(origin) = &mut self.origin_ms {
            *origin += shift;
        }
    }
}

impl Default for NoteCaptureBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
