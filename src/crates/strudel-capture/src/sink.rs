//! Notation output sink.
//!
//! The editor binding is a single explicit adapter: it accepts a complete
//! replacement string, nothing else. Implementations exist once per actual
//! target editor.

use thiserror::Error;

/// Failure writing to the editor target. Never fatal to the session.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Receives the full notation text after every successful capture or
/// clear. Implementations must not call back into the capture session.
pub trait TextSink {
    fn set_content(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Sink that keeps the latest notation in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    content: String,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl TextSink for MemorySink {
    fn set_content(&mut self, text: &str) -> Result<(), SinkError> {
        self.content.clear();
        self.content.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_replaces_content() {
        let mut sink = MemorySink::new();
        sink.set_content("first").unwrap();
        sink.set_content("second").unwrap();
        assert_eq!(sink.content(), "second");
    }
}
