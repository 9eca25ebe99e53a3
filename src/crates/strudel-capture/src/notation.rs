//! Notation rendering
//!
//! Assembles the final editor text: a `setcpm` tempo line, the compressed
//! token body, and the fixed comment padding. The output is parsed
//! verbatim by the downstream editor, so every byte of the layout is part
//! of the contract.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::EncoderConfig;
use crate::encode::{compress, Token};
use crate::event::CapturedEvent;

/// Rewrite the legacy `name(n)` sound form to `name:0`. Names without a
/// parenthesized index pass through unchanged; the index itself is always
/// discarded in favor of `:0`.
pub fn transform_sound_name(sound: &str) -> String {
    static LEGACY_FORM: OnceLock<Regex> = OnceLock::new();
    let legacy = LEGACY_FORM
        .get_or_init(|| Regex::new(r"^(.+)\(\d+\)$").expect("legacy sound pattern is valid"));

    match legacy.captures(sound) {
        Some(captures) => format!("{}:0", &captures[1]),
        None => sound.to_string(),
    }
}

/// Render the full notation for the given buffer contents.
///
/// Pure and deterministic: identical events and config always yield
/// byte-identical output.
pub fn render(events: &[CapturedEvent], config: &EncoderConfig) -> String {
    let cpm_line = format!("setcpm({})", config.bpm);

    if events.is_empty() {
        return format!("{}\n//\n//\n//\n//", cpm_line);
    }

    let tokens = compress(events, config.notation_key, config.quantize_resolution_ms);
    let sound = transform_sound_name(&config.sound);
    let chord_count = tokens.iter().filter(|t| t.is_chord()).count();

    if chord_count > 1 {
        // Multi-chord layout: runs of single notes share a line, every
        // chord stands on its own, continuation lines indent five spaces.
        let body = chord_lines(&tokens)
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                if idx == 0 {
                    line.clone()
                } else {
                    format!("     {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join(" \n");

        format!(
            "{}\n//\nnote(`{}`).sound(\"{}\")\n// \n//",
            cpm_line, body, sound
        )
    } else {
        let body = tokens
            .iter()
            .map(Token::to_strudel)
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "{}\n//\nnote(\"{}\").sound(\"{}\")\n// \n//",
            cpm_line, body, sound
        )
    }
}

fn chord_lines(tokens: &[Token]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut run: Vec<String> = Vec::new();

    for token in tokens {
        if token.is_chord() {
            if !run.is_empty() {
                lines.push(run.join(" "));
                run.clear();
            }
            lines.push(token.to_strudel());
        } else {
            run.push(token.to_strudel());
        }
    }
    if !run.is_empty() {
        lines.push(run.join(" "));
    }

    lines
}
