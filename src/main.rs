mod events;
mod replay;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use strudel_capture::{
    EncoderConfig, ManualClock, MemorySink, MidiDevice, NotationKey, StrudelCoder,
};

use events::EventLog;

#[derive(Parser, Debug)]
#[command(name = "strudel-coder")]
#[command(about = "Replay MIDI performances as Strudel code", long_about = None)]
struct Args {
    /// Path to a MIDI file to replay (default: uses first .mid file in current directory)
    #[arg(short, long)]
    midi: Option<PathBuf>,

    /// Path to a JSON note-event log to replay instead of a MIDI file
    #[arg(short, long, conflicts_with = "midi")]
    events: Option<PathBuf>,

    /// Output file path (default: `<input-name>.strudel`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of file
    #[arg(long)]
    stdout: bool,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,

    /// Duration rounding granularity in milliseconds
    #[arg(long, default_value = "500")]
    quantize: u64,

    /// Maximum gap in milliseconds for notes to merge into one chord
    #[arg(long, default_value = "20")]
    chord_window: u64,

    /// Tempo directive emitted as setcpm(<bpm>)
    #[arg(short, long, default_value = "20")]
    bpm: u32,

    /// Target sound; legacy "name(n)" forms are rewritten to "name:0"
    #[arg(short, long, default_value = "piano")]
    sound: String,

    /// Token style: note names (musical) or raw MIDI numbers (integer)
    #[arg(short, long, value_enum, default_value = "musical")]
    notation: NotationKey,

    /// Capture buffer capacity; the oldest notes are evicted beyond this
    #[arg(long, default_value = "100")]
    max_notes: usize,

    /// Only capture events from this device id ("all" accepts every device)
    #[arg(short, long, default_value = "all")]
    device: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (records, devices, input_path) = if let Some(path) = args.events {
        if !path.exists() {
            anyhow::bail!("Event log not found: {}", path.display());
        }
        let log = EventLog::from_file(&path)?;
        let devices = log.devices();
        (log.records, devices, path)
    } else {
        let path = if let Some(path) = args.midi {
            if !path.exists() {
                anyhow::bail!("MIDI file not found: {}", path.display());
            }
            path
        } else {
            find_first_midi_file()?
        };
        let records = replay::load_midi_events(&path)?;
        let devices = vec![MidiDevice::new(
            replay::MIDI_DEVICE_ID,
            replay::MIDI_DEVICE_NAME,
        )];
        (records, devices, path)
    };

    // Determine output path (use .strudel extension)
    let output_path = if let Some(path) = args.output {
        path
    } else {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        PathBuf::from(format!("{}.strudel", stem))
    };

    if !args.quiet {
        eprintln!(
            "Replaying {} note events from {}",
            records.len(),
            input_path.display()
        );
    }

    let config = EncoderConfig {
        quantize_resolution_ms: args.quantize,
        chord_window_ms: args.chord_window,
        notation_key: args.notation,
        bpm: args.bpm,
        sound: args.sound,
        max_notes: args.max_notes,
    };

    // Drive the capture session through a manual clock so chord grouping
    // and compression behave exactly as they would live.
    let clock = ManualClock::new();
    let mut coder = StrudelCoder::new(
        config,
        Box::new(clock.clone()),
        Box::new(MemorySink::new()),
    );
    coder.update_devices(devices);
    coder.select_device(&args.device);

    for record in &records {
        clock.set(record.time_ms);
        coder.capture_note(
            record.note,
            record.velocity,
            &record.device_name,
            &record.device_id,
        );
    }

    if !args.quiet && coder.captured_len() == 0 {
        eprintln!("Warning: no events passed the device filter");
    }

    let output = coder.notation();

    if args.stdout {
        // Print directly to stdout (clean, no logs)
        println!("{}", output);
    } else {
        fs::write(&output_path, format!("{}\n", output))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        if !args.quiet {
            eprintln!("Output saved to {}", output_path.display());
        }
    }

    Ok(())
}

fn find_first_midi_file() -> Result<PathBuf> {
    let entries = fs::read_dir(".").context("Failed to read current directory")?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) == Some("mid") {
            return Ok(path);
        }
    }

    anyhow::bail!("No MIDI files found in current directory")
}
