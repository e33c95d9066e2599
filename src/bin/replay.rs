//! Offline replay: feed a recorded frame log and optional utterance list
//! through the control core and print every decision it takes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use tracing::info;

use podium::{
    ControlCoreBuilder, Frame, HandSkeleton, MatchOutcome, Point, PodiumConfig, PodiumError,
};

#[derive(Parser, Debug)]
#[command(name = "podium-replay", about = "Replay recorded pose frames and utterances")]
struct Args {
    /// JSON frame log: [{"t": seconds, "hands": [[[x, y], ...21], ...]}]
    #[arg(long)]
    frames: PathBuf,

    /// Optional utterance list, one finalized transcript per line.
    #[arg(long)]
    transcripts: Option<PathBuf>,

    /// Rule file (falls back to built-in rules when unusable).
    #[arg(long, default_value = "rules.json")]
    rules: PathBuf,

    /// Script file (falls back to the demonstration script when unusable).
    #[arg(long, default_value = "script.json")]
    script: PathBuf,

    /// Global cooldown between commands, seconds.
    #[arg(long, default_value_t = 2.0)]
    cooldown: f64,
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    t: f64,
    hands: Vec<Vec<[f32; 2]>>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("replay failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), PodiumError> {
    let config = PodiumConfig {
        rules_path: args.rules.to_string_lossy().to_string(),
        script_path: args.script.to_string_lossy().to_string(),
        cooldown_s: args.cooldown,
        ..PodiumConfig::default()
    };
    let mut core = ControlCoreBuilder::new(config).build()?;

    let frames = load_frames(&args.frames)?;
    info!(count = frames.len(), "replaying frames");
    let mut fired = 0usize;
    for frame in &frames {
        if let Some(command) = core.process_frame(frame) {
            fired += 1;
            println!("t={:8.3}  command  {}", frame.timestamp_s, command.as_str());
        }
    }
    info!(fired, "frame replay complete");

    if let Some(path) = &args.transcripts {
        let data = std::fs::read_to_string(path)
            .map_err(|e| PodiumError::io("read transcript list", e))?;
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            match core.process_transcript(line) {
                MatchOutcome::Matched { index, confidence } => {
                    let pos = core.position();
                    println!(
                        "utterance -> segment {index} (slide {}, confidence {confidence:.2}, {:.0}%)",
                        pos.slide_number, pos.progress_percent
                    );
                }
                MatchOutcome::NoMatch => println!("utterance -> no match"),
            }
        }
    }

    Ok(())
}

fn load_frames(path: &PathBuf) -> Result<Vec<Frame>, PodiumError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| PodiumError::io("read frame log", e))?;
    let records: Vec<FrameRecord> =
        serde_json::from_str(&data).map_err(|e| PodiumError::json("parse frame log", e))?;
    Ok(records
        .into_iter()
        .map(|r| Frame {
            timestamp_s: r.t,
            hands: r
                .hands
                .into_iter()
                .map(|lm| {
                    HandSkeleton::new(lm.into_iter().map(|[x, y]| Point::new(x, y)).collect())
                })
                .collect(),
        })
        .collect())
}
